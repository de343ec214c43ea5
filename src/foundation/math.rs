use xxhash_rust::xxh3::xxh3_64;

/// Hash used for fast name comparisons on nodes, actions, and tasks.
///
/// Equal hashes do not imply equal names; callers compare the strings after a hash match.
pub(crate) fn name_hash(name: &str) -> u64 {
    xxh3_64(name.as_bytes())
}

/// Hash of a normalized resource path, used as the texture cache key.
pub(crate) fn path_hash(path: &str) -> u64 {
    xxh3_64(path.replace('\\', "/").as_bytes())
}

pub(crate) fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

pub(crate) fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}
