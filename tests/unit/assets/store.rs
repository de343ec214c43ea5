use std::cell::Cell;

use super::*;

struct CountingLoader {
    calls: Cell<usize>,
}

impl ResourceLoader for CountingLoader {
    fn load_texture(&self, path: &Path) -> TableauResult<Texture> {
        self.calls.set(self.calls.get() + 1);
        if path.to_string_lossy().contains("missing") {
            return Err(TableauError::resource("not found"));
        }
        Ok(Texture::new(path.to_string_lossy(), 64, 32))
    }
}

fn loader() -> CountingLoader {
    CountingLoader {
        calls: Cell::new(0),
    }
}

#[test]
fn textures_are_cached_by_path() {
    let loader = loader();
    let mut cache = ResourceCache::new();
    let a = cache.texture(&loader, Path::new("img/hero.png")).unwrap();
    let b = cache.texture(&loader, Path::new("img\\hero.png")).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(loader.calls.get(), 1);
    assert_eq!(cache.texture_count(), 1);
}

#[test]
fn grid_slices_row_major_with_padding() {
    let texture = Arc::new(Texture::new("sheet.png", 100, 50));
    let seq = FrameSequence::from_grid(texture, 2, 3, 5.0, 10.0).unwrap();
    assert_eq!(seq.len(), 6);
    // width = (100 - 2*5)/3 = 30, height = (50 - 1*10)/2 = 20
    assert_eq!(seq.frames()[0].crop(), Rect::new(0.0, 0.0, 30.0, 20.0));
    assert_eq!(seq.frames()[1].crop(), Rect::new(35.0, 0.0, 65.0, 20.0));
    assert_eq!(seq.frames()[3].crop(), Rect::new(0.0, 30.0, 30.0, 50.0));
}

#[test]
fn grid_rejects_degenerate_layouts() {
    let texture = Arc::new(Texture::new("sheet.png", 10, 10));
    assert!(FrameSequence::from_grid(texture.clone(), 0, 2, 0.0, 0.0).is_err());
    assert!(FrameSequence::from_grid(texture, 1, 3, 10.0, 0.0).is_err());
}

#[test]
fn sequences_skip_unloadable_files() {
    let loader = loader();
    let mut cache = ResourceCache::new();
    let seq = cache
        .load_sequence(
            &loader,
            "walk",
            &[PathBuf::from("a.png"), PathBuf::from("missing.png")],
        )
        .unwrap();
    assert_eq!(seq.len(), 1);
    assert!(cache.sequence("walk").is_some());
    assert!(cache.frame("walk").is_none());

    let err = cache
        .load_sequence(&loader, "none", &[PathBuf::from("missing.png")])
        .unwrap_err();
    assert!(matches!(err, TableauError::Resource(_)));
}

#[test]
fn clear_drops_everything() {
    let loader = loader();
    let mut cache = ResourceCache::new();
    cache.load_frame(&loader, "bg", Path::new("bg.png")).unwrap();
    assert_eq!(cache.object_ids(), vec!["bg"]);
    assert!(cache.remove("bg"));
    assert!(!cache.remove("bg"));
    cache.load_frame(&loader, "bg", Path::new("bg.png")).unwrap();
    cache.clear();
    assert!(cache.object_ids().is_empty());
    assert_eq!(cache.texture_count(), 0);
}
