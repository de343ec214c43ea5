//! Textures, frames, sequences and the manifest-driven resource cache.

pub(crate) mod loader;
pub(crate) mod manifest;
pub(crate) mod store;
