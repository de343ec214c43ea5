use std::path::{Path, PathBuf};

use crate::assets::store::{FontCollection, Texture};
use crate::foundation::error::{TableauError, TableauResult};

/// Resource decoding collaborator.
pub trait ResourceLoader {
    /// Read enough of `path` to describe it as a texture.
    fn load_texture(&self, path: &Path) -> TableauResult<Texture>;

    /// Validate a set of font files.
    fn load_fonts(&self, paths: &[PathBuf]) -> TableauResult<FontCollection> {
        if paths.is_empty() {
            return Err(TableauError::resource("font collection has no files"));
        }
        if let Some(missing) = paths.iter().find(|p| !p.is_file()) {
            return Err(TableauError::resource(format!(
                "font file not found: {}",
                missing.display()
            )));
        }
        Ok(FontCollection::new(paths.to_vec()))
    }
}

/// Loader backed by the `image` crate; only image headers are read.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageLoader;

impl ResourceLoader for ImageLoader {
    fn load_texture(&self, path: &Path) -> TableauResult<Texture> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            TableauError::resource(format!("decode '{}': {e}", path.display()))
        })?;
        Ok(Texture::new(path.to_string_lossy(), width, height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
