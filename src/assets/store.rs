//! In-memory resource caches: textures, frames, frame sequences, fonts.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::loader::ResourceLoader;
use crate::foundation::core::{Rect, Size};
use crate::foundation::error::{TableauError, TableauResult};
use crate::foundation::math::path_hash;

/// Decoded bitmap metadata. Pixel data stays with the renderer collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture {
    id: u64,
    path: String,
    width: u32,
    height: u32,
}

impl Texture {
    /// Describe a texture loaded from `path`.
    pub fn new(path: impl Into<String>, width: u32, height: u32) -> Self {
        let path = path.into().replace('\\', "/");
        Self {
            id: path_hash(&path),
            path,
            width,
            height,
        }
    }

    /// Cache key (hash of the normalized path).
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Normalized source path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Pixel width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Pixel height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel size as floats.
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// A rectangular region of a texture.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    texture: Arc<Texture>,
    crop: Rect,
}

impl Frame {
    /// The whole texture.
    pub fn new(texture: Arc<Texture>) -> Self {
        let crop = texture.size().to_rect();
        Self { texture, crop }
    }

    /// A sub-rectangle of the texture.
    pub fn with_crop(texture: Arc<Texture>, crop: Rect) -> Self {
        Self { texture, crop }
    }

    /// Source texture.
    pub fn texture(&self) -> &Arc<Texture> {
        &self.texture
    }

    /// Crop rectangle in texture pixels.
    pub fn crop(&self) -> Rect {
        self.crop
    }

    /// Drawn size.
    pub fn size(&self) -> Size {
        self.crop.size()
    }
}

/// Ordered frames played by frame animations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameSequence {
    frames: Vec<Arc<Frame>>,
}

impl FrameSequence {
    /// Wrap an ordered list of frames.
    pub fn new(frames: Vec<Arc<Frame>>) -> Self {
        Self { frames }
    }

    /// Slice `texture` into a `rows × cols` grid separated by padding, row-major.
    ///
    /// Cell size is `(raw - (n - 1) * padding) / n` along each axis.
    pub fn from_grid(
        texture: Arc<Texture>,
        rows: u32,
        cols: u32,
        padding_x: f64,
        padding_y: f64,
    ) -> TableauResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(TableauError::validation("grid needs at least one row and column"));
        }
        let raw = texture.size();
        let width = (raw.width - f64::from(cols - 1) * padding_x) / f64::from(cols);
        let height = (raw.height - f64::from(rows - 1) * padding_y) / f64::from(rows);
        if width <= 0.0 || height <= 0.0 {
            return Err(TableauError::validation(format!(
                "padding leaves no room for {rows}x{cols} cells in a {}x{} texture",
                raw.width, raw.height
            )));
        }

        let mut frames = Vec::with_capacity((rows * cols) as usize);
        let mut y = 0.0;
        for _ in 0..rows {
            let mut x = 0.0;
            for _ in 0..cols {
                frames.push(Arc::new(Frame::with_crop(
                    texture.clone(),
                    Rect::new(x, y, x + width, y + height),
                )));
                x += width + padding_x;
            }
            y += height + padding_y;
        }
        Ok(Self { frames })
    }

    /// Frames in play order.
    pub fn frames(&self) -> &[Arc<Frame>] {
        &self.frames
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Return `true` if the sequence has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The same frames in reverse order.
    pub fn reversed(&self) -> Self {
        Self {
            frames: self.frames.iter().rev().cloned().collect(),
        }
    }
}

/// A set of font files registered under one id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontCollection {
    files: Vec<PathBuf>,
}

impl FontCollection {
    /// Wrap font file paths.
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self { files }
    }

    /// Font files.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

#[derive(Clone, Debug)]
enum CachedObject {
    Frame(Arc<Frame>),
    Sequence(Arc<FrameSequence>),
}

/// Application-owned cache of loaded resources, keyed by id.
#[derive(Debug, Default)]
pub struct ResourceCache {
    textures: HashMap<u64, Arc<Texture>>,
    objects: HashMap<String, CachedObject>,
    fonts: HashMap<String, Arc<FontCollection>>,
}

impl ResourceCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a texture, reusing the cached handle for paths seen before.
    pub fn texture(
        &mut self,
        loader: &dyn ResourceLoader,
        path: &Path,
    ) -> TableauResult<Arc<Texture>> {
        let key = path_hash(&path.to_string_lossy());
        if let Some(texture) = self.textures.get(&key) {
            return Ok(texture.clone());
        }
        let texture = Arc::new(loader.load_texture(path).inspect_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "texture load failed");
        })?);
        self.textures.insert(key, texture.clone());
        Ok(texture)
    }

    /// Load `path` as a single frame stored under `id`.
    pub fn load_frame(
        &mut self,
        loader: &dyn ResourceLoader,
        id: &str,
        path: &Path,
    ) -> TableauResult<Arc<Frame>> {
        let frame = Arc::new(Frame::new(self.texture(loader, path)?));
        self.add_frame(id, frame.clone());
        Ok(frame)
    }

    /// Load each path as a frame and store the sequence under `id`.
    ///
    /// Files that fail to load are skipped with a warning; an empty result is an error.
    pub fn load_sequence(
        &mut self,
        loader: &dyn ResourceLoader,
        id: &str,
        paths: &[PathBuf],
    ) -> TableauResult<Arc<FrameSequence>> {
        let frames: Vec<_> = paths
            .iter()
            .filter_map(|p| self.texture(loader, p).ok())
            .map(|t| Arc::new(Frame::new(t)))
            .collect();
        if frames.is_empty() {
            return Err(TableauError::resource(format!(
                "no frame of sequence '{id}' could be loaded"
            )));
        }
        let seq = Arc::new(FrameSequence::new(frames));
        self.add_sequence(id, seq.clone());
        Ok(seq)
    }

    /// Slice one texture into a grid sequence stored under `id`.
    pub fn load_grid(
        &mut self,
        loader: &dyn ResourceLoader,
        id: &str,
        path: &Path,
        rows: u32,
        cols: u32,
        padding: (f64, f64),
    ) -> TableauResult<Arc<FrameSequence>> {
        let texture = self.texture(loader, path)?;
        let seq = Arc::new(FrameSequence::from_grid(
            texture, rows, cols, padding.0, padding.1,
        )?);
        self.add_sequence(id, seq.clone());
        Ok(seq)
    }

    /// Register font files under `id`.
    pub fn load_fonts(
        &mut self,
        loader: &dyn ResourceLoader,
        id: &str,
        paths: &[PathBuf],
    ) -> TableauResult<Arc<FontCollection>> {
        let fonts = Arc::new(loader.load_fonts(paths).inspect_err(|e| {
            tracing::warn!(id, error = %e, "font collection load failed");
        })?);
        self.fonts.insert(id.to_owned(), fonts.clone());
        Ok(fonts)
    }

    /// Store a frame under `id`, replacing any previous object with that id.
    pub fn add_frame(&mut self, id: &str, frame: Arc<Frame>) {
        self.objects
            .insert(id.to_owned(), CachedObject::Frame(frame));
    }

    /// Store a frame sequence under `id`, replacing any previous object with that id.
    pub fn add_sequence(&mut self, id: &str, seq: Arc<FrameSequence>) {
        self.objects
            .insert(id.to_owned(), CachedObject::Sequence(seq));
    }

    /// Frame stored under `id`.
    pub fn frame(&self, id: &str) -> Option<Arc<Frame>> {
        match self.objects.get(id)? {
            CachedObject::Frame(f) => Some(f.clone()),
            CachedObject::Sequence(_) => None,
        }
    }

    /// Frame sequence stored under `id`.
    pub fn sequence(&self, id: &str) -> Option<Arc<FrameSequence>> {
        match self.objects.get(id)? {
            CachedObject::Sequence(s) => Some(s.clone()),
            CachedObject::Frame(_) => None,
        }
    }

    /// Font collection stored under `id`.
    pub fn fonts(&self, id: &str) -> Option<Arc<FontCollection>> {
        self.fonts.get(id).cloned()
    }

    /// Number of cached textures.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Ids of cached frames and sequences, sorted.
    pub fn object_ids(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.objects.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Ids of cached font collections, sorted.
    pub fn font_ids(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.fonts.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Drop the object stored under `id`.
    pub fn remove(&mut self, id: &str) -> bool {
        self.objects.remove(id).is_some() | self.fonts.remove(id).is_some()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.fonts.clear();
        self.textures.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
