//! Renderer collaborator interface.

use crate::assets::store::Frame;
use crate::foundation::core::{Affine, BezPath, Color, Rect, Size};
use crate::foundation::error::TableauResult;
use crate::node::node::{ShapeStyle, Text};

/// Offscreen group composited with its own opacity, clip rectangle and transform.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerArea {
    /// Clip rectangle in the layer's space.
    pub bounds: Rect,
    /// Opacity applied when the layer is composited.
    pub opacity: f64,
    /// Transform of the layer's space.
    pub transform: Affine,
}

impl LayerArea {
    /// Fully opaque layer clipped to `(0, 0) .. size` in identity space.
    pub fn new(size: Size) -> Self {
        Self {
            bounds: size.to_rect(),
            opacity: 1.0,
            transform: Affine::IDENTITY,
        }
    }

    /// Builder-style opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

/// Drawing interface the scene graph renders through.
///
/// Every `push_*` is matched by the corresponding `pop_*` within one frame. Draw calls use the
/// transform most recently set with [`Renderer::set_transform`].
pub trait Renderer {
    /// Start a frame, clearing the target to `clear`.
    fn begin_frame(&mut self, _clear: Color) {}

    /// Finish the frame.
    fn end_frame(&mut self) -> TableauResult<()> {
        Ok(())
    }

    /// Set the matrix used by subsequent draw calls.
    fn set_transform(&mut self, transform: Affine);

    /// Clip to the rectangle `(0, 0) .. size` under `transform`.
    fn push_clip(&mut self, transform: Affine, size: Size);

    /// Undo the last [`Renderer::push_clip`].
    fn pop_clip(&mut self);

    /// Begin drawing into an offscreen layer.
    fn push_layer(&mut self, area: &LayerArea);

    /// Composite the last pushed layer.
    fn pop_layer(&mut self);

    /// Fill and/or stroke vector geometry.
    fn draw_geometry(&mut self, path: &BezPath, style: &ShapeStyle, opacity: f64);

    /// Draw a bitmap frame at the local origin.
    fn draw_frame(&mut self, frame: &Frame, opacity: f64);

    /// Draw text at the local origin.
    fn draw_text(&mut self, text: &Text, opacity: f64);
}
