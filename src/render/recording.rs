//! Display-list renderer for headless runs and tests.

use crate::assets::store::Frame;
use crate::foundation::core::{Affine, BezPath, Color, Rect, Size};
use crate::foundation::error::{TableauError, TableauResult};
use crate::node::node::{ShapeStyle, Text};
use crate::render::backend::{LayerArea, Renderer};

/// One recorded renderer call.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// [`Renderer::begin_frame`].
    BeginFrame {
        /// Clear color.
        clear: Color,
    },
    /// [`Renderer::set_transform`].
    SetTransform {
        /// New draw matrix.
        transform: Affine,
    },
    /// [`Renderer::push_clip`].
    PushClip {
        /// Clip space.
        transform: Affine,
        /// Clip extent.
        size: Size,
    },
    /// [`Renderer::pop_clip`].
    PopClip,
    /// [`Renderer::push_layer`].
    PushLayer {
        /// Layer parameters.
        area: LayerArea,
    },
    /// [`Renderer::pop_layer`].
    PopLayer,
    /// [`Renderer::draw_geometry`].
    Geometry {
        /// Outline.
        path: BezPath,
        /// Paint.
        style: ShapeStyle,
        /// Cascaded opacity.
        opacity: f64,
    },
    /// [`Renderer::draw_frame`].
    Frame {
        /// Source texture path.
        texture: String,
        /// Crop rectangle within the texture.
        crop: Rect,
        /// Cascaded opacity.
        opacity: f64,
    },
    /// [`Renderer::draw_text`].
    Text {
        /// The string drawn.
        content: String,
        /// Cascaded opacity.
        opacity: f64,
    },
}

/// Renderer that records every call instead of drawing.
///
/// Push/pop balance is checked at [`Renderer::end_frame`].
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    ops: Vec<DrawOp>,
    clip_depth: usize,
    layer_depth: usize,
    underflow: bool,
    frames: u64,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls recorded since the last [`RecordingRenderer::clear`].
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drop recorded calls.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Currently open clips.
    pub fn clip_depth(&self) -> usize {
        self.clip_depth
    }

    /// Currently open layers.
    pub fn layer_depth(&self) -> usize {
        self.layer_depth
    }

    /// Number of completed frames.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Text contents drawn, in draw order.
    pub fn drawn_text(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Serialize the display list as pretty JSON.
    pub fn to_json(&self) -> TableauResult<String> {
        serde_json::to_string_pretty(&self.ops).map_err(|e| TableauError::serde(e.to_string()))
    }
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self, clear: Color) {
        self.ops.push(DrawOp::BeginFrame { clear });
    }

    fn end_frame(&mut self) -> TableauResult<()> {
        self.frames += 1;
        if self.underflow || self.clip_depth != 0 || self.layer_depth != 0 {
            let err = TableauError::validation(format!(
                "unbalanced renderer stack: clips={}, layers={}, underflow={}",
                self.clip_depth, self.layer_depth, self.underflow
            ));
            self.underflow = false;
            self.clip_depth = 0;
            self.layer_depth = 0;
            return Err(err);
        }
        Ok(())
    }

    fn set_transform(&mut self, transform: Affine) {
        self.ops.push(DrawOp::SetTransform { transform });
    }

    fn push_clip(&mut self, transform: Affine, size: Size) {
        self.clip_depth += 1;
        self.ops.push(DrawOp::PushClip { transform, size });
    }

    fn pop_clip(&mut self) {
        match self.clip_depth.checked_sub(1) {
            Some(d) => self.clip_depth = d,
            None => self.underflow = true,
        }
        self.ops.push(DrawOp::PopClip);
    }

    fn push_layer(&mut self, area: &LayerArea) {
        self.layer_depth += 1;
        self.ops.push(DrawOp::PushLayer { area: *area });
    }

    fn pop_layer(&mut self) {
        match self.layer_depth.checked_sub(1) {
            Some(d) => self.layer_depth = d,
            None => self.underflow = true,
        }
        self.ops.push(DrawOp::PopLayer);
    }

    fn draw_geometry(&mut self, path: &BezPath, style: &ShapeStyle, opacity: f64) {
        self.ops.push(DrawOp::Geometry {
            path: path.clone(),
            style: style.clone(),
            opacity,
        });
    }

    fn draw_frame(&mut self, frame: &Frame, opacity: f64) {
        self.ops.push(DrawOp::Frame {
            texture: frame.texture().path().to_owned(),
            crop: frame.crop(),
            opacity,
        });
    }

    fn draw_text(&mut self, text: &Text, opacity: f64) {
        self.ops.push(DrawOp::Text {
            content: text.content.clone(),
            opacity,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
