//! Per-node state held in the [`NodeTree`](crate::NodeTree) arena.

use std::sync::Arc;

use kurbo::Shape as _;

use crate::animation::action::Action;
use crate::assets::store::Frame;
use crate::event::listener::Listener;
use crate::foundation::core::{Affine, BezPath, Color, Point, Rect, SceneId, Size, Vec2};
use crate::foundation::math::{clamp01, name_hash};
use crate::node::actions::InFlight;
use crate::node::button::Button;
use crate::node::task::Task;
use crate::node::tree::{NodeId, NodeTree};
use crate::render::backend::LayerArea;
use crate::transform::affine::{Matrices, Transform};
use crate::transform::geometry::Quad;

/// Per-frame hook run before a node's actions and tasks.
pub type UpdateHook = Box<dyn FnMut(&mut NodeTree, NodeId, f64)>;

/// Fill and stroke of a shape.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeStyle {
    /// Fill color, if filled.
    pub fill: Option<Color>,
    /// Stroke color, if stroked.
    pub stroke: Option<Color>,
    /// Stroke width in local units.
    pub stroke_width: f64,
}

/// Vector geometry drawn in a node's local space.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    /// Outline in local coordinates.
    pub path: BezPath,
    /// Paint applied to `path`.
    pub style: ShapeStyle,
}

const SHAPE_TOLERANCE: f64 = 0.1;

impl Shape {
    /// Axis-aligned rectangle covering `(0, 0) .. size`.
    pub fn rect(size: Size, style: ShapeStyle) -> Self {
        Self {
            path: Rect::from_origin_size(Point::ORIGIN, size).to_path(SHAPE_TOLERANCE),
            style,
        }
    }

    /// Rounded rectangle covering `(0, 0) .. size`.
    pub fn rounded_rect(size: Size, radius: f64, style: ShapeStyle) -> Self {
        Self {
            path: Rect::from_origin_size(Point::ORIGIN, size)
                .to_rounded_rect(radius)
                .to_path(SHAPE_TOLERANCE),
            style,
        }
    }

    /// Circle inscribed in the box `(0, 0) .. (2r, 2r)`.
    pub fn circle(radius: f64, style: ShapeStyle) -> Self {
        Self {
            path: kurbo::Circle::new(Point::new(radius, radius), radius).to_path(SHAPE_TOLERANCE),
            style,
        }
    }

    /// Straight segment.
    pub fn line(from: Point, to: Point, style: ShapeStyle) -> Self {
        Self {
            path: kurbo::Line::new(from, to).to_path(SHAPE_TOLERANCE),
            style,
        }
    }

    /// Closed polygon through `points`.
    pub fn polygon(points: &[Point], style: ShapeStyle) -> Self {
        let mut path = BezPath::new();
        if let Some((first, rest)) = points.split_first() {
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
            path.close_path();
        }
        Self { path, style }
    }

    /// Size of the geometry's bounding box measured from the local origin.
    pub fn extent(&self) -> Size {
        let bb = self.path.bounding_box();
        Size::new(bb.x1.max(0.0), bb.y1.max(0.0))
    }
}

/// Text drawn by a node.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Text {
    /// The string to draw.
    pub content: String,
    /// Font collection id in the resource cache, `None` for the renderer default.
    pub font: Option<String>,
    /// Font size in points.
    pub font_size: f64,
    /// Text color.
    pub color: Color,
}

impl Text {
    /// Default-styled text.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font: None,
            font_size: 18.0,
            color: Color::WHITE,
        }
    }
}

/// What a node draws for itself, between its negative-z and non-negative-z children.
#[derive(Clone, Debug, Default)]
pub enum Content {
    /// Nothing; the node only groups children.
    #[default]
    Empty,
    /// A bitmap frame.
    Sprite(Arc<Frame>),
    /// Vector geometry.
    Shape(Shape),
    /// A run of text.
    Text(Text),
}

/// A node in the scene graph.
///
/// Local attributes are set directly; operations that touch more than one node (attaching,
/// z-order, opacity cascade) live on [`NodeTree`].
pub struct Node {
    pub(crate) name: Option<String>,
    pub(crate) name_hash: u64,

    pub(crate) visible: bool,
    pub(crate) transform: Transform,
    pub(crate) matrices: Matrices,
    pub(crate) quad: Quad,
    pub(crate) dirty_transform: bool,

    pub(crate) opacity: f64,
    pub(crate) display_opacity: f64,
    pub(crate) z_order: i32,
    pub(crate) dirty_sort: bool,
    pub(crate) clip: bool,
    pub(crate) border_color: Option<Color>,

    pub(crate) content: Content,
    pub(crate) layer: Option<LayerArea>,
    pub(crate) responsible: bool,
    pub(crate) swallow_events: bool,
    pub(crate) hovering: bool,
    pub(crate) pressed: bool,
    pub(crate) button: Option<Button>,

    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) scene: Option<SceneId>,

    pub(crate) actions: Vec<Action>,
    pub(crate) in_flight: Vec<InFlight>,
    pub(crate) tasks: Vec<Task>,
    pub(crate) listeners: Vec<Listener>,
    pub(crate) update_hook: Option<UpdateHook>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            name: None,
            name_hash: 0,
            visible: true,
            transform: Transform::default(),
            matrices: Matrices::default(),
            quad: Quad::default(),
            dirty_transform: true,
            opacity: 1.0,
            display_opacity: 1.0,
            z_order: 0,
            dirty_sort: false,
            clip: false,
            border_color: None,
            content: Content::Empty,
            layer: None,
            responsible: false,
            swallow_events: false,
            hovering: false,
            pressed: false,
            button: None,
            parent: None,
            children: Vec::new(),
            scene: None,
            actions: Vec::new(),
            in_flight: Vec::new(),
            tasks: Vec::new(),
            listeners: Vec::new(),
            update_hook: None,
        }
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("visible", &self.visible)
            .field("transform", &self.transform)
            .field("opacity", &self.opacity)
            .field("z_order", &self.z_order)
            .field("parent", &self.parent)
            .field("children", &self.children.len())
            .field("actions", &self.actions.len())
            .field("tasks", &self.tasks.len())
            .field("listeners", &self.listeners.len())
            .field("button", &self.button)
            .finish_non_exhaustive()
    }
}

impl Node {
    /// A visible, empty node at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    /// Builder-style content; sizes the node to the content when it has an intrinsic size.
    pub fn with_content(mut self, content: Content) -> Self {
        self.set_content(content);
        self
    }

    /// Builder-style position.
    pub fn at(mut self, position: Point) -> Self {
        self.set_position(position);
        self
    }

    /// Optional name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the name and precompute its hash.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.name_hash = name_hash(&name);
        self.name = Some(name);
    }

    pub(crate) fn name_matches(&self, hash: u64, name: &str) -> bool {
        self.name_hash == hash && self.name.as_deref() == Some(name)
    }

    /// Whether this node and its subtree are drawn and receive events.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the subtree.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Local transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Replace the whole local transform.
    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.dirty_transform = true;
    }

    /// Position of the pivot in parent space.
    pub fn position(&self) -> Point {
        self.transform.position
    }

    /// Move the pivot to `position`.
    pub fn set_position(&mut self, position: Point) {
        if self.transform.position != position {
            self.transform.position = position;
            self.dirty_transform = true;
        }
    }

    /// Offset the position by `delta`.
    pub fn move_by(&mut self, delta: Vec2) {
        self.set_position(self.transform.position + delta);
    }

    /// Scale factors.
    pub fn scale(&self) -> Vec2 {
        self.transform.scale
    }

    /// Set non-uniform scale.
    pub fn set_scale(&mut self, scale: Vec2) {
        if self.transform.scale != scale {
            self.transform.scale = scale;
            self.dirty_transform = true;
        }
    }

    /// Skew angles in degrees.
    pub fn skew(&self) -> Vec2 {
        self.transform.skew
    }

    /// Set skew angles in degrees.
    pub fn set_skew(&mut self, skew: Vec2) {
        if self.transform.skew != skew {
            self.transform.skew = skew;
            self.dirty_transform = true;
        }
    }

    /// Rotation in degrees.
    pub fn rotation(&self) -> f64 {
        self.transform.rotation
    }

    /// Set rotation in degrees.
    pub fn set_rotation(&mut self, degrees: f64) {
        if self.transform.rotation != degrees {
            self.transform.rotation = degrees;
            self.dirty_transform = true;
        }
    }

    /// Unscaled size.
    pub fn size(&self) -> Size {
        self.transform.size
    }

    /// Set the unscaled size.
    pub fn set_size(&mut self, size: Size) {
        if self.transform.size != size {
            self.transform.size = size;
            self.dirty_transform = true;
        }
    }

    /// Normalized pivot.
    pub fn pivot(&self) -> Vec2 {
        self.transform.pivot
    }

    /// Set the normalized pivot (`(0.5, 0.5)` is the center).
    pub fn set_pivot(&mut self, pivot: Vec2) {
        if self.transform.pivot != pivot {
            self.transform.pivot = pivot;
            self.dirty_transform = true;
        }
    }

    /// `true` while the cached matrices are stale.
    pub fn is_transform_dirty(&self) -> bool {
        self.dirty_transform
    }

    /// Cached basis inherited by children. Only meaningful once the transform is refreshed.
    pub fn initial_matrix(&self) -> Affine {
        self.matrices.initial
    }

    /// Cached draw matrix. Only meaningful once the transform is refreshed.
    pub fn final_matrix(&self) -> Affine {
        self.matrices.final_
    }

    /// Own opacity in `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Opacity after multiplying by every ancestor's opacity.
    pub fn display_opacity(&self) -> f64 {
        self.display_opacity
    }

    pub(crate) fn refresh_display_opacity(&mut self, parent_display: f64) {
        self.opacity = clamp01(self.opacity);
        self.display_opacity = self.opacity * parent_display;
    }

    /// Z-order among siblings.
    pub fn z_order(&self) -> i32 {
        self.z_order
    }

    /// Whether the subtree is clipped to this node's bounds.
    pub fn is_clipping(&self) -> bool {
        self.clip
    }

    /// Clip children and content to the node's transformed bounds.
    pub fn set_clip(&mut self, clip: bool) {
        self.clip = clip;
    }

    /// Debug border color, if set.
    pub fn border_color(&self) -> Option<Color> {
        self.border_color
    }

    /// Override the debug border color drawn around this node.
    pub fn set_border_color(&mut self, color: Option<Color>) {
        self.border_color = color;
    }

    /// What the node draws for itself.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Replace the content. Sprites and shapes resize the node to their intrinsic size.
    pub fn set_content(&mut self, content: Content) {
        match &content {
            Content::Sprite(frame) => self.set_size(frame.size()),
            Content::Shape(shape) => self.set_size(shape.extent()),
            Content::Empty | Content::Text(_) => {}
        }
        self.content = content;
    }

    /// Offscreen layer settings, if this node composites its subtree into a layer.
    pub fn layer(&self) -> Option<&LayerArea> {
        self.layer.as_ref()
    }

    /// Turn the node into a layer (or back into a plain node with `None`).
    pub fn set_layer(&mut self, layer: Option<LayerArea>) {
        self.layer = layer;
    }

    /// Whether raw mouse events are turned into hover/out/click for this node.
    pub fn is_responsible(&self) -> bool {
        self.responsible
    }

    /// Enable hover/out/click synthesis.
    pub fn set_responsible(&mut self, responsible: bool) {
        self.responsible = responsible;
        if !responsible {
            self.hovering = false;
            self.pressed = false;
        }
    }

    /// Whether events stop at this node instead of reaching its children.
    pub fn swallows_events(&self) -> bool {
        self.swallow_events
    }

    /// Keep events away from this node's children.
    pub fn set_swallow_events(&mut self, swallow: bool) {
        self.swallow_events = swallow;
    }

    /// Install a per-frame hook, replacing any previous one.
    pub fn set_update_hook(&mut self, hook: impl FnMut(&mut NodeTree, NodeId, f64) + 'static) {
        self.update_hook = Some(Box::new(hook));
    }

    /// Remove the per-frame hook.
    pub fn clear_update_hook(&mut self) {
        self.update_hook = None;
    }

    /// Parent node, if attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order (sorted by z once traversed).
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Scene this node currently belongs to.
    pub fn scene(&self) -> Option<SceneId> {
        self.scene
    }

    /// Actions attached to this node.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Tasks attached to this node.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Event listeners attached to this node.
    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    /// Transformed bounds as of the last transform refresh.
    pub fn quad(&self) -> &Quad {
        &self.quad
    }
}

#[cfg(test)]
#[path = "../../tests/unit/node/node.rs"]
mod tests;
