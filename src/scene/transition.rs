//! Timed visual interpolation between an outgoing and an incoming scene.

use crate::foundation::core::{Affine, Point, Rect, Size, Vec2};
use crate::render::backend::{LayerArea, Renderer};
use crate::scene::scene::Scene;

const SPIN_DEGREES: f64 = 360.0;

/// Side the incoming scene slides in from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    /// Enters from the bottom edge moving up.
    Up,
    /// Enters from the top edge moving down.
    Down,
    /// Enters from the right edge moving left.
    Left,
    /// Enters from the left edge moving right.
    Right,
}

/// How a transition maps its progress onto the two scene layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Fade the outgoing scene out during the first half, the incoming one in during the second.
    Fade,
    /// Crossfade.
    Emerge,
    /// Shrink the outgoing scene to a centered box, then grow the incoming one out of it.
    Box,
    /// Slide both scenes.
    Move(MoveDirection),
    /// Spin and shrink the outgoing scene away, then spin and grow the incoming one.
    Rotation,
}

/// A running scene transition.
///
/// Progress is `delta = min(elapsed / duration, 1)`, or `1` at once for zero durations. The
/// transition is done when `delta` reaches 1.
#[derive(Clone, Debug)]
pub struct Transition {
    kind: TransitionKind,
    duration: f64,
    elapsed: f64,
    delta: f64,
    done: bool,
    window: Size,
    out_layer: LayerArea,
    in_layer: LayerArea,
}

impl Transition {
    /// Transition of `kind` lasting `duration` seconds.
    pub fn new(kind: TransitionKind, duration: f64) -> Self {
        Self {
            kind,
            duration: duration.max(0.0),
            elapsed: 0.0,
            delta: 0.0,
            done: false,
            window: Size::ZERO,
            out_layer: LayerArea::new(Size::ZERO),
            in_layer: LayerArea::new(Size::ZERO),
        }
    }

    /// [`TransitionKind::Fade`].
    pub fn fade(duration: f64) -> Self {
        Self::new(TransitionKind::Fade, duration)
    }

    /// [`TransitionKind::Emerge`].
    pub fn emerge(duration: f64) -> Self {
        Self::new(TransitionKind::Emerge, duration)
    }

    /// [`TransitionKind::Box`].
    pub fn boxed(duration: f64) -> Self {
        Self::new(TransitionKind::Box, duration)
    }

    /// [`TransitionKind::Move`].
    pub fn slide(duration: f64, direction: MoveDirection) -> Self {
        Self::new(TransitionKind::Move(direction), duration)
    }

    /// [`TransitionKind::Rotation`].
    pub fn rotation(duration: f64) -> Self {
        Self::new(TransitionKind::Rotation, duration)
    }

    /// The interpolation style.
    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    /// Length in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Progress in `[0, 1]`.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// `true` once progress reached 1.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Layer the outgoing scene is composited through.
    pub fn out_layer(&self) -> &LayerArea {
        &self.out_layer
    }

    /// Layer the incoming scene is composited through.
    pub fn in_layer(&self) -> &LayerArea {
        &self.in_layer
    }

    /// Reset progress and prepare both layers for a window of `window` size.
    pub(crate) fn start(&mut self, window: Size, out: Option<&mut Scene>, incoming: &mut Scene) {
        self.window = window;
        self.elapsed = 0.0;
        self.delta = 0.0;
        self.done = false;
        self.out_layer = LayerArea::new(window);
        self.in_layer = LayerArea::new(window);

        match self.kind {
            TransitionKind::Fade | TransitionKind::Emerge | TransitionKind::Box => {
                self.in_layer.opacity = 0.0;
            }
            TransitionKind::Move(_) => {
                let (start, _) = self.slide_vectors();
                set_root(incoming, start.to_point(), Vec2::ZERO, 1.0, 0.0);
            }
            TransitionKind::Rotation => {
                self.in_layer.opacity = 0.0;
                let center = Point::new(window.width / 2.0, window.height / 2.0);
                if let Some(out) = out {
                    set_root(out, center, Vec2::new(0.5, 0.5), 1.0, 0.0);
                }
                set_root(incoming, center, Vec2::new(0.5, 0.5), 0.0, 0.0);
            }
        }
    }

    /// Advance by `dt` and apply the new progress to the layers and scene roots.
    pub(crate) fn update(&mut self, dt: f64, out: Option<&mut Scene>, incoming: &mut Scene) {
        if self.done {
            return;
        }
        self.elapsed += dt;
        self.delta = if self.duration == 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        };
        let d = self.delta;
        let (w, h) = (self.window.width, self.window.height);

        match self.kind {
            TransitionKind::Fade => {
                if d < 0.5 {
                    self.out_layer.opacity = 1.0 - d * 2.0;
                    self.in_layer.opacity = 0.0;
                } else {
                    self.out_layer.opacity = 0.0;
                    self.in_layer.opacity = (d - 0.5) * 2.0;
                }
            }
            TransitionKind::Emerge => {
                self.out_layer.opacity = 1.0 - d;
                self.in_layer.opacity = d;
            }
            TransitionKind::Box => {
                if d <= 0.5 {
                    self.out_layer.bounds = Rect::new(w * d, h * d, w * (1.0 - d), h * (1.0 - d));
                } else {
                    self.out_layer.opacity = 0.0;
                    self.in_layer.opacity = 1.0;
                    self.in_layer.bounds = Rect::new(w * (1.0 - d), h * (1.0 - d), w * d, h * d);
                }
            }
            TransitionKind::Move(_) => {
                let (start, travel) = self.slide_vectors();
                if let Some(out) = out {
                    set_root(out, (travel * d).to_point(), Vec2::ZERO, 1.0, 0.0);
                }
                set_root(incoming, (start + travel * d).to_point(), Vec2::ZERO, 1.0, 0.0);
            }
            TransitionKind::Rotation => {
                let center = Point::new(w / 2.0, h / 2.0);
                let pivot = Vec2::new(0.5, 0.5);
                if d < 0.5 {
                    let k = (0.5 - d) * 2.0;
                    if let Some(out) = out {
                        set_root(out, center, pivot, k, SPIN_DEGREES * k);
                    }
                } else {
                    let k = (d - 0.5) * 2.0;
                    self.out_layer.opacity = 0.0;
                    self.in_layer.opacity = 1.0;
                    set_root(incoming, center, pivot, k, SPIN_DEGREES * k);
                }
            }
        }

        if d >= 1.0 {
            self.done = true;
        }
    }

    /// Put both scene roots back to their resting transform.
    pub(crate) fn finish(&mut self, out: Option<&mut Scene>, incoming: &mut Scene) {
        if matches!(self.kind, TransitionKind::Move(_) | TransitionKind::Rotation) {
            if let Some(out) = out {
                set_root(out, Point::ORIGIN, Vec2::ZERO, 1.0, 0.0);
            }
            set_root(incoming, Point::ORIGIN, Vec2::ZERO, 1.0, 0.0);
        }
        self.done = true;
    }

    /// Draw both scenes, each clipped to the window and composited through its layer.
    pub(crate) fn render(
        &self,
        renderer: &mut dyn Renderer,
        out: Option<&mut Scene>,
        incoming: &mut Scene,
    ) {
        if let Some(out) = out {
            self.render_scene(renderer, out, &self.out_layer);
        }
        self.render_scene(renderer, incoming, &self.in_layer);
    }

    fn render_scene(&self, renderer: &mut dyn Renderer, scene: &mut Scene, layer: &LayerArea) {
        renderer.set_transform(Affine::IDENTITY);
        renderer.push_clip(Affine::IDENTITY, self.window);
        renderer.push_layer(layer);
        scene.render(renderer);
        renderer.pop_layer();
        renderer.pop_clip();
    }

    /// Start offset of the incoming scene and the distance both scenes travel.
    fn slide_vectors(&self) -> (Vec2, Vec2) {
        let (w, h) = (self.window.width, self.window.height);
        match self.kind {
            TransitionKind::Move(MoveDirection::Up) => (Vec2::new(0.0, h), Vec2::new(0.0, -h)),
            TransitionKind::Move(MoveDirection::Down) => (Vec2::new(0.0, -h), Vec2::new(0.0, h)),
            TransitionKind::Move(MoveDirection::Left) => (Vec2::new(w, 0.0), Vec2::new(-w, 0.0)),
            TransitionKind::Move(MoveDirection::Right) => (Vec2::new(-w, 0.0), Vec2::new(w, 0.0)),
            _ => (Vec2::ZERO, Vec2::ZERO),
        }
    }
}

fn set_root(scene: &mut Scene, position: Point, pivot: Vec2, scale: f64, rotation: f64) {
    let root = scene.root();
    if let Some(node) = scene.tree_mut().get_mut(root) {
        node.set_pivot(pivot);
        node.set_position(position);
        node.set_scale(Vec2::new(scale, scale));
        node.set_rotation(rotation);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/transition.rs"]
mod tests;
