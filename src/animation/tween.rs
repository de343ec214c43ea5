//! Property tweens.

use std::fmt;
use std::sync::Arc;

use crate::animation::action::Timeline;
use crate::animation::ease::Ease;
use crate::assets::store::FrameSequence;
use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{TableauError, TableauResult};
use crate::node::node::Content;
use crate::node::tree::{NodeId, NodeTree};

/// Progress callback of custom tweens; receives eased progress in `[0, 1]`.
pub type ProgressCallback = Arc<dyn Fn(&mut NodeTree, NodeId, f64)>;

/// Interpolation contract for tweened values.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a.lerp(*b, t)
    }
}

/// What a tween changes.
#[derive(Clone)]
pub enum TweenKind {
    /// Move by a relative offset. Composes with other movement applied meanwhile.
    MoveBy(Vec2),
    /// Move to an absolute position, from `from` or the position at start.
    MoveTo {
        /// Explicit start position.
        from: Option<Point>,
        /// End position.
        to: Point,
    },
    /// Hop along a relative offset.
    JumpBy {
        /// Total displacement.
        delta: Vec2,
        /// Apex height of each jump (towards negative y).
        height: f64,
        /// Number of jumps.
        jumps: u32,
    },
    /// Add to the scale.
    ScaleBy(Vec2),
    /// Scale to an absolute value.
    ScaleTo {
        /// Explicit start scale.
        from: Option<Vec2>,
        /// End scale.
        to: Vec2,
    },
    /// Rotate by a relative angle in degrees.
    RotateBy(f64),
    /// Rotate to an absolute angle in degrees.
    RotateTo {
        /// Explicit start angle.
        from: Option<f64>,
        /// End angle.
        to: f64,
    },
    /// Fade to an opacity.
    Opacity {
        /// Explicit start opacity.
        from: Option<f64>,
        /// End opacity.
        to: f64,
    },
    /// Show each frame of a sequence in turn.
    Animate(Arc<FrameSequence>),
    /// Call a function with the eased progress.
    Custom(ProgressCallback),
}

impl fmt::Debug for TweenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveBy(d) => f.debug_tuple("MoveBy").field(d).finish(),
            Self::MoveTo { from, to } => f
                .debug_struct("MoveTo")
                .field("from", from)
                .field("to", to)
                .finish(),
            Self::JumpBy {
                delta,
                height,
                jumps,
            } => f
                .debug_struct("JumpBy")
                .field("delta", delta)
                .field("height", height)
                .field("jumps", jumps)
                .finish(),
            Self::ScaleBy(d) => f.debug_tuple("ScaleBy").field(d).finish(),
            Self::ScaleTo { from, to } => f
                .debug_struct("ScaleTo")
                .field("from", from)
                .field("to", to)
                .finish(),
            Self::RotateBy(d) => f.debug_tuple("RotateBy").field(d).finish(),
            Self::RotateTo { from, to } => f
                .debug_struct("RotateTo")
                .field("from", from)
                .field("to", to)
                .finish(),
            Self::Opacity { from, to } => f
                .debug_struct("Opacity")
                .field("from", from)
                .field("to", to)
                .finish(),
            Self::Animate(seq) => f.debug_tuple("Animate").field(&seq.len()).finish(),
            Self::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// Values captured from the target when the tween starts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Start {
    origin: Point,
    position: Point,
    prev_position: Point,
    move_delta: Vec2,
    scale: Vec2,
    rotation: f64,
    opacity: f64,
}

/// A property interpolation over a fixed duration.
#[derive(Clone, Debug)]
pub struct Tween {
    duration: f64,
    ease: Ease,
    kind: TweenKind,
    elapsed: f64,
    start: Option<Start>,
}

impl Tween {
    /// Tween over `duration` seconds with linear easing.
    pub fn new(duration: f64, kind: TweenKind) -> Self {
        Self {
            duration: duration.max(0.0),
            ease: Ease::Linear,
            kind,
            elapsed: 0.0,
            start: None,
        }
    }

    /// Builder-style easing.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// What is tweened.
    pub fn kind(&self) -> &TweenKind {
        &self.kind
    }

    /// Easing.
    pub fn ease(&self) -> Ease {
        self.ease
    }

    /// The tween playing backwards.
    pub(crate) fn reversed(&self) -> TableauResult<Self> {
        let start = self.start;
        let unknown = |what: &str| {
            TableauError::action(format!(
                "cannot reverse {what} before its start value is known; give it an explicit `from`"
            ))
        };
        let kind = match &self.kind {
            TweenKind::MoveBy(d) => TweenKind::MoveBy(-*d),
            TweenKind::MoveTo { from, to } => TweenKind::MoveTo {
                from: Some(*to),
                to: from
                    .or(start.map(|s| s.origin))
                    .ok_or_else(|| unknown("move-to"))?,
            },
            TweenKind::JumpBy {
                delta,
                height,
                jumps,
            } => TweenKind::JumpBy {
                delta: -*delta,
                height: *height,
                jumps: *jumps,
            },
            TweenKind::ScaleBy(d) => TweenKind::ScaleBy(-*d),
            TweenKind::ScaleTo { from, to } => TweenKind::ScaleTo {
                from: Some(*to),
                to: from
                    .or(start.map(|s| s.scale))
                    .ok_or_else(|| unknown("scale-to"))?,
            },
            TweenKind::RotateBy(d) => TweenKind::RotateBy(-d),
            TweenKind::RotateTo { from, to } => TweenKind::RotateTo {
                from: Some(*to),
                to: from
                    .or(start.map(|s| s.rotation))
                    .ok_or_else(|| unknown("rotate-to"))?,
            },
            TweenKind::Opacity { from, to } => match from.or(start.map(|s| s.opacity)) {
                Some(from) => TweenKind::Opacity {
                    from: Some(*to),
                    to: from,
                },
                // Fade-in and fade-out reverse into each other without a known start.
                None if *to == 0.0 || *to == 1.0 => TweenKind::Opacity {
                    from: None,
                    to: 1.0 - to,
                },
                None => return Err(unknown("fade-to")),
            },
            TweenKind::Animate(seq) => TweenKind::Animate(Arc::new(seq.reversed())),
            TweenKind::Custom(f) => {
                let f = f.clone();
                TweenKind::Custom(Arc::new(move |tree, id, p| f(tree, id, 1.0 - p)))
            }
        };
        Ok(Self::new(self.duration, kind).with_ease(self.ease.mirrored()))
    }

    fn apply(&mut self, tree: &mut NodeTree, target: NodeId, progress: f64) {
        let Some(start) = self.start.as_mut() else {
            return;
        };
        match &self.kind {
            TweenKind::MoveBy(_) | TweenKind::MoveTo { .. } => {
                let delta = start.move_delta;
                move_tracked(tree, target, start, delta * progress);
            }
            TweenKind::JumpBy {
                delta,
                height,
                jumps,
            } => {
                let frac = (progress * f64::from(*jumps)).fract();
                let hop = if progress >= 1.0 {
                    0.0
                } else {
                    height * 4.0 * frac * (1.0 - frac)
                };
                let offset = Vec2::new(delta.x * progress, delta.y * progress - hop);
                move_tracked(tree, target, start, offset);
            }
            TweenKind::ScaleBy(d) => {
                let to = start.scale + *d;
                if let Some(node) = tree.get_mut(target) {
                    node.set_scale(Vec2::lerp(start.scale, to, progress));
                }
            }
            TweenKind::ScaleTo { to, .. } => {
                if let Some(node) = tree.get_mut(target) {
                    node.set_scale(Vec2::lerp(start.scale, *to, progress));
                }
            }
            TweenKind::RotateBy(d) => {
                if let Some(node) = tree.get_mut(target) {
                    node.set_rotation(start.rotation + d * progress);
                }
            }
            TweenKind::RotateTo { to, .. } => {
                if let Some(node) = tree.get_mut(target) {
                    node.set_rotation(f64::lerp(&start.rotation, to, progress));
                }
            }
            TweenKind::Opacity { to, .. } => {
                if let Err(err) = tree.set_opacity(target, f64::lerp(&start.opacity, to, progress)) {
                    tracing::debug!(error = %err, "fade target gone");
                }
            }
            TweenKind::Animate(seq) => {
                if seq.is_empty() {
                    return;
                }
                let last = seq.len() - 1;
                let idx = ((progress * seq.len() as f64) as usize).min(last);
                if let Some(node) = tree.get_mut(target) {
                    node.set_content(Content::Sprite(seq.frames()[idx].clone()));
                }
            }
            TweenKind::Custom(f) => {
                let f = f.clone();
                f(tree, target, progress);
            }
        }
    }
}

fn move_tracked(tree: &mut NodeTree, target: NodeId, start: &mut Start, offset: Vec2) {
    let Some(node) = tree.get_mut(target) else {
        return;
    };
    // Movement applied by others since the last tick shifts our origin.
    let drift = node.position() - start.prev_position;
    start.position += drift;
    let next = start.position + offset;
    node.set_position(next);
    start.prev_position = next;
}

impl Timeline for Tween {
    fn init(&mut self, tree: &mut NodeTree, target: NodeId) {
        self.elapsed = 0.0;
        let Some(node) = tree.get_mut(target) else {
            return;
        };
        let mut start = Start {
            origin: node.position(),
            position: node.position(),
            prev_position: node.position(),
            move_delta: Vec2::ZERO,
            scale: node.scale(),
            rotation: node.rotation(),
            opacity: node.opacity(),
        };
        match &self.kind {
            TweenKind::MoveBy(d) => start.move_delta = *d,
            TweenKind::MoveTo { from, to } => {
                if let Some(from) = from {
                    node.set_position(*from);
                    start.origin = *from;
                    start.position = *from;
                    start.prev_position = *from;
                }
                start.move_delta = *to - start.position;
            }
            TweenKind::ScaleTo { from: Some(s), .. } => start.scale = *s,
            TweenKind::RotateTo { from: Some(r), .. } => start.rotation = *r,
            TweenKind::Opacity { from: Some(o), .. } => start.opacity = o.clamp(0.0, 1.0),
            _ => {}
        }
        self.start = Some(start);
    }

    fn advance(&mut self, tree: &mut NodeTree, target: NodeId, dt: f64) -> Option<f64> {
        self.elapsed += dt;
        let (progress, leftover) = if self.duration <= 0.0 {
            (1.0, Some(self.elapsed))
        } else if self.elapsed >= self.duration {
            (1.0, Some(self.elapsed - self.duration))
        } else {
            (self.elapsed / self.duration, None)
        };
        self.apply(tree, target, self.ease.apply(progress));
        leftover
    }

    fn reset(&mut self) {
        self.elapsed = 0.0;
        self.start = None;
    }

    fn duration(&self) -> Option<f64> {
        Some(self.duration)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
