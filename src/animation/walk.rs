//! Movement along a path.

use kurbo::{ParamCurve, ParamCurveArclen, PathSeg};

use crate::animation::action::Timeline;
use crate::animation::ease::Ease;
use crate::foundation::core::{BezPath, Point, Vec2};
use crate::node::tree::{NodeId, NodeTree};

const ARCLEN_ACCURACY: f64 = 1e-3;

/// Moves the target along `path` (relative to its position at start), optionally turning it
/// to face the direction of travel.
#[derive(Clone, Debug)]
pub struct Walk {
    path: BezPath,
    duration: f64,
    ease: Ease,
    rotating: bool,
    start: f64,
    end: f64,
    elapsed: f64,
    length: f64,
    origin: Point,
}

impl Walk {
    /// Walk the whole path in `duration` seconds.
    pub fn new(duration: f64, path: BezPath) -> Self {
        Self {
            path,
            duration: duration.max(0.0),
            ease: Ease::Linear,
            rotating: false,
            start: 0.0,
            end: 1.0,
            elapsed: 0.0,
            length: 0.0,
            origin: Point::ORIGIN,
        }
    }

    /// Builder-style easing.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Builder-style rotation to follow the path tangent.
    pub fn rotating(mut self, rotating: bool) -> Self {
        self.rotating = rotating;
        self
    }

    /// Builder-style portion of the path to walk, as fractions of its length.
    pub fn between(mut self, start: f64, end: f64) -> Self {
        self.start = start.clamp(0.0, 1.0);
        self.end = end.clamp(0.0, 1.0);
        self
    }

    /// The path.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    pub(crate) fn reversed(&self) -> Self {
        Self::new(self.duration, self.path.clone())
            .with_ease(self.ease.mirrored())
            .rotating(self.rotating)
            .between(self.end, self.start)
    }

    /// Point and unit tangent at `distance` along the path.
    fn sample(&self, distance: f64) -> Option<(Point, Vec2)> {
        let mut remaining = distance;
        let mut last: Option<PathSeg> = None;
        for seg in self.path.segments() {
            let len = seg.arclen(ARCLEN_ACCURACY);
            if remaining <= len {
                let t = seg.inv_arclen(remaining.max(0.0), ARCLEN_ACCURACY);
                return Some((seg.eval(t), tangent(&seg, t)));
            }
            remaining -= len;
            last = Some(seg);
        }
        last.map(|seg| (seg.eval(1.0), tangent(&seg, 1.0)))
    }
}

fn tangent(seg: &PathSeg, t: f64) -> Vec2 {
    const H: f64 = 1e-4;
    let (a, b) = ((t - H).max(0.0), (t + H).min(1.0));
    let d = seg.eval(b) - seg.eval(a);
    if d.hypot2() > 0.0 { d.normalize() } else { Vec2::ZERO }
}

impl Timeline for Walk {
    fn init(&mut self, tree: &mut NodeTree, target: NodeId) {
        self.elapsed = 0.0;
        self.length = self
            .path
            .segments()
            .map(|s| s.arclen(ARCLEN_ACCURACY))
            .sum();
        if let Some(node) = tree.get(target) {
            self.origin = node.position();
        }
    }

    fn advance(&mut self, tree: &mut NodeTree, target: NodeId, dt: f64) -> Option<f64> {
        self.elapsed += dt;
        if self.length <= 0.0 {
            return Some(self.elapsed);
        }
        let (progress, leftover) = if self.duration <= 0.0 {
            (1.0, Some(self.elapsed))
        } else if self.elapsed >= self.duration {
            (1.0, Some(self.elapsed - self.duration))
        } else {
            (self.elapsed / self.duration, None)
        };

        let eased = self.ease.apply(progress);
        let frac = (self.start + (self.end - self.start) * eased).clamp(0.0, 1.0);
        if let Some((point, dir)) = self.sample(self.length * frac)
            && let Some(node) = tree.get_mut(target)
        {
            node.set_position(self.origin + point.to_vec2());
            if self.rotating && dir != Vec2::ZERO {
                node.set_rotation(dir.y.atan2(dir.x).to_degrees());
            }
        }
        leftover
    }

    fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    fn duration(&self) -> Option<f64> {
        Some(self.duration)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/walk.rs"]
mod tests;
