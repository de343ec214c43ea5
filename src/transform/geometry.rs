//! Hit-test geometry: the transformed rectangle of a node.

use crate::foundation::core::{Affine, Point, Rect, Size, Vec2};

/// A node's bounds after its final matrix is applied.
///
/// Corners are stored in local order: top-left, top-right, bottom-right, bottom-left. Affine
/// images of a rectangle are parallelograms, so the quad is always convex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    /// World-space corners.
    pub corners: [Point; 4],
}

impl Default for Quad {
    fn default() -> Self {
        Self {
            corners: [Point::ORIGIN; 4],
        }
    }
}

impl Quad {
    /// Transform the local rectangle `(0, 0) .. size` by `m`.
    pub fn from_transform(m: Affine, size: Size) -> Self {
        let (w, h) = (size.width, size.height);
        Self {
            corners: [
                m * Point::new(0.0, 0.0),
                m * Point::new(w, 0.0),
                m * Point::new(w, h),
                m * Point::new(0.0, h),
            ],
        }
    }

    /// Axis-aligned bounding box.
    pub fn aabb(&self) -> Rect {
        let mut r = Rect::from_points(self.corners[0], self.corners[1]);
        r = r.union_pt(self.corners[2]);
        r.union_pt(self.corners[3])
    }

    fn signed_area2(&self) -> f64 {
        let mut acc = 0.0;
        for i in 0..4 {
            let a = self.corners[i];
            let b = self.corners[(i + 1) % 4];
            acc += a.x * b.y - b.x * a.y;
        }
        acc
    }

    /// Return `true` when the quad has no area (zero size or degenerate matrix).
    pub fn is_degenerate(&self) -> bool {
        self.signed_area2().abs() < 1e-12
    }

    /// Point-in-quad test. Points on an edge count as inside.
    pub fn contains(&self, pt: Point) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let orientation = self.signed_area2().signum();
        (0..4).all(|i| {
            let a = self.corners[i];
            let b = self.corners[(i + 1) % 4];
            let cross = (b - a).cross(pt - a);
            cross * orientation >= -1e-9
        })
    }

    /// Separating-axis overlap test between two convex quads.
    pub fn intersects(&self, other: &Quad) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        !self
            .edge_normals()
            .chain(other.edge_normals())
            .any(|axis| separated_on(axis, self, other))
    }

    fn edge_normals(&self) -> impl Iterator<Item = Vec2> + '_ {
        (0..2).map(move |i| {
            let e = self.corners[i + 1] - self.corners[i];
            Vec2::new(-e.y, e.x)
        })
    }

    fn project(&self, axis: Vec2) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for c in self.corners {
            let d = c.to_vec2().dot(axis);
            min = min.min(d);
            max = max.max(d);
        }
        (min, max)
    }
}

fn separated_on(axis: Vec2, a: &Quad, b: &Quad) -> bool {
    if axis.hypot2() < 1e-18 {
        return false;
    }
    let (a_min, a_max) = a.project(axis);
    let (b_min, b_max) = b.project(axis);
    a_max < b_min || b_max < a_min
}

#[cfg(test)]
#[path = "../../tests/unit/transform/geometry.rs"]
mod tests;
