//! Local transform value type and matrix composition.

use crate::foundation::core::{Affine, Point, Size, Vec2};
use crate::foundation::math::deg_to_rad;

/// Local transform of a node relative to its parent.
///
/// Angles are in degrees. `pivot` is normalized against `size`: `(0, 0)` is the top-left corner,
/// `(0.5, 0.5)` the center. The node is drawn so that its pivot lands on `position`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    /// Position of the pivot in parent space.
    pub position: Point,
    /// Non-uniform scale, default `(1, 1)`.
    pub scale: Vec2,
    /// Skew angles (degrees) along x and y.
    pub skew: Vec2,
    /// Clockwise rotation in degrees (y axis points down).
    pub rotation: f64,
    /// Unscaled content size.
    pub size: Size,
    /// Normalized pivot.
    pub pivot: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Point::ORIGIN,
            scale: Vec2::new(1.0, 1.0),
            skew: Vec2::ZERO,
            rotation: 0.0,
            size: Size::ZERO,
            pivot: Vec2::ZERO,
        }
    }
}

impl Transform {
    /// Pivot expressed in local pixels.
    pub fn pivot_offset(&self) -> Vec2 {
        Vec2::new(
            self.size.width * self.pivot.x,
            self.size.height * self.pivot.y,
        )
    }

    /// Local matrix.
    ///
    /// Canonical order:
    /// T(position) * R(rotation) * K(skew) * S(scale) * T(-pivot)
    pub fn to_affine(&self) -> Affine {
        let t_position = Affine::translate(self.position.to_vec2());
        let t_rotate = Affine::rotate(deg_to_rad(self.rotation));
        let t_skew = Affine::skew(
            deg_to_rad(self.skew.x).tan(),
            deg_to_rad(self.skew.y).tan(),
        );
        let t_scale = Affine::scale_non_uniform(self.scale.x, self.scale.y);
        let t_unpivot = Affine::translate(-self.pivot_offset());

        t_position * t_rotate * t_skew * t_scale * t_unpivot
    }
}

/// Matrices cached on a node after a transform refresh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrices {
    /// Basis inherited by children (includes the pivot translation).
    pub initial: Affine,
    /// Matrix used to draw the node and hit-test it.
    pub final_: Affine,
}

impl Default for Matrices {
    fn default() -> Self {
        Self {
            initial: Affine::IDENTITY,
            final_: Affine::IDENTITY,
        }
    }
}

/// Compose a node's matrices from its local transform and its parent basis.
pub(crate) fn compose(local: &Transform, parent_initial: Affine) -> Matrices {
    let final_ = parent_initial * local.to_affine();
    let initial = final_ * Affine::translate(local.pivot_offset());
    Matrices { initial, final_ }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/affine.rs"]
mod tests;
