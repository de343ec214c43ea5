//! Node transform values and the hit-test geometry derived from them.

pub(crate) mod affine;
pub(crate) mod geometry;
