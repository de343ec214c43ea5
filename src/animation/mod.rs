//! Actions and easing.

pub(crate) mod action;
pub(crate) mod ease;
pub(crate) mod group;
pub mod ops;
pub(crate) mod tween;
pub(crate) mod walk;
