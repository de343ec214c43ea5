//! Scene-graph nodes, the arena that owns them, and the passes over it.

pub(crate) mod actions;
pub(crate) mod button;
pub(crate) mod dispatch;
pub(crate) mod node;
pub(crate) mod task;
pub(crate) mod traverse;
pub(crate) mod tree;
