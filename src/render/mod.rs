//! Renderer interface and a recording implementation.

pub(crate) mod backend;
pub(crate) mod recording;
