//! Configuration, window seam, deferred queue and the frame loop.

pub(crate) mod application;
pub(crate) mod config;
pub(crate) mod deferred;
pub(crate) mod window;
