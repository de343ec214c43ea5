//! Event model: typed events and listeners.

pub(crate) mod event;
pub(crate) mod listener;
