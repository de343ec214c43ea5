//! Asynchronous HTTP requests with main-thread completion.

pub(crate) mod client;
pub(crate) mod transport;
