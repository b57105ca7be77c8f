//! Messenger abstractions: the port the workflows drive and the types crossing it.

pub mod port;
pub mod types;
