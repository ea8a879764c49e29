//! Automated opponent
//!
//! The sync engine never searches for moves itself. In
//! [`GameMode::VsAutomated`] it asks an external move provider over HTTP and
//! feeds the reply back through the remote-move path.

pub mod client;
pub mod resource;

pub use client::{HttpMoveProvider, MoveProvider, ProviderError, ProviderMove, ProviderResult};
pub use resource::{GameMode, ProviderMode};
