//! Turn management resources
//!
//! Tracks outstanding move provider requests.

pub mod pending;

// Re-export all public items
pub use pending::*;
