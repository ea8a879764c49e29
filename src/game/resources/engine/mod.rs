//! Rules engine integration
//!
//! Exposes the [`RulesEngine`] contract and its `shakmaty`-backed adapter.

pub mod engine;

// Re-export all public items
pub use engine::*;
