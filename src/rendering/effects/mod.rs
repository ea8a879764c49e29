//! Visual effects layered on top of the board
//!
//! - [`highlight`] - Last-move and check-square marks
//! - [`move_hints`] - Selected square and legal target emphasis

pub mod highlight;
pub mod move_hints;

// Re-export all public items
pub use highlight::*;
pub use move_hints::*;
