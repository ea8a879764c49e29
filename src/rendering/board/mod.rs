//! Board presentation
//!
//! Maps square marks to visual tokens and draws positions as text.

pub mod board;
pub mod board_theme;

// Re-export all public items
pub use board::*;
pub use board_theme::*;
