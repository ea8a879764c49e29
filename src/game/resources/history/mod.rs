//! Game history tracking resources
//!
//! Manages the move log and the user-facing game status.

pub mod game_over;
pub mod history;

// Re-export all public items
pub use game_over::*;
pub use history::*;
