//! Chess game resources - Session state owned by the driver
//!
//! Every resource here is a plain value owned by
//! [`crate::game::context::SessionContext`] and mutated only while the driver
//! handles one event.
//!
//! # Resource Categories
//!
//! ## Rules
//! - [`RulesEngine`] / [`ChessEngine`] - Legality, check detection, FEN
//!
//! ## Session
//! - [`Session`] - Local color, game mode and the connection
//!
//! ## Player Interaction
//! - [`Selection`] - Currently selected square and its legal targets
//! - [`PendingPromotion`] - Promotion move waiting for a piece choice
//!
//! ## Turn Management
//! - [`ProviderRequestGuard`] - Single-flight move provider requests
//!
//! ## Game History
//! - [`MoveHistory`] - Append-only SAN log
//! - [`GameStatus`] - User-facing status line

pub mod engine;
pub mod history;
pub mod player;
pub mod session;
pub mod turn;


// Re-export all resources for convenience
pub use engine::*;
pub use history::*;
pub use player::*;
pub use session::*;
pub use turn::*;
