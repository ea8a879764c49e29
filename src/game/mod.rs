//! Game module - The synchronization and interaction engine
//!
//! # Architecture
//!
//! ```text
//! pointer ─┐
//! socket  ─┼─▶ GameDriver queue ─▶ systems(&mut SessionContext) ─▶ effects
//! provider ┘                                                       │
//!                 surface / transport / provider tasks ◀───────────┘
//! ```
//!
//! - [`types`] - Squares, colors, pieces and moves
//! - [`resources`] - Rules engine adapter and session state
//! - [`systems`] - Coordinator, interaction state machine, inbound dispatch
//! - [`ai`] - Move provider client for the automated opponent
//! - [`driver`] - The event loop

pub mod ai;
pub mod context;
pub mod driver;
pub mod error;
pub mod events;
pub mod resources;
pub mod systems;
pub mod types;

pub use context::SessionContext;
pub use driver::GameDriver;
pub use error::{GameError, GameResult};
pub use events::{Effect, GameEvent, PointerEvent};
