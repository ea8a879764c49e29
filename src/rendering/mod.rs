//! Rendering module - Everything the session tells the board to draw
//!
//! The session never draws pixels itself. It emits [`RenderCommand`]s and
//! status updates that a [`RenderSurface`] turns into something visible.
//!
//! # Submodules
//!
//! - [`board`] - Highlight theme and the ASCII board used by the terminal surface
//! - [`effects`] - Layered square marks (selection, hints, last move, check)
//! - [`surface`] - The render surface contract and its terminal implementation

pub mod board;
pub mod effects;
pub mod surface;

pub use board::*;
pub use effects::*;
pub use surface::*;
