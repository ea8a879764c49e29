//! XFChess sync - Two-player chess session synchronization
//!
//! Keeps a local board in lockstep with a remote peer over a WebSocket game
//! server, or with an HTTP move provider acting as the opponent.
//!
//! - [`core`] - Settings, persistence and configuration errors
//! - [`game`] - Rules engine adapter, session state, systems and driver
//! - [`input`] - Terminal commands to pointer gestures
//! - [`networking`] - Connection manager, backoff and WebSocket transport
//! - [`rendering`] - Render surface contract, highlights and text board

pub mod core;
pub mod game;
pub mod input;
pub mod networking;
pub mod rendering;
