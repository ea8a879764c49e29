//! Core module - Configuration and shared infrastructure
//!
//! Everything here is independent of the game session itself:
//!
//! - [`GameSettings`] - User preferences and connection endpoints
//! - [`ReconnectSettings`] - Backoff policy for the game socket
//! - [`settings_persistence`] - JSON persistence under the platform config dir
//! - [`CoreError`] - Errors raised while configuring a session

pub mod error;
pub mod resources;
pub mod settings_persistence;

pub use error::{CoreError, CoreResult};
pub use resources::*;
pub use settings_persistence::{
    load_settings, load_settings_from, save_settings, save_settings_to, settings_path,
};
