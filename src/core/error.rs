//! Error types for core module
//!
//! Provides custom error types for core functionality including settings
//! persistence, configuration overrides and render surface validation.

use thiserror::Error;

/// Errors that can occur in the core module
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings file I/O error
    #[error("Settings I/O error: {0}")]
    SettingsIo(#[from] std::io::Error),

    /// Settings serialization/deserialization error
    #[error("Settings serialization error: {0}")]
    SettingsSerialization(#[from] serde_json::Error),

    /// A configuration value (CLI, environment or file) could not be used
    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfig { field: &'static str, message: String },

    /// The render surface does not expose an element the session needs
    #[error("Render surface is missing required target: {target}")]
    MissingRenderTarget { target: String },
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
