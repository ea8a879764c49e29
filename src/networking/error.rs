//! Error types for the networking module

use thiserror::Error;

/// Errors raised by the game socket
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Server URL could not be turned into a request URI
    #[error("Invalid server URI {url:?}: {message}")]
    InvalidUri { url: String, message: String },

    /// WebSocket handshake or I/O failure
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] websocket::Error),

    /// Inbound frame that is not a known envelope
    #[error("Protocol error: {0}")]
    Protocol(#[from] shared::ProtocolError),
}

/// Result type alias for networking operations
pub type NetworkResult<T> = Result<T, NetworkError>;
