//! Error types for game module
//!
//! Provides custom error types for game logic including notation parsing,
//! engine synchronization, and session state management.

use crate::game::types::PieceColor;

/// Errors that can occur in game logic
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Square notation outside a1..h8
    #[error("Invalid square: {notation:?}")]
    InvalidSquare { notation: String },

    /// Color code other than "w" / "b"
    #[error("Invalid color code: {code:?}")]
    InvalidColor { code: String },

    /// Promotion piece other than q/r/b/n
    #[error("Invalid promotion piece: {code:?}")]
    InvalidPromotion { code: String },

    /// Game mode other than multiplayer/random/minimax/nn
    #[error("Unknown game mode: {name:?}")]
    InvalidMode { name: String },

    /// Board string rejected by the rules engine
    #[error("Invalid board: {message}")]
    InvalidBoard { message: String },

    /// A second color assignment arrived on the connection that already assigned one
    #[error("Color already assigned on this connection (have {current}, got {received})")]
    DuplicateColorAssignment {
        current: PieceColor,
        received: PieceColor,
    },

    /// A later connection tried to hand us the other color
    #[error("Server reassigned color from {current} to {received}")]
    ColorReassigned {
        current: PieceColor,
        received: PieceColor,
    },

    /// Invalid game state transition
    #[error("Invalid game state transition: {message}")]
    InvalidStateTransition { message: String },
}

impl GameError {
    /// Errors after which the session cannot continue
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GameError::DuplicateColorAssignment { .. } | GameError::ColorReassigned { .. }
        )
    }
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
