//! Game status tracking and result messages
//!
//! Derives the user-facing status line from the rules engine and the local
//! color. Nothing here is cached: [`GameStatus::evaluate`] is called after
//! every state change and the driver forwards changes to the render surface.
//!
//! # Game Over Conditions
//!
//! ## Checkmate
//! - **Victory**: the side to move is mated and it is not us
//! - **Defeat**: we are the side to move and we are mated
//!
//! ## Draw Conditions
//! - **Stalemate**: side to move has no legal moves but is NOT in check
//! - **InsufficientMaterial**: neither player can deliver checkmate
//! - **Fifty-move rule**: 100 half-moves without capture or pawn move

use crate::game::resources::RulesEngine;
use crate::game::types::PieceColor;

/// What the status line says
///
/// # State Transitions
///
/// ```text
/// AwaitingColor → YourTurn ⇄ OpponentToMove / ProviderThinking
///                     └──────────┴──→ Victory / Defeat / Draw
/// ```
///
/// The three result states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    /// Connected (or connecting) but the server has not told us our color
    #[default]
    AwaitingColor,
    YourTurn,
    /// Waiting for the remote peer
    OpponentToMove,
    /// Waiting for the move provider's reply
    ProviderThinking,
    Victory,
    Defeat,
    Draw,
}

impl GameStatus {
    /// Derive the status from the current position
    pub fn evaluate<E: RulesEngine + ?Sized>(
        engine: &E,
        local_color: Option<PieceColor>,
        provider_pending: bool,
    ) -> Self {
        let Some(local) = local_color else {
            return GameStatus::AwaitingColor;
        };

        if engine.is_checkmate() {
            return if engine.turn_color() == local {
                GameStatus::Defeat
            } else {
                GameStatus::Victory
            };
        }
        if engine.is_draw() {
            return GameStatus::Draw;
        }

        if engine.turn_color() == local {
            GameStatus::YourTurn
        } else if provider_pending {
            GameStatus::ProviderThinking
        } else {
            GameStatus::OpponentToMove
        }
    }

    /// Check if the game has ended
    pub fn is_game_over(self) -> bool {
        matches!(self, GameStatus::Victory | GameStatus::Defeat | GameStatus::Draw)
    }

    /// Human-readable status line
    pub fn message(self) -> &'static str {
        match self {
            GameStatus::AwaitingColor => "Waiting for the server to assign a color...",
            GameStatus::YourTurn => "Your turn to play!",
            GameStatus::OpponentToMove => "Waiting for the opponent...",
            GameStatus::ProviderThinking => "The computer is thinking...",
            GameStatus::Victory => "Game over. Checkmate, you win!",
            GameStatus::Defeat => "Game over. Checkmate, you lose.",
            GameStatus::Draw => "Game over. Draw.",
        }
    }
}
