//! Session state - Who we are and how we are connected
//!
//! The local color is assigned exactly once per session and never changes
//! afterwards. Turn ownership is never cached: [`Session::is_local_turn`]
//! asks the rules engine every time.
//!
//! # Color assignment
//!
//! | Situation                                    | Result                         |
//! |----------------------------------------------|--------------------------------|
//! | First assignment                             | [`ColorAssignment::Assigned`]  |
//! | Again on the same connection                 | fatal `DuplicateColorAssignment` |
//! | Same color on a later connection (reconnect) | [`ColorAssignment::Confirmed`] |
//! | Different color on a later connection        | fatal `ColorReassigned`        |
//! | Any assignment in `VsAutomated` mode         | [`ColorAssignment::Ignored`]   |

use crate::game::ai::GameMode;
use crate::game::error::{GameError, GameResult};
use crate::game::resources::RulesEngine;
use crate::game::types::PieceColor;
use crate::networking::{ConnectionManager, ConnectionState};
use tracing::info;
use uuid::Uuid;

/// How an inbound color assignment was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorAssignment {
    Assigned,
    Confirmed,
    Ignored,
}

/// Assigned color, connection and game mode
#[derive(Debug, Clone)]
pub struct Session {
    local_color: Option<PieceColor>,
    /// Connection the current color was (last) assigned or confirmed on
    assigned_on: Option<Uuid>,
    mode: GameMode,
    pub connection: ConnectionManager,
}

impl Session {
    pub fn new(mode: GameMode, connection: ConnectionManager) -> Self {
        Self {
            local_color: None,
            assigned_on: None,
            mode,
            connection,
        }
    }

    pub fn local_color(&self) -> Option<PieceColor> {
        self.local_color
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection.state()
    }

    pub fn connection_id(&self) -> Option<Uuid> {
        self.connection.connection_id()
    }

    pub fn is_open(&self) -> bool {
        self.connection.is_open()
    }

    /// Apply an `assign_color` frame received on `connection_id`
    pub fn assign_color(
        &mut self,
        color: PieceColor,
        connection_id: Option<Uuid>,
    ) -> GameResult<ColorAssignment> {
        if self.mode.is_automated() {
            info!(
                "[SESSION] Ignoring server color {} in automated mode (playing {:?})",
                color, self.local_color
            );
            return Ok(ColorAssignment::Ignored);
        }

        match self.local_color {
            None => {
                self.local_color = Some(color);
                self.assigned_on = connection_id;
                info!("[SESSION] Assigned color {}", color);
                Ok(ColorAssignment::Assigned)
            }
            Some(current) if self.assigned_on == connection_id => {
                Err(GameError::DuplicateColorAssignment {
                    current,
                    received: color,
                })
            }
            Some(current) if current == color => {
                self.assigned_on = connection_id;
                info!("[SESSION] Color {} confirmed after reconnect", color);
                Ok(ColorAssignment::Confirmed)
            }
            Some(current) => Err(GameError::ColorReassigned {
                current,
                received: color,
            }),
        }
    }

    /// Pick the local color without the server (automated opponent)
    pub fn choose_local_color(&mut self, color: PieceColor) -> GameResult<()> {
        if let Some(current) = self.local_color {
            return Err(GameError::InvalidStateTransition {
                message: format!("local color already set to {current}"),
            });
        }
        info!("[SESSION] Playing {} against {:?}", color, self.mode);
        self.local_color = Some(color);
        Ok(())
    }

    /// `engine.turn_color() == local_color`; false while unassigned
    pub fn is_local_turn<E: RulesEngine + ?Sized>(&self, engine: &E) -> bool {
        self.local_color == Some(engine.turn_color())
    }
}
