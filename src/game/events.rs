//! Events and effects of the session
//!
//! Every input to the session is a [`GameEvent`] on the driver queue. Every
//! output is an [`Effect`] that the driver executes after the event has been
//! handled to completion.

use crate::game::ai::{ProviderMode, ProviderMove, ProviderResult};
use crate::game::resources::GameStatus;
use crate::game::types::{PieceColor, PieceType, Square};
use crate::networking::{ConnectRequest, TransportEvent};
use crate::rendering::RenderCommand;

/// Raw gesture reported by the render surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Click / tap on a square
    Activate(Square),
    /// Drag from one square and release on another
    Drop { from: Square, to: Square },
    /// Piece picked in the promotion prompt
    ChoosePromotion(PieceType),
    /// Dismiss the promotion prompt or the current selection
    Cancel,
}

/// Anything the driver reacts to
#[derive(Debug)]
pub enum GameEvent {
    Pointer(PointerEvent),
    Transport(TransportEvent),
    ProviderReply {
        request_id: u64,
        result: ProviderResult<ProviderMove>,
    },
    Shutdown,
}

/// Side effect requested by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start a connection attempt
    Connect(ConnectRequest),
    /// Write a text frame on the open link
    Transmit(String),
    /// Ask the move provider for a reply
    RequestProviderMove {
        request_id: u64,
        mode: ProviderMode,
        board: String,
    },
    Render(RenderCommand),
    PromptPromotion {
        from: Square,
        to: Square,
        color: PieceColor,
    },
    Status(GameStatus),
    /// Draw the board from this side
    Orient(PieceColor),
}
