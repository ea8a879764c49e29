//! Inbound network handling
//!
//! The single dispatch point for everything the transport reports:
//! connection lifecycle events and decoded `GameMessage` frames.
//!
//! Malformed frames are logged and dropped; the connection stays up. Only
//! a duplicate or conflicting color assignment is returned as an error, and
//! the driver treats it as fatal.

use crate::game::context::SessionContext;
use crate::game::error::GameResult;
use crate::game::events::Effect;
use crate::game::resources::{ColorAssignment, RulesEngine};
use crate::game::systems::coordinator::{apply_remote_move, reconcile, MoveOrigin};
use crate::game::systems::input::revalidate_selection;
use crate::game::types::{PieceColor, PieceType, Square};
use crate::networking::TransportEvent;
use shared::GameMessage;
use tracing::{debug, info, warn};

/// Handle one transport event
pub fn handle_transport_event<E: RulesEngine>(
    ctx: &mut SessionContext<E>,
    event: TransportEvent,
) -> GameResult<()> {
    match event {
        TransportEvent::Opened { attempt } => {
            if ctx.session.connection.on_opened(attempt).is_some() {
                ctx.send(GameMessage::Join);
                ctx.refresh_status();
            }
        }
        TransportEvent::Closed { attempt } => {
            if let Some(request) = ctx.session.connection.on_closed(attempt) {
                ctx.emit(Effect::Connect(request));
            }
            revalidate_selection(ctx);
        }
        TransportEvent::ConnectFailed { attempt, error } => {
            debug!("[NETWORK] Attempt {} failed: {}", attempt, error);
            if let Some(request) = ctx.session.connection.on_connect_failed(attempt) {
                ctx.emit(Effect::Connect(request));
            }
        }
        TransportEvent::Frame { attempt, text } => {
            if attempt != ctx.session.connection.current_attempt() || !ctx.session.is_open() {
                debug!("[NETWORK] Ignoring frame from stale attempt {}", attempt);
                return Ok(());
            }
            handle_frame(ctx, &text)?;
        }
    }
    Ok(())
}

/// Decode and dispatch one inbound text frame
pub fn handle_frame<E: RulesEngine>(ctx: &mut SessionContext<E>, text: &str) -> GameResult<()> {
    let message = match GameMessage::decode(text) {
        Ok(message) => message,
        Err(e) => {
            warn!("[NETWORK] Discarding malformed frame {:?}: {}", text, e);
            return Ok(());
        }
    };

    match message {
        GameMessage::AssignColor { color } => {
            let color = match PieceColor::from_code(&color) {
                Ok(color) => color,
                Err(e) => {
                    warn!("[NETWORK] Discarding assign_color: {}", e);
                    return Ok(());
                }
            };
            let connection_id = ctx.session.connection_id();
            if ctx.session.assign_color(color, connection_id)? == ColorAssignment::Assigned {
                ctx.emit(Effect::Orient(color));
            }
            revalidate_selection(ctx);
            ctx.refresh_status();
        }
        GameMessage::Move {
            source,
            target,
            promotion,
        } => {
            let Some((from, to, promotion)) = parse_move(&source, &target, promotion.as_deref())
            else {
                return Ok(());
            };
            apply_remote_move(ctx, from, to, promotion, MoveOrigin::Peer);
        }
        GameMessage::Sync { fen } => {
            if let Err(e) = reconcile(ctx, &fen) {
                warn!("[NETWORK] Discarding sync frame: {}", e);
            }
        }
        GameMessage::Join | GameMessage::SyncRequest => {
            info!("[NETWORK] Ignoring server-bound {} frame", message.kind());
        }
    }
    Ok(())
}

fn parse_move(
    source: &str,
    target: &str,
    promotion: Option<&str>,
) -> Option<(Square, Square, Option<PieceType>)> {
    let parsed = (|| {
        let from: Square = source.parse()?;
        let to: Square = target.parse()?;
        let promotion = promotion.map(PieceType::parse_promotion).transpose()?;
        GameResult::Ok((from, to, promotion))
    })();

    match parsed {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!("[NETWORK] Discarding move frame: {}", e);
            None
        }
    }
}
