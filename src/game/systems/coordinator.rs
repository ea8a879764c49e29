//! Move coordinator - Single authority for applying moves
//!
//! Every move, local gesture, peer frame or provider reply, goes through this
//! module and nowhere else touches the rules engine's position.
//!
//! # Phases
//!
//! ```text
//! Idle ──promotion without piece──▶ AwaitingPromotionChoice ──resolve/abandon──▶ Idle
//!  │
//!  └──local move (vs provider)──▶ AwaitingRemoteProviderMove ──reply──▶ Idle
//! ```
//!
//! The phase is derived from [`PendingPromotion`] and the provider guard,
//! never stored separately.
//!
//! # Fan-out
//!
//! After every accepted move, in order:
//! 1. Redraw the position
//! 2. Last-move and check highlights
//! 3. History log
//! 4. `move` broadcast (local moves only)
//! 5. Provider request (local moves against a provider, game not over)
//! 6. Status line
//!
//! The turn flips with every accepted move, so the local guard
//! (`is_local_turn`) and the remote guard (`!is_local_turn`) can never both
//! hold for the same ply.
//!
//! [`PendingPromotion`]: crate::game::resources::PendingPromotion

use crate::game::ai::{ProviderMove, ProviderResult};
use crate::game::context::SessionContext;
use crate::game::error::GameResult;
use crate::game::events::Effect;
use crate::game::resources::{AppliedMove, RulesEngine};
use crate::game::systems::input::{clear_selection, revalidate_selection};
use crate::game::types::{PieceType, Square};
use shared::GameMessage;
use std::fmt;
use tracing::{debug, info, warn};

/// Coordinator phase, derived from the guards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorPhase {
    Idle,
    AwaitingRemoteProviderMove,
    AwaitingPromotionChoice,
}

/// Why a move was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    PromotionPending,
    ProviderPending,
    NotConnected,
    GameOver,
    NotLocalTurn,
    /// A remote move arrived while it is our turn
    LocalTurn,
    IllegalMove,
    NoPromotionPending,
    InvalidPromotionPiece,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectReason::PromotionPending => "a promotion choice is pending",
            RejectReason::ProviderPending => "waiting for the move provider",
            RejectReason::NotConnected => "not connected",
            RejectReason::GameOver => "the game is over",
            RejectReason::NotLocalTurn => "not your turn",
            RejectReason::LocalTurn => "it is the local player's turn",
            RejectReason::IllegalMove => "illegal move",
            RejectReason::NoPromotionPending => "no promotion is pending",
            RejectReason::InvalidPromotionPiece => "pawns promote to q, r, b or n",
        };
        f.write_str(text)
    }
}

/// Result of a local move attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied(AppliedMove),
    /// Promotion recorded; waiting for the piece choice
    Deferred,
    Rejected(RejectReason),
}

impl MoveOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied(_))
    }
}

/// Where a remote move came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOrigin {
    Peer,
    Provider,
}

pub fn phase<E: RulesEngine>(ctx: &SessionContext<E>) -> CoordinatorPhase {
    if ctx.promotion.is_active() {
        CoordinatorPhase::AwaitingPromotionChoice
    } else if ctx.provider.is_pending() {
        CoordinatorPhase::AwaitingRemoteProviderMove
    } else {
        CoordinatorPhase::Idle
    }
}

/// Shared preconditions of local moves, in priority order
fn check_local_preconditions<E: RulesEngine>(ctx: &SessionContext<E>) -> Option<RejectReason> {
    if ctx.promotion.is_active() {
        Some(RejectReason::PromotionPending)
    } else if ctx.provider.is_pending() {
        Some(RejectReason::ProviderPending)
    } else if !ctx.is_online() {
        Some(RejectReason::NotConnected)
    } else if ctx.engine.is_over() {
        Some(RejectReason::GameOver)
    } else if !ctx.is_local_turn() {
        Some(RejectReason::NotLocalTurn)
    } else {
        None
    }
}

/// Try to play `from→to` for the local player
///
/// A legal promotion without `promotion_hint` is recorded and deferred until
/// [`resolve_promotion`]. Rejections have no side effects.
pub fn attempt_local_move<E: RulesEngine>(
    ctx: &mut SessionContext<E>,
    from: Square,
    to: Square,
    promotion_hint: Option<PieceType>,
) -> MoveOutcome {
    if let Some(reason) = check_local_preconditions(ctx) {
        debug!("[MOVE] Rejected {}{}: {}", from, to, reason);
        return MoveOutcome::Rejected(reason);
    }

    if ctx.engine.requires_promotion(from, to) {
        match promotion_hint {
            None => {
                let color = ctx.engine.turn_color();
                ctx.promotion.start(from, to, color);
                info!("[PROMOTION] {}{} awaiting piece choice", from, to);
                ctx.emit(Effect::PromptPromotion { from, to, color });
                return MoveOutcome::Deferred;
            }
            Some(kind) if !kind.is_promotion_choice() => {
                return MoveOutcome::Rejected(RejectReason::InvalidPromotionPiece);
            }
            Some(_) => {}
        }
    }

    apply_local(ctx, from, to, promotion_hint)
}

/// Complete the pending promotion with `kind`
pub fn resolve_promotion<E: RulesEngine>(ctx: &mut SessionContext<E>, kind: PieceType) -> MoveOutcome {
    let Some(request) = ctx.promotion.request() else {
        return MoveOutcome::Rejected(RejectReason::NoPromotionPending);
    };
    if !kind.is_promotion_choice() {
        return MoveOutcome::Rejected(RejectReason::InvalidPromotionPiece);
    }

    ctx.promotion.clear();
    if let Some(reason) = check_local_preconditions(ctx) {
        warn!(
            "[PROMOTION] Dropping {}{}={}: {}",
            request.from,
            request.to,
            kind.to_char(),
            reason
        );
        ctx.refresh_status();
        return MoveOutcome::Rejected(reason);
    }

    info!("[PROMOTION] {}{} promotes to {}", request.from, request.to, kind.to_char());
    apply_local(ctx, request.from, request.to, Some(kind))
}

/// Drop the pending promotion without moving
pub fn abandon_promotion<E: RulesEngine>(ctx: &mut SessionContext<E>) -> bool {
    match ctx.promotion.clear() {
        Some(request) => {
            info!("[PROMOTION] Abandoned {}{}", request.from, request.to);
            true
        }
        None => false,
    }
}

fn apply_local<E: RulesEngine>(
    ctx: &mut SessionContext<E>,
    from: Square,
    to: Square,
    promotion: Option<PieceType>,
) -> MoveOutcome {
    let Some(applied) = ctx.engine.apply_move(from, to, promotion) else {
        debug!("[MOVE] Rejected {}{}: illegal", from, to);
        return MoveOutcome::Rejected(RejectReason::IllegalMove);
    };

    info!("[MOVE] Local {} {}", applied.color, applied.notation);
    fan_out(ctx, &applied, true);
    request_provider_turn(ctx);
    ctx.refresh_status();
    MoveOutcome::Applied(applied)
}

/// Apply a move from the peer or the move provider
///
/// Accepted only when it is not the local turn and no promotion is pending.
/// A promotion without a piece defaults to a queen. Illegal peer moves ask
/// the server for the canonical position.
pub fn apply_remote_move<E: RulesEngine>(
    ctx: &mut SessionContext<E>,
    from: Square,
    to: Square,
    promotion: Option<PieceType>,
    origin: MoveOrigin,
) -> MoveOutcome {
    if ctx.promotion.is_active() {
        warn!("[MOVE] Dropping {:?} move {}{}: promotion pending", origin, from, to);
        return MoveOutcome::Rejected(RejectReason::PromotionPending);
    }
    if ctx.is_local_turn() {
        warn!("[MOVE] Dropping {:?} move {}{}: local turn", origin, from, to);
        return MoveOutcome::Rejected(RejectReason::LocalTurn);
    }

    let promotion = match promotion {
        None if ctx.engine.requires_promotion(from, to) => Some(PieceType::Queen),
        other => other,
    };

    let Some(applied) = ctx.engine.apply_move(from, to, promotion) else {
        warn!(
            "[MOVE] Dropping illegal {:?} move {}{} on {}",
            origin,
            from,
            to,
            ctx.engine.serialize()
        );
        if origin == MoveOrigin::Peer {
            ctx.send(GameMessage::SyncRequest);
        }
        return MoveOutcome::Rejected(RejectReason::IllegalMove);
    };

    info!("[MOVE] {:?} {} {}", origin, applied.color, applied.notation);
    fan_out(ctx, &applied, false);
    revalidate_selection(ctx);
    ctx.refresh_status();
    MoveOutcome::Applied(applied)
}

/// Handle the provider's answer to request `request_id`
pub fn handle_provider_reply<E: RulesEngine>(
    ctx: &mut SessionContext<E>,
    request_id: u64,
    reply: ProviderResult<ProviderMove>,
) -> Option<MoveOutcome> {
    if !ctx.provider.take(request_id) {
        debug!("[AI] Discarding stale reply to request {}", request_id);
        return None;
    }

    match reply {
        Ok(mv) => {
            let outcome =
                apply_remote_move(ctx, mv.from, mv.to, mv.promotion, MoveOrigin::Provider);
            ctx.refresh_status();
            Some(outcome)
        }
        Err(e) => {
            warn!("[AI] Move provider failed, turn stalls: {}", e);
            ctx.refresh_status();
            None
        }
    }
}

/// Ask the provider to move when it is its turn
///
/// No-op outside automated mode, on the local turn, after the game ended or
/// while a request is already in flight.
pub fn request_provider_turn<E: RulesEngine>(ctx: &mut SessionContext<E>) -> Option<u64> {
    let mode = ctx.session.mode().provider()?;
    if ctx.session.local_color().is_none() || ctx.is_local_turn() || ctx.engine.is_over() {
        return None;
    }
    let request_id = ctx.provider.request()?;
    let board = ctx.engine.serialize();
    info!("[AI] Requesting {} move (request {})", mode, request_id);
    ctx.emit(Effect::RequestProviderMove {
        request_id,
        mode,
        board,
    });
    ctx.refresh_status();
    Some(request_id)
}

/// Replace the position with the server's canonical board
pub fn reconcile<E: RulesEngine>(ctx: &mut SessionContext<E>, board: &str) -> GameResult<()> {
    ctx.engine.load(board)?;
    info!("[MOVE] Position reconciled to {}", board);

    if ctx.promotion.clear().is_some() {
        info!("[PROMOTION] Pending promotion dropped by reconciliation");
    }
    ctx.provider.reset();

    ctx.render_position();
    let cleared = ctx.highlights.clear();
    ctx.render(cleared);
    let check = ctx.highlights.mark_check(&ctx.engine);
    ctx.render(check);

    clear_selection(ctx);
    request_provider_turn(ctx);
    ctx.refresh_status();
    Ok(())
}

fn fan_out<E: RulesEngine>(ctx: &mut SessionContext<E>, applied: &AppliedMove, broadcast: bool) {
    let mv = applied.chess_move;

    ctx.render_position();
    let last_move = ctx.highlights.mark_last_move(mv.from, mv.to);
    ctx.render(last_move);
    let check = ctx.highlights.mark_check(&ctx.engine);
    ctx.render(check);

    ctx.history.push(applied.color, applied.notation.clone());

    if broadcast {
        let promotion = mv
            .promotion
            .filter(|kind| *kind != PieceType::Queen)
            .map(|kind| kind.to_char().to_string());
        ctx.send(GameMessage::Move {
            source: mv.from.to_string(),
            target: mv.to.to_string(),
            promotion,
        });
    }
}
