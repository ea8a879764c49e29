//! Interaction state machine - Pointer gestures to move attempts
//!
//! ```text
//! Idle ──own piece, our turn──▶ Selected(from, targets)
//!   ▲                              │
//!   │   target: attempt move ◀─────┤
//!   │   other own piece: reselect ─┤
//!   └── anything else: clear ◀─────┘
//!
//! promotion target ──▶ AwaitingPromotion(from, to)
//!                        only ChoosePromotion / Cancel accepted
//! ```
//!
//! The state is derived from [`Selection`] and [`PendingPromotion`], so it can
//! never disagree with them.
//!
//! [`Selection`]: crate::game::resources::Selection
//! [`PendingPromotion`]: crate::game::resources::PendingPromotion

use crate::game::context::SessionContext;
use crate::game::events::PointerEvent;
use crate::game::resources::RulesEngine;
use crate::game::systems::coordinator::{
    abandon_promotion, attempt_local_move, resolve_promotion, MoveOutcome,
};
use crate::game::types::Square;
use crate::rendering::{clear_selection_marks, selection_marks};
use std::collections::BTreeSet;
use tracing::debug;

/// Where the pointer flow currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    Selected { from: Square, targets: Vec<Square> },
    AwaitingPromotion { from: Square, to: Square },
}

pub fn interaction_state<E: RulesEngine>(ctx: &SessionContext<E>) -> InteractionState {
    if let Some(request) = ctx.promotion.request() {
        return InteractionState::AwaitingPromotion {
            from: request.from,
            to: request.to,
        };
    }
    match ctx.selection.selected_square {
        Some(from) => InteractionState::Selected {
            from,
            targets: ctx.selection.possible_moves.clone(),
        },
        None => InteractionState::Idle,
    }
}

/// Feed one pointer gesture through the state machine
pub fn handle_pointer<E: RulesEngine>(ctx: &mut SessionContext<E>, event: PointerEvent) {
    match event {
        PointerEvent::Activate(square) => activate(ctx, square),
        PointerEvent::Drop { from, to } => {
            if ctx.promotion.is_active() {
                debug!("[INPUT] Ignoring drop {}{} while promotion pending", from, to);
                return;
            }
            clear_selection(ctx);
            commit(ctx, from, to);
        }
        PointerEvent::ChoosePromotion(kind) => {
            if !ctx.promotion.is_active() {
                debug!("[INPUT] Ignoring promotion choice {:?}, nothing pending", kind);
                return;
            }
            let outcome = resolve_promotion(ctx, kind);
            log_outcome(&outcome);
        }
        PointerEvent::Cancel => {
            if abandon_promotion(ctx) {
                ctx.refresh_status();
            } else {
                clear_selection(ctx);
            }
        }
    }
}

fn activate<E: RulesEngine>(ctx: &mut SessionContext<E>, square: Square) {
    if ctx.promotion.is_active() {
        debug!("[INPUT] Ignoring {} while promotion pending", square);
        return;
    }

    match ctx.selection.selected_square {
        Some(from) if ctx.selection.is_target(square) => {
            clear_selection(ctx);
            commit(ctx, from, square);
        }
        Some(_) => {
            clear_selection(ctx);
            try_select(ctx, square);
        }
        None => {
            try_select(ctx, square);
        }
    }
}

/// Hand `from→to` to the coordinator; promotions come back deferred
fn commit<E: RulesEngine>(ctx: &mut SessionContext<E>, from: Square, to: Square) {
    let outcome = attempt_local_move(ctx, from, to, None);
    log_outcome(&outcome);
}

fn log_outcome(outcome: &MoveOutcome) {
    match outcome {
        MoveOutcome::Applied(applied) => debug!("[INPUT] Played {}", applied.notation),
        MoveOutcome::Deferred => debug!("[INPUT] Waiting for promotion choice"),
        MoveOutcome::Rejected(reason) => debug!("[INPUT] Move rejected: {}", reason),
    }
}

/// Whether the local player may pick up a piece right now
fn can_select<E: RulesEngine>(ctx: &SessionContext<E>) -> bool {
    ctx.is_online()
        && ctx.is_local_turn()
        && !ctx.engine.is_over()
        && !ctx.provider.is_pending()
        && !ctx.promotion.is_active()
}

fn owns_piece_at<E: RulesEngine>(ctx: &SessionContext<E>, square: Square) -> bool {
    match (ctx.engine.piece_at(square), ctx.session.local_color()) {
        (Some((color, _)), Some(local)) => color == local,
        _ => false,
    }
}

fn try_select<E: RulesEngine>(ctx: &mut SessionContext<E>, square: Square) {
    if !can_select(ctx) || !owns_piece_at(ctx, square) {
        return;
    }

    // Promotion variants repeat the same target square
    let targets: Vec<Square> = ctx
        .engine
        .legal_moves(Some(square))
        .iter()
        .map(|m| m.to)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    debug!("[INPUT] Selected {} with {} targets", square, targets.len());
    let marks = selection_marks(square, &targets, ctx.show_hints);
    ctx.selection.select(square, targets);
    ctx.render(marks);
}

/// Drop the selection and its emphasis
pub fn clear_selection<E: RulesEngine>(ctx: &mut SessionContext<E>) {
    let Some(from) = ctx.selection.selected_square else {
        return;
    };
    let marks = clear_selection_marks(from, &ctx.selection.possible_moves);
    ctx.selection.clear();
    ctx.render(marks);
}

/// Clear the selection if it may no longer exist
///
/// Called after remote moves, reconciliation and connection changes.
pub fn revalidate_selection<E: RulesEngine>(ctx: &mut SessionContext<E>) {
    let Some(from) = ctx.selection.selected_square else {
        return;
    };
    if !can_select(ctx) || !owns_piece_at(ctx, from) {
        debug!("[INPUT] Selection on {} no longer valid", from);
        clear_selection(ctx);
    }
}
