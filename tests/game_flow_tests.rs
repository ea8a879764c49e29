//! Game Flow Integration Tests
//!
//! Drives a [`SessionContext`] through the public systems the way the driver
//! does, without any I/O:
//! - Turn alternation and the single-writer guards
//! - Promotion deferral
//! - Outage and move provider guards
//! - Remote move replay
//! - Highlight restoration
//! - Opening, reply and promotion scenarios

use shared::GameMessage;
use xfchess_sync::core::GameSettings;
use xfchess_sync::game::ai::{GameMode, ProviderMode, ProviderMove};
use xfchess_sync::game::events::{Effect, PointerEvent};
use xfchess_sync::game::resources::{ChessEngine, GameStatus, RulesEngine, Session};
use xfchess_sync::game::systems::{
    apply_remote_move, attempt_local_move, handle_frame, handle_pointer, handle_provider_reply,
    handle_transport_event, interaction_state, phase, reconcile, request_provider_turn,
    resolve_promotion, CoordinatorPhase, InteractionState, MoveOrigin, MoveOutcome, RejectReason,
};
use xfchess_sync::game::types::{PieceColor, PieceType, Square};
use xfchess_sync::game::{GameError, SessionContext};
use xfchess_sync::networking::{ConnectionManager, TransportEvent};
use xfchess_sync::rendering::{OverlayState, SquareMark};

const PROMOTION_FEN: &str = "8/P7/8/8/8/8/8/k6K w - - 0 1";
const FOOLS_MATE_FEN: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

/// Context with a socket that is open but has no color yet
fn connected_context(engine: ChessEngine) -> (SessionContext, u64) {
    let settings = GameSettings::default();
    let connection = ConnectionManager::new(settings.server_url.clone(), &settings.reconnect);
    let session = Session::new(GameMode::LocalMultiplayer, connection);
    let mut ctx = SessionContext::new(engine, session, &settings);

    let request = ctx.session.connection.open().unwrap();
    handle_transport_event(
        &mut ctx,
        TransportEvent::Opened {
            attempt: request.attempt,
        },
    )
    .unwrap();
    (ctx, request.attempt)
}

fn frame(ctx: &mut SessionContext, attempt: u64, message: GameMessage) -> Result<(), GameError> {
    handle_transport_event(
        ctx,
        TransportEvent::Frame {
            attempt,
            text: message.encode(),
        },
    )
}

/// Online context playing `color` from `engine`'s position
fn playing_as(color: PieceColor, engine: ChessEngine) -> SessionContext {
    let (mut ctx, attempt) = connected_context(engine);
    frame(
        &mut ctx,
        attempt,
        GameMessage::AssignColor {
            color: color.code().to_string(),
        },
    )
    .unwrap();
    ctx.drain_effects();
    ctx
}

/// Context playing `color` against a move provider, no socket
fn against_provider(color: PieceColor, engine: ChessEngine) -> SessionContext {
    let settings = GameSettings::default();
    let connection = ConnectionManager::new(settings.server_url.clone(), &settings.reconnect);
    let mut session = Session::new(GameMode::VsAutomated(ProviderMode::Minimax), connection);
    session.choose_local_color(color).unwrap();
    SessionContext::new(engine, session, &settings)
}

/// Request ids of every provider request among `effects`
fn provider_requests(effects: &[Effect]) -> Vec<u64> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::RequestProviderMove { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .collect()
}

fn transmitted(effects: &[Effect]) -> Vec<GameMessage> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Transmit(text) => GameMessage::decode(text).ok(),
            _ => None,
        })
        .collect()
}

fn side_to_move(ctx: &SessionContext) -> String {
    ctx.engine
        .serialize()
        .split_whitespace()
        .nth(1)
        .unwrap()
        .to_string()
}

fn overlay_from(effects: &[Effect]) -> OverlayState {
    let mut overlay = OverlayState::default();
    for effect in effects {
        if let Effect::Render(command) = effect {
            overlay.apply(command);
        }
    }
    overlay
}

// ============================================================================
// Session Setup Tests
// ============================================================================

#[test]
fn test_join_is_sent_once_on_open() {
    //! Opening the socket sends exactly one `join` and waits for a color

    let (mut ctx, _) = connected_context(ChessEngine::new());
    let effects = ctx.drain_effects();

    assert_eq!(transmitted(&effects), vec![GameMessage::Join]);
    assert_eq!(ctx.status(), Some(GameStatus::AwaitingColor));
}

#[test]
fn test_color_assignment_orients_board() {
    let (mut ctx, attempt) = connected_context(ChessEngine::new());
    ctx.drain_effects();

    frame(
        &mut ctx,
        attempt,
        GameMessage::AssignColor {
            color: "b".to_string(),
        },
    )
    .unwrap();

    let effects = ctx.drain_effects();
    assert!(effects.contains(&Effect::Orient(PieceColor::Black)));
    assert_eq!(ctx.session.local_color(), Some(PieceColor::Black));
    assert_eq!(ctx.status(), Some(GameStatus::OpponentToMove));
}

#[test]
fn test_conflicting_color_is_fatal() {
    let mut ctx = playing_as(PieceColor::White, ChessEngine::new());
    let attempt = ctx.session.connection.current_attempt();

    let err = frame(
        &mut ctx,
        attempt,
        GameMessage::AssignColor {
            color: "b".to_string(),
        },
    )
    .unwrap_err();

    assert!(err.is_fatal());
    assert_eq!(ctx.session.local_color(), Some(PieceColor::White));
}

#[test]
fn test_malformed_frames_are_ignored() {
    let mut ctx = playing_as(PieceColor::White, ChessEngine::new());
    let before = ctx.engine.serialize();

    handle_frame(&mut ctx, "not json").unwrap();
    handle_frame(&mut ctx, r#"{"type":"teleport"}"#).unwrap();
    handle_frame(&mut ctx, r#"{"type":"move","source":"z9","target":"e4"}"#).unwrap();

    assert_eq!(ctx.engine.serialize(), before);
    assert!(ctx.session.is_open());
}

// ============================================================================
// Turn Alternation Tests
// ============================================================================

#[test]
fn test_turn_strictly_alternates() {
    //! Every accepted move flips the side to move, local or remote

    let mut ctx = playing_as(PieceColor::White, ChessEngine::new());
    let line = [("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6"), ("f1", "c4")];

    for (ply, (from, to)) in line.iter().enumerate() {
        let before = ctx.engine.turn_color();
        let outcome = if ply % 2 == 0 {
            attempt_local_move(&mut ctx, sq(from), sq(to), None)
        } else {
            apply_remote_move(&mut ctx, sq(from), sq(to), None, MoveOrigin::Peer)
        };
        assert!(outcome.is_applied(), "ply {} ({}{}) rejected", ply, from, to);
        assert_eq!(ctx.engine.turn_color(), before.opposite());
    }

    assert_eq!(ctx.history.len(), line.len());
}

#[test]
fn test_local_and_remote_never_both_accepted() {
    //! For each ply exactly one of the two entry points can apply a move

    let mut ctx = playing_as(PieceColor::White, ChessEngine::new());

    // White's ply: the remote path is closed
    let remote = apply_remote_move(&mut ctx, sq("e2"), sq("e4"), None, MoveOrigin::Peer);
    assert_eq!(remote, MoveOutcome::Rejected(RejectReason::LocalTurn));
    assert!(attempt_local_move(&mut ctx, sq("e2"), sq("e4"), None).is_applied());

    // Black's ply: the local path is closed
    let local = attempt_local_move(&mut ctx, sq("e7"), sq("e5"), None);
    assert_eq!(local, MoveOutcome::Rejected(RejectReason::NotLocalTurn));
    assert!(apply_remote_move(&mut ctx, sq("e7"), sq("e5"), None, MoveOrigin::Peer).is_applied());

    assert_eq!(ctx.history.to_move_list(), "1. e4 e5");
}

#[test]
fn test_moves_refused_before_color_assignment() {
    let (mut ctx, _) = connected_context(ChessEngine::new());
    let outcome = attempt_local_move(&mut ctx, sq("e2"), sq("e4"), None);
    assert_eq!(outcome, MoveOutcome::Rejected(RejectReason::NotLocalTurn));
}

// ============================================================================
// Promotion Tests
// ============================================================================

#[test]
fn test_second_promotion_attempt_is_rejected() {
    let mut ctx = playing_as(PieceColor::White, ChessEngine::from_fen(PROMOTION_FEN).unwrap());

    assert_eq!(
        attempt_local_move(&mut ctx, sq("a7"), sq("a8"), None),
        MoveOutcome::Deferred
    );
    let first = ctx.promotion.request().unwrap();

    assert_eq!(
        attempt_local_move(&mut ctx, sq("a7"), sq("a8"), None),
        MoveOutcome::Rejected(RejectReason::PromotionPending)
    );
    assert_eq!(ctx.promotion.request(), Some(first));
    assert_eq!(phase(&ctx), CoordinatorPhase::AwaitingPromotionChoice);
}

#[test]
fn test_promotion_scenario() {
    //! Board stays untouched until the piece is chosen

    let mut ctx = playing_as(PieceColor::White, ChessEngine::from_fen(PROMOTION_FEN).unwrap());
    let before = ctx.engine.serialize();

    let outcome = attempt_local_move(&mut ctx, sq("a7"), sq("a8"), None);
    assert_eq!(outcome, MoveOutcome::Deferred);
    assert_eq!(ctx.engine.serialize(), before);
    assert!(ctx.drain_effects().contains(&Effect::PromptPromotion {
        from: sq("a7"),
        to: sq("a8"),
        color: PieceColor::White,
    }));

    let outcome = resolve_promotion(&mut ctx, PieceType::Queen);
    assert!(outcome.is_applied());
    assert_eq!(
        ctx.engine.piece_at(sq("a8")),
        Some((PieceColor::White, PieceType::Queen))
    );
    assert_eq!(ctx.engine.piece_at(sq("a7")), None);
    assert_eq!(phase(&ctx), CoordinatorPhase::Idle);

    // Queen is the default, the frame carries no piece
    let sent = transmitted(&ctx.drain_effects());
    assert_eq!(sent, vec![GameMessage::moved("a7", "a8")]);
}

#[test]
fn test_underpromotion_is_broadcast() {
    let mut ctx = playing_as(PieceColor::White, ChessEngine::from_fen(PROMOTION_FEN).unwrap());

    handle_pointer(&mut ctx, PointerEvent::Drop {
        from: sq("a7"),
        to: sq("a8"),
    });
    assert_eq!(
        interaction_state(&ctx),
        InteractionState::AwaitingPromotion {
            from: sq("a7"),
            to: sq("a8"),
        }
    );
    handle_pointer(&mut ctx, PointerEvent::ChoosePromotion(PieceType::Knight));

    assert_eq!(
        ctx.engine.piece_at(sq("a8")),
        Some((PieceColor::White, PieceType::Knight))
    );
    assert_eq!(
        transmitted(&ctx.drain_effects()),
        vec![GameMessage::Move {
            source: "a7".to_string(),
            target: "a8".to_string(),
            promotion: Some("n".to_string()),
        }]
    );
}

#[test]
fn test_remote_promotion_defaults_to_queen() {
    let fen = "k7/8/8/8/8/8/p7/7K b - - 0 1";
    let mut ctx = playing_as(PieceColor::White, ChessEngine::from_fen(fen).unwrap());

    handle_frame(&mut ctx, &GameMessage::moved("a2", "a1").encode()).unwrap();
    assert_eq!(
        ctx.engine.piece_at(sq("a1")),
        Some((PieceColor::Black, PieceType::Queen))
    );
}

#[test]
fn test_activation_ignored_until_promotion_resolved() {
    //! While a piece choice is pending only a choice or a cancel is accepted

    let mut ctx = playing_as(PieceColor::White, ChessEngine::from_fen(PROMOTION_FEN).unwrap());
    let before = ctx.engine.serialize();
    let awaiting = InteractionState::AwaitingPromotion {
        from: sq("a7"),
        to: sq("a8"),
    };

    handle_pointer(&mut ctx, PointerEvent::Drop {
        from: sq("a7"),
        to: sq("a8"),
    });
    assert_eq!(interaction_state(&ctx), awaiting);

    handle_pointer(&mut ctx, PointerEvent::Activate(sq("h1")));
    assert_eq!(interaction_state(&ctx), awaiting);
    assert!(!ctx.selection.is_selected());
    handle_pointer(&mut ctx, PointerEvent::Drop {
        from: sq("h1"),
        to: sq("h2"),
    });
    assert_eq!(interaction_state(&ctx), awaiting);

    handle_pointer(&mut ctx, PointerEvent::Cancel);
    assert_eq!(interaction_state(&ctx), InteractionState::Idle);
    assert_eq!(phase(&ctx), CoordinatorPhase::Idle);
    assert_eq!(ctx.engine.serialize(), before);

    // A late choice has nothing to complete
    handle_pointer(&mut ctx, PointerEvent::ChoosePromotion(PieceType::Queen));
    assert_eq!(ctx.engine.serialize(), before);
    assert!(transmitted(&ctx.drain_effects()).is_empty());
}

// ============================================================================
// Connection Outage Tests
// ============================================================================

#[test]
fn test_local_moves_rejected_while_reconnecting() {
    //! Losing the link clears the selection and refuses moves until reopened

    let mut ctx = playing_as(PieceColor::White, ChessEngine::new());
    let before = ctx.engine.serialize();
    handle_pointer(&mut ctx, PointerEvent::Activate(sq("e2")));
    assert!(ctx.selection.is_selected());

    let attempt = ctx.session.connection.current_attempt();
    handle_transport_event(&mut ctx, TransportEvent::Closed { attempt }).unwrap();
    assert!(!ctx.session.is_open());
    assert_eq!(interaction_state(&ctx), InteractionState::Idle);
    let effects = ctx.drain_effects();
    let reconnects = effects
        .iter()
        .filter(|effect| matches!(effect, Effect::Connect(_)))
        .count();
    assert_eq!(reconnects, 1);

    let outcome = attempt_local_move(&mut ctx, sq("e2"), sq("e4"), None);
    assert_eq!(outcome, MoveOutcome::Rejected(RejectReason::NotConnected));

    handle_pointer(&mut ctx, PointerEvent::Activate(sq("e2")));
    assert!(!ctx.selection.is_selected());

    assert_eq!(ctx.engine.serialize(), before);
    assert!(ctx.history.is_empty());
    assert!(transmitted(&ctx.drain_effects()).is_empty());
}

// ============================================================================
// Move Provider Tests
// ============================================================================

#[test]
fn test_local_move_wakes_provider_once() {
    //! One local move asks the provider exactly once and nothing goes on the wire

    let mut ctx = against_provider(PieceColor::White, ChessEngine::new());

    assert!(attempt_local_move(&mut ctx, sq("e2"), sq("e4"), None).is_applied());
    let effects = ctx.drain_effects();
    assert_eq!(provider_requests(&effects).len(), 1);
    assert!(effects
        .iter()
        .all(|effect| !matches!(effect, Effect::Transmit(_) | Effect::Connect(_))));
    assert_eq!(ctx.status(), Some(GameStatus::ProviderThinking));
    assert_eq!(phase(&ctx), CoordinatorPhase::AwaitingRemoteProviderMove);

    let second = attempt_local_move(&mut ctx, sq("d2"), sq("d4"), None);
    assert_eq!(second, MoveOutcome::Rejected(RejectReason::ProviderPending));
    assert!(provider_requests(&ctx.drain_effects()).is_empty());
}

#[test]
fn test_illegal_provider_reply_stalls_turn() {
    let mut ctx = against_provider(PieceColor::White, ChessEngine::new());
    attempt_local_move(&mut ctx, sq("e2"), sq("e4"), None);
    let request_id = provider_requests(&ctx.drain_effects())[0];
    let before = ctx.engine.serialize();

    // e2 is empty now; the reply is current but cannot be played
    let reply = ProviderMove {
        from: sq("e2"),
        to: sq("e4"),
        promotion: None,
    };
    let outcome = handle_provider_reply(&mut ctx, request_id, Ok(reply));

    assert_eq!(outcome, Some(MoveOutcome::Rejected(RejectReason::IllegalMove)));
    assert_eq!(ctx.engine.serialize(), before);
    assert!(!ctx.provider.is_pending());
    assert!(transmitted(&ctx.drain_effects()).is_empty());

    // The same id a second time is stale
    assert_eq!(handle_provider_reply(&mut ctx, request_id, Ok(reply)), None);
}

#[test]
fn test_provider_reply_after_reconciliation_is_discarded() {
    //! A reply that raced a position reset never touches the new board

    let mut ctx = against_provider(PieceColor::Black, ChessEngine::new());
    let request_id = request_provider_turn(&mut ctx).unwrap();
    ctx.drain_effects();

    reconcile(&mut ctx, FOOLS_MATE_FEN).unwrap();
    assert!(ctx.engine.is_over());

    let reply = ProviderMove {
        from: sq("e2"),
        to: sq("e4"),
        promotion: None,
    };
    assert_eq!(handle_provider_reply(&mut ctx, request_id, Ok(reply)), None);
    assert_eq!(ctx.engine.serialize(), FOOLS_MATE_FEN);
    assert!(provider_requests(&ctx.drain_effects()).is_empty());
}

#[test]
fn test_moves_refused_after_game_over() {
    let mut ctx = against_provider(PieceColor::White, ChessEngine::from_fen(FOOLS_MATE_FEN).unwrap());

    let outcome = attempt_local_move(&mut ctx, sq("a2"), sq("a3"), None);

    assert_eq!(outcome, MoveOutcome::Rejected(RejectReason::GameOver));
    assert!(provider_requests(&ctx.drain_effects()).is_empty());
    assert_eq!(ctx.engine.serialize(), FOOLS_MATE_FEN);
}

// ============================================================================
// Remote Move Tests
// ============================================================================

#[test]
fn test_replayed_remote_move_is_rejected() {
    let mut ctx = playing_as(PieceColor::Black, ChessEngine::new());

    handle_frame(&mut ctx, &GameMessage::moved("e2", "e4").encode()).unwrap();
    let after_first = ctx.engine.serialize();

    let replay = apply_remote_move(&mut ctx, sq("e2"), sq("e4"), None, MoveOrigin::Peer);
    assert_eq!(replay, MoveOutcome::Rejected(RejectReason::LocalTurn));
    assert_eq!(ctx.engine.serialize(), after_first);
    assert_eq!(ctx.history.len(), 1);
}

#[test]
fn test_illegal_remote_move_requests_sync() {
    let mut ctx = playing_as(PieceColor::Black, ChessEngine::new());

    handle_frame(&mut ctx, &GameMessage::moved("e2", "e5").encode()).unwrap();

    assert_eq!(transmitted(&ctx.drain_effects()), vec![GameMessage::SyncRequest]);
    assert_eq!(ctx.engine.serialize(), ChessEngine::new().serialize());
}

#[test]
fn test_sync_frame_reconciles_position() {
    let mut ctx = playing_as(PieceColor::White, ChessEngine::new());
    handle_pointer(&mut ctx, PointerEvent::Activate(sq("g1")));
    assert!(ctx.selection.is_selected());

    let canonical = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";
    handle_frame(
        &mut ctx,
        &GameMessage::Sync {
            fen: canonical.to_string(),
        }
        .encode(),
    )
    .unwrap();

    assert_eq!(ctx.engine.serialize(), canonical);
    assert!(!ctx.selection.is_selected());
    assert_eq!(ctx.highlights.last_move(), None);
    assert_eq!(ctx.status(), Some(GameStatus::YourTurn));
}

// ============================================================================
// Scenario Tests
// ============================================================================

#[test]
fn test_opening_move_scenario() {
    let mut ctx = playing_as(PieceColor::White, ChessEngine::new());

    let outcome = attempt_local_move(&mut ctx, sq("e2"), sq("e4"), None);

    assert!(outcome.is_applied());
    assert_eq!(side_to_move(&ctx), "b");
    let sent = transmitted(&ctx.drain_effects());
    assert_eq!(sent, vec![GameMessage::moved("e2", "e4")]);
    assert_eq!(
        sent[0].encode(),
        r#"{"type":"move","source":"e2","target":"e4"}"#
    );
}

#[test]
fn test_remote_reply_scenario() {
    //! The reply is applied by white and refused by black, whose own turn it is

    let mut white = playing_as(PieceColor::White, ChessEngine::new());
    attempt_local_move(&mut white, sq("e2"), sq("e4"), None);
    let reply = GameMessage::moved("e7", "e5").encode();

    handle_frame(&mut white, &reply).unwrap();
    assert_eq!(side_to_move(&white), "w");
    assert_eq!(white.status(), Some(GameStatus::YourTurn));

    let mut black = playing_as(PieceColor::Black, ChessEngine::new());
    handle_frame(&mut black, &GameMessage::moved("e2", "e4").encode()).unwrap();
    let before = black.engine.serialize();

    handle_frame(&mut black, &reply).unwrap();
    assert_eq!(black.engine.serialize(), before);
    assert_eq!(side_to_move(&black), "b");
}

// ============================================================================
// Highlight Tests
// ============================================================================

#[test]
fn test_only_latest_move_stays_highlighted() {
    let mut ctx = playing_as(PieceColor::White, ChessEngine::new());
    let mut effects = ctx.drain_effects();

    attempt_local_move(&mut ctx, sq("e2"), sq("e4"), None);
    apply_remote_move(&mut ctx, sq("e7"), sq("e5"), None, MoveOrigin::Peer);
    attempt_local_move(&mut ctx, sq("g1"), sq("f3"), None);
    effects.extend(ctx.drain_effects());

    let overlay = overlay_from(&effects);
    assert_eq!(
        overlay.squares_with(SquareMark::LastMove),
        vec![sq("g1"), sq("f3")]
    );
    assert_eq!(ctx.highlights.last_move(), Some((sq("g1"), sq("f3"))));
}

#[test]
fn test_pointer_selection_and_commit() {
    let mut ctx = playing_as(PieceColor::White, ChessEngine::new());

    handle_pointer(&mut ctx, PointerEvent::Activate(sq("e2")));
    assert_eq!(
        interaction_state(&ctx),
        InteractionState::Selected {
            from: sq("e2"),
            targets: vec![sq("e3"), sq("e4")],
        }
    );

    // Opponent piece: selection refused
    handle_pointer(&mut ctx, PointerEvent::Activate(sq("e7")));
    assert_eq!(interaction_state(&ctx), InteractionState::Idle);

    handle_pointer(&mut ctx, PointerEvent::Activate(sq("e2")));
    handle_pointer(&mut ctx, PointerEvent::Activate(sq("e4")));
    assert_eq!(interaction_state(&ctx), InteractionState::Idle);
    assert_eq!(side_to_move(&ctx), "b");

    let overlay = overlay_from(&ctx.drain_effects());
    assert!(overlay.squares_with(SquareMark::Selected).is_empty());
    assert!(overlay.squares_with(SquareMark::LegalTarget).is_empty());
}

#[test]
fn test_check_is_marked_on_king() {
    let mut ctx = playing_as(PieceColor::White, ChessEngine::new());
    attempt_local_move(&mut ctx, sq("e2"), sq("e4"), None);
    apply_remote_move(&mut ctx, sq("f7"), sq("f6"), None, MoveOrigin::Peer);
    attempt_local_move(&mut ctx, sq("d1"), sq("h5"), None);

    assert_eq!(ctx.highlights.check_square(), Some(sq("e8")));
    assert_eq!(ctx.history.to_move_list(), "1. e4 f6 2. Qh5+");
}
