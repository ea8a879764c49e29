//! Session context - All mutable session state in one place
//!
//! [`SessionContext`] is owned by the driver and handed by `&mut` to exactly
//! one system at a time, so no two event sources can ever interleave inside
//! a state change. Systems never perform I/O; they push [`Effect`]s that the
//! driver drains after the event completes.

use crate::core::GameSettings;
use crate::game::events::Effect;
use crate::game::resources::{
    ChessEngine, GameStatus, MoveHistory, PendingPromotion, ProviderRequestGuard, RulesEngine,
    Selection, Session,
};
use crate::networking::Dispatch;
use crate::rendering::{HighlightManager, RenderCommand};
use shared::GameMessage;
use tracing::debug;

/// Everything one game session owns
#[derive(Debug)]
pub struct SessionContext<E: RulesEngine = ChessEngine> {
    pub engine: E,
    pub session: Session,
    pub selection: Selection,
    pub promotion: PendingPromotion,
    pub provider: ProviderRequestGuard,
    pub highlights: HighlightManager,
    pub history: MoveHistory,
    pub show_hints: bool,
    status: Option<GameStatus>,
    effects: Vec<Effect>,
}

impl<E: RulesEngine> SessionContext<E> {
    pub fn new(engine: E, session: Session, settings: &GameSettings) -> Self {
        Self {
            engine,
            session,
            selection: Selection::default(),
            promotion: PendingPromotion::default(),
            provider: ProviderRequestGuard::default(),
            highlights: HighlightManager::new(settings.highlight_last_move),
            history: MoveHistory::default(),
            show_hints: settings.show_hints,
            status: None,
            effects: Vec::new(),
        }
    }

    /// Whether moves can be exchanged right now
    ///
    /// Against a move provider the game is local and needs no socket.
    pub fn is_online(&self) -> bool {
        self.session.mode().is_automated() || self.session.is_open()
    }

    pub fn is_local_turn(&self) -> bool {
        self.session.is_local_turn(&self.engine)
    }

    /// Last status pushed to the surface
    pub fn status(&self) -> Option<GameStatus> {
        self.status
    }

    pub fn emit(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn render(&mut self, commands: Vec<RenderCommand>) {
        self.effects.extend(commands.into_iter().map(Effect::Render));
    }

    /// Redraw pieces from the engine's position
    pub fn render_position(&mut self) {
        let board = self.engine.serialize();
        self.emit(Effect::Render(RenderCommand::SetPosition { board }));
    }

    /// Send a frame through the connection manager
    ///
    /// In automated mode there is no peer and nothing is sent.
    pub fn send(&mut self, message: GameMessage) {
        if self.session.mode().is_automated() {
            debug!("[NETWORK] Offline game, not sending {}", message.kind());
            return;
        }
        match self.session.connection.send(&message) {
            Dispatch::Transmit(frame) => self.emit(Effect::Transmit(frame)),
            Dispatch::Dropped {
                reconnect: Some(request),
            } => self.emit(Effect::Connect(request)),
            Dispatch::Dropped { reconnect: None } => {}
        }
    }

    /// Re-derive the status line and emit it when it changed
    pub fn refresh_status(&mut self) {
        let status = GameStatus::evaluate(
            &self.engine,
            self.session.local_color(),
            self.provider.is_pending(),
        );
        if self.status != Some(status) {
            self.status = Some(status);
            self.emit(Effect::Status(status));
        }
    }

    /// Take every effect produced since the last drain
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }
}
