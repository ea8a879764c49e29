//! Game driver - The single-threaded event loop
//!
//! Owns the [`SessionContext`] and serializes every event source (pointer
//! gestures, transport events, provider replies) onto one queue. Each event
//! is handled to completion, then the effects it produced are executed in
//! order. Transport and provider I/O run in spawned tasks that only post
//! events back; nothing outside this loop ever touches session state.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut driver = GameDriver::new(ctx, TextSurface::new(theme), WsConnector, provider)?;
//! let events = driver.sender();
//! // feed pointer events from the terminal into `events`...
//! driver.run().await?;
//! ```

use crate::core::error::CoreResult;
use crate::game::ai::MoveProvider;
use crate::game::context::SessionContext;
use crate::game::error::GameResult;
use crate::game::events::{Effect, GameEvent};
use crate::game::resources::{ChessEngine, RulesEngine};
use crate::game::systems::{
    handle_pointer, handle_provider_reply, handle_transport_event, request_provider_turn,
};
use crate::networking::Connector;
use crate::rendering::{validate_surface, RenderSurface};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Event loop around one session
pub struct GameDriver<S, C, E = ChessEngine>
where
    S: RenderSurface,
    C: Connector,
    E: RulesEngine,
{
    ctx: SessionContext<E>,
    surface: S,
    connector: C,
    provider: Arc<dyn MoveProvider>,
    events_tx: mpsc::UnboundedSender<GameEvent>,
    events_rx: mpsc::UnboundedReceiver<GameEvent>,
    /// Outbound frames for the current link
    link: Option<mpsc::UnboundedSender<String>>,
}

impl<S, C, E> GameDriver<S, C, E>
where
    S: RenderSurface,
    C: Connector,
    E: RulesEngine,
{
    /// Build a driver, failing fast when the surface lacks a required target
    pub fn new(
        ctx: SessionContext<E>,
        surface: S,
        connector: C,
        provider: Arc<dyn MoveProvider>,
    ) -> CoreResult<Self> {
        validate_surface(&surface)?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Ok(Self {
            ctx,
            surface,
            connector,
            provider,
            events_tx,
            events_rx,
            link: None,
        })
    }

    /// Handle for posting events from other tasks
    pub fn sender(&self) -> mpsc::UnboundedSender<GameEvent> {
        self.events_tx.clone()
    }

    pub fn context(&self) -> &SessionContext<E> {
        &self.ctx
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Draw the initial position, open the socket or wake the provider
    pub fn start(&mut self) {
        info!("[DRIVER] Starting {:?} session", self.ctx.session.mode());
        if let Some(color) = self.ctx.session.local_color() {
            self.ctx.emit(Effect::Orient(color));
        }
        self.ctx.render_position();

        if let Some(mode) = self.ctx.session.mode().provider() {
            info!("[AI] Opponent: {} ({})", mode.description(), mode);
            request_provider_turn(&mut self.ctx);
        } else if let Some(request) = self.ctx.session.connection.open() {
            info!("[NETWORK] Game server {}", self.ctx.session.connection.url());
            self.ctx.emit(Effect::Connect(request));
        }

        self.ctx.refresh_status();
        self.execute_effects();
    }

    /// Handle one event to completion
    ///
    /// Returns `Ok(false)` when the session should stop. Fatal protocol
    /// errors are returned as `Err`.
    pub fn handle_event(&mut self, event: GameEvent) -> GameResult<bool> {
        let result = match event {
            GameEvent::Pointer(pointer) => {
                handle_pointer(&mut self.ctx, pointer);
                Ok(true)
            }
            GameEvent::Transport(transport) => {
                handle_transport_event(&mut self.ctx, transport).map(|()| true)
            }
            GameEvent::ProviderReply { request_id, result } => {
                handle_provider_reply(&mut self.ctx, request_id, result);
                Ok(true)
            }
            GameEvent::Shutdown => {
                info!("[DRIVER] Shutdown requested");
                Ok(false)
            }
        };

        self.execute_effects();
        match result {
            Err(e) if e.is_fatal() => {
                error!("[DRIVER] Fatal session error: {}", e);
                self.ctx.session.connection.close();
                self.link = None;
                Err(e)
            }
            Err(e) => {
                warn!("[DRIVER] {}", e);
                Ok(true)
            }
            ok => ok,
        }
    }

    /// Wait for the next event and handle it
    ///
    /// Returns `Ok(false)` on shutdown or when every sender is gone.
    pub async fn step(&mut self) -> GameResult<bool> {
        match self.events_rx.recv().await {
            Some(event) => self.handle_event(event),
            None => Ok(false),
        }
    }

    /// Start the session and run until shutdown or a fatal error
    pub async fn run(mut self) -> GameResult<()> {
        self.start();
        while self.step().await? {}
        self.ctx.session.connection.close();
        self.link = None;
        info!("[DRIVER] Session ended");
        Ok(())
    }

    fn execute_effects(&mut self) {
        for effect in self.ctx.drain_effects() {
            match effect {
                Effect::Connect(request) => {
                    debug!(
                        "[NETWORK] Attempt {} in {:?}",
                        request.attempt, request.delay
                    );
                    self.link = Some(self.connector.connect(request, self.events_tx.clone()));
                }
                Effect::Transmit(frame) => match &self.link {
                    Some(link) if link.send(frame).is_ok() => {}
                    _ => warn!("[NETWORK] Link gone, frame dropped"),
                },
                Effect::RequestProviderMove {
                    request_id,
                    mode,
                    board,
                } => {
                    let provider = Arc::clone(&self.provider);
                    let events = self.events_tx.clone();
                    tokio::spawn(async move {
                        let result = provider.request_move(mode, &board).await;
                        if events
                            .send(GameEvent::ProviderReply { request_id, result })
                            .is_err()
                        {
                            debug!("[AI] Driver gone, dropping reply {}", request_id);
                        }
                    });
                }
                Effect::Render(command) => self.surface.apply(&command),
                Effect::PromptPromotion { from, to, color } => {
                    self.surface.prompt_promotion(from, to, color)
                }
                Effect::Status(status) => self.surface.show_status(status),
                Effect::Orient(color) => self.surface.set_orientation(color),
            }
        }
        self.surface.flush();
    }
}
