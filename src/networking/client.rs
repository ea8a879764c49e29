//! Connection manager for the game socket
//!
//! Owns the single logical connection to the game server: its state, its
//! identity and the reconnection policy. It performs no I/O itself. Every
//! decision comes back as a [`ConnectRequest`] or a [`Dispatch`] that the
//! driver hands to the transport.
//!
//! # Lifecycle
//!
//! ```text
//! Closed ──open()──▶ Connecting ──on_opened()──▶ Open
//!   ▲                   │  ▲                       │
//!   │                   │  └──on_connect_failed()──┤ (backoff)
//!   └───────────────────┴──────on_closed()─────────┘ (immediate retry)
//! ```
//!
//! Every attempt carries a number; events from superseded attempts are
//! ignored so a late close can never tear down a newer link.

use crate::core::ReconnectSettings;
use crate::networking::backoff::Backoff;
use shared::GameMessage;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// State of the logical connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Closed,
    /// An attempt is scheduled or in flight
    Connecting,
    Open,
}

/// Ask the transport to (re)connect after `delay`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectRequest {
    pub attempt: u64,
    pub url: String,
    pub delay: Duration,
}

/// Outcome of [`ConnectionManager::send`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Write this text frame on the open link
    Transmit(String),
    /// Not open; the message is gone. Carries a reconnect when one was started.
    Dropped { reconnect: Option<ConnectRequest> },
}

/// Owns one logical connection and its reconnection policy
#[derive(Debug, Clone)]
pub struct ConnectionManager {
    url: String,
    state: ConnectionState,
    connection_id: Option<Uuid>,
    attempt: u64,
    backoff: Backoff,
}

impl ConnectionManager {
    pub fn new(url: impl Into<String>, settings: &ReconnectSettings) -> Self {
        Self {
            url: url.into(),
            state: ConnectionState::Closed,
            connection_id: None,
            attempt: 0,
            backoff: Backoff::new(settings),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ConnectionState::Open
    }

    /// Identity of the current open link
    pub fn connection_id(&self) -> Option<Uuid> {
        self.connection_id
    }

    /// Number of the most recent attempt
    pub fn current_attempt(&self) -> u64 {
        self.attempt
    }

    /// Start connecting. Returns `None` when already open or connecting.
    pub fn open(&mut self) -> Option<ConnectRequest> {
        if self.state != ConnectionState::Closed {
            return None;
        }
        info!("[NETWORK] Connecting to {}", self.url);
        Some(self.schedule())
    }

    /// The transport finished the handshake for `attempt`
    ///
    /// Returns the fresh connection identity; the caller must send exactly
    /// one `join` on it.
    pub fn on_opened(&mut self, attempt: u64) -> Option<Uuid> {
        if attempt != self.attempt || self.state != ConnectionState::Connecting {
            debug!("[NETWORK] Ignoring open for stale attempt {}", attempt);
            return None;
        }
        let id = Uuid::new_v4();
        self.state = ConnectionState::Open;
        self.connection_id = Some(id);
        self.backoff.reset();
        info!("[NETWORK] Connected (attempt {}, connection {})", attempt, id);
        Some(id)
    }

    /// The link for `attempt` closed
    pub fn on_closed(&mut self, attempt: u64) -> Option<ConnectRequest> {
        if attempt != self.attempt {
            debug!("[NETWORK] Ignoring close for stale attempt {}", attempt);
            return None;
        }
        match self.state {
            ConnectionState::Open => {
                warn!("[NETWORK] Disconnected from server, reconnecting");
                self.connection_id = None;
                self.backoff.reset();
                Some(self.schedule())
            }
            ConnectionState::Connecting => self.on_connect_failed(attempt),
            ConnectionState::Closed => None,
        }
    }

    /// The attempt `attempt` never opened
    pub fn on_connect_failed(&mut self, attempt: u64) -> Option<ConnectRequest> {
        if attempt != self.attempt || self.state != ConnectionState::Connecting {
            debug!("[NETWORK] Ignoring failure for stale attempt {}", attempt);
            return None;
        }
        let request = self.schedule();
        warn!(
            "[NETWORK] Connection attempt {} failed ({} in a row), retrying in {:?}",
            attempt,
            self.backoff.attempts().saturating_sub(1),
            request.delay
        );
        Some(request)
    }

    /// Encode `message` for the open link, or drop it
    ///
    /// Delivery is at-most-once: nothing is queued while the link is down.
    pub fn send(&mut self, message: &GameMessage) -> Dispatch {
        match self.state {
            ConnectionState::Open => Dispatch::Transmit(message.encode()),
            ConnectionState::Connecting => {
                warn!(
                    "[NETWORK] Dropping {} while reconnecting",
                    message.kind()
                );
                Dispatch::Dropped { reconnect: None }
            }
            ConnectionState::Closed => {
                warn!(
                    "[NETWORK] Dropping {} while closed, reconnecting",
                    message.kind()
                );
                self.backoff.reset();
                Dispatch::Dropped {
                    reconnect: Some(self.schedule()),
                }
            }
        }
    }

    /// Stop reconnecting and forget the link
    pub fn close(&mut self) {
        self.state = ConnectionState::Closed;
        self.connection_id = None;
        self.attempt += 1;
    }

    fn schedule(&mut self) -> ConnectRequest {
        self.attempt += 1;
        self.state = ConnectionState::Connecting;
        ConnectRequest {
            attempt: self.attempt,
            url: self.url.clone(),
            delay: self.backoff.next_delay(),
        }
    }
}
