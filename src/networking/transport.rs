//! WebSocket transport
//!
//! One spawned task per connection attempt. The task waits out the attempt's
//! delay, performs the handshake, then pumps frames both ways until either
//! side goes away. It never touches session state: everything it learns is
//! posted back to the driver queue as a [`TransportEvent`] tagged with the
//! attempt number.
//!
//! Dropping the outbound sender returned by [`Connector::connect`] ends the
//! task quietly, without a `Closed` event.

use crate::game::events::GameEvent;
use crate::networking::client::ConnectRequest;
use crate::networking::error::{NetworkError, NetworkResult};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use websocket::{ClientBuilder, Message};

/// What the transport reports back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Opened { attempt: u64 },
    Frame { attempt: u64, text: String },
    Closed { attempt: u64 },
    ConnectFailed { attempt: u64, error: String },
}

impl TransportEvent {
    pub fn attempt(&self) -> u64 {
        match self {
            TransportEvent::Opened { attempt }
            | TransportEvent::Frame { attempt, .. }
            | TransportEvent::Closed { attempt }
            | TransportEvent::ConnectFailed { attempt, .. } => *attempt,
        }
    }
}

/// Starts connection attempts on behalf of the driver
pub trait Connector {
    /// Begin `request`; returns the sender for outbound text frames
    fn connect(
        &mut self,
        request: ConnectRequest,
        events: mpsc::UnboundedSender<GameEvent>,
    ) -> mpsc::UnboundedSender<String>;
}

/// Production connector over `tokio-websockets`
#[derive(Debug, Default, Clone, Copy)]
pub struct WsConnector;

impl Connector for WsConnector {
    fn connect(
        &mut self,
        request: ConnectRequest,
        events: mpsc::UnboundedSender<GameEvent>,
    ) -> mpsc::UnboundedSender<String> {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_link(request, outbound_rx, events));
        outbound_tx
    }
}

fn parse_uri(url: &str) -> NetworkResult<http::Uri> {
    url.parse::<http::Uri>()
        .map_err(|e| NetworkError::InvalidUri {
            url: url.to_string(),
            message: e.to_string(),
        })
}

fn post(events: &mpsc::UnboundedSender<GameEvent>, event: TransportEvent) {
    if events.send(GameEvent::Transport(event)).is_err() {
        debug!("[NETWORK] Driver queue closed, dropping transport event");
    }
}

async fn run_link(
    request: ConnectRequest,
    mut outbound: mpsc::UnboundedReceiver<String>,
    events: mpsc::UnboundedSender<GameEvent>,
) {
    let attempt = request.attempt;
    if !request.delay.is_zero() {
        tokio::time::sleep(request.delay).await;
    }
    if outbound.is_closed() {
        debug!("[NETWORK] Attempt {} superseded before connecting", attempt);
        return;
    }

    let uri = match parse_uri(&request.url) {
        Ok(uri) => uri,
        Err(e) => {
            post(&events, TransportEvent::ConnectFailed { attempt, error: e.to_string() });
            return;
        }
    };

    let mut client = match ClientBuilder::from_uri(uri).connect().await {
        Ok((client, _response)) => client,
        Err(e) => {
            let error = NetworkError::from(e);
            warn!("[NETWORK] Attempt {} failed: {}", attempt, error);
            post(&events, TransportEvent::ConnectFailed { attempt, error: error.to_string() });
            return;
        }
    };

    info!("[NETWORK] Handshake complete for attempt {}", attempt);
    post(&events, TransportEvent::Opened { attempt });

    loop {
        tokio::select! {
            frame = outbound.recv() => match frame {
                Some(text) => {
                    if let Err(e) = client.send(Message::text(text)).await {
                        warn!("[NETWORK] Send failed: {}", NetworkError::from(e));
                        break;
                    }
                }
                None => {
                    debug!("[NETWORK] Link {} released by driver", attempt);
                    let _ = client.close().await;
                    return;
                }
            },
            incoming = client.next() => match incoming {
                Some(Ok(message)) => {
                    if let Some(text) = message.as_text() {
                        post(&events, TransportEvent::Frame { attempt, text: text.to_string() });
                    } else if message.is_close() {
                        break;
                    }
                }
                Some(Err(e)) => {
                    warn!("[NETWORK] Receive failed: {}", NetworkError::from(e));
                    break;
                }
                None => break,
            },
        }
    }

    post(&events, TransportEvent::Closed { attempt });
}
