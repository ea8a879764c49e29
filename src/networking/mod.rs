//! Networking - The game socket
//!
//! - [`client`] - Connection state, identity and reconnection policy
//! - [`transport`] - The WebSocket task that performs the actual I/O
//! - [`backoff`] - Reconnect delay schedule

pub mod backoff;
pub mod client;
pub mod error;
pub mod transport;

pub use client::{ConnectRequest, ConnectionManager, ConnectionState, Dispatch};
pub use error::{NetworkError, NetworkResult};
pub use transport::{Connector, TransportEvent, WsConnector};
