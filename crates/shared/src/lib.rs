//! Wire protocol shared between the XFChess sync client and its server.

pub mod protocol;

pub use protocol::{GameMessage, ProtocolError};
