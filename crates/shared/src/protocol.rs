use serde::{Deserialize, Serialize};

/// Errors raised while decoding a frame
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The frame was not valid JSON or did not match any known envelope
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// JSON envelope exchanged over the game socket.
///
/// Every frame is an object with a `type` discriminator; the remaining
/// fields depend on the variant. Squares are sent in algebraic notation
/// (`"e4"`) and colors as `"w"` / `"b"`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameMessage {
    // Client → Server
    Join,
    SyncRequest,

    // Server → Client
    AssignColor {
        color: String,
    },
    Sync {
        fen: String,
    },

    // Bidirectional
    Move {
        source: String,
        target: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        promotion: Option<String>,
    },
}

impl GameMessage {
    /// Build a `move` frame
    pub fn moved(source: impl Into<String>, target: impl Into<String>) -> Self {
        GameMessage::Move {
            source: source.into(),
            target: target.into(),
            promotion: None,
        }
    }

    /// Wire name of the variant, as found in the `type` field
    pub fn kind(&self) -> &'static str {
        match self {
            GameMessage::Join => "join",
            GameMessage::SyncRequest => "sync_request",
            GameMessage::AssignColor { .. } => "assign_color",
            GameMessage::Sync { .. } => "sync",
            GameMessage::Move { .. } => "move",
        }
    }

    pub fn encode(&self) -> String {
        // Every variant is a plain struct of strings, serialization cannot fail
        serde_json::to_string(self).unwrap_or_else(|_| format!("{{\"type\":\"{}\"}}", self.kind()))
    }

    pub fn decode(frame: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(frame).map_err(ProtocolError::Malformed)
    }
}
