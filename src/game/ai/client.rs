//! Move provider client
//!
//! Asks an automated opponent for its reply over HTTP:
//!
//! ```text
//! POST {base}/move-provider/{mode}
//! X-CSRFToken: <token>            (optional)
//! {"fen": "<board>"}
//!
//! 200 {"from": "e7", "to": "e5", "promotion": "q"?}
//! ```
//!
//! The client is stateless. Single-flight discipline lives in
//! [`crate::game::resources::ProviderRequestGuard`], and every reply is
//! revalidated by the coordinator before it touches the board.

use crate::game::ai::resource::ProviderMode;
use crate::game::types::{PieceType, Square};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Errors talking to a move provider
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Invalid provider URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed provider reply: {message}")]
    MalformedReply { message: String },
}

/// Result type alias for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// A move proposed by the provider, not yet validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

#[derive(Serialize)]
struct MoveRequest<'a> {
    fen: &'a str,
}

#[derive(Deserialize)]
struct MoveReply {
    from: String,
    to: String,
    #[serde(default)]
    promotion: Option<String>,
}

impl TryFrom<MoveReply> for ProviderMove {
    type Error = ProviderError;

    fn try_from(reply: MoveReply) -> ProviderResult<Self> {
        let malformed = |e: crate::game::error::GameError| ProviderError::MalformedReply {
            message: e.to_string(),
        };
        Ok(ProviderMove {
            from: reply.from.parse().map_err(malformed)?,
            to: reply.to.parse().map_err(malformed)?,
            promotion: reply
                .promotion
                .as_deref()
                .map(PieceType::parse_promotion)
                .transpose()
                .map_err(malformed)?,
        })
    }
}

/// Anything that can compute a move for the automated opponent
#[async_trait]
pub trait MoveProvider: Send + Sync {
    async fn request_move(&self, mode: ProviderMode, board: &str) -> ProviderResult<ProviderMove>;
}

/// HTTP move provider
#[derive(Debug, Clone)]
pub struct HttpMoveProvider {
    client: reqwest::Client,
    base_url: String,
    csrf_token: Option<String>,
}

impl HttpMoveProvider {
    pub fn new(base_url: impl Into<String>, csrf_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            csrf_token,
        }
    }

    /// `{base}/move-provider/{mode}`
    pub fn endpoint(&self, mode: ProviderMode) -> ProviderResult<Url> {
        let url = format!(
            "{}/move-provider/{}",
            self.base_url.trim_end_matches('/'),
            mode.path_segment()
        );
        Ok(Url::parse(&url)?)
    }
}

#[async_trait]
impl MoveProvider for HttpMoveProvider {
    async fn request_move(&self, mode: ProviderMode, board: &str) -> ProviderResult<ProviderMove> {
        let url = self.endpoint(mode)?;
        debug!("[AI] POST {} fen={}", url, board);

        let mut request = self.client.post(url).json(&MoveRequest { fen: board });
        if let Some(token) = &self.csrf_token {
            request = request.header("X-CSRFToken", token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: MoveReply = response.json().await?;
        ProviderMove::try_from(reply)
    }
}
