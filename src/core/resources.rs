//! Core resources for session-wide configuration
//!
//! These values are read once when a session starts. They are persisted by
//! [`crate::core::settings_persistence`] and can be overridden from the
//! environment or the command line.

use crate::core::error::{CoreError, CoreResult};
use crate::rendering::board::HighlightTheme;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Default game socket endpoint
pub const DEFAULT_SERVER_URL: &str = "ws://127.0.0.1:8000/ws/chess/";

/// Default base URL of the move provider service
pub const DEFAULT_PROVIDER_URL: &str = "http://127.0.0.1:8000";

/// Environment variable overriding [`GameSettings::server_url`]
pub const SERVER_URL_ENV: &str = "XFCHESS_SERVER_URL";

/// Environment variable overriding [`GameSettings::provider_url`]
pub const PROVIDER_URL_ENV: &str = "XFCHESS_PROVIDER_URL";

/// Settings that can be changed by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// WebSocket endpoint of the game server
    pub server_url: String,

    /// Base URL of the move provider (`{base}/move-provider/{mode}`)
    pub provider_url: String,

    /// Sent as `X-CSRFToken` on provider requests when present
    pub csrf_token: Option<String>,

    /// Reconnection policy for the game socket
    pub reconnect: ReconnectSettings,

    /// Whether to show legal move hints
    pub show_hints: bool,

    /// Whether to highlight last move
    pub highlight_last_move: bool,

    /// Visual token per square mark
    pub highlight_theme: HighlightTheme,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            provider_url: DEFAULT_PROVIDER_URL.to_string(),
            csrf_token: None,
            reconnect: ReconnectSettings::default(),
            show_hints: true,
            highlight_last_move: true,
            highlight_theme: HighlightTheme::default(),
        }
    }
}

impl GameSettings {
    /// Apply `XFCHESS_SERVER_URL` / `XFCHESS_PROVIDER_URL` when set
    pub fn apply_env(&mut self) {
        if let Ok(server) = std::env::var(SERVER_URL_ENV) {
            self.server_url = server;
        }
        if let Ok(provider) = std::env::var(PROVIDER_URL_ENV) {
            self.provider_url = provider;
        }
    }

    /// Check both endpoints before a session is built
    pub fn validate(&self) -> CoreResult<()> {
        let server = Url::parse(&self.server_url).map_err(|e| CoreError::InvalidConfig {
            field: "server_url",
            message: e.to_string(),
        })?;
        if !matches!(server.scheme(), "ws" | "wss") {
            return Err(CoreError::InvalidConfig {
                field: "server_url",
                message: format!("expected ws:// or wss://, got {}://", server.scheme()),
            });
        }

        let provider = Url::parse(&self.provider_url).map_err(|e| CoreError::InvalidConfig {
            field: "provider_url",
            message: e.to_string(),
        })?;
        if !matches!(provider.scheme(), "http" | "https") {
            return Err(CoreError::InvalidConfig {
                field: "provider_url",
                message: format!("expected http:// or https://, got {}://", provider.scheme()),
            });
        }

        self.reconnect.validate()
    }
}

/// Capped exponential backoff for the game socket
///
/// The first attempt after losing an open connection is immediate; each
/// consecutive failure doubles the delay starting at `initial_delay_ms`, up
/// to `max_delay_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconnectSettings {
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for ReconnectSettings {
    fn default() -> Self {
        Self {
            initial_delay_ms: 500,
            max_delay_ms: 30_000,
        }
    }
}

impl ReconnectSettings {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.initial_delay_ms == 0 || self.initial_delay_ms > self.max_delay_ms {
            return Err(CoreError::InvalidConfig {
                field: "reconnect",
                message: format!(
                    "initial_delay_ms ({}) must be non-zero and <= max_delay_ms ({})",
                    self.initial_delay_ms, self.max_delay_ms
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = GameSettings::default();
        assert!(settings.validate().is_ok());
        assert!(settings.show_hints);
        assert!(settings.highlight_last_move);
    }

    #[test]
    fn test_rejects_http_game_socket() {
        let settings = GameSettings {
            server_url: "http://localhost:8000/ws/chess/".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(CoreError::InvalidConfig { field: "server_url", .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_backoff() {
        let reconnect = ReconnectSettings {
            initial_delay_ms: 5_000,
            max_delay_ms: 1_000,
        };
        assert!(reconnect.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: GameSettings = serde_json::from_str(r#"{"show_hints": false}"#).unwrap();
        assert!(!settings.show_hints);
        assert_eq!(settings.server_url, DEFAULT_SERVER_URL);
        assert_eq!(settings.reconnect, ReconnectSettings::default());
    }
}
