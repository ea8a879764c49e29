//! Game mode and move provider selection
//!
//! Decides whether the opponent is a remote human or an automated move
//! provider, and which provider endpoint answers.
//!
//! # Game Modes
//!
//! - **LocalMultiplayer**: The opponent is another client on the game server;
//!   the server assigns colors.
//! - **VsAutomated**: The opponent is a move provider service; the local
//!   color is chosen locally and the provider moves first when it is white.
//!
//! # Provider Modes
//!
//! | Mode      | Endpoint                  | Behaviour             |
//! |-----------|---------------------------|-----------------------|
//! | `random`  | `/move-provider/random`   | Any legal move        |
//! | `minimax` | `/move-provider/minimax`  | Shallow search        |
//! | `nn`      | `/move-provider/nn`       | Neural network policy |

use crate::game::error::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which move provider answers in [`GameMode::VsAutomated`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderMode {
    Random,
    Minimax,
    Nn,
}

impl ProviderMode {
    /// Path segment under `/move-provider/`
    pub fn path_segment(self) -> &'static str {
        match self {
            ProviderMode::Random => "random",
            ProviderMode::Minimax => "minimax",
            ProviderMode::Nn => "nn",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ProviderMode::Random => "Random mover",
            ProviderMode::Minimax => "Minimax search",
            ProviderMode::Nn => "Neural network",
        }
    }
}

impl fmt::Display for ProviderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Who the local player is up against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    /// Human vs human through the game server
    #[default]
    LocalMultiplayer,
    /// Human vs an automated move provider
    VsAutomated(ProviderMode),
}

impl GameMode {
    pub fn provider(self) -> Option<ProviderMode> {
        match self {
            GameMode::LocalMultiplayer => None,
            GameMode::VsAutomated(mode) => Some(mode),
        }
    }

    pub fn is_automated(self) -> bool {
        self.provider().is_some()
    }
}

impl FromStr for GameMode {
    type Err = GameError;

    /// Parses `multiplayer`, `random`, `minimax` or `nn`
    fn from_str(s: &str) -> GameResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "multiplayer" | "local" => Ok(GameMode::LocalMultiplayer),
            "random" => Ok(GameMode::VsAutomated(ProviderMode::Random)),
            "minimax" => Ok(GameMode::VsAutomated(ProviderMode::Minimax)),
            "nn" => Ok(GameMode::VsAutomated(ProviderMode::Nn)),
            other => Err(GameError::InvalidMode {
                name: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!("multiplayer".parse::<GameMode>().unwrap(), GameMode::LocalMultiplayer);
        assert_eq!(
            "NN".parse::<GameMode>().unwrap(),
            GameMode::VsAutomated(ProviderMode::Nn)
        );
        assert!("stockfish".parse::<GameMode>().is_err());
    }

    #[test]
    fn test_provider_path_segments() {
        assert_eq!(ProviderMode::Random.path_segment(), "random");
        assert_eq!(ProviderMode::Minimax.to_string(), "minimax");
        assert_eq!(ProviderMode::Nn.description(), "Neural network");
        assert!(GameMode::VsAutomated(ProviderMode::Nn).is_automated());
        assert_eq!(GameMode::LocalMultiplayer.provider(), None);
    }
}
