//! Highlight theme
//!
//! Each [`SquareMark`] layer maps to a [`VisualToken`]. Graphical surfaces use
//! the CSS value; the terminal surface uses the glyph.

use crate::rendering::effects::SquareMark;
use serde::{Deserialize, Serialize};

/// How one mark layer is drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualToken {
    /// CSS background value for graphical surfaces
    pub css: String,
    /// Single-character decoration for the terminal board
    pub glyph: char,
}

impl VisualToken {
    pub fn new(css: impl Into<String>, glyph: char) -> Self {
        Self {
            css: css.into(),
            glyph,
        }
    }
}

/// Visual token table, one entry per mark layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightTheme {
    pub selected: VisualToken,
    pub legal_target: VisualToken,
    pub last_move: VisualToken,
    pub check: VisualToken,
}

impl Default for HighlightTheme {
    fn default() -> Self {
        Self {
            selected: VisualToken::new("rgba(20, 85, 30, 0.5)", '*'),
            legal_target: VisualToken::new(
                "radial-gradient(rgba(20, 85, 30, 0.5) 19%, rgba(0, 0, 0, 0) 20%)",
                '+',
            ),
            last_move: VisualToken::new("rgba(155, 199, 0, 0.41)", '~'),
            check: VisualToken::new(
                "radial-gradient(ellipse at center, rgb(255, 0, 0) 0%, rgb(231, 0, 0) 25%, rgba(169, 0, 0, 0) 89%, rgba(158, 0, 0, 0) 100%)",
                '!',
            ),
        }
    }
}

impl HighlightTheme {
    pub fn token(&self, mark: SquareMark) -> &VisualToken {
        match mark {
            SquareMark::Selected => &self.selected,
            SquareMark::LegalTarget => &self.legal_target,
            SquareMark::LastMove => &self.last_move,
            SquareMark::Check => &self.check,
        }
    }
}
