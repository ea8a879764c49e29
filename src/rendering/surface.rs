//! Render surface contract
//!
//! A render surface draws squares and pieces and reports raw pointer
//! gestures. The session talks to it only through [`RenderCommand`]s,
//! promotion prompts and status updates; all of them are issued from the
//! driver after a state change has been committed.
//!
//! A surface must expose every [`RenderTarget`] in [`REQUIRED_TARGETS`];
//! [`validate_surface`] fails fast with [`CoreError::MissingRenderTarget`]
//! otherwise.

use crate::core::error::{CoreError, CoreResult};
use crate::game::resources::GameStatus;
use crate::game::types::{PieceColor, PieceType, Square};
use crate::rendering::board::{render_board, HighlightTheme};
use crate::rendering::effects::SquareMark;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// One drawing instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    /// Redraw pieces from a FEN string
    SetPosition { board: String },
    /// Add a mark layer to a square
    Mark { square: Square, mark: SquareMark },
    /// Remove one mark layer from a square
    Unmark { square: Square, mark: SquareMark },
}

impl RenderCommand {
    pub fn mark(square: Square, mark: SquareMark) -> Self {
        RenderCommand::Mark { square, mark }
    }

    pub fn unmark(square: Square, mark: SquareMark) -> Self {
        RenderCommand::Unmark { square, mark }
    }
}

/// Elements a surface exposes to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderTarget {
    Board,
    StatusLine,
    PromotionPicker,
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RenderTarget::Board => "board",
            RenderTarget::StatusLine => "status line",
            RenderTarget::PromotionPicker => "promotion picker",
        };
        f.write_str(name)
    }
}

/// Targets every surface must provide
pub const REQUIRED_TARGETS: [RenderTarget; 3] = [
    RenderTarget::Board,
    RenderTarget::StatusLine,
    RenderTarget::PromotionPicker,
];

pub trait RenderSurface {
    /// Targets this surface can draw to
    fn targets(&self) -> Vec<RenderTarget>;

    fn apply(&mut self, command: &RenderCommand);

    /// Ask the user which piece to promote to
    fn prompt_promotion(&mut self, from: Square, to: Square, color: PieceColor);

    fn show_status(&mut self, status: GameStatus);

    /// Draw the board from `color`'s side
    fn set_orientation(&mut self, _color: PieceColor) {}

    /// Called once after each handled event
    fn flush(&mut self) {}
}

/// Fail fast when a surface lacks a required target
pub fn validate_surface<S: RenderSurface + ?Sized>(surface: &S) -> CoreResult<()> {
    let available = surface.targets();
    match REQUIRED_TARGETS.iter().find(|t| !available.contains(t)) {
        Some(missing) => Err(CoreError::MissingRenderTarget {
            target: missing.to_string(),
        }),
        None => Ok(()),
    }
}

/// Layered per-square marks plus the last drawn position
#[derive(Debug, Clone, Default)]
pub struct OverlayState {
    board: String,
    marks: BTreeMap<Square, BTreeSet<SquareMark>>,
}

impl OverlayState {
    pub fn apply(&mut self, command: &RenderCommand) {
        match command {
            RenderCommand::SetPosition { board } => self.board.clone_from(board),
            RenderCommand::Mark { square, mark } => {
                self.marks.entry(*square).or_default().insert(*mark);
            }
            RenderCommand::Unmark { square, mark } => {
                if let Some(layers) = self.marks.get_mut(square) {
                    layers.remove(mark);
                    if layers.is_empty() {
                        self.marks.remove(square);
                    }
                }
            }
        }
    }

    pub fn board(&self) -> &str {
        &self.board
    }

    pub fn has(&self, square: Square, mark: SquareMark) -> bool {
        self.marks
            .get(&square)
            .is_some_and(|layers| layers.contains(&mark))
    }

    /// Highest-priority mark on a square
    pub fn top_mark(&self, square: Square) -> Option<SquareMark> {
        self.marks
            .get(&square)
            .and_then(|layers| layers.iter().next_back().copied())
    }

    /// Squares carrying `mark`, in a1..h8 order
    pub fn squares_with(&self, mark: SquareMark) -> Vec<Square> {
        self.marks
            .iter()
            .filter(|(_, layers)| layers.contains(&mark))
            .map(|(square, _)| *square)
            .collect()
    }
}

/// Terminal surface used by the binary
///
/// Redraws the ASCII board on [`flush`](RenderSurface::flush) whenever
/// something changed since the last draw.
#[derive(Debug)]
pub struct TextSurface {
    overlay: OverlayState,
    theme: HighlightTheme,
    orientation: PieceColor,
    status: Option<GameStatus>,
    dirty: bool,
}

impl TextSurface {
    pub fn new(theme: HighlightTheme) -> Self {
        Self {
            overlay: OverlayState::default(),
            theme,
            orientation: PieceColor::White,
            status: None,
            dirty: false,
        }
    }

    pub fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    /// Current frame as text
    pub fn render(&self) -> String {
        let mut out = render_board(self.overlay.board(), &self.overlay, &self.theme, self.orientation);
        if let Some(status) = self.status {
            out.push('\n');
            out.push_str(status.message());
            out.push('\n');
        }
        out
    }
}

impl RenderSurface for TextSurface {
    fn targets(&self) -> Vec<RenderTarget> {
        REQUIRED_TARGETS.to_vec()
    }

    fn apply(&mut self, command: &RenderCommand) {
        self.overlay.apply(command);
        self.dirty = true;
    }

    fn prompt_promotion(&mut self, from: Square, to: Square, color: PieceColor) {
        let choices: String = PieceType::PROMOTION_CHOICES
            .iter()
            .map(|kind| kind.to_char())
            .collect();
        println!(
            "{} pawn {}{} promotes: choose one of [{}] or 'cancel'",
            color, from, to, choices
        );
    }

    fn set_orientation(&mut self, color: PieceColor) {
        if self.orientation != color {
            self.orientation = color;
            self.dirty = true;
        }
    }

    fn show_status(&mut self, status: GameStatus) {
        if self.status != Some(status) {
            self.status = Some(status);
            self.dirty = true;
        }
    }

    fn flush(&mut self) {
        if self.dirty {
            println!("{}", self.render());
            self.dirty = false;
        }
    }
}
