//! Last-move and check highlighting
//!
//! [`HighlightManager`] remembers which squares it marked so every overwrite
//! first restores what it previously marked. Marks are layered per
//! [`SquareMark`]: unmarking one layer never disturbs another, so a square
//! can be the last-move target and the checked king at the same time.

use crate::game::resources::RulesEngine;
use crate::game::types::{PieceColor, Square};
use crate::rendering::surface::RenderCommand;
use serde::{Deserialize, Serialize};

/// Highlight layer on a square
///
/// Ordered by drawing priority, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SquareMark {
    LegalTarget,
    LastMove,
    Selected,
    Check,
}

/// Last-move and check-square visual state
#[derive(Debug, Clone, Default)]
pub struct HighlightManager {
    last_move: Option<(Square, Square)>,
    check_square: Option<Square>,
    show_last_move: bool,
}

impl HighlightManager {
    pub fn new(show_last_move: bool) -> Self {
        Self {
            last_move: None,
            check_square: None,
            show_last_move,
        }
    }

    pub fn last_move(&self) -> Option<(Square, Square)> {
        self.last_move
    }

    pub fn check_square(&self) -> Option<Square> {
        self.check_square
    }

    /// Unmark the previous pair and mark `from`/`to`
    ///
    /// No-op when the pair is unchanged or last-move highlighting is off.
    pub fn mark_last_move(&mut self, from: Square, to: Square) -> Vec<RenderCommand> {
        let mut commands = Vec::new();
        if !self.show_last_move || self.last_move == Some((from, to)) {
            return commands;
        }

        if let Some((old_from, old_to)) = self.last_move.take() {
            commands.push(RenderCommand::unmark(old_from, SquareMark::LastMove));
            commands.push(RenderCommand::unmark(old_to, SquareMark::LastMove));
        }
        commands.push(RenderCommand::mark(from, SquareMark::LastMove));
        commands.push(RenderCommand::mark(to, SquareMark::LastMove));
        self.last_move = Some((from, to));
        commands
    }

    /// Move the check mark to the king of the side to move, or drop it
    pub fn mark_check<E: RulesEngine + ?Sized>(&mut self, engine: &E) -> Vec<RenderCommand> {
        let target = if engine.is_check() {
            find_king_square(&engine.serialize(), engine.turn_color())
        } else {
            None
        };

        let mut commands = Vec::new();
        if target == self.check_square {
            return commands;
        }

        if let Some(old) = self.check_square.take() {
            commands.push(RenderCommand::unmark(old, SquareMark::Check));
        }
        if let Some(square) = target {
            commands.push(RenderCommand::mark(square, SquareMark::Check));
        }
        self.check_square = target;
        commands
    }

    /// Remove every mark this manager owns
    pub fn clear(&mut self) -> Vec<RenderCommand> {
        let mut commands = Vec::new();
        if let Some((from, to)) = self.last_move.take() {
            commands.push(RenderCommand::unmark(from, SquareMark::LastMove));
            commands.push(RenderCommand::unmark(to, SquareMark::LastMove));
        }
        if let Some(square) = self.check_square.take() {
            commands.push(RenderCommand::unmark(square, SquareMark::Check));
        }
        commands
    }
}

/// Find `color`'s king in the placement field of a FEN string
pub fn find_king_square(board: &str, color: PieceColor) -> Option<Square> {
    let king = match color {
        PieceColor::White => 'K',
        PieceColor::Black => 'k',
    };
    let placement = board.split_whitespace().next()?;

    for (row, rank_str) in placement.split('/').enumerate() {
        let rank = 7u8.checked_sub(u8::try_from(row).ok()?)?;
        let mut file = 0u8;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                file = file.checked_add(u8::try_from(skip).ok()?)?;
            } else {
                if c == king {
                    return Square::new(file, rank);
                }
                file = file.checked_add(1)?;
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::resources::ChessEngine;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_find_king_square() {
        let start = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!(find_king_square(start, PieceColor::White), Some(sq("e1")));
        assert_eq!(find_king_square(start, PieceColor::Black), Some(sq("e8")));
        assert_eq!(find_king_square("8/8/8/8/8/8/8/8 w - - 0 1", PieceColor::White), None);
    }

    #[test]
    fn test_find_king_square_survives_oversized_rank() {
        let crafted = format!("{}K/8/8/8/8/8/8/8 w - - 0 1", "9".repeat(64));
        assert_eq!(find_king_square(&crafted, PieceColor::White), None);
    }

    #[test]
    fn test_last_move_replaces_previous_pair() {
        let mut manager = HighlightManager::new(true);
        manager.mark_last_move(sq("e2"), sq("e4"));
        let commands = manager.mark_last_move(sq("e7"), sq("e5"));

        assert_eq!(
            commands,
            vec![
                RenderCommand::unmark(sq("e2"), SquareMark::LastMove),
                RenderCommand::unmark(sq("e4"), SquareMark::LastMove),
                RenderCommand::mark(sq("e7"), SquareMark::LastMove),
                RenderCommand::mark(sq("e5"), SquareMark::LastMove),
            ]
        );
        assert_eq!(manager.last_move(), Some((sq("e7"), sq("e5"))));
    }

    #[test]
    fn test_marks_are_idempotent() {
        let mut manager = HighlightManager::new(true);
        assert!(!manager.mark_last_move(sq("g1"), sq("f3")).is_empty());
        assert!(manager.mark_last_move(sq("g1"), sq("f3")).is_empty());

        let engine = ChessEngine::new();
        assert!(manager.mark_check(&engine).is_empty());
    }

    #[test]
    fn test_disabled_last_move_emits_nothing() {
        let mut manager = HighlightManager::new(false);
        assert!(manager.mark_last_move(sq("e2"), sq("e4")).is_empty());
        assert_eq!(manager.last_move(), None);
    }

    #[test]
    fn test_check_mark_follows_king() {
        let mut engine =
            ChessEngine::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let mut manager = HighlightManager::new(true);

        engine.apply_move(sq("h1"), sq("h8"), None).unwrap();
        assert_eq!(
            manager.mark_check(&engine),
            vec![RenderCommand::mark(sq("e8"), SquareMark::Check)]
        );

        engine.apply_move(sq("e8"), sq("d7"), None).unwrap();
        assert_eq!(
            manager.mark_check(&engine),
            vec![RenderCommand::unmark(sq("e8"), SquareMark::Check)]
        );
        assert_eq!(manager.check_square(), None);
    }
}
