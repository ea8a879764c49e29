//! Move history tracking resource
//!
//! Maintains a chronological, append-only record of every move applied
//! during the session, local or remote, in Standard Algebraic Notation.
//!
//! # Architecture
//!
//! MoveHistory stores a `Vec<HistoryEntry>` where each entry contains:
//! - Ply number (1 = White's first move)
//! - Color of the side that moved
//! - SAN notation as produced by the rules engine (`e4`, `Nf3`, `exd8=Q+`)
//!
//! Entries are never edited or removed. A reconciliation that replaces the
//! board keeps the log: it records what was actually played in this session.
//!
//! # Integration
//!
//! Appended by [`crate::game::systems::coordinator`] as part of the move
//! fan-out. Read by the terminal surface to print the move list.

use crate::game::types::PieceColor;

/// One applied move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// 1-based half-move number within this session
    pub ply: u32,
    /// Side that made the move
    pub color: PieceColor,
    /// Standard algebraic notation including check markers
    pub notation: String,
}

/// Append-only log of applied moves
///
/// # Examples
///
/// ```rust,ignore
/// let mut history = MoveHistory::default();
/// history.push(PieceColor::White, "e4");
/// history.push(PieceColor::Black, "e5");
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.to_move_list(), "1. e4 e5");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MoveHistory {
    /// Chronological list of all moves
    ///
    /// Index 0 = ply 1
    entries: Vec<HistoryEntry>,
}

impl MoveHistory {
    /// Append a move and return the stored entry
    pub fn push(&mut self, color: PieceColor, notation: impl Into<String>) -> &HistoryEntry {
        let ply = u32::try_from(self.entries.len()).unwrap_or(u32::MAX).saturating_add(1);
        self.entries.push(HistoryEntry {
            ply,
            color,
            notation: notation.into(),
        });
        &self.entries[self.entries.len() - 1]
    }

    /// Get the most recent move, if any
    pub fn last_move(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Number of half-moves recorded
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get an entry by ply number (1-based)
    pub fn get(&self, ply: u32) -> Option<&HistoryEntry> {
        let index = usize::try_from(ply.checked_sub(1)?).ok()?;
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    /// Numbered move list, e.g. `1. e4 e5 2. Nf3`
    ///
    /// A log that starts with Black (after a reconciliation onto a position
    /// with Black to move) opens with `1...`.
    pub fn to_move_list(&self) -> String {
        let mut out = String::new();
        let mut move_number = 1u32;
        for (index, entry) in self.entries.iter().enumerate() {
            match entry.color {
                PieceColor::White => {
                    if index > 0 {
                        out.push(' ');
                    }
                    out.push_str(&format!("{}. {}", move_number, entry.notation));
                }
                PieceColor::Black => {
                    if index == 0 {
                        out.push_str(&format!("{}... {}", move_number, entry.notation));
                    } else {
                        out.push(' ');
                        out.push_str(&entry.notation);
                    }
                    move_number += 1;
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_history_default() {
        let history = MoveHistory::default();
        assert!(history.is_empty());
        assert!(history.last_move().is_none());
        assert_eq!(history.to_move_list(), "");
    }

    #[test]
    fn test_push_assigns_ply_numbers() {
        let mut history = MoveHistory::default();
        assert_eq!(history.push(PieceColor::White, "e4").ply, 1);
        assert_eq!(history.push(PieceColor::Black, "e5").ply, 2);

        let last = history.last_move().unwrap();
        assert_eq!(last.notation, "e5");
        assert_eq!(last.color, PieceColor::Black);
        assert_eq!(history.get(1).map(|e| e.notation.as_str()), Some("e4"));
        assert!(history.get(0).is_none());
        assert!(history.get(3).is_none());
    }

    #[test]
    fn test_realistic_game_opening() {
        // Italian Game
        let mut history = MoveHistory::default();
        for (i, san) in ["e4", "e5", "Nf3", "Nc6", "Bc4"].iter().enumerate() {
            let color = if i % 2 == 0 {
                PieceColor::White
            } else {
                PieceColor::Black
            };
            history.push(color, *san);
        }

        assert_eq!(history.len(), 5);
        assert_eq!(history.to_move_list(), "1. e4 e5 2. Nf3 Nc6 3. Bc4");
        assert_eq!(history.iter().filter(|e| e.color == PieceColor::Black).count(), 2);
    }

    #[test]
    fn test_move_list_starting_with_black() {
        let mut history = MoveHistory::default();
        history.push(PieceColor::Black, "e5");
        history.push(PieceColor::White, "Nf3");
        assert_eq!(history.to_move_list(), "1... e5 2. Nf3");
    }
}
