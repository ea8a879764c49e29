//! Selection resource for tracking the selected piece

use crate::game::types::Square;

/// Currently selected square and its legal targets
///
/// Only non-empty while the connection is open and it is the local turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub selected_square: Option<Square>,
    pub possible_moves: Vec<Square>,
}

impl Selection {
    pub fn select(&mut self, square: Square, targets: Vec<Square>) {
        self.selected_square = Some(square);
        self.possible_moves = targets;
    }

    pub fn clear(&mut self) {
        self.selected_square = None;
        self.possible_moves.clear();
    }

    pub fn is_selected(&self) -> bool {
        self.selected_square.is_some()
    }

    pub fn is_target(&self, square: Square) -> bool {
        self.possible_moves.contains(&square)
    }
}
