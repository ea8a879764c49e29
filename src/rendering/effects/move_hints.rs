//! Move hints visualization
//!
//! Marks the selected square and, when `show_hints` is enabled, every legal
//! target of the selected piece.

use crate::game::types::Square;
use crate::rendering::effects::SquareMark;
use crate::rendering::surface::RenderCommand;

/// Commands that emphasize a new selection
pub fn selection_marks(from: Square, targets: &[Square], show_hints: bool) -> Vec<RenderCommand> {
    let mut commands = vec![RenderCommand::mark(from, SquareMark::Selected)];
    if show_hints {
        commands.extend(
            targets
                .iter()
                .map(|&target| RenderCommand::mark(target, SquareMark::LegalTarget)),
        );
    }
    commands
}

/// Commands that remove a selection's emphasis, leaving other layers intact
pub fn clear_selection_marks(from: Square, targets: &[Square]) -> Vec<RenderCommand> {
    std::iter::once(RenderCommand::unmark(from, SquareMark::Selected))
        .chain(
            targets
                .iter()
                .map(|&target| RenderCommand::unmark(target, SquareMark::LegalTarget)),
        )
        .collect()
}
