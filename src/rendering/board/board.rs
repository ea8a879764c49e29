//! ASCII board drawing for the terminal surface

use crate::game::types::{PieceColor, Square};
use crate::rendering::board::HighlightTheme;
use crate::rendering::surface::OverlayState;

/// Expand the placement field of a FEN string into 64 cells, a1 first
fn placement_cells(board: &str) -> [char; 64] {
    let mut cells = ['.'; 64];
    let Some(placement) = board.split_whitespace().next() else {
        return cells;
    };

    for (row, rank_str) in placement.split('/').take(8).enumerate() {
        let rank = 7 - row;
        let mut file = 0usize;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                file = file.saturating_add(skip as usize);
            } else if file < 8 {
                cells[rank * 8 + file] = c;
                file += 1;
            }
        }
    }
    cells
}

/// Draw `board` with overlay glyphs, from `orientation`'s side
///
/// Each cell is the piece letter (or `.`) followed by the glyph of the
/// square's highest-priority mark.
pub fn render_board(
    board: &str,
    overlay: &OverlayState,
    theme: &HighlightTheme,
    orientation: PieceColor,
) -> String {
    let cells = placement_cells(board);
    let ranks: Vec<u8> = match orientation {
        PieceColor::White => (0..8).rev().collect(),
        PieceColor::Black => (0..8).collect(),
    };
    let files: Vec<u8> = match orientation {
        PieceColor::White => (0..8).collect(),
        PieceColor::Black => (0..8).rev().collect(),
    };

    let mut out = String::new();
    for &rank in &ranks {
        out.push_str(&format!("{} ", rank + 1));
        for &file in &files {
            let Some(square) = Square::new(file, rank) else {
                continue;
            };
            let glyph = overlay
                .top_mark(square)
                .map_or(' ', |mark| theme.token(mark).glyph);
            out.push(' ');
            out.push(cells[usize::from(square.index())]);
            out.push(glyph);
        }
        out.push('\n');
    }

    out.push_str("  ");
    for &file in &files {
        out.push(' ');
        out.push((b'a' + file) as char);
        out.push(' ');
    }
    out.push('\n');
    out
}
