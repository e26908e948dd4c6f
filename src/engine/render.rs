use std::collections::HashSet;

use crate::prelude::*;

/// Options for `render_lines`.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub border: bool,
    pub highlight: HashSet<Coord>,
}

/// The bounding box `(min_x, min_y, max_x, max_y)`; `None` for an empty board.
pub fn bounds(board: &Board) -> Option<(i32, i32, i32, i32)> {
    board.bounds()
}

/// Coordinates where the two boards disagree (used for move highlighting).
pub fn diff(a: &Board, b: &Board) -> HashSet<Coord> {
    Board::diff(a, b)
}

/// Renders a board as printable lines, top row first, with an optional border and
/// per-coordinate highlight marker (`[x]` instead of ` x `).
pub fn render_lines(board: &Board, options: &RenderOptions) -> Vec<String> {
    let Some((min_x, min_y, max_x, max_y)) = bounds(board) else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    let width = (max_x - min_x + 1) as usize;

    if options.border {
        lines.push(format!("+{}+", "-".repeat(width * 3)));
    }

    for y in (min_y..=max_y).rev() {
        let mut row = String::new();
        if options.border {
            row.push('|');
        }
        for x in min_x..=max_x {
            let coord = Coord::new(x, y);
            let glyph = board
                .content_at(&coord)
                .map(|c| c.to_string())
                .unwrap_or_else(|| ".".to_string());
            if options.highlight.contains(&coord) {
                row.push('[');
                row.push_str(&glyph);
                row.push(']');
            } else {
                row.push(' ');
                row.push_str(&glyph);
                row.push(' ');
            }
        }
        if options.border {
            row.push('|');
        }
        lines.push(row);
    }

    if options.border {
        lines.push(format!("+{}+", "-".repeat(width * 3)));
    }

    lines
}
