//! A pared-down snake: a single directional head piece that advances one
//! square at a time, plus a direction-rotation custom action that rotates
//! the board and cyclically relabels the arrow alphabet so that a head
//! pointing right, rotated a quarter turn, points up. Body growth and
//! self-collision are game-state tracking and out of scope here.

use crate::prelude::*;

/// The four-symbol arrow alphabet, in counter-clockwise rotation order: a
/// head pointing right ('>') becomes one pointing up ('^') after a quarter
/// turn, matching the geometric rotation of the point it sits on.
const ARROWS: [char; 4] = ['>', '^', '<', 'v'];

/// Rotates the board by `n` quarter turns and cyclically relabels the arrow
/// alphabet by the same count, so direction pieces stay consistent with the
/// geometry they sit in.
pub struct DirectionRotate(pub u8);

impl Symmetry for DirectionRotate {
    fn map_piece(&self, c: char) -> char {
        match ARROWS.iter().position(|&a| a == c) {
            Some(i) => ARROWS[(i + self.0 as usize) % ARROWS.len()],
            None => c,
        }
    }

    fn map_point(&self, p: Coord) -> Coord {
        Move::rotate(self.0).apply_to_square(p)
    }
}

/// Advances a rightward-pointing head into an empty or food square.
fn advance_right() -> Rule {
    Rule::FindReplace {
        pattern: Board::from_entries([
            (Coord::new(0, 0), SquareSpec::Literal('>')),
            (Coord::new(1, 0), SquareSpec::Class(vec!['.', 'F'])),
        ]),
        replacement: Board::from_entries([
            (Coord::new(0, 0), SquareSpec::Literal('.')),
            (Coord::new(1, 0), SquareSpec::Literal('>')),
        ]),
    }
}

/// All four heading directions, derived from `advance_right` by distributing
/// `DirectionRotate` rather than hand-writing each heading's rule.
pub fn move_rule() -> Rule {
    let base = advance_right();
    Rule::OneOf((0..4).map(|i| DirectionRotate(i).distribute(&base)).collect())
}

pub fn game() -> Game {
    let mut initial_board = Board::new();
    initial_board.insert(Coord::new(0, 0), SquareSpec::Literal('>'));
    initial_board.insert(Coord::new(1, 0), SquareSpec::Literal('.'));
    initial_board.insert(Coord::new(3, 0), SquareSpec::Literal('F'));

    Game { rule: move_rule(), initial_board }
}
