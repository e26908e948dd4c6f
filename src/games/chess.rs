//! A pared-down chess: pawns advancing and capturing a king, plus the colour-flip
//! custom action (rotate 180° and swap the filled piece set).

use crate::prelude::*;

/// Rotates the board 180° and swaps upper/lower case, turning White's pieces into
/// Black's and vice versa.
pub struct ColourFlip;

impl Symmetry for ColourFlip {
    fn map_piece(&self, c: char) -> char {
        if c.is_ascii_uppercase() {
            c.to_ascii_lowercase()
        } else if c.is_ascii_lowercase() {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }

    fn map_point(&self, p: Coord) -> Coord {
        Move::rotate(2).apply_to_square(p)
    }
}

fn pawn_advance() -> Rule {
    Rule::FindReplace {
        pattern: Board::from_entries([
            (Coord::new(0, 0), SquareSpec::Var),
            (Coord::new(0, 1), SquareSpec::Literal('.')),
        ]),
        replacement: Board::from_entries([
            (Coord::new(0, 0), SquareSpec::Literal('.')),
            (Coord::new(0, 1), SquareSpec::Var),
        ]),
    }
}

fn pawn_capture(dx: i32) -> Rule {
    Rule::FindReplace {
        pattern: Board::from_entries([
            (Coord::new(0, 0), SquareSpec::Var),
            (Coord::new(dx, 1), SquareSpec::Literal('K')),
        ]),
        replacement: Board::from_entries([
            (Coord::new(0, 0), SquareSpec::Literal('.')),
            (Coord::new(dx, 1), SquareSpec::Var),
        ]),
    }
}

pub fn game() -> Game {
    let white_moves = Rule::piece_of_interest(
        'p',
        Rule::OneOf(vec![pawn_advance(), pawn_capture(-1), pawn_capture(1)]),
    )
    .expect("'p' is a valid piece-of-interest binder");
    let black_moves = ColourFlip.distribute(&white_moves);
    let rule = Rule::OneOf(vec![white_moves, black_moves]);

    let mut initial_board = Board::new();
    for x in 0..4 {
        initial_board.insert(Coord::new(x, 0), SquareSpec::Literal('p'));
        initial_board.insert(Coord::new(x, 1), SquareSpec::Literal('.'));
    }
    initial_board.insert(Coord::new(2, 1), SquareSpec::Literal('K'));

    Game { rule, initial_board }
}
