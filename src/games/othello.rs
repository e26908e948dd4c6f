//! A pared-down Othello: placing a disc that flanks exactly one enemy disc
//! along an axis, capturing it. Diagonal flanking and runs of more than one
//! flanked disc are beyond what this bundled game needs; this demonstrates
//! the symmetry distribution law instead — the four axis directions are
//! derived from one base rule by rotating it, the same bishop-rule
//! construction (`OneOf{rotate(i) * base : i in 0..3}`).

use crate::prelude::*;

/// The "flank upward" base rule: an empty square, one enemy disc, then one of
/// the mover's own discs, collapses to three of the mover's discs.
fn flank_up() -> Rule {
    Rule::FindReplace {
        pattern: Board::from_entries([
            (Coord::new(0, 0), SquareSpec::Literal('.')),
            (Coord::new(0, 1), SquareSpec::Literal('O')),
            (Coord::new(0, 2), SquareSpec::Literal('X')),
        ]),
        replacement: Board::from_entries([
            (Coord::new(0, 0), SquareSpec::Literal('X')),
            (Coord::new(0, 1), SquareSpec::Literal('X')),
            (Coord::new(0, 2), SquareSpec::Literal('X')),
        ]),
    }
}

/// All four axis-aligned flanking directions, built by distributing `flank_up`
/// over the rotation group rather than hand-writing each one.
pub fn place_rule() -> Rule {
    let base = flank_up();
    Rule::OneOf((0..4).map(|i| Move::rotate(i).distribute(&base)).collect())
}

pub fn game() -> Game {
    let mut initial_board = Board::new();
    initial_board.insert(Coord::new(0, 0), SquareSpec::Literal('O'));
    initial_board.insert(Coord::new(1, 0), SquareSpec::Literal('X'));
    initial_board.insert(Coord::new(0, 1), SquareSpec::Literal('X'));
    initial_board.insert(Coord::new(1, 1), SquareSpec::Literal('O'));
    // Gives the starting position one legal move: placing at (0, -1) flanks
    // the 'O' at (0, 0) against the 'X' at (0, 1).
    initial_board.insert(Coord::new(0, -1), SquareSpec::Literal('.'));

    Game { rule: place_rule(), initial_board }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flanks_a_single_disc_in_each_rotated_direction() {
        // A column laid out exactly for `flank_up`: empty, enemy, mover's own.
        let mut b = Board::new();
        b.insert(Coord::new(0, 0), SquareSpec::Literal('.'));
        b.insert(Coord::new(0, 1), SquareSpec::Literal('O'));
        b.insert(Coord::new(0, 2), SquareSpec::Literal('X'));

        let successors = place_rule().apply(&b).unwrap();
        assert_eq!(successors.len(), 1);
        let flipped = &successors[0];
        assert_eq!(flipped.content_at(&Coord::new(0, 0)), Some('X'));
        assert_eq!(flipped.content_at(&Coord::new(0, 1)), Some('X'));
    }

    #[test]
    fn distribution_matches_hand_rotated_rule() {
        // Distributing the base rule over rotate(i) must equal
        // hand-rotating the base rule's own successors (not just re-deriving it).
        let b = game().initial_board;
        let distributed = place_rule();
        let hand_rotated = Rule::OneOf(vec![
            Move::rotate(0).distribute(&flank_up()),
            Move::rotate(1).distribute(&flank_up()),
            Move::rotate(2).distribute(&flank_up()),
            Move::rotate(3).distribute(&flank_up()),
        ]);
        assert_eq!(distributed.apply(&b).unwrap(), hand_rotated.apply(&b).unwrap());
    }
}
