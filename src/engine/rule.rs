use std::collections::HashSet;

use crate::engine::pattern;
use crate::prelude::*;

/// Above this many visited fingerprints, an unbounded `Repeat` aborts rather than
/// search forever (`RuntimeLimit`, implementation-defined).
const VISITED_LIMIT: usize = 1_000_000;

/// A rewrite rule: one of the five combinators.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    FindReplace { pattern: Board, replacement: Board },
    OneOf(Vec<Rule>),
    Sequence(Vec<Rule>),
    PieceOfInterest { piece: char, body: Box<Rule> },
    Repeat { body: Box<Rule>, at_least: u32, at_most: Option<u32>, greedy: bool },
}

/// A bundled rule tree plus the board it starts from.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub rule: Rule,
    pub initial_board: Board,
}

impl Rule {
    /// Smart constructor for `Repeat`, enforcing `at_most >= at_least`.
    pub fn repeat(body: Rule, at_least: u32, at_most: Option<u32>, greedy: bool) -> Result<Rule> {
        if let Some(at_most) = at_most {
            if at_most < at_least {
                return Err(Error::RepeatBounds { at_least, at_most });
            }
        }
        Ok(Rule::Repeat { body: Box::new(body), at_least, at_most, greedy })
    }

    /// Smart constructor for `PieceOfInterest`, enforcing the single-character,
    /// non-`%` invariant.
    pub fn piece_of_interest(piece: char, body: Rule) -> Result<Rule> {
        if piece == '%' {
            return Err(Error::TypeMismatch(
                "piece-of-interest binder cannot reuse '%'".into(),
            ));
        }
        Ok(Rule::PieceOfInterest { piece, body: Box::new(body) })
    }

    /// Evaluates the rule against one board, returning the ordered-unique set of
    /// reachable successor boards.
    pub fn apply(&self, board: &Board) -> Result<Vec<Board>> {
        match self {
            Rule::FindReplace { pattern, replacement } => {
                if pattern.is_empty() && replacement.is_empty() {
                    return Ok(vec![board.clone()]);
                }
                let offsets = pattern::find(pattern, board)?;
                Ok(dedup_by_fingerprint(
                    offsets
                        .into_iter()
                        .map(|offset| pattern::replace(board, pattern, replacement, offset)),
                ))
            }

            Rule::OneOf(rules) => {
                let mut successors = Vec::new();
                for rule in rules {
                    successors.extend(rule.apply(board)?);
                }
                Ok(dedup_by_fingerprint(successors))
            }

            Rule::Sequence(rules) => {
                let mut acc = vec![board.clone()];
                for rule in rules {
                    acc = apply_all(rule, &acc)?;
                }
                Ok(acc)
            }

            Rule::PieceOfInterest { piece, body } => {
                if board.contains_var() {
                    return body.apply(board);
                }
                let mut successors = Vec::new();
                for coord in board.coords_with_literal(*piece) {
                    let mut scoped = board.clone();
                    scoped.insert(coord, SquareSpec::Var);
                    successors.extend(body.apply(&scoped)?.into_iter().map(|r| r.restore_var(*piece)));
                }
                Ok(dedup_by_fingerprint(successors))
            }

            Rule::Repeat { body, at_least, at_most, greedy } => {
                if let Some(at_most) = at_most {
                    if at_most < at_least {
                        return Err(Error::RepeatBounds { at_least: *at_least, at_most: *at_most });
                    }
                }
                repeat_apply(body, std::slice::from_ref(board), *at_least, *at_most, *greedy)
            }
        }
    }
}

/// Deduplicates a sequence of boards by fingerprint, preserving first-seen order.
/// Shared by every combinator that must produce an ordered-unique successor set.
fn dedup_by_fingerprint(boards: impl IntoIterator<Item = Board>) -> Vec<Board> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for board in boards {
        if seen.insert(board.fingerprint()) {
            out.push(board);
        }
    }
    out
}

/// Lifts `apply` over a collection of boards: the flat-unique of `apply(b)` for
/// each `b`.
pub fn apply_all(rule: &Rule, boards: &[Board]) -> Result<Vec<Board>> {
    let mut successors = Vec::new();
    for board in boards {
        successors.extend(rule.apply(board)?);
    }
    Ok(dedup_by_fingerprint(successors))
}

fn repeat_apply(
    body: &Rule,
    start: &[Board],
    at_least: u32,
    at_most: Option<u32>,
    greedy: bool,
) -> Result<Vec<Board>> {
    let mut visited: HashSet<u64> = start.iter().map(Board::fingerprint).collect();
    let mut frontier: Vec<Board> = start.to_vec();

    for _ in 0..at_least {
        if frontier.is_empty() {
            break;
        }
        frontier = apply_all(body, &frontier)?;
        for b in &frontier {
            visited.insert(b.fingerprint());
        }
        if visited.len() > VISITED_LIMIT {
            return Err(Error::RuntimeLimit { limit: VISITED_LIMIT });
        }
    }

    let mut frontiers: Vec<Vec<Board>> = vec![frontier.clone()];
    let mut iteration = at_least;
    loop {
        if let Some(at_most) = at_most {
            if iteration >= at_most {
                break;
            }
        }
        let candidates = apply_all(body, &frontier)?;
        let mut newly_seen = Vec::new();
        for b in candidates {
            if visited.insert(b.fingerprint()) {
                newly_seen.push(b);
            }
        }
        if newly_seen.is_empty() {
            break;
        }
        if visited.len() > VISITED_LIMIT {
            return Err(Error::RuntimeLimit { limit: VISITED_LIMIT });
        }
        frontier = newly_seen;
        frontiers.push(frontier.clone());
        iteration += 1;
    }

    if greedy {
        Ok(frontiers.pop().unwrap_or_default())
    } else {
        Ok(dedup_by_fingerprint(frontiers.into_iter().flatten()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_of(entries: &[((i32, i32), char)]) -> Board {
        Board::from_entries(
            entries
                .iter()
                .map(|((x, y), c)| (Coord::new(*x, *y), SquareSpec::Literal(*c))),
        )
    }

    fn pattern_of(entries: &[((i32, i32), SquareSpec)]) -> Board {
        Board::from_entries(entries.iter().map(|(c, s)| (Coord::new(c.0, c.1), s.clone())))
    }

    #[test]
    fn identity_find_replace() {
        let b = board_of(&[((0, 0), 'p')]);
        let r = Rule::FindReplace { pattern: Board::new(), replacement: Board::new() };
        assert_eq!(r.apply(&b).unwrap(), vec![b]);
    }

    #[test]
    fn sequence_neutrality_and_oneof_empty() {
        let b = board_of(&[((0, 0), 'p')]);
        assert_eq!(Rule::Sequence(vec![]).apply(&b).unwrap(), vec![b.clone()]);
        assert_eq!(Rule::OneOf(vec![]).apply(&b).unwrap(), Vec::<Board>::new());
    }

    #[test]
    fn repeat_zero_is_identity() {
        let b = board_of(&[((0, 0), 'p')]);
        let step = Rule::FindReplace {
            pattern: pattern_of(&[((0, 0), SquareSpec::Literal('p')), ((1, 0), SquareSpec::Literal('.'))]),
            replacement: pattern_of(&[((0, 0), SquareSpec::Literal('.')), ((1, 0), SquareSpec::Literal('p'))]),
        };
        let r = Rule::repeat(step, 0, Some(0), true).unwrap();
        assert_eq!(r.apply(&b).unwrap(), vec![b]);
    }

    #[test]
    fn repeat_bounds_rejected() {
        let step = Rule::FindReplace { pattern: board_of(&[((0, 0), 'p')]), replacement: Board::new() };
        assert!(matches!(Rule::repeat(step, 3, Some(1), true), Err(Error::RepeatBounds { .. })));
    }

    #[test]
    fn dedup_by_fingerprint() {
        // Two branches that converge on the same board must collapse to one result.
        let b = board_of(&[((0, 0), '.'), ((1, 0), 'p')]);
        let move_right = Rule::FindReplace {
            pattern: pattern_of(&[((0, 0), SquareSpec::Literal('.')), ((1, 0), SquareSpec::Literal('p'))]),
            replacement: pattern_of(&[((0, 0), SquareSpec::Literal('p')), ((1, 0), SquareSpec::Literal('.'))]),
        };
        let r = Rule::OneOf(vec![move_right.clone(), move_right]);
        assert_eq!(r.apply(&b).unwrap().len(), 1);
    }

    #[test]
    fn pawn_move_blocks_on_occupied() {
        // rows bottom-up: p.p / ..p / ... — '.' matches itself only, so every
        // empty square a pattern touches must be spelled out explicitly.
        let b = board_of(&[
            ((0, 0), 'p'), ((1, 0), '.'), ((2, 0), 'p'),
            ((0, 1), '.'), ((1, 1), '.'), ((2, 1), 'p'),
            ((0, 2), '.'), ((1, 2), '.'), ((2, 2), '.'),
        ]);
        let advance = Rule::FindReplace {
            pattern: pattern_of(&[((0, 0), SquareSpec::Literal('p')), ((0, 1), SquareSpec::Literal('.'))]),
            replacement: pattern_of(&[((0, 0), SquareSpec::Literal('.')), ((0, 1), SquareSpec::Literal('p'))]),
        };
        let results = advance.apply(&b).unwrap();
        // The two bottom-row pawns with empty space ahead advance; the
        // already-advanced middle-column pawn is blocked by its own kind.
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn piece_of_interest_scopes_each_instance() {
        // one row of pawns, each can move exactly one square up into empty space.
        let b = board_of(&[
            ((0, 0), 'p'), ((1, 0), 'p'), ((2, 0), 'p'), ((3, 0), 'p'),
            ((0, 1), '.'), ((1, 1), '.'), ((2, 1), '.'), ((3, 1), '.'),
        ]);
        let step = Rule::FindReplace {
            pattern: pattern_of(&[((0, 0), SquareSpec::Var), ((0, 1), SquareSpec::Literal('.'))]),
            replacement: pattern_of(&[((0, 0), SquareSpec::Literal('.')), ((0, 1), SquareSpec::Var)]),
        };
        let r = Rule::piece_of_interest('p', step).unwrap();
        let results = r.apply(&b).unwrap();
        assert_eq!(results.len(), 4);
    }

    #[test]
    fn piece_of_interest_repeated_move_advances_each_instance_independently() {
        // %p: (move_once){2} — one row of pawns, each individually advances
        // exactly two rows into empty space above.
        let b = board_of(&[
            ((0, 0), 'p'), ((1, 0), 'p'), ((2, 0), 'p'), ((3, 0), 'p'),
            ((0, 1), '.'), ((1, 1), '.'), ((2, 1), '.'), ((3, 1), '.'),
            ((0, 2), '.'), ((1, 2), '.'), ((2, 2), '.'), ((3, 2), '.'),
        ]);
        let move_once = Rule::FindReplace {
            pattern: pattern_of(&[((0, 0), SquareSpec::Var), ((0, 1), SquareSpec::Literal('.'))]),
            replacement: pattern_of(&[((0, 0), SquareSpec::Literal('.')), ((0, 1), SquareSpec::Var)]),
        };
        let twice = Rule::repeat(move_once, 2, Some(2), true).unwrap();
        let r = Rule::piece_of_interest('p', twice).unwrap();
        let results = r.apply(&b).unwrap();
        assert_eq!(results.len(), 4);
        for result in &results {
            // Every pawn not yet moved stays put at y=0; exactly one of the
            // four ends up two rows up at y=2.
            assert_eq!(result.coords_with_literal('p').len(), 4);
        }
    }

    #[test]
    fn unbounded_repeat_stops_at_obstacle() {
        // %R: (move_once)+ — a rook at each end of a row, a king blocking one
        // direction. Every square up to (but not past) the obstacle is reachable.
        let b = board_of(&[
            ((0, 0), 'R'), ((1, 0), '.'), ((2, 0), '.'), ((3, 0), 'K'), ((4, 0), 'R'),
        ]);
        let move_right = Rule::FindReplace {
            pattern: pattern_of(&[
                ((0, 0), SquareSpec::Var),
                ((1, 0), SquareSpec::Literal('.')),
            ]),
            replacement: pattern_of(&[
                ((0, 0), SquareSpec::Literal('.')),
                ((1, 0), SquareSpec::Var),
            ]),
        };
        let r = Rule::piece_of_interest('R', Rule::repeat(move_right, 1, None, false).unwrap()).unwrap();
        let results = r.apply(&b).unwrap();
        // Left rook reaches x=1 or x=2 (blocked by K at x=3): 2 positions.
        // Right rook has no empty square to its right at all: 0 positions.
        // Total: 2 distinct successor boards.
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn bouncing_particle_bounded_vs_unbounded_repeat() {
        // A particle 'u'/'d' bounces between two 'B's, reversing direction on contact.
        let bounce = Rule::OneOf(vec![
            Rule::FindReplace {
                pattern: pattern_of(&[((0, 0), SquareSpec::Literal('u')), ((0, 1), SquareSpec::Literal('.'))]),
                replacement: pattern_of(&[((0, 0), SquareSpec::Literal('.')), ((0, 1), SquareSpec::Literal('u'))]),
            },
            Rule::FindReplace {
                pattern: pattern_of(&[((0, 0), SquareSpec::Literal('u')), ((0, 1), SquareSpec::Literal('B'))]),
                replacement: pattern_of(&[((0, 0), SquareSpec::Literal('d')), ((0, 1), SquareSpec::Literal('B'))]),
            },
            Rule::FindReplace {
                pattern: pattern_of(&[((0, 0), SquareSpec::Literal('.')), ((0, 1), SquareSpec::Literal('d'))]),
                replacement: pattern_of(&[((0, 0), SquareSpec::Literal('d')), ((0, 1), SquareSpec::Literal('.'))]),
            },
            Rule::FindReplace {
                pattern: pattern_of(&[((0, 0), SquareSpec::Literal('B')), ((0, 1), SquareSpec::Literal('d'))]),
                replacement: pattern_of(&[((0, 0), SquareSpec::Literal('B')), ((0, 1), SquareSpec::Literal('u'))]),
            },
        ]);

        // B . u . B, bottom-up (y=0..4), with every intervening square explicit.
        let b = board_of(&[((0, 0), 'B'), ((0, 1), '.'), ((0, 2), 'u'), ((0, 3), '.'), ((0, 4), 'B')]);

        let bounded = Rule::repeat(bounce.clone(), 2, Some(4), false).unwrap();
        let bounded_results = bounded.apply(&b).unwrap();
        // Exactly the positions reached after 2, 3, and 4 steps: u climbing to
        // y=3, bouncing to d at y=3, then descending to y=2.
        assert_eq!(bounded_results.len(), 3);

        let unbounded = Rule::repeat(bounce, 0, None, false).unwrap();
        let unbounded_results = unbounded.apply(&b).unwrap();
        // The full bounce cycle returns to the starting position after six
        // steps, so the frontier search halts having visited six distinct
        // states (the start plus the five it passes through before repeating).
        assert_eq!(unbounded_results.len(), 6);
    }
}
