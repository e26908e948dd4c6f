use crate::prelude::*;

/// One atom of a symmetry element: a translation vector or a quarter-turn count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveAtom {
    Translate(i32, i32),
    /// Counter-clockwise quarter turns, always normalized into `0..4`.
    Rotate(u8),
}

impl MoveAtom {
    fn apply_point(&self, p: Coord) -> Coord {
        match self {
            MoveAtom::Translate(dx, dy) => Coord::new(p.x + dx, p.y + dy),
            MoveAtom::Rotate(n) => {
                let mut cur = p;
                for _ in 0..(*n % 4) {
                    cur = Coord::new(-cur.y, cur.x);
                }
                cur
            }
        }
    }

    /// Like `apply_point`, but the `-1` square correction is applied
    /// once per individual quarter turn, not once per atom — a `Rotate(2)`
    /// atom must behave identically to two chained `Rotate(1)` atoms, or
    /// composition stops being associative on squares.
    fn apply_to_square(&self, p: Coord) -> Coord {
        match self {
            MoveAtom::Translate(dx, dy) => Coord::new(p.x + dx, p.y + dy),
            MoveAtom::Rotate(n) => {
                let mut cur = p;
                for _ in 0..(*n % 4) {
                    cur = Coord::new(-cur.y, cur.x);
                    cur.x -= 1;
                }
                cur
            }
        }
    }

    fn inverse(&self) -> MoveAtom {
        match self {
            MoveAtom::Translate(dx, dy) => MoveAtom::Translate(-dx, -dy),
            MoveAtom::Rotate(n) => MoveAtom::Rotate((4 - (n % 4)) % 4),
        }
    }
}

/// A translation+rotation symmetry element: an ordered list of atoms. Identity
/// is the empty list; composition is list concatenation, applied left-to-right.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Move(Vec<MoveAtom>);

impl Move {
    pub fn identity() -> Self {
        Move(Vec::new())
    }

    pub fn translate(dx: i32, dy: i32) -> Self {
        Move(vec![MoveAtom::Translate(dx, dy)])
    }

    pub fn rotate(n: u8) -> Self {
        Move(vec![MoveAtom::Rotate(n % 4)])
    }

    pub fn from_atoms(atoms: Vec<MoveAtom>) -> Self {
        Move(atoms)
    }

    pub fn atoms(&self) -> &[MoveAtom] {
        &self.0
    }

    /// `self.then(next)`: apply `self`'s atoms, then `next`'s.
    pub fn then(&self, next: &Move) -> Move {
        let mut atoms = self.0.clone();
        atoms.extend(next.0.iter().copied());
        Move(atoms)
    }

    pub fn inverse(&self) -> Move {
        Move(self.0.iter().rev().map(MoveAtom::inverse).collect())
    }

    /// Applies the move to a bare point by folding atoms left-to-right.
    pub fn apply_to_point(&self, p: Coord) -> Coord {
        self.0.iter().fold(p, |acc, atom| atom.apply_point(acc))
    }

    /// Applies the move to a board-square coordinate: like `apply_to_point`, but
    /// after each individual quarter turn the x-coordinate is decremented by one,
    /// correcting for squares being anchored at their bottom-left corner.
    pub fn apply_to_square(&self, p: Coord) -> Coord {
        self.0.iter().fold(p, |acc, atom| atom.apply_to_square(acc))
    }
}

/// A transform that can act on a piece character, a point, a board, and (by
/// recursive distribution) a rule. Geometric `Move` is the default implementation;
/// games plug in custom variants (colour flips, side swaps, alphabet rotations) at
/// the same seam.
pub trait Symmetry {
    fn map_piece(&self, c: char) -> char;
    fn map_point(&self, p: Coord) -> Coord;

    fn map_board(&self, board: &Board) -> Board {
        Board::from_entries(
            board
                .iter()
                .map(|(c, spec)| (self.map_point(*c), spec.map_chars(|ch| self.map_piece(ch)))),
        )
    }

    /// Recursively transforms a rule tree so that evaluation commutes with the
    /// action (the distribution law).
    fn distribute(&self, rule: &Rule) -> Rule
    where
        Self: Sized,
    {
        match rule {
            Rule::FindReplace { pattern, replacement } => Rule::FindReplace {
                pattern: self.map_board(pattern),
                replacement: self.map_board(replacement),
            },
            Rule::OneOf(rules) => Rule::OneOf(rules.iter().map(|r| self.distribute(r)).collect()),
            Rule::Sequence(rules) => {
                Rule::Sequence(rules.iter().map(|r| self.distribute(r)).collect())
            }
            Rule::PieceOfInterest { piece, body } => Rule::PieceOfInterest {
                piece: self.map_piece(*piece),
                body: Box::new(self.distribute(body)),
            },
            Rule::Repeat { body, at_least, at_most, greedy } => Rule::Repeat {
                body: Box::new(self.distribute(body)),
                at_least: *at_least,
                at_most: *at_most,
                greedy: *greedy,
            },
        }
    }
}

impl Symmetry for Move {
    fn map_piece(&self, c: char) -> char {
        c
    }

    fn map_point(&self, p: Coord) -> Coord {
        self.apply_to_square(p)
    }
}
