use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::ops::Add;

use crate::prelude::*;

/// An integer grid coordinate. `+x` is right, `+y` is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }
}

impl Add<(i32, i32)> for Coord {
    type Output = Coord;
    fn add(self, (dx, dy): (i32, i32)) -> Coord {
        Coord::new(self.x + dx, self.y + dy)
    }
}

/// A character class constraining a single square.
///
/// `Literal` and `Var` only ever accept a present cell; `NegClass` additionally
/// accepts an absent cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SquareSpec {
    /// A single concrete character, including `.` (the empty-square marker).
    Literal(char),
    /// `%`, the piece-of-interest variable.
    Var,
    /// `[c1c2..ck]`: matches any one of the listed characters.
    Class(Vec<char>),
    /// `[^c1..ck]`: matches anything *not* listed, and also matches absence.
    NegClass(Vec<char>),
}

impl SquareSpec {
    /// Whether this spec accepts the given cell content (`None` = absent).
    pub fn accepts(&self, content: Option<char>) -> bool {
        match (self, content) {
            (SquareSpec::Literal(c), Some(x)) => *c == x,
            (SquareSpec::Literal(_), None) => false,
            (SquareSpec::Var, Some(x)) => x == '%',
            (SquareSpec::Var, None) => false,
            (SquareSpec::Class(cs), Some(x)) => cs.contains(&x),
            (SquareSpec::Class(_), None) => false,
            (SquareSpec::NegClass(cs), Some(x)) => !cs.contains(&x),
            (SquareSpec::NegClass(_), None) => true,
        }
    }

    /// The content character this spec stands for when used on a concrete board.
    /// `Class`/`NegClass` never appear on concrete boards, so this is `None` for them.
    pub fn as_literal_char(&self) -> Option<char> {
        match self {
            SquareSpec::Literal(c) => Some(*c),
            SquareSpec::Var => Some('%'),
            SquareSpec::Class(_) | SquareSpec::NegClass(_) => None,
        }
    }

    /// A rough anchor-selectivity ranking for Find: lower is more selective.
    /// Negated classes are never anchors (`None`).
    pub fn anchor_priority(&self) -> Option<u8> {
        match self {
            SquareSpec::Literal(c) if *c != '.' => Some(0),
            SquareSpec::Var => Some(0),
            SquareSpec::Literal(_) => Some(1), // the '.' marker
            SquareSpec::Class(_) => Some(2),
            SquareSpec::NegClass(_) => None,
        }
    }

    /// Applies a character relabeling to the contained characters (used by
    /// `Symmetry::map_board` for custom piece relabelings). `%` is never relabeled:
    /// it is meta-syntax, not a piece character.
    pub fn map_chars(&self, f: impl Fn(char) -> char) -> SquareSpec {
        match self {
            SquareSpec::Literal(c) => SquareSpec::Literal(f(*c)),
            SquareSpec::Var => SquareSpec::Var,
            SquareSpec::Class(cs) => SquareSpec::Class(cs.iter().copied().map(&f).collect()),
            SquareSpec::NegClass(cs) => SquareSpec::NegClass(cs.iter().copied().map(&f).collect()),
        }
    }

    pub fn print(&self) -> String {
        match self {
            SquareSpec::Literal(c) => c.to_string(),
            SquareSpec::Var => "%".to_string(),
            SquareSpec::Class(cs) => format!("[{}]", cs.iter().collect::<String>()),
            SquareSpec::NegClass(cs) => format!("[^{}]", cs.iter().collect::<String>()),
        }
    }
}

/// A finite, sparse mapping from `Coord` to `SquareSpec`.
///
/// Used uniformly for concrete boards (only `Literal`/`Var` entries), and for
/// patterns/replacements inside rules (which may also use `Class`/`NegClass`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board(HashMap<Coord, SquareSpec>);

impl Board {
    pub fn new() -> Self {
        Board(HashMap::new())
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (Coord, SquareSpec)>) -> Self {
        Board(entries.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, coord: &Coord) -> Option<&SquareSpec> {
        self.0.get(coord)
    }

    pub fn content_at(&self, coord: &Coord) -> Option<char> {
        self.get(coord).and_then(SquareSpec::as_literal_char)
    }

    pub fn insert(&mut self, coord: Coord, spec: SquareSpec) {
        self.0.insert(coord, spec);
    }

    pub fn remove(&mut self, coord: &Coord) {
        self.0.remove(coord);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Coord, &SquareSpec)> {
        self.0.iter()
    }

    /// The bounding box `(min_x, min_y, max_x, max_y)`; `None` for an empty board.
    pub fn bounds(&self) -> Option<(i32, i32, i32, i32)> {
        let mut iter = self.0.keys();
        let first = iter.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for c in iter {
            min_x = min_x.min(c.x);
            min_y = min_y.min(c.y);
            max_x = max_x.max(c.x);
            max_y = max_y.max(c.y);
        }
        Some((min_x, min_y, max_x, max_y))
    }

    /// An order-independent hash of the entry set, used for dedup and cycle detection.
    pub fn fingerprint(&self) -> u64 {
        let mut entries: Vec<(Coord, &SquareSpec)> =
            self.0.iter().map(|(c, s)| (*c, s)).collect();
        entries.sort_by_key(|(c, _)| (c.x, c.y));
        let mut hasher = DefaultHasher::new();
        for (coord, spec) in entries {
            coord.hash(&mut hasher);
            spec.hash(&mut hasher);
        }
        hasher.finish()
    }

    /// Coordinates where `a` and `b` disagree; absence counts as unequal to any
    /// present content.
    pub fn diff(a: &Board, b: &Board) -> std::collections::HashSet<Coord> {
        let mut out = std::collections::HashSet::new();
        for coord in a.0.keys().chain(b.0.keys()) {
            if a.0.get(coord) != b.0.get(coord) {
                out.insert(*coord);
            }
        }
        out
    }

    /// True if any square currently holds the piece-of-interest variable.
    pub fn contains_var(&self) -> bool {
        self.0.values().any(|s| matches!(s, SquareSpec::Var))
    }

    /// All coordinates whose content is the literal character `piece`.
    pub fn coords_with_literal(&self, piece: char) -> Vec<Coord> {
        let mut coords: Vec<Coord> = self
            .0
            .iter()
            .filter(|(_, s)| matches!(s, SquareSpec::Literal(c) if *c == piece))
            .map(|(c, _)| *c)
            .collect();
        coords.sort_by_key(|c| (c.x, c.y));
        coords
    }

    /// Substitutes every `%` entry back to the literal `piece` character.
    pub fn restore_var(&self, piece: char) -> Board {
        Board::from_entries(self.0.iter().map(|(c, s)| {
            let s = if matches!(s, SquareSpec::Var) {
                SquareSpec::Literal(piece)
            } else {
                s.clone()
            };
            (*c, s)
        }))
    }
}
