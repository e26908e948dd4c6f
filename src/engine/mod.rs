//! The rule-algebra core: sparse boards, the symmetry group, the pattern engine,
//! the five rule combinators, and their textual surface syntax.

pub(crate) mod coord;
pub(crate) mod pattern;
pub(crate) mod render;
pub(crate) mod rule;
pub(crate) mod symmetry;
pub mod text;

pub mod prelude {
    pub use super::coord::{Board, Coord, SquareSpec};
    pub use super::render::{bounds, diff, render_lines, RenderOptions};
    pub use super::rule::{apply_all, Game, Rule};
    pub use super::symmetry::{Move, MoveAtom, Symmetry};
    pub use super::text::prelude::*;
}
