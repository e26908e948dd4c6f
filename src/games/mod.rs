//! The named catalog of bundled games.
//!
//! Each entry composes engine primitives — including a custom [`Symmetry`] where
//! the game calls for one — into a [`Game`]. No turn-tracking or evaluation
//! logic lives here; that's out of scope for a rule catalog.

mod chess;
mod othello;
mod snake;
mod tictac;

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::prelude::*;

static CATALOG: OnceLock<HashMap<&'static str, Game>> = OnceLock::new();

/// The catalog, built once and shared across every lookup.
pub fn games() -> &'static HashMap<&'static str, Game> {
    CATALOG.get_or_init(|| {
        HashMap::from([
            ("tictac", tictac::game()),
            ("chess", chess::game()),
            ("othello", othello::game()),
            ("snake", snake::game()),
        ])
    })
}

/// Looks up one named game in the catalog.
pub fn game(name: &str) -> Option<&'static Game> {
    games().get(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_all_four_games() {
        for name in ["tictac", "chess", "othello", "snake"] {
            assert!(game(name).is_some(), "missing catalog entry for {name}");
        }
        assert!(game("checkers").is_none());
    }
}
