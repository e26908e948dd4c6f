//! Board-fragment grammar: a compact cursor-walk notation for `Board` values.

use crate::engine::text::movement::{parse_movement, print_movement};
use crate::prelude::*;

/// Parses a board fragment, including an optional `<movement> * ` origin prefix.
pub fn parse_board_fragment(s: &str) -> Result<Board> {
    let (origin, body) = split_movement_prefix(s)?;
    let mut board = Board::new();
    let mut cursor = Coord::new(0, 0);
    let start_x = cursor.x;

    let chars: Vec<char> = body.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '1' | '0' | 'r' => {
                cursor.x += 1;
                i += 1;
            }
            'u' => {
                cursor.y += 1;
                i += 1;
            }
            'd' => {
                cursor.y -= 1;
                i += 1;
            }
            'l' => {
                cursor.x -= 1;
                i += 1;
            }
            ';' => {
                cursor.x = start_x;
                cursor.y += 1;
                i += 1;
            }
            '[' => {
                i += 1;
                let start = i;
                while chars.get(i).is_some_and(|c| *c != ']') {
                    i += 1;
                }
                if i >= chars.len() {
                    return Err(Error::MalformedBoardText("unclosed [".into()));
                }
                let mut class: Vec<char> = chars[start..i].to_vec();
                i += 1; // skip ']'
                let negated = class.first() == Some(&'^');
                if negated {
                    class.remove(0);
                }
                let spec = if negated {
                    SquareSpec::NegClass(class)
                } else {
                    SquareSpec::Class(class)
                };
                board.insert(cursor, spec);
                cursor.x += 1;
            }
            '%' => {
                board.insert(cursor, SquareSpec::Var);
                cursor.x += 1;
                i += 1;
            }
            other => {
                board.insert(cursor, SquareSpec::Literal(other));
                cursor.x += 1;
                i += 1;
            }
        }
    }

    Ok(origin.map_board(&board))
}

/// Finds the index of the first top-level `*` (not inside a `[...]` class), used
/// to split a movement prefix from the board body.
fn find_top_level_star(s: &str) -> Option<usize> {
    let mut in_class = false;
    for (i, c) in s.char_indices() {
        match c {
            '[' => in_class = true,
            ']' => in_class = false,
            '*' if !in_class => return Some(i),
            _ => {}
        }
    }
    None
}

fn split_movement_prefix(s: &str) -> Result<(Move, &str)> {
    match find_top_level_star(s) {
        Some(idx) => {
            let mv = parse_movement(s[..idx].trim())?;
            Ok((mv, &s[idx + 1..]))
        }
        None => Ok((Move::identity(), s)),
    }
}

/// Prints a board back to its canonical fragment text.
///
/// Rows are emitted bottom-to-top in increasing `y`, matching `;`'s "new row,
/// upward" semantics; empty squares inside the bounding box print as `r`, and
/// trailing `r`s (and fully-empty trailing rows) are trimmed.
pub fn print_board_fragment(board: &Board) -> String {
    let Some((min_x, min_y, max_x, max_y)) = board.bounds() else {
        return String::new();
    };

    let mut rows: Vec<String> = Vec::new();
    for y in min_y..=max_y {
        let mut row = String::new();
        for x in min_x..=max_x {
            match board.get(&Coord::new(x, y)) {
                None => row.push('r'),
                Some(spec) => row.push_str(&spec.print()),
            }
        }
        while row.ends_with('r') {
            row.pop();
        }
        rows.push(row);
    }
    while rows.last().is_some_and(String::is_empty) {
        rows.pop();
    }

    let body = rows.join(";");
    if min_x == 0 && min_y == 0 {
        body
    } else {
        format!("{}*{}", print_movement(&Move::translate(min_x, min_y)), body)
    }
}
