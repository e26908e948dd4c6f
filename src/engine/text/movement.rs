//! Parsing and printing for the `<movement>` prefix of board-fragment text
//! e.g. `r^3u^2*...` or `2*...`.

use crate::prelude::*;

/// Parses a movement-prefix string (the part before `*`) into a `Move`.
///
/// Atoms are `u`/`d`/`l`/`r` (unit translations) or a digit `0`-`3` (a rotation
/// count), each optionally followed by a `^<n>` exponent meaning "repeat this atom
/// `n` times".
pub fn parse_movement(s: &str) -> Result<Move> {
    let chars: Vec<char> = s.chars().collect();
    let mut atoms = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let atom = match c {
            'u' => MoveAtom::Translate(0, 1),
            'd' => MoveAtom::Translate(0, -1),
            'l' => MoveAtom::Translate(-1, 0),
            'r' => MoveAtom::Translate(1, 0),
            '0'..='3' => MoveAtom::Rotate(c.to_digit(10).unwrap() as u8),
            _ => {
                return Err(Error::MalformedBoardText(format!(
                    "unknown movement prefix atom '{c}'"
                )))
            }
        };
        i += 1;

        let mut count: u32 = 1;
        if chars.get(i) == Some(&'^') {
            i += 1;
            let start = i;
            while chars.get(i).is_some_and(|d| d.is_ascii_digit()) {
                i += 1;
            }
            if i == start {
                return Err(Error::MalformedBoardText("ill-formed move exponent".into()));
            }
            let digits: String = chars[start..i].iter().collect();
            count = digits
                .parse()
                .map_err(|_| Error::MalformedBoardText("ill-formed move exponent".into()))?;
        }

        for _ in 0..count {
            atoms.push(atom);
        }
    }
    Ok(Move::from_atoms(atoms))
}

/// Prints a `Move` as a movement prefix (without the trailing `*`).
pub fn print_movement(mv: &Move) -> String {
    let mut out = String::new();
    for atom in mv.atoms() {
        out.push_str(&print_atom(atom));
    }
    out
}

fn print_atom(atom: &MoveAtom) -> String {
    match atom {
        MoveAtom::Translate(dx, dy) => {
            let mut s = String::new();
            s.push_str(&print_signed_step('r', 'l', *dx));
            s.push_str(&print_signed_step('u', 'd', *dy));
            s
        }
        MoveAtom::Rotate(n) => n.to_string(),
    }
}

fn print_signed_step(positive: char, negative: char, n: i32) -> String {
    if n == 0 {
        String::new()
    } else if n > 0 {
        with_exponent(positive, n as u32)
    } else {
        with_exponent(negative, (-n) as u32)
    }
}

fn with_exponent(c: char, count: u32) -> String {
    if count == 1 {
        c.to_string()
    } else {
        format!("{c}^{count}")
    }
}
