use crate::prelude::*;

/// Finds every translation at which `pattern` matches `board`.
///
/// Chooses the most selective anchor entry in `pattern`, scans board entries that
/// satisfy it, and verifies the full pattern at each resulting offset.
pub fn find(pattern: &Board, board: &Board) -> Result<Vec<(i32, i32)>> {
    if pattern.is_empty() {
        return Err(Error::PatternShape("can't search for empty board".into()));
    }

    let anchor = pattern
        .iter()
        .filter_map(|(c, s)| s.anchor_priority().map(|p| (p, *c, s)))
        .min_by_key(|(p, _, _)| *p);

    let Some((_, anchor_coord, anchor_spec)) = anchor else {
        return Err(Error::PatternShape(
            "can't search without a positive anchor".into(),
        ));
    };

    let mut seen_offsets = std::collections::HashSet::new();
    let mut offsets = Vec::new();
    for (board_coord, board_spec) in board.iter() {
        let Some(content) = board_spec.as_literal_char() else {
            continue;
        };
        if !anchor_spec.accepts(Some(content)) {
            continue;
        }
        let offset = (board_coord.x - anchor_coord.x, board_coord.y - anchor_coord.y);
        if !seen_offsets.insert(offset) {
            continue;
        }
        if matches_at(pattern, board, offset) {
            offsets.push(offset);
        }
    }
    Ok(offsets)
}

fn matches_at(pattern: &Board, board: &Board, (dx, dy): (i32, i32)) -> bool {
    pattern.iter().all(|(coord, spec)| {
        let target = Coord::new(coord.x + dx, coord.y + dy);
        spec.accepts(board.content_at(&target))
    })
}

/// Builds the successor board: removes every key occupied by the translated
/// pattern, then writes the translated replacement.
pub fn replace(board: &Board, pattern: &Board, replacement: &Board, (dx, dy): (i32, i32)) -> Board {
    let mut result = board.clone();
    for (coord, _) in pattern.iter() {
        result.remove(&Coord::new(coord.x + dx, coord.y + dy));
    }
    for (coord, spec) in replacement.iter() {
        result.insert(Coord::new(coord.x + dx, coord.y + dy), spec.clone());
    }
    result
}
