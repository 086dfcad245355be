use ts_core::Cell;

/// Four-ray parity test for "is `cell` inside the loop".
///
/// Counts loop cells strictly left of, right of, above, and below the cell on
/// its own row/column; the cell is treated as interior when any count is odd.
/// Loop cells themselves are never interior.
///
/// An axis-parallel run of loop cells crosses one of these rays once per
/// cell, so a flat wall section can flip the parity and misclassify an
/// exterior cell as interior. Fill passes guard against that with a
/// bounding-box escape check instead of trusting this test.
// TODO: collapse contiguous boundary runs so an axis-parallel wall counts as
// a single crossing on all four rays.
pub fn encloses(cell: Cell, loop_cells: &[Cell]) -> bool {
    if loop_cells.contains(&cell) {
        return false;
    }

    let left = loop_cells
        .iter()
        .filter(|p| p.r == cell.r && p.c < cell.c)
        .count();
    if left % 2 == 1 {
        return true;
    }
    let right = loop_cells
        .iter()
        .filter(|p| p.r == cell.r && p.c > cell.c)
        .count();
    if right % 2 == 1 {
        return true;
    }
    let above = loop_cells
        .iter()
        .filter(|p| p.c == cell.c && p.r < cell.r)
        .count();
    if above % 2 == 1 {
        return true;
    }
    let below = loop_cells
        .iter()
        .filter(|p| p.c == cell.c && p.r > cell.r)
        .count();
    below % 2 == 1
}

/// First 4-neighbor of the loop's first cell that the parity test accepts,
/// probed right, down, left, up.
pub fn interior_start(loop_cells: &[Cell]) -> Option<Cell> {
    let first = loop_cells.first()?;
    for (dr, dc) in [(0, 1), (1, 0), (0, -1), (-1, 0)] {
        let probe = first.offset(dr, dc);
        if encloses(probe, loop_cells) {
            return Some(probe);
        }
    }
    None
}
