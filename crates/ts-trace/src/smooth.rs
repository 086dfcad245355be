use std::collections::HashSet;

use ts_core::{Cell, PlaneView, ThresholdWindow};

/// Grow `visited` with near-threshold neighbors of the loop.
///
/// For each loop cell's 8 neighbors: cells already visited, off the plane, or
/// strictly inside the window are left alone; a remaining neighbor joins the
/// visited set when its excursion outside the window is at most `tolerance`.
/// The loop itself is never extended, so containment tests against it are
/// unaffected while the fill barrier gains the cells that would otherwise let
/// the fill bleed through single-cell threshold gaps.
pub fn seal_visited(
    path: &[Cell],
    visited: &mut HashSet<Cell>,
    window: ThresholdWindow,
    grid: &PlaneView<'_, f32>,
    tolerance: f32,
) {
    let mut added = 0usize;
    for &cell in path {
        for neighbor in cell.ring_neighbors() {
            if visited.contains(&neighbor) {
                continue;
            }
            let Some(v) = grid.value(neighbor) else {
                continue;
            };
            if window.contains_strict(v) {
                continue;
            }
            if window.excursion(v) <= tolerance {
                visited.insert(neighbor);
                added += 1;
            }
        }
    }

    if added > 0 {
        tracing::debug!(added, "sealed near-threshold cells into the barrier");
    }
}

#[cfg(test)]
mod tests {
    use super::seal_visited;
    use std::collections::HashSet;
    use ts_core::{Cell, Plane, ThresholdWindow};

    #[test]
    fn near_threshold_neighbors_join_visited_far_ones_do_not() {
        // Column 0..4 of one row: 0, 350, 450, 500, 500 with window 400..600.
        // 350 misses the window by 50 (sealed), 0 misses by 400 (not sealed).
        let mut data = vec![0.0f32; 15];
        data[5..10].copy_from_slice(&[0.0, 350.0, 450.0, 500.0, 500.0]);
        let grid = Plane::from_vec(3, 5, data).expect("valid plane");
        let w = ThresholdWindow::new(400.0, 600.0);

        let path = vec![Cell::new(1, 2)];
        let mut visited: HashSet<Cell> = path.iter().copied().collect();
        seal_visited(&path, &mut visited, w, &grid.as_view(), 125.0);

        assert!(visited.contains(&Cell::new(1, 1)));
        assert!(!visited.contains(&Cell::new(1, 0)));
        assert!(!visited.contains(&Cell::new(0, 2)));
    }

    #[test]
    fn strictly_interior_neighbors_are_left_alone() {
        let grid = Plane::new_fill(3, 3, 500.0f32);
        let w = ThresholdWindow::new(400.0, 600.0);

        let path = vec![Cell::new(1, 1)];
        let mut visited: HashSet<Cell> = path.iter().copied().collect();
        seal_visited(&path, &mut visited, w, &grid.as_view(), 125.0);

        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn band_edge_values_count_as_sealable() {
        // A neighbor sitting exactly on the bound has zero excursion and is
        // sealed rather than treated as interior.
        let mut grid = Plane::new_fill(1, 3, 500.0f32);
        grid.data_mut()[0] = 400.0;
        let w = ThresholdWindow::new(400.0, 600.0);

        let path = vec![Cell::new(0, 1)];
        let mut visited: HashSet<Cell> = path.iter().copied().collect();
        seal_visited(&path, &mut visited, w, &grid.as_view(), 125.0);

        assert!(visited.contains(&Cell::new(0, 0)));
    }
}
