use ts_core::{Cell, PlaneView, ThresholdWindow};

/// Whether `cell` is a boundary cell for `window`.
///
/// Off-plane cells are never boundary cells, and neither are cells whose own
/// intensity lies outside the window. Otherwise the four cardinal neighbors
/// are checked in up, right, down, left order; the first neighbor that is off
/// the plane or outside the window makes the cell a boundary cell.
pub fn is_boundary(cell: Cell, window: ThresholdWindow, grid: &PlaneView<'_, f32>) -> bool {
    let Some(v) = grid.value(cell) else {
        return false;
    };
    if !window.contains(v) {
        return false;
    }

    for neighbor in cell.cardinal_neighbors() {
        match grid.value(neighbor) {
            None => return true,
            Some(nv) if !window.contains(nv) => return true,
            Some(_) => {}
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::is_boundary;
    use ts_core::{Cell, Plane, ThresholdWindow};

    fn plateau_10x10() -> Plane<f32> {
        let mut data = vec![0.0f32; 100];
        for r in 2..=7 {
            for c in 2..=7 {
                data[r * 10 + c] = 500.0;
            }
        }
        Plane::from_vec(10, 10, data).expect("valid plane")
    }

    #[test]
    fn perimeter_cells_are_boundary_interior_cells_are_not() {
        let grid = plateau_10x10();
        let w = ThresholdWindow::new(400.0, 600.0);

        assert!(is_boundary(Cell::new(2, 4), w, &grid.as_view()));
        assert!(is_boundary(Cell::new(7, 7), w, &grid.as_view()));
        assert!(!is_boundary(Cell::new(4, 4), w, &grid.as_view()));
    }

    #[test]
    fn cells_outside_the_window_are_not_boundary() {
        let grid = plateau_10x10();
        let w = ThresholdWindow::new(400.0, 600.0);

        assert!(!is_boundary(Cell::new(0, 0), w, &grid.as_view()));
        assert!(!is_boundary(Cell::new(2, 1), w, &grid.as_view()));
    }

    #[test]
    fn off_plane_cells_are_not_boundary() {
        let grid = plateau_10x10();
        let w = ThresholdWindow::new(0.0, 1000.0);

        assert!(!is_boundary(Cell::new(-1, 4), w, &grid.as_view()));
        assert!(!is_boundary(Cell::new(4, 10), w, &grid.as_view()));
    }

    #[test]
    fn plane_edge_counts_as_outside() {
        // Whole plane inside the window: only cells on the plane border are
        // boundary cells.
        let grid = Plane::new_fill(4, 4, 500.0f32);
        let w = ThresholdWindow::new(400.0, 600.0);

        assert!(is_boundary(Cell::new(0, 2), w, &grid.as_view()));
        assert!(!is_boundary(Cell::new(1, 1), w, &grid.as_view()));
    }
}
