use ts_core::{Cell, PlaneView, ThresholdWindow, CARDINAL_OFFSETS};

use crate::is_boundary;

/// Radially scan from `origin` for boundary cells to start traces from.
///
/// Each cardinal direction contributes the first boundary cell within
/// `max_dist` steps, if any. When the origin itself lies outside the window
/// (or off the plane), each direction that found a boundary cell keeps
/// scanning the same ray for a second one, so both the entry and exit
/// crossings of a band are covered. Duplicates are kept; callers see
/// candidates in direction-major order.
pub fn find_seeds(
    origin: Cell,
    max_dist: i32,
    window: ThresholdWindow,
    grid: &PlaneView<'_, f32>,
) -> Vec<Cell> {
    let origin_outside = !grid.value(origin).is_some_and(|v| window.contains(v));

    let mut seeds = Vec::with_capacity(8);
    for (dr, dc) in CARDINAL_OFFSETS {
        let mut first_hit = None;
        for i in 1..=max_dist {
            let cell = origin.offset(i * dr, i * dc);
            if is_boundary(cell, window, grid) {
                first_hit = Some(i);
                seeds.push(cell);
                break;
            }
        }

        if !origin_outside {
            continue;
        }
        let Some(first) = first_hit else {
            continue;
        };
        for i in (first + 1)..=max_dist {
            let cell = origin.offset(i * dr, i * dc);
            if is_boundary(cell, window, grid) {
                seeds.push(cell);
                break;
            }
        }
    }

    seeds
}

#[cfg(test)]
mod tests {
    use super::find_seeds;
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
    fn in_band_origin_yields_one_seed_per_direction() {
        let grid = plateau_10x10();
        let w = ThresholdWindow::new(400.0, 600.0);

        let seeds = find_seeds(Cell::new(4, 4), 200, w, &grid.as_view());
        assert_eq!(
            seeds,
            vec![
                Cell::new(2, 4),
                Cell::new(4, 7),
                Cell::new(7, 4),
                Cell::new(4, 2),
            ]
        );
    }

    #[test]
    fn out_of_band_origin_finds_entry_and_exit_crossings() {
        // Origin left of the block in the same row: the rightward ray crosses
        // the band twice, every other ray misses.
        let grid = plateau_10x10();
        let w = ThresholdWindow::new(400.0, 600.0);

        let seeds = find_seeds(Cell::new(4, 0), 200, w, &grid.as_view());
        assert_eq!(seeds, vec![Cell::new(4, 2), Cell::new(4, 7)]);
    }

    #[test]
    fn window_excluding_everything_yields_no_seeds() {
        let grid = plateau_10x10();
        let w = ThresholdWindow::new(1000.0, 2000.0);

        assert!(find_seeds(Cell::new(4, 4), 200, w, &grid.as_view()).is_empty());
    }

    #[test]
    fn search_radius_limits_the_scan() {
        let grid = plateau_10x10();
        let w = ThresholdWindow::new(400.0, 600.0);

        let seeds = find_seeds(Cell::new(4, 4), 2, w, &grid.as_view());
        assert_eq!(seeds, vec![Cell::new(2, 4), Cell::new(4, 2)]);
    }
}
