use core::fmt;
use std::collections::{HashSet, VecDeque};

use ts_core::{Cell, CellRect, PlaneView};

/// The exact writes one fill pass would perform. `writes` is every cell that
/// receives the target label (in fill order); `changed` is the subset whose
/// label differs beforehand, which is what the pixel budget meters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FillPlan {
    pub writes: Vec<Cell>,
    pub changed: Vec<Cell>,
}

impl FillPlan {
    pub fn newly_labeled(&self) -> usize {
        self.changed.len()
    }
}

/// The fill front reached a cell outside the loop's bounding box. The loop
/// did not actually enclose the start cell; nothing may be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Escape {
    pub cell: Cell,
    pub bounds: CellRect,
}

impl fmt::Display for Escape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fill escaped containment at ({}, {}), bounds rows {}..={} cols {}..={}",
            self.cell.r,
            self.cell.c,
            self.bounds.min_r,
            self.bounds.max_r,
            self.bounds.min_c,
            self.bounds.max_c
        )
    }
}

impl std::error::Error for Escape {}

/// Plan a breadth-first fill of the loop interior from `start`.
///
/// The walk is FIFO over 4-connected neighbors and consults `labels` read
/// only; planned writes overlay the view so revisits observe the would-be
/// state. Skip rules per popped cell, in order: off the plane; carrying a
/// nonzero label when `paint_over` is off; carrying the target label when
/// `paint_over` is on and the cell was already considered this session (each
/// cell is reconsidered exactly once, which is what lets repeated clicks grow
/// a region without looping); on the `barrier`. A cell outside `bounds` is a
/// containment escape and fails the whole plan.
///
/// Once more than `budget` cells have changed, nothing further is enqueued;
/// cells already queued still drain, so the final change count can exceed the
/// budget by at most the queue length at cutoff.
pub fn plan_fill(
    start: Cell,
    barrier: &HashSet<Cell>,
    bounds: CellRect,
    budget: usize,
    labels: &PlaneView<'_, i32>,
    target: i32,
    paint_over: bool,
) -> Result<FillPlan, Escape> {
    let cols = labels.cols();
    let n = labels.rows() * cols;
    let mut considered = vec![false; n];
    let mut planned = vec![false; n];
    let mut plan = FillPlan::default();

    let mut queue = VecDeque::new();
    queue.push_back(start);
    let mut enqueue_open = true;

    while let Some(cell) = queue.pop_front() {
        if !labels.in_bounds(cell) {
            continue;
        }
        let idx = cell.r as usize * cols + cell.c as usize;

        let effective = if planned[idx] {
            target
        } else {
            *labels.get(cell).expect("bounds checked above")
        };

        if !paint_over && effective != 0 {
            continue;
        }
        if paint_over && effective == target {
            if considered[idx] {
                continue;
            }
            considered[idx] = true;
        }
        if barrier.contains(&cell) {
            continue;
        }
        if !bounds.contains(cell) {
            tracing::warn!(?cell, ?bounds, "fill front left the loop bounding box");
            return Err(Escape { cell, bounds });
        }

        if !planned[idx] {
            planned[idx] = true;
            plan.writes.push(cell);
            if effective != target {
                plan.changed.push(cell);
            }
        }

        if enqueue_open && plan.changed.len() > budget {
            tracing::debug!(
                changed = plan.changed.len(),
                budget,
                queued = queue.len(),
                "pixel budget exceeded, draining queue without growing it"
            );
            enqueue_open = false;
        }
        if enqueue_open {
            queue.push_back(cell.offset(-1, 0));
            queue.push_back(cell.offset(1, 0));
            queue.push_back(cell.offset(0, -1));
            queue.push_back(cell.offset(0, 1));
        }
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::plan_fill;
    use std::collections::HashSet;
    use ts_core::{Cell, CellRect, Plane};

    fn ring(top: i32, left: i32, bottom: i32, right: i32) -> Vec<Cell> {
        let mut cells = Vec::new();
        for c in left..=right {
            cells.push(Cell::new(top, c));
        }
        for r in (top + 1)..=bottom {
            cells.push(Cell::new(r, right));
        }
        for c in (left..right).rev() {
            cells.push(Cell::new(bottom, c));
        }
        for r in ((top + 1)..bottom).rev() {
            cells.push(Cell::new(r, left));
        }
        cells
    }

    fn barrier_of(cells: &[Cell]) -> HashSet<Cell> {
        cells.iter().copied().collect()
    }

    #[test]
    fn fills_ring_interior_and_nothing_else() {
        let labels = Plane::new_fill(10, 10, 0i32);
        let loop_cells = ring(2, 2, 7, 7);
        let bounds = CellRect::of(&loop_cells).expect("non-empty");

        let plan = plan_fill(
            Cell::new(4, 4),
            &barrier_of(&loop_cells),
            bounds,
            2500,
            &labels.as_view(),
            3,
            true,
        )
        .expect("contained fill");

        assert_eq!(plan.newly_labeled(), 16);
        for cell in &plan.writes {
            assert!(cell.r >= 3 && cell.r <= 6 && cell.c >= 3 && cell.c <= 6);
            assert!(!barrier_of(&loop_cells).contains(cell));
        }
    }

    #[test]
    fn budget_cutoff_is_soft_but_bounded() {
        let labels = Plane::new_fill(10, 10, 0i32);
        let loop_cells = ring(2, 2, 7, 7);
        let bounds = CellRect::of(&loop_cells).expect("non-empty");

        let plan = plan_fill(
            Cell::new(4, 4),
            &barrier_of(&loop_cells),
            bounds,
            5,
            &labels.as_view(),
            3,
            true,
        )
        .expect("contained fill");

        assert!(plan.newly_labeled() > 5);
        assert!(plan.newly_labeled() <= 16);
    }

    #[test]
    fn gap_in_barrier_escapes_and_plans_nothing_observable() {
        // Remove two adjacent wall cells; the front leaks through and leaves
        // the bounding box.
        let labels = Plane::new_fill(10, 10, 0i32);
        let mut loop_cells = ring(2, 2, 7, 7);
        loop_cells.retain(|c| *c != Cell::new(4, 7) && *c != Cell::new(5, 7));
        let bounds = CellRect {
            min_r: 2,
            max_r: 7,
            min_c: 2,
            max_c: 7,
        };

        let err = plan_fill(
            Cell::new(4, 4),
            &barrier_of(&loop_cells),
            bounds,
            2500,
            &labels.as_view(),
            3,
            true,
        )
        .expect_err("front must escape");
        assert!(!bounds.contains(err.cell));
    }

    #[test]
    fn start_outside_bounds_escapes_immediately() {
        let labels = Plane::new_fill(10, 10, 0i32);
        let loop_cells = ring(2, 2, 7, 7);
        let bounds = CellRect::of(&loop_cells).expect("non-empty");

        let err = plan_fill(
            Cell::new(8, 6),
            &barrier_of(&loop_cells),
            bounds,
            2500,
            &labels.as_view(),
            3,
            true,
        )
        .expect_err("start is outside the box");
        assert_eq!(err.cell, Cell::new(8, 6));
    }

    #[test]
    fn refill_of_fully_labeled_interior_changes_nothing() {
        let mut labels = Plane::new_fill(10, 10, 0i32);
        for r in 3..=6 {
            for c in 3..=6 {
                *labels
                    .as_view_mut()
                    .get_mut(Cell::new(r, c))
                    .expect("in bounds") = 3;
            }
        }
        let loop_cells = ring(2, 2, 7, 7);
        let bounds = CellRect::of(&loop_cells).expect("non-empty");

        let plan = plan_fill(
            Cell::new(4, 4),
            &barrier_of(&loop_cells),
            bounds,
            2500,
            &labels.as_view(),
            3,
            true,
        )
        .expect("contained fill");

        assert_eq!(plan.newly_labeled(), 0);
        assert_eq!(plan.writes.len(), 16);
    }

    #[test]
    fn paint_over_off_leaves_foreign_labels_alone() {
        let mut labels = Plane::new_fill(10, 10, 0i32);
        *labels
            .as_view_mut()
            .get_mut(Cell::new(4, 5))
            .expect("in bounds") = 9;
        let loop_cells = ring(2, 2, 7, 7);
        let bounds = CellRect::of(&loop_cells).expect("non-empty");

        let plan = plan_fill(
            Cell::new(4, 4),
            &barrier_of(&loop_cells),
            bounds,
            2500,
            &labels.as_view(),
            3,
            false,
        )
        .expect("contained fill");

        assert!(!plan.writes.contains(&Cell::new(4, 5)));
        assert_eq!(plan.newly_labeled(), 15);
    }
}
