use std::collections::HashSet;

use ts_core::{Cell, PlaneView, ThresholdWindow, RING_OFFSETS};

use crate::is_boundary;

/// One trace attempt: the closed loop (when found), every cell the walk
/// touched, and how many dead ends forced a backtrack.
///
/// A failed attempt is the sentinel `(empty path, empty visited, -1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceOutcome {
    pub path: Vec<Cell>,
    pub visited: HashSet<Cell>,
    pub dead_ends: i32,
}

impl TraceOutcome {
    pub fn failed() -> Self {
        Self {
            path: Vec::new(),
            visited: HashSet::new(),
            dead_ends: -1,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.dead_ends < 0
    }

    /// The cell the walk started from.
    pub fn seed(&self) -> Option<Cell> {
        self.path.first().copied()
    }
}

/// Walk boundary cells 8-connectedly from `seed` until the walk closes back
/// on the seed.
///
/// Neighbors of the current cell are scanned in clockwise order starting at
/// `(0, +1)`. A neighbor equal to the seed closes the loop once the path
/// holds more than one cell. Otherwise the first unvisited boundary neighbor
/// is appended and becomes current. With no qualifying neighbor the tail cell
/// is popped from the path (it stays visited) and the walk resumes one cell
/// back; popping the last cell means no loop exists from this seed.
pub fn trace_loop(
    seed: Cell,
    window: ThresholdWindow,
    grid: &PlaneView<'_, f32>,
) -> TraceOutcome {
    let mut path = vec![seed];
    let mut visited = HashSet::from([seed]);
    let mut dead_ends = 0i32;
    let mut current = seed;

    // Every iteration either grows the visited set or shrinks the path, so
    // twice the plane area bounds the walk.
    let max_steps = 2 * grid.rows() * grid.cols() + 2;

    for _ in 0..max_steps {
        let mut advanced = false;
        for (dr, dc) in RING_OFFSETS {
            let neighbor = current.offset(dr, dc);
            if neighbor == seed && path.len() > 1 {
                return TraceOutcome {
                    path,
                    visited,
                    dead_ends,
                };
            }
            if is_boundary(neighbor, window, grid) && !visited.contains(&neighbor) {
                visited.insert(neighbor);
                path.push(neighbor);
                current = neighbor;
                advanced = true;
                break;
            }
        }

        if advanced {
            continue;
        }

        dead_ends += 1;
        tracing::trace!(?current, dead_ends, "dead end, backtracking");
        path.pop();
        match path.last() {
            Some(&tail) => current = tail,
            None => return TraceOutcome::failed(),
        }
    }

    tracing::warn!(?seed, max_steps, "trace exceeded step bound");
    TraceOutcome::failed()
}
