use ts_core::{Error, PlaneStack, PlaneView, PlaneViewMut};

/// Narrow host contract for multi-plane propagation.
///
/// The host owns the plane stack and navigation state; the session core only
/// asks for the current plane's views, single steps between adjacent planes,
/// a cancellation poll (read once per plane step, never mid-pass), and a
/// modified notification (sent once per committed pass).
pub trait SliceHost {
    fn plane_index(&self) -> usize;

    /// Intensity and label views of the current plane.
    fn planes(&mut self) -> (PlaneView<'_, f32>, PlaneViewMut<'_, i32>);

    /// Step one plane in `dir` (`+1` or `-1`). Returns false when there is no
    /// adjacent plane in that direction and the index is unchanged.
    fn move_adjacent(&mut self, dir: i32) -> bool;

    /// Whether the user asked to stop. Polled once per plane step.
    fn cancel_requested(&mut self) -> bool;

    /// A pass on `plane` was committed.
    fn plane_modified(&mut self, plane: usize);
}

/// In-memory [`SliceHost`] over a pair of plane stacks. Used by tests and the
/// CLI; records navigation and notifications so sweeps can be inspected.
#[derive(Debug)]
pub struct StackHost {
    grid: PlaneStack<f32>,
    labels: PlaneStack<i32>,
    index: usize,
    cancel_after_passes: Option<usize>,
    moves: Vec<i32>,
    notified: Vec<usize>,
}

impl StackHost {
    pub fn new(
        grid: PlaneStack<f32>,
        labels: PlaneStack<i32>,
        start_plane: usize,
    ) -> Result<Self, Error> {
        if grid.planes() != labels.planes()
            || grid.rows() != labels.rows()
            || grid.cols() != labels.cols()
        {
            return Err(Error::SizeMismatch {
                expected: grid.planes() * grid.rows() * grid.cols(),
                actual: labels.planes() * labels.rows() * labels.cols(),
            });
        }
        if start_plane >= grid.planes() {
            return Err(Error::OutOfBounds);
        }

        Ok(Self {
            grid,
            labels,
            index: start_plane,
            cancel_after_passes: None,
            moves: Vec::new(),
            notified: Vec::new(),
        })
    }

    /// Report cancellation once `n` passes have been committed.
    pub fn cancel_after_passes(&mut self, n: usize) {
        self.cancel_after_passes = Some(n);
    }

    pub fn labels(&self) -> &PlaneStack<i32> {
        &self.labels
    }

    pub fn into_labels(self) -> PlaneStack<i32> {
        self.labels
    }

    /// Every `move_adjacent` direction that succeeded, in order (reverts
    /// included).
    pub fn moves(&self) -> &[i32] {
        &self.moves
    }

    /// Plane indices for which a committed pass was announced.
    pub fn notified(&self) -> &[usize] {
        &self.notified
    }
}

impl SliceHost for StackHost {
    fn plane_index(&self) -> usize {
        self.index
    }

    fn planes(&mut self) -> (PlaneView<'_, f32>, PlaneViewMut<'_, i32>) {
        let grid = self
            .grid
            .plane_view(self.index)
            .expect("index stays within the stack");
        let labels = self
            .labels
            .plane_view_mut(self.index)
            .expect("index stays within the stack");
        (grid, labels)
    }

    fn move_adjacent(&mut self, dir: i32) -> bool {
        let next = self.index as i64 + i64::from(dir);
        if next < 0 || next >= self.grid.planes() as i64 {
            return false;
        }
        self.index = next as usize;
        self.moves.push(dir);
        true
    }

    fn cancel_requested(&mut self) -> bool {
        self.cancel_after_passes
            .is_some_and(|n| self.notified.len() >= n)
    }

    fn plane_modified(&mut self, plane: usize) {
        self.notified.push(plane);
    }
}

#[cfg(test)]
mod tests {
    use super::{SliceHost, StackHost};
    use ts_core::{Cell, PlaneStack};

    #[test]
    fn navigation_is_clamped_to_the_stack() {
        let grid = PlaneStack::new_fill(2, 2, 2, 0.0f32);
        let labels = PlaneStack::new_fill(2, 2, 2, 0i32);
        let mut host = StackHost::new(grid, labels, 0).expect("shapes match");

        assert!(!host.move_adjacent(-1));
        assert_eq!(host.plane_index(), 0);
        assert!(host.move_adjacent(1));
        assert_eq!(host.plane_index(), 1);
        assert!(!host.move_adjacent(1));
        assert_eq!(host.moves(), &[1]);
    }

    #[test]
    fn plane_views_track_the_current_index() {
        let grid = PlaneStack::new_fill(2, 1, 1, 0.0f32);
        let labels = PlaneStack::from_vec(2, 1, 1, vec![7, 8]).expect("valid stack");
        let mut host = StackHost::new(grid, labels, 0).expect("shapes match");

        let (_, l) = host.planes();
        assert_eq!(l.value(Cell::new(0, 0)), Some(7));
        host.move_adjacent(1);
        let (_, l) = host.planes();
        assert_eq!(l.value(Cell::new(0, 0)), Some(8));
    }

    #[test]
    fn mismatched_stacks_are_rejected() {
        let grid = PlaneStack::new_fill(2, 2, 2, 0.0f32);
        let labels = PlaneStack::new_fill(2, 2, 3, 0i32);
        assert!(StackHost::new(grid, labels, 0).is_err());
    }
}
