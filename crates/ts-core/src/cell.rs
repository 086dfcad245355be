/// The four 4-connected neighbor offsets in fixed up, right, down, left order.
pub const CARDINAL_OFFSETS: [(i32, i32); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// The eight 8-connected neighbor offsets in clockwise order starting at
/// `(0, +1)`. Tracing scans neighbors in exactly this order.
pub const RING_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// A signed grid coordinate. Values outside a plane are representable; plane
/// accessors report them as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub r: i32,
    pub c: i32,
}

impl Cell {
    pub fn new(r: i32, c: i32) -> Self {
        Self { r, c }
    }

    pub fn offset(self, dr: i32, dc: i32) -> Self {
        Self {
            r: self.r + dr,
            c: self.c + dc,
        }
    }

    pub fn cardinal_neighbors(self) -> [Cell; 4] {
        CARDINAL_OFFSETS.map(|(dr, dc)| self.offset(dr, dc))
    }

    pub fn ring_neighbors(self) -> [Cell; 8] {
        RING_OFFSETS.map(|(dr, dc)| self.offset(dr, dc))
    }
}

/// Inclusive axis-aligned bounding box over cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub min_r: i32,
    pub max_r: i32,
    pub min_c: i32,
    pub max_c: i32,
}

impl CellRect {
    /// Bounding box of a non-empty cell slice.
    pub fn of(cells: &[Cell]) -> Option<Self> {
        let first = cells.first()?;
        let mut rect = Self {
            min_r: first.r,
            max_r: first.r,
            min_c: first.c,
            max_c: first.c,
        };
        for cell in &cells[1..] {
            rect.min_r = rect.min_r.min(cell.r);
            rect.max_r = rect.max_r.max(cell.r);
            rect.min_c = rect.min_c.min(cell.c);
            rect.max_c = rect.max_c.max(cell.c);
        }
        Some(rect)
    }

    /// Closed-interval membership on both axes.
    pub fn contains(self, cell: Cell) -> bool {
        cell.r >= self.min_r && cell.r <= self.max_r && cell.c >= self.min_c && cell.c <= self.max_c
    }

    /// Open-interval membership: a cell on the box edge is excluded.
    pub fn encloses(self, cell: Cell) -> bool {
        cell.r > self.min_r && cell.r < self.max_r && cell.c > self.min_c && cell.c < self.max_c
    }

    /// Extent product `(max_r - min_r) * (max_c - min_c)`, a box-size proxy
    /// rather than a cell count or polygon area.
    pub fn extent_area(self) -> i64 {
        i64::from(self.max_r - self.min_r) * i64::from(self.max_c - self.min_c)
    }
}

#[cfg(test)]
mod tests {
    use super::{Cell, CellRect};

    #[test]
    fn rect_of_cells_and_membership() {
        let cells = [Cell::new(2, 3), Cell::new(5, 1), Cell::new(4, 7)];
        let rect = CellRect::of(&cells).expect("non-empty input");

        assert_eq!(
            rect,
            CellRect {
                min_r: 2,
                max_r: 5,
                min_c: 1,
                max_c: 7,
            }
        );
        assert!(rect.contains(Cell::new(2, 1)));
        assert!(!rect.contains(Cell::new(6, 4)));
        assert!(rect.encloses(Cell::new(3, 4)));
        assert!(!rect.encloses(Cell::new(2, 4)));
        assert_eq!(rect.extent_area(), 18);
    }

    #[test]
    fn rect_of_empty_is_none() {
        assert!(CellRect::of(&[]).is_none());
    }

    #[test]
    fn ring_neighbors_start_east_and_go_clockwise() {
        let n = Cell::new(0, 0).ring_neighbors();
        assert_eq!(n[0], Cell::new(0, 1));
        assert_eq!(n[1], Cell::new(1, 1));
        assert_eq!(n[6], Cell::new(-1, 0));
    }
}
