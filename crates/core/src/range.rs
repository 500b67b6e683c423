use serde::{Deserialize, Serialize};

/// A single cell position (row-major, zero-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A rectangular range of cells given by two corners in arbitrary order.
///
/// The corners are kept as entered; `bounds()` normalizes on every read.
/// A drag that reverses direction just moves `end` past `start`, so the
/// normalized rectangle must never be cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Coord,
    pub end: Coord,
}

impl Range {
    pub fn new(start: Coord, end: Coord) -> Self {
        Self { start, end }
    }

    /// Create a single-cell range.
    pub fn single(row: usize, col: usize) -> Self {
        let coord = Coord::new(row, col);
        Self { start: coord, end: coord }
    }

    /// Normalize to axis-aligned bounds, independently per axis.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.start.row, self.start.col, self.end.row, self.end.col)
    }

    /// Check if this range contains a cell.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.bounds().contains(row, col)
    }

    /// Check if this is a single cell.
    pub fn is_single(&self) -> bool {
        self.start == self.end
    }
}

/// An axis-normalized rectangle, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl Bounds {
    /// Create bounds from two corners, automatically normalizing so min <= max.
    pub fn new(r1: usize, c1: usize, r2: usize, c2: usize) -> Self {
        Self {
            min_row: r1.min(r2),
            max_row: r1.max(r2),
            min_col: c1.min(c2),
            max_col: c1.max(c2),
        }
    }

    /// Bounds covering a single cell.
    pub fn single(row: usize, col: usize) -> Self {
        Self::new(row, col, row, col)
    }

    pub fn rows(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    pub fn cols(&self) -> usize {
        self.max_col - self.min_col + 1
    }

    /// Number of cells in this rectangle.
    pub fn cell_count(&self) -> usize {
        self.rows() * self.cols()
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.min_row && row <= self.max_row &&
        col >= self.min_col && col <= self.max_col
    }

    pub fn top_left(&self) -> Coord {
        Coord::new(self.min_row, self.min_col)
    }

    pub fn is_single(&self) -> bool {
        self.min_row == self.max_row && self.min_col == self.max_col
    }

    /// Iterate over all cells in this rectangle (row-major order).
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        let min_row = self.min_row;
        let max_row = self.max_row;
        let min_col = self.min_col;
        let max_col = self.max_col;

        (min_row..=max_row).flat_map(move |r| {
            (min_col..=max_col).map(move |c| Coord::new(r, c))
        })
    }

    /// Smallest rectangle covering both these bounds and `target`.
    ///
    /// This is the destination rectangle of a fill-handle drag: dragging
    /// above or left of the source is as valid as below or right, and a
    /// target inside the source leaves the rectangle unchanged.
    pub fn union_with(&self, target: Coord) -> Bounds {
        Bounds {
            min_row: self.min_row.min(target.row),
            max_row: self.max_row.max(target.row),
            min_col: self.min_col.min(target.col),
            max_col: self.max_col.max(target.col),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_single() {
        let b = Bounds::single(5, 3);
        assert!(b.contains(5, 3));
        assert!(!b.contains(5, 4));
        assert!(b.is_single());
        assert_eq!(b.cell_count(), 1);
    }

    #[test]
    fn test_bounds_multi() {
        let b = Bounds::new(1, 1, 3, 2);
        assert!(b.contains(1, 1));
        assert!(b.contains(2, 2));
        assert!(b.contains(3, 1));
        assert!(!b.contains(0, 0));
        assert!(!b.is_single());
        assert_eq!(b.cell_count(), 6); // 3 rows x 2 cols
    }

    #[test]
    fn test_bounds_normalizes() {
        let b = Bounds::new(5, 5, 1, 1);
        assert_eq!(b.min_row, 1);
        assert_eq!(b.min_col, 1);
        assert_eq!(b.max_row, 5);
        assert_eq!(b.max_col, 5);
    }

    #[test]
    fn test_bounds_order_independent() {
        // bounds(A, B) == bounds(B, A) for arbitrary corners
        let corners = [(0usize, 0usize), (4, 1), (2, 7), (9, 9)];
        for &(r1, c1) in &corners {
            for &(r2, c2) in &corners {
                assert_eq!(Bounds::new(r1, c1, r2, c2), Bounds::new(r2, c2, r1, c1));
            }
        }
    }

    #[test]
    fn test_range_normalization_not_cached() {
        let mut range = Range::single(3, 3);
        assert_eq!(range.bounds(), Bounds::single(3, 3));

        // Drag down-right, then reverse past the start
        range.end = Coord::new(6, 5);
        assert_eq!(range.bounds(), Bounds::new(3, 3, 6, 5));
        range.end = Coord::new(1, 0);
        assert_eq!(range.bounds(), Bounds::new(1, 0, 3, 3));
    }

    #[test]
    fn test_union_with_target() {
        let b = Bounds::new(2, 2, 3, 3);
        // Below/right extends
        assert_eq!(b.union_with(Coord::new(5, 6)), Bounds::new(2, 2, 5, 6));
        // Above/left extends
        assert_eq!(b.union_with(Coord::new(0, 1)), Bounds::new(0, 1, 3, 3));
        // Inside the source never shrinks the rectangle
        assert_eq!(b.union_with(Coord::new(2, 3)), b);
    }

    #[test]
    fn test_cells_row_major() {
        let b = Bounds::new(0, 0, 1, 1);
        let cells: Vec<Coord> = b.cells().collect();
        assert_eq!(
            cells,
            vec![
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(1, 0),
                Coord::new(1, 1),
            ]
        );
    }
}
