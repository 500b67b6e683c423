//! Fill operations: drag-to-tile from a source rectangle, and the
//! double-click extend-down column fill.
//!
//! Tiling reproduces spreadsheet drag-fill semantics: the source block
//! repeats periodically (modulo its own dimensions) across the
//! destination rectangle, in both axes independently. A 1x1 source
//! repeats its single value.

use gridkit_core::{Bounds, Coord};

use crate::grid::Grid;

/// Fill-handle gesture state. Start on pointer-down over the handle,
/// end on pointer-up; the source rectangle is captured once at start
/// and pinned for the whole gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillDrag {
    Idle,
    Dragging { source: Bounds },
}

impl FillDrag {
    pub fn is_dragging(&self) -> bool {
        matches!(self, FillDrag::Dragging { .. })
    }
}

/// Tile the source block over the union of the source bounds and the
/// drag target, writing through the grid store.
///
/// Returns every destination cell touched, for transient highlight.
/// The union rule means a target inside the source rewrites exactly the
/// source rectangle (with its own values), never less.
pub fn tile_fill(grid: &mut Grid, source: Bounds, target: Coord) -> Vec<Coord> {
    let block = grid.block(source);
    let block_rows = block.len();
    let block_cols = block[0].len();

    let dest = source.union_with(target);
    let mut touched = Vec::with_capacity(dest.cell_count());

    for cell in dest.cells() {
        let dr = cell.row - dest.min_row;
        let dc = cell.col - dest.min_col;
        grid.set(cell.row, cell.col, &block[dr % block_rows][dc % block_cols]);
        touched.push(cell);
    }
    touched
}

/// Double-click fill: repeat the selected column segment cyclically
/// downward, stopping before the first pre-existing non-empty cell
/// below the segment, or at the grid end. Existing values are never
/// overwritten.
///
/// Operates on the left column of `source`; the captured pattern is
/// that column's values over the source rows.
pub fn extend_down(grid: &mut Grid, source: Bounds) -> Vec<Coord> {
    let col = source.min_col;
    let pattern: Vec<String> = (source.min_row..=source.max_row)
        .map(|r| grid.get(r, col))
        .collect();

    let mut touched = Vec::new();
    for (i, row) in (source.max_row + 1..grid.rows()).enumerate() {
        if !grid.is_empty_cell(row, col) {
            break;
        }
        grid.set(row, col, &pattern[i % pattern.len()]);
        touched.push(Coord::new(row, col));
    }
    touched
}
