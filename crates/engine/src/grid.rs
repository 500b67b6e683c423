//! The grid store: a rectangular extent over a sparse cell map.
//!
//! Cells hold plain strings. Reads outside the extent (or of unset
//! cells) return the empty string; writes outside the extent are
//! dropped. `set` is the sole mutation primitive — every higher-level
//! operation (fill, cut, paste) goes through it.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use gridkit_core::Bounds;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    cells: FxHashMap<(usize, usize), String>,
    rows: usize,
    cols: usize,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: FxHashMap::default(),
            rows,
            cols,
        }
    }

    /// Build a grid from dense row-major data. The column extent is the
    /// first row's width; every row is expected to have the same width.
    pub fn from_rows(data: Vec<Vec<String>>) -> Self {
        let rows = data.len();
        let cols = data.first().map_or(0, |r| r.len());
        let mut grid = Self::new(rows, cols);
        for (r, row) in data.into_iter().enumerate() {
            for (c, value) in row.into_iter().enumerate() {
                grid.set(r, c, &value);
            }
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Value at a cell. Empty string for unset or out-of-extent cells.
    pub fn get(&self, row: usize, col: usize) -> String {
        self.cells
            .get(&(row, col))
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_empty_cell(&self, row: usize, col: usize) -> bool {
        !self.cells.contains_key(&(row, col))
    }

    /// Replace the value at a cell. Writes outside the current extent
    /// are dropped, not errors. Writing the empty string unsets the cell.
    pub fn set(&mut self, row: usize, col: usize, value: &str) {
        if !self.in_bounds(row, col) {
            log::debug!("dropping write outside grid extent at ({}, {})", row, col);
            return;
        }
        if value.is_empty() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), value.to_string());
        }
    }

    /// Grow the grid by appending empty rows until at least `count` rows
    /// exist. Never shrinks.
    pub fn ensure_rows(&mut self, count: usize) {
        if count > self.rows {
            self.rows = count;
        }
    }

    /// Read a rectangular block of values (row-major).
    pub fn block(&self, bounds: Bounds) -> Vec<Vec<String>> {
        (bounds.min_row..=bounds.max_row)
            .map(|r| {
                (bounds.min_col..=bounds.max_col)
                    .map(|c| self.get(r, c))
                    .collect()
            })
            .collect()
    }

    /// Dense row-major snapshot for the rendering layer.
    pub fn snapshot(&self) -> Vec<Vec<String>> {
        (0..self.rows)
            .map(|r| (0..self.cols).map(|c| self.get(r, c)).collect())
            .collect()
    }
}
