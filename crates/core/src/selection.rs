use serde::{Deserialize, Serialize};

use crate::range::{Bounds, Coord, Range};

/// The selection model: mutually exclusive modes.
///
/// The enum representation makes the exclusivity invariant structural —
/// entering one mode necessarily clears the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    None,
    Cell(Coord),
    Row(usize),
    Column(usize),
    Range(Range),
}

impl Selection {
    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    /// The rectangle a block operation (fill, cut, copy) works from.
    /// A selected cell counts as a 1x1 range; row/column/no selection
    /// have no block source.
    pub fn source_bounds(&self) -> Option<Bounds> {
        match self {
            Selection::Cell(coord) => Some(Bounds::single(coord.row, coord.col)),
            Selection::Range(range) => Some(range.bounds()),
            _ => None,
        }
    }

    /// The destination anchor for paste: the selected cell, or the
    /// top-left corner of the selected range.
    pub fn paste_origin(&self) -> Option<Coord> {
        self.source_bounds().map(|b| b.top_left())
    }

    /// Check if a cell is inside the selection (for highlighting).
    pub fn contains(&self, row: usize, col: usize) -> bool {
        match self {
            Selection::None => false,
            Selection::Cell(coord) => coord.row == row && coord.col == col,
            Selection::Row(r) => *r == row,
            Selection::Column(c) => *c == col,
            Selection::Range(range) => range.contains(row, col),
        }
    }
}

/// Pointer-drag gesture phase. One entry point (pointer-down) and one
/// exit point (pointer-up) per gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    Idle,
    Dragging,
}

/// Translates pointer and header-click events into selection updates.
///
/// During a drag only the range's `end` corner moves; `start` is pinned
/// for the whole gesture. After pointer-up the range selection persists
/// but further moves are ignored until the next pointer-down.
#[derive(Debug, Clone)]
pub struct SelectionTracker {
    selection: Selection,
    gesture: Gesture,
    /// When set, column 0 is a reserved row-number column: header clicks
    /// on it select nothing.
    sentinel_column: bool,
}

impl SelectionTracker {
    pub fn new(sentinel_column: bool) -> Self {
        Self {
            selection: Selection::None,
            gesture: Gesture::Idle,
            sentinel_column,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture == Gesture::Dragging
    }

    pub fn clear(&mut self) {
        self.selection = Selection::None;
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    /// Plain click on a cell.
    pub fn click_cell(&mut self, row: usize, col: usize) {
        self.selection = Selection::Cell(Coord::new(row, col));
    }

    /// Click on a column header. No-op on the sentinel column.
    pub fn click_column_header(&mut self, col: usize) {
        if self.sentinel_column && col == 0 {
            return;
        }
        self.selection = Selection::Column(col);
    }

    /// Click on a row header.
    pub fn click_row_header(&mut self, row: usize) {
        self.selection = Selection::Row(row);
    }

    /// Pointer-down on a cell starts a range-selection drag anchored there.
    pub fn pointer_down(&mut self, row: usize, col: usize) {
        self.selection = Selection::Range(Range::single(row, col));
        self.gesture = Gesture::Dragging;
    }

    /// Pointer-move extends the range's end corner while a drag is active;
    /// otherwise a no-op.
    pub fn pointer_move(&mut self, row: usize, col: usize) {
        if self.gesture != Gesture::Dragging {
            return;
        }
        if let Selection::Range(range) = &mut self.selection {
            range.end = Coord::new(row, col);
        }
    }

    /// Pointer-up ends the drag. The range selection persists.
    pub fn pointer_up(&mut self) {
        self.gesture = Gesture::Idle;
    }
}

impl Default for SelectionTracker {
    fn default() -> Self {
        Self::new(false)
    }
}
