//! Change notifications for the rendering layer.
//!
//! One coherent mutation (a fill step, a cut, a paste, a single edit)
//! produces exactly one event batch; a renderer can redraw per batch
//! instead of polling the grid.

use gridkit_core::Coord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    /// Cells changed value as one mutation batch.
    CellsChanged { cells: Vec<Coord> },
    /// The grid grew to `rows` rows (paste past the old extent).
    RowsExtended { rows: usize },
}

/// Simple event collector for testing.
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<GridEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = GridEvent>) {
        self.events.extend(events);
    }

    pub fn events(&self) -> &[GridEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All cells reported changed, in emission order.
    pub fn changed_cells(&self) -> Vec<Coord> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GridEvent::CellsChanged { cells } => Some(cells.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }
}
