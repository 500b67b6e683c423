//! The clip buffer and the system-clipboard seam.
//!
//! Cut and copy extract a rectangular block of values into a
//! `ClipBlock`; paste writes a block back at a destination origin.
//! The system clipboard is an optional collaborator behind
//! `ClipboardProvider`: copy mirrors to it best-effort, paste falls
//! back to it when no internal buffer exists. Provider failures are
//! logged and never surfaced.

use std::fmt;

use serde::{Deserialize, Serialize};

use gridkit_core::{Bounds, Coord};

use crate::grid::Grid;

/// A rectangular block of values held between cut/copy and paste.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipBlock {
    /// Row-major values, `num_rows` x `num_cols`.
    pub block: Vec<Vec<String>>,
    pub num_rows: usize,
    pub num_cols: usize,
    /// Top-left corner of the source rectangle, when known.
    pub origin: Option<Coord>,
    /// Cut-created buffers are consumed by their first paste;
    /// copy-created buffers survive for repeated pastes.
    pub from_cut: bool,
}

impl ClipBlock {
    /// Extract a block from the grid over `bounds`.
    pub fn from_grid(grid: &Grid, bounds: Bounds, from_cut: bool) -> Self {
        Self {
            block: grid.block(bounds),
            num_rows: bounds.rows(),
            num_cols: bounds.cols(),
            origin: Some(bounds.top_left()),
            from_cut,
        }
    }

    /// Encode as tab-separated columns, newline-separated rows.
    pub fn to_tsv(&self) -> String {
        self.block
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Parse clipboard text into a block: rows split on line breaks,
    /// columns on tabs. The first row's width decides `num_cols`; later
    /// rows are padded or truncated to it. Returns None for empty text.
    pub fn parse_tsv(text: &str) -> Option<Self> {
        // Normalize line endings; clipboard managers vary
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        if text.is_empty() {
            return None;
        }

        let mut block: Vec<Vec<String>> = text
            .split('\n')
            .map(|line| line.split('\t').map(|s| s.to_string()).collect())
            .collect();
        let num_cols = block[0].len();
        for row in &mut block {
            row.resize(num_cols, String::new());
        }
        let num_rows = block.len();

        Some(Self {
            block,
            num_rows,
            num_cols,
            origin: None,
            from_cut: false,
        })
    }
}

/// System clipboard read/write was denied or is unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipboardUnavailable;

impl fmt::Display for ClipboardUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "system clipboard unavailable")
    }
}

impl std::error::Error for ClipboardUnavailable {}

/// The system clipboard collaborator. Both operations are best-effort
/// from the engine's point of view; failure is never a user-visible
/// error.
pub trait ClipboardProvider {
    fn read_text(&mut self) -> Result<String, ClipboardUnavailable>;
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardUnavailable>;
}

/// The no-clipboard default: every operation reports unavailable.
#[derive(Debug, Default)]
pub struct NullClipboard;

impl ClipboardProvider for NullClipboard {
    fn read_text(&mut self) -> Result<String, ClipboardUnavailable> {
        Err(ClipboardUnavailable)
    }

    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardUnavailable> {
        Err(ClipboardUnavailable)
    }
}

/// In-memory provider, for tests and hosts without a real clipboard.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()) }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl ClipboardProvider for MemoryClipboard {
    fn read_text(&mut self) -> Result<String, ClipboardUnavailable> {
        self.text.clone().ok_or(ClipboardUnavailable)
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardUnavailable> {
        self.text = Some(text.to_string());
        Ok(())
    }
}
