//! Per-cell validation errors.
//!
//! Rules are checked on every keystroke of a cell edit. A failing check
//! records an error message for that cell but never blocks the edit —
//! the invalid value is stored and the error is surfaced as an inline,
//! dismissible tooltip.

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;

/// What a cell edit is checked against.
#[derive(Debug, Clone)]
pub enum InputRule {
    /// Letters and whitespace only.
    LettersOnly,
    /// Host-supplied pattern: input matching `reject` is invalid.
    Pattern { reject: Regex, message: String },
}

impl InputRule {
    /// Check an input string. Returns the error message for invalid input.
    pub fn check(&self, input: &str) -> Option<String> {
        match self {
            InputRule::LettersOnly => {
                let invalid = Regex::new(r"[^a-zA-Z\s]").unwrap();
                if invalid.is_match(input) {
                    Some("Only letters are allowed. No numbers or symbols.".to_string())
                } else {
                    None
                }
            }
            InputRule::Pattern { reject, message } => {
                if reject.is_match(input) {
                    Some(message.clone())
                } else {
                    None
                }
            }
        }
    }
}

/// Map from cell position to error message. Presence of a key means the
/// cell is currently invalid. BTreeMap for deterministic iteration.
#[derive(Debug, Clone, Default)]
pub struct ValidationErrors {
    errors: BTreeMap<(usize, usize), String>,
    visible_tooltips: BTreeSet<(usize, usize)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear the error for one cell. Clearing also hides any
    /// tooltip shown for it.
    pub fn set(&mut self, row: usize, col: usize, message: Option<String>) {
        match message {
            Some(msg) => {
                self.errors.insert((row, col), msg);
            }
            None => {
                self.errors.remove(&(row, col));
                self.visible_tooltips.remove(&(row, col));
            }
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.errors.get(&(row, col)).map(|s| s.as_str())
    }

    pub fn is_invalid(&self, row: usize, col: usize) -> bool {
        self.errors.contains_key(&(row, col))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &str)> {
        self.errors.iter().map(|(&k, v)| (k, v.as_str()))
    }

    /// Toggle the tooltip for an invalid cell. No-op for valid cells.
    pub fn toggle_tooltip(&mut self, row: usize, col: usize) {
        if !self.is_invalid(row, col) {
            return;
        }
        if !self.visible_tooltips.remove(&(row, col)) {
            self.visible_tooltips.insert((row, col));
        }
    }

    pub fn tooltip_visible(&self, row: usize, col: usize) -> bool {
        self.visible_tooltips.contains(&(row, col))
    }
}
