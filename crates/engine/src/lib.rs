pub mod clipboard;
pub mod events;
pub mod fill;
pub mod grid;
pub mod state;
pub mod validation;

pub use gridkit_core as core;
