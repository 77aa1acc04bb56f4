//! Rendering of tracker results for display.

pub mod generator;

pub use generator::*;
