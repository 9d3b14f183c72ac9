//! Terminal rendering module
//!
//! Draws frame snapshots onto a character grid. Reads frames only; never
//! touches live simulation state.

pub mod canvas;
pub mod shapes;

pub use canvas::{Canvas, Cell};
