//! Kaleidoscope - bouncing figures in a window
//!
//! Core modules:
//! - `sim`: Figure motion, the model that owns the figures, and the periodic animator
//! - `renderer`: Character-grid view that draws a frame snapshot
//! - `command`: Line commands for the terminal controller
//! - `settings`: JSON settings for tick period, window size and new-figure defaults

pub mod command;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use settings::Settings;

/// Simulation configuration constants
pub mod consts {
    /// Tick period in milliseconds (25 ticks per second)
    pub const TICK_PERIOD_MS: u64 = 40;

    /// Initial window extents, in pixels
    pub const WINDOW_WIDTH: i32 = 600;
    pub const WINDOW_HEIGHT: i32 = 600;

    /// Size range of newly added figures (inclusive)
    pub const FIGURE_SIZE_MIN: i32 = 10;
    pub const FIGURE_SIZE_MAX: i32 = 29;

    /// Velocity given to figures added from the controller
    pub const NEW_FIGURE_DX: i32 = 3;
    pub const NEW_FIGURE_DY: i32 = 4;

    /// Largest velocity component a controller command may ask for
    pub const MAX_COMMAND_SPEED: i32 = 1000;

    /// Most ticks a single manual step command may run
    pub const MAX_MANUAL_STEPS: u32 = 10_000;
}
