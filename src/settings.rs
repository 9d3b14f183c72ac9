//! Animation settings
//!
//! Stored as JSON next to the binary or passed on the command line. Missing
//! fields fall back to their defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::sim::Simulation;

/// Settings for the animation and the terminal view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Time between ticks, in milliseconds
    pub tick_period_ms: u64,

    // === Window ===
    pub window_width: i32,
    pub window_height: i32,

    // === New figures ===
    /// Velocity (dx, dy) given to figures added from the controller
    pub new_figure_velocity: (i32, i32),
    /// Smallest size a new figure may get
    pub size_min: i32,
    /// Largest size a new figure may get (inclusive)
    pub size_max: i32,
    /// RNG seed; None seeds from entropy
    pub seed: Option<u64>,

    // === View ===
    /// Width of the character grid
    pub canvas_columns: usize,
    /// Height of the character grid
    pub canvas_rows: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_period_ms: TICK_PERIOD_MS,

            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,

            new_figure_velocity: (NEW_FIGURE_DX, NEW_FIGURE_DY),
            size_min: FIGURE_SIZE_MIN,
            size_max: FIGURE_SIZE_MAX,
            seed: None,

            canvas_columns: 60,
            canvas_rows: 30,
        }
    }
}

impl Settings {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// Reject values the animation cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.tick_period_ms == 0 {
            return Err(Error::InvalidPeriod);
        }
        if self.size_min <= 0 || self.size_max < self.size_min {
            return Err(Error::InvalidSizeRange {
                min: self.size_min,
                max: self.size_max,
            });
        }
        Ok(())
    }

    /// Build the starting simulation, already sized to the window
    pub fn build_simulation(&self) -> Result<Simulation> {
        self.validate()?;
        let sim = match self.seed {
            Some(seed) => Simulation::new(seed),
            None => Simulation::from_entropy(),
        };
        let mut sim = sim.with_size_range(self.size_min, self.size_max)?;
        sim.resize_window(self.window_width, self.window_height);
        log::info!("Simulation seed {}", sim.seed());
        Ok(sim)
    }

    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Self::from_json(&fs::read_to_string(path)?)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults if the file does not exist.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
