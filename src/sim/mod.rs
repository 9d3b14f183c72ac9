//! Simulation module
//!
//! Figure motion and the model that owns the figures. The model is plain
//! data and deterministic for a given seed; the animator adds the clock:
//! - Integer pixel positions, one step per tick
//! - Seeded RNG only
//! - Stable iteration order (insertion order is z-order)
//! - No rendering dependencies

pub mod animator;
pub mod color;
pub mod figure;
pub mod observer;
pub mod state;

pub use animator::{Animator, DEFAULT_PERIOD, SharedSimulation};
pub use color::{PALETTE, Rgb};
pub use figure::{Figure, ShapeKind};
pub use observer::{FigureView, Frame, Observers, SubscriptionId};
pub use state::{RngState, Simulation};
