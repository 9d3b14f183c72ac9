//! A single bouncing figure
//!
//! Positions are the figure's top-left corner in window pixels; velocities
//! are pixels per tick. Each axis bounces independently.

use std::fmt;
use std::str::FromStr;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::color::Rgb;
use crate::error::Error;

/// Shape drawn for a figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Triangle,
    Plus,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Circle, ShapeKind::Triangle, ShapeKind::Plus];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Plus => "plus",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "circle" | "ball" => Ok(ShapeKind::Circle),
            "triangle" | "tri" => Ok(ShapeKind::Triangle),
            "plus" => Ok(ShapeKind::Plus),
            _ => Err(Error::UnknownShape(s.to_string())),
        }
    }
}

/// A bouncing figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pos: IVec2,
    vel: IVec2,
    /// Largest permissible top-left corner on each axis
    limits: IVec2,
    size: i32,
    shape: ShapeKind,
    color: Rgb,
}

impl Figure {
    /// New figure at the origin. Limits stay (0, 0) until `set_limits`.
    pub fn new(color: Rgb, vel: IVec2, shape: ShapeKind, size: i32) -> Self {
        Self {
            pos: IVec2::ZERO,
            vel,
            limits: IVec2::ZERO,
            size: size.max(0),
            shape,
            color,
        }
    }

    /// Place the figure somewhere other than the origin
    pub fn with_position(mut self, pos: IVec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn position(&self) -> IVec2 {
        self.pos
    }

    pub fn velocity(&self) -> IVec2 {
        self.vel
    }

    pub fn limits(&self) -> IVec2 {
        self.limits
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Set the walls from the window extents.
    ///
    /// The limit on each axis is `extent - size`, never below 0. A position
    /// past the new limit is pulled back to it; a negative position is left
    /// alone.
    pub fn set_limits(&mut self, x_extent: i32, y_extent: i32) {
        self.limits = IVec2::new(
            x_extent.saturating_sub(self.size).max(0),
            y_extent.saturating_sub(self.size).max(0),
        );
        self.pos = self.pos.min(self.limits);
    }

    /// Advance one tick, bouncing off any wall that would be crossed
    pub fn step(&mut self) {
        let (x, dx) = bounce_axis(self.pos.x, self.vel.x, self.limits.x);
        let (y, dy) = bounce_axis(self.pos.y, self.vel.y, self.limits.y);
        self.pos = IVec2::new(x, y);
        self.vel = IVec2::new(dx, dy);
    }

    /// Add 1 to the magnitude of each velocity component. Zero stays zero.
    pub fn speed_up(&mut self) {
        let faster = |d: i32| d.saturating_add(d.signum());
        self.vel = IVec2::new(faster(self.vel.x), faster(self.vel.y));
    }

    /// Take 1 off the magnitude of each velocity component, stopping at 1
    pub fn slow_down(&mut self) {
        let slower = |d: i32| if d.unsigned_abs() <= 1 { d } else { d - d.signum() };
        self.vel = IVec2::new(slower(self.vel.x), slower(self.vel.y));
    }

    pub fn recolor(&mut self, color: Rgb) {
        self.color = color;
    }
}

/// One axis of `step`: returns the new position and velocity.
///
/// On a hit the reversed velocity is applied to the old position, so the
/// figure turns around within the same tick. The result is clamped to
/// `[0, limit]` for velocities larger than the gap to the wall. Arithmetic
/// saturates at the `i32` range.
fn bounce_axis(pos: i32, vel: i32, limit: i32) -> (i32, i32) {
    let next = pos.saturating_add(vel);
    if next < 0 || next >= limit {
        let vel = vel.saturating_neg();
        (pos.saturating_add(vel).clamp(0, limit), vel)
    } else {
        (next, vel)
    }
}
