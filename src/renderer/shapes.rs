//! Coverage tests for the three figure shapes
//!
//! Each test takes a point relative to the figure's top-left corner, in
//! window pixels, and says whether the shape covers it.

use glam::Vec2;

use crate::sim::ShapeKind;

/// Filled disc inscribed in the size x size box
pub fn circle(local: Vec2, size: f32) -> bool {
    let r = size / 2.0;
    (local - Vec2::splat(r)).length_squared() <= r * r
}

/// Upward triangle: apex at the top center, base along the bottom edge
pub fn triangle(local: Vec2, size: f32) -> bool {
    if size <= 0.0 || local.y < 0.0 || local.y > size {
        return false;
    }
    let half_width = local.y / 2.0;
    (local.x - size / 2.0).abs() <= half_width
}

/// Plus sign: a horizontal and a vertical bar, each a third of the size thick
pub fn plus(local: Vec2, size: f32) -> bool {
    if !in_box(local, size) {
        return false;
    }
    let center = size / 2.0;
    let half_bar = size / 6.0;
    (local.x - center).abs() <= half_bar || (local.y - center).abs() <= half_bar
}

fn in_box(local: Vec2, size: f32) -> bool {
    local.x >= 0.0 && local.y >= 0.0 && local.x <= size && local.y <= size
}

/// Dispatch on shape kind
pub fn covers(shape: ShapeKind, local: Vec2, size: f32) -> bool {
    match shape {
        ShapeKind::Circle => circle(local, size),
        ShapeKind::Triangle => triangle(local, size),
        ShapeKind::Plus => plus(local, size),
    }
}

/// Glyph used for a shape on the character grid
pub fn glyph(shape: ShapeKind) -> char {
    match shape {
        ShapeKind::Circle => 'o',
        ShapeKind::Triangle => '^',
        ShapeKind::Plus => '+',
    }
}
