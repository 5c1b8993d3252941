//! Collision detection for axis-aligned geometry
//!
//! Everything in a level is a box, so two tests cover the whole game:
//! strict AABB overlap and the one-way "landed on top" check.

use super::rect::Rect;

/// Strict AABB overlap - rectangles that only share an edge do not collide
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// One-way platform landing test
///
/// The actor lands when it is falling and its bottom edge was at or above
/// the surface before this tick's vertical move.
#[inline]
pub fn lands_on(actor: &Rect, velocity_y: f32, surface: &Rect) -> bool {
    velocity_y > 0.0 && actor.bottom() - velocity_y <= surface.top()
}
