//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in screen space (+y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Spike teeth are this wide at the base
pub const SPIKE_TOOTH_WIDTH: f32 = 20.0;
/// And this tall above the platform top
pub const SPIKE_TOOTH_HEIGHT: f32 = 15.0;

/// Generate vertices for a filled rectangle
pub fn quad(rect: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (l, r, t, b) = (rect.left(), rect.right(), rect.top(), rect.bottom());
    vec![
        Vertex::new(l, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, b, color),
    ]
}

/// Generate vertices for a row of spike teeth standing on `rect`'s top edge
pub fn spike_row(rect: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let teeth = (rect.size.x / SPIKE_TOOTH_WIDTH).ceil().max(0.0) as usize;
    let mut vertices = Vec::with_capacity(teeth * 3);
    let base = rect.top();

    for i in 0..teeth {
        let x = rect.left() + i as f32 * SPIKE_TOOTH_WIDTH;
        vertices.push(Vertex::new(x, base, color));
        vertices.push(Vertex::new(
            x + SPIKE_TOOTH_WIDTH / 2.0,
            base - SPIKE_TOOTH_HEIGHT,
            color,
        ));
        vertices.push(Vertex::new(x + SPIKE_TOOTH_WIDTH, base, color));
    }

    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a rectangle outline of the given stroke width
pub fn frame_outline(rect: &Rect, stroke: f32, color: [f32; 4]) -> Vec<Vertex> {
    let half = stroke / 2.0;
    let (l, t) = (rect.left() - half, rect.top() - half);
    let (w, h) = (rect.size.x + stroke, rect.size.y + stroke);

    let mut vertices = Vec::with_capacity(24);
    vertices.extend(quad(&Rect::new(l, t, w, stroke), color));
    vertices.extend(quad(&Rect::new(l, t + h - stroke, w, stroke), color));
    vertices.extend(quad(&Rect::new(l, t, stroke, h), color));
    vertices.extend(quad(&Rect::new(l + w - stroke, t, stroke, h), color));
    vertices
}
