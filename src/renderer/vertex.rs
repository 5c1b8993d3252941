//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Raw bytes of a vertex list, laid out for a GPU vertex buffer
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.53, 0.81, 0.92, 1.0];
    pub const PLATFORM_NORMAL: [f32; 4] = [0.55, 0.27, 0.07, 1.0]; // Saddle brown
    pub const PLATFORM_MOVING: [f32; 4] = [0.63, 0.32, 0.18, 1.0]; // Sienna
    pub const PLATFORM_BREAKABLE: [f32; 4] = [0.80, 0.52, 0.25, 1.0]; // Peru
    pub const PLATFORM_SPIKE: [f32; 4] = [0.41, 0.41, 0.41, 1.0];
    pub const SPIKE_TEETH: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const COIN: [f32; 4] = [1.0, 0.84, 0.0, 1.0]; // Gold
    pub const COIN_SHINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const DOOR: [f32; 4] = [1.0, 0.84, 0.0, 1.0];
    pub const ACTOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.5];
    pub const BUTTON: [f32; 4] = [0.30, 0.69, 0.31, 1.0];
    pub const BUTTON_HOVER: [f32; 4] = [0.27, 0.63, 0.29, 1.0];
}
