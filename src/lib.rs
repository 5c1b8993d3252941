//! Ledge Runner - A side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, level generation, game rules)
//! - `driver`: Frame driver (input flags, restart control, camera, fault isolation)
//! - `renderer`: CPU-side scene tessellation for the render surface
//! - `tuning`: Data-driven game balance

pub mod driver;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use driver::{Camera, FrameDriver, InputFlags, Key};
pub use sim::{GamePhase, World};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Display refresh rate the simulation is stepped at (one tick per frame)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 400.0;

    /// Actor defaults
    pub const ACTOR_SIZE: f32 = 30.0;
    pub const ACTOR_SPEED: f32 = 5.0;
    pub const ACTOR_JUMP_FORCE: f32 = 12.0;
    /// Spawn point relative to the level's start offset
    pub const SPAWN_OFFSET_X: f32 = 50.0;
    pub const SPAWN_Y: f32 = 200.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.5;

    /// Level geometry
    pub const LEVEL_WIDTH: f32 = 3000.0;
    pub const GROUND_Y: f32 = 350.0;
    pub const GROUND_HEIGHT: f32 = 50.0;
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    pub const SPIKE_HEIGHT: f32 = 15.0;

    /// Coin geometry
    pub const COIN_SIZE: f32 = 20.0;
    /// Coins float this far above the top of their platform
    pub const COIN_LIFT: f32 = 40.0;

    /// Exit door geometry
    pub const DOOR_WIDTH: f32 = 40.0;
    pub const DOOR_HEIGHT: f32 = 60.0;
    pub const DOOR_Y: f32 = 290.0;

    /// Restart button (screen space, centered below the overlay text)
    pub const RESTART_BUTTON_WIDTH: f32 = 200.0;
    pub const RESTART_BUTTON_HEIGHT: f32 = 50.0;
}
