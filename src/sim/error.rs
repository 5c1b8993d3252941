//! Simulation fault types
//!
//! None of these are recoverable in-tick; the frame driver logs them and
//! rolls the world back to the last consistent snapshot.

use thiserror::Error;

use crate::tuning::TuningError;

/// Logic faults detected by the simulation or level generator
#[derive(Debug, Error)]
pub enum SimError {
    /// A platform record has geometry the engine cannot collide against
    #[error("Platform {id} is malformed: {details}")]
    InvalidPlatform { id: u32, details: String },

    /// A breakable platform with no health left is still in the active set
    #[error("Breakable platform {id} has no health left but was not removed")]
    ExhaustedPlatform { id: u32 },

    /// Actor position or velocity went non-finite
    #[error("Actor state is not finite: pos=({x}, {y}), vel_y={vel_y}")]
    InvalidActor { x: f32, y: f32, vel_y: f32 },

    /// The balance table cannot produce a level
    #[error("Cannot generate level {level}: {details}")]
    InvalidLevel { level: u32, details: String },

    /// The world was built from a balance table that failed validation
    #[error(transparent)]
    Tuning(#[from] TuningError),
}
