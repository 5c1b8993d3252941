//! Data-driven game balance
//!
//! Every number the simulation consults lives here so a run can be retuned
//! from a JSON file without a rebuild. Missing fields fall back to defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or checking a tuning table
#[derive(Debug, Error)]
pub enum TuningError {
    /// JSON could not be parsed
    #[error("Failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is outside what the simulation can work with
    #[error("Invalid tuning value '{field}': {details}")]
    Invalid { field: &'static str, details: String },
}

/// Half-open range `[min, max)` used for uniform draws
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Map a unit sample `t` in [0, 1) onto the span
    #[inline]
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + t * (self.max - self.min)
    }

    fn check(&self, field: &'static str) -> Result<(), TuningError> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min > self.max {
            return Err(TuningError::Invalid {
                field,
                details: format!("range [{}, {}) is inverted or not finite", self.min, self.max),
            });
        }
        Ok(())
    }
}

/// Game balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Actor ===
    pub gravity: f32,
    pub actor_speed: f32,
    pub jump_force: f32,
    pub actor_size: f32,
    pub spawn_offset_x: f32,
    pub spawn_y: f32,

    // === Run rules ===
    pub max_level: u32,
    pub max_lives: u32,
    pub level_bonus: i64,
    pub coin_value: i64,
    pub death_penalty: i64,
    pub breakable_bonus: i64,
    pub invincibility_ticks: u32,

    // === Level layout ===
    pub level_width: f32,
    pub ground_y: f32,
    pub ground_height: f32,
    pub platform_height: f32,
    pub spike_height: f32,
    pub platform_gap: Span,
    pub platform_width: Span,
    pub platform_y: Span,
    /// Space kept clear of platforms at the end of the level
    pub door_reserve: f32,
    /// Door x, measured back from the end of the level
    pub door_offset: f32,
    pub door_y: f32,
    pub door_width: f32,
    pub door_height: f32,

    // === Platform variants ===
    /// Upper bounds of the variant roll: below `normal` is normal, then moving, breakable, spike
    pub normal_threshold: f32,
    pub moving_threshold: f32,
    pub breakable_threshold: f32,
    pub moving_range: f32,
    pub moving_speed: f32,
    pub breakable_health: u32,

    // === Coins ===
    pub coin_size: f32,
    pub coin_lift: f32,
    /// One coin slot per this much platform width
    pub coin_slot_width: f32,
    pub coin_probability: f32,

    // === View ===
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            actor_speed: ACTOR_SPEED,
            jump_force: ACTOR_JUMP_FORCE,
            actor_size: ACTOR_SIZE,
            spawn_offset_x: SPAWN_OFFSET_X,
            spawn_y: SPAWN_Y,

            max_level: 3,
            max_lives: 3,
            level_bonus: 1000,
            coin_value: 100,
            death_penalty: 500,
            breakable_bonus: 50,
            invincibility_ticks: 2 * TICKS_PER_SECOND,

            level_width: LEVEL_WIDTH,
            ground_y: GROUND_Y,
            ground_height: GROUND_HEIGHT,
            platform_height: PLATFORM_HEIGHT,
            spike_height: SPIKE_HEIGHT,
            platform_gap: Span::new(50.0, 150.0),
            platform_width: Span::new(100.0, 200.0),
            platform_y: Span::new(100.0, 300.0),
            door_reserve: 200.0,
            door_offset: 100.0,
            door_y: DOOR_Y,
            door_width: DOOR_WIDTH,
            door_height: DOOR_HEIGHT,

            normal_threshold: 0.65,
            moving_threshold: 0.80,
            breakable_threshold: 0.85,
            moving_range: 100.0,
            moving_speed: 2.0,
            breakable_health: 3,

            coin_size: COIN_SIZE,
            coin_lift: COIN_LIFT,
            coin_slot_width: 100.0,
            coin_probability: 0.7,

            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning table and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize the full table (handy as a starting point for overrides)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject tables the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("actor_size", self.actor_size),
            ("actor_speed", self.actor_speed),
            ("jump_force", self.jump_force),
            ("level_width", self.level_width),
            ("ground_height", self.ground_height),
            ("platform_height", self.platform_height),
            ("spike_height", self.spike_height),
            ("door_width", self.door_width),
            ("door_height", self.door_height),
            ("coin_size", self.coin_size),
            ("coin_slot_width", self.coin_slot_width),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid {
                    field,
                    details: format!("must be a positive number, got {value}"),
                });
            }
        }

        if !self.gravity.is_finite() {
            return Err(TuningError::Invalid {
                field: "gravity",
                details: "must be finite".into(),
            });
        }

        self.platform_gap.check("platform_gap")?;
        self.platform_width.check("platform_width")?;
        self.platform_y.check("platform_y")?;

        // The generator's cursor must make progress every step
        if self.platform_gap.min + self.platform_width.min <= 0.0 {
            return Err(TuningError::Invalid {
                field: "platform_gap",
                details: "gap + width must be positive".into(),
            });
        }

        if self.platform_width.min <= 0.0 {
            return Err(TuningError::Invalid {
                field: "platform_width",
                details: "platforms must have positive width".into(),
            });
        }

        if self.door_reserve < 0.0 || self.door_reserve > self.level_width {
            return Err(TuningError::Invalid {
                field: "door_reserve",
                details: format!(
                    "{} does not fit in a level {} wide",
                    self.door_reserve, self.level_width
                ),
            });
        }

        if self.door_offset <= 0.0 || self.door_offset > self.level_width {
            return Err(TuningError::Invalid {
                field: "door_offset",
                details: format!("{} is outside the level", self.door_offset),
            });
        }

        if self.viewport_width > self.level_width {
            return Err(TuningError::Invalid {
                field: "viewport_width",
                details: "viewport is wider than a level".into(),
            });
        }

        let thresholds = [
            self.normal_threshold,
            self.moving_threshold,
            self.breakable_threshold,
        ];
        if thresholds.iter().any(|t| !(0.0..=1.0).contains(t))
            || thresholds.windows(2).any(|w| w[0] > w[1])
        {
            return Err(TuningError::Invalid {
                field: "normal_threshold",
                details: format!("variant thresholds {thresholds:?} must ascend within [0, 1]"),
            });
        }

        if !(0.0..=1.0).contains(&self.coin_probability) {
            return Err(TuningError::Invalid {
                field: "coin_probability",
                details: format!("{} is not a probability", self.coin_probability),
            });
        }

        if self.max_level == 0 {
            return Err(TuningError::Invalid {
                field: "max_level",
                details: "a run needs at least one level".into(),
            });
        }

        if self.max_lives == 0 {
            return Err(TuningError::Invalid {
                field: "max_lives",
                details: "a run needs at least one life".into(),
            });
        }

        if self.breakable_health == 0 {
            return Err(TuningError::Invalid {
                field: "breakable_health",
                details: "breakable platforms need at least one hit point".into(),
            });
        }

        Ok(())
    }
}
