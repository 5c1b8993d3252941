//! Procedural level generation
//!
//! A level is a full-width ground slab plus a left-to-right run of random
//! platforms, a door near the right edge, and coins floating above every
//! platform that is safe to stand on. All randomness comes from the caller's
//! RNG so a seeded run always produces the same layouts.

use rand::Rng;

use super::error::SimError;
use super::rect::Rect;
use super::state::{Coin, Door, EntityIds, Mover, Platform, PlatformKind};
use crate::tuning::Tuning;

/// A freshly generated level
#[derive(Debug, Clone)]
pub struct Level {
    pub platforms: Vec<Platform>,
    pub door: Door,
    pub coins: Vec<Coin>,
}

/// Generate the platforms, door and coins for `level` (1-based) starting at `start_x`
pub fn generate_level<R: Rng>(
    rng: &mut R,
    ids: &mut EntityIds,
    tuning: &Tuning,
    level: u32,
    start_x: f32,
) -> Result<Level, SimError> {
    let (platforms, door) = generate_layout(rng, ids, tuning, level, start_x)?;
    let coins = generate_coins(rng, ids, tuning, &platforms);

    log::debug!(
        "Level {} generated at x={}: {} platforms, {} coins",
        level,
        start_x,
        platforms.len(),
        coins.len()
    );

    Ok(Level {
        platforms,
        door,
        coins,
    })
}

/// Lay out the ground, the random platform run, and the exit door
pub fn generate_layout<R: Rng>(
    rng: &mut R,
    ids: &mut EntityIds,
    tuning: &Tuning,
    level: u32,
    start_x: f32,
) -> Result<(Vec<Platform>, Door), SimError> {
    if level == 0 || level > tuning.max_level {
        return Err(SimError::InvalidLevel {
            level,
            details: format!("levels run from 1 to {}", tuning.max_level),
        });
    }

    let min_step = tuning.platform_gap.min + tuning.platform_width.min;
    if !(min_step > 0.0) {
        return Err(SimError::InvalidLevel {
            level,
            details: format!("platform cursor would not advance (min step {min_step})"),
        });
    }

    let mut platforms = vec![Platform {
        id: ids.next_id(),
        rect: Rect::new(
            start_x,
            tuning.ground_y,
            tuning.level_width,
            tuning.ground_height,
        ),
        kind: PlatformKind::Normal,
    }];

    let stop_x = start_x + tuning.level_width - tuning.door_reserve;
    let mut cursor = start_x;

    while cursor < stop_x {
        // Draw order matters for seeded reproducibility
        let roll: f32 = rng.random();
        let width = tuning.platform_width.lerp(rng.random());
        let gap = tuning.platform_gap.lerp(rng.random());
        let y = tuning.platform_y.lerp(rng.random());
        let x = cursor + gap;

        let (kind, height) = pick_kind(tuning, roll, x);
        platforms.push(Platform {
            id: ids.next_id(),
            rect: Rect::new(x, y, width, height),
            kind,
        });

        cursor += gap + width;
    }

    let door = Door {
        rect: Rect::new(
            start_x + tuning.level_width - tuning.door_offset,
            tuning.door_y,
            tuning.door_width,
            tuning.door_height,
        ),
        active: true,
    };

    Ok((platforms, door))
}

/// Map a unit roll onto a platform variant and its height
fn pick_kind(tuning: &Tuning, roll: f32, x: f32) -> (PlatformKind, f32) {
    if roll < tuning.normal_threshold {
        (PlatformKind::Normal, tuning.platform_height)
    } else if roll < tuning.moving_threshold {
        (
            PlatformKind::Moving(Mover::new(x, tuning.moving_range, tuning.moving_speed)),
            tuning.platform_height,
        )
    } else if roll < tuning.breakable_threshold {
        (
            PlatformKind::Breakable {
                health: tuning.breakable_health,
            },
            tuning.platform_height,
        )
    } else {
        (PlatformKind::Spike, tuning.spike_height)
    }
}

/// Scatter coins above every non-spike platform
///
/// Each platform gets `floor(width / slot_width)` evenly spaced slots; each
/// slot holds a coin with probability `coin_probability`.
pub fn generate_coins<R: Rng>(
    rng: &mut R,
    ids: &mut EntityIds,
    tuning: &Tuning,
    platforms: &[Platform],
) -> Vec<Coin> {
    let mut coins = Vec::new();

    for platform in platforms.iter().filter(|p| !p.is_spike()) {
        let width = platform.rect.size.x;
        let slots = (width / tuning.coin_slot_width).floor() as u32;

        for i in 0..slots {
            if rng.random::<f32>() < tuning.coin_probability {
                let x = platform.rect.left() + width * (i as f32 + 0.5) / slots as f32;
                coins.push(Coin {
                    id: ids.next_id(),
                    rect: Rect::new(
                        x,
                        platform.rect.top() - tuning.coin_lift,
                        tuning.coin_size,
                        tuning.coin_size,
                    ),
                    collected: false,
                });
            }
        }
    }

    coins
}
