//! Run rules: score, lives, level progression and reset
//!
//! The engine reports what happened; these functions decide what it means
//! for the run. Every score change goes through `add_score` so the high
//! score can never fall behind.

use super::error::SimError;
use super::level::generate_level;
use super::state::{Actor, DeathCause, GameEvent, GamePhase, GameState, World};

/// Apply a score delta (may be negative) and raise the high score if beaten
pub fn add_score(state: &mut GameState, points: i64) {
    let old = state.score;
    state.score += points;
    if state.score > state.high_score {
        state.high_score = state.score;
    }
    log::debug!("Score updated: {} -> {}", old, state.score);
}

/// Restart the run from level 1
///
/// Safe to call in any phase. The high score carries over. The new level is
/// generated before anything is overwritten, so a failed generation leaves
/// the world untouched.
pub fn reset(world: &mut World) -> Result<(), SimError> {
    let level = generate_level(&mut world.rng, &mut world.ids, &world.tuning, 1, 0.0)?;

    let high_score = world.state.high_score;
    world.state = GameState::new(&world.tuning);
    world.state.high_score = high_score;
    world.actor = Actor::new(&world.tuning, 0.0);
    world.platforms = level.platforms;
    world.coins = level.coins;
    world.door = level.door;

    log::info!("Run reset (high score {})", high_score);
    Ok(())
}

/// The actor reached an active door
///
/// Advances to the next level segment, or finishes the run on the last one.
pub fn complete_level(world: &mut World) -> Result<GameEvent, SimError> {
    if world.state.phase.is_terminal() {
        return Err(SimError::InvalidLevel {
            level: world.state.current_level,
            details: format!("door reached while {:?}", world.state.phase),
        });
    }

    let tuning = &world.tuning;
    let state = &mut world.state;

    if state.current_level < state.max_level {
        let next_level = state.current_level + 1;
        let next_start = state.level_start_x + tuning.level_width;
        let level = generate_level(
            &mut world.rng,
            &mut world.ids,
            tuning,
            next_level,
            next_start,
        )?;

        // Every coin collected so far this run adds 10% to the bonus
        let bonus =
            (tuning.level_bonus as f64 * (1.0 + state.coins as f64 / 10.0)).floor() as i64;
        add_score(state, bonus);

        state.current_level = next_level;
        state.level_start_x = next_start;
        world.actor.place_at_spawn(tuning, next_start);
        world.platforms = level.platforms;
        world.coins = level.coins;
        world.door = level.door;

        log::info!("Level {} reached (bonus {})", next_level, bonus);
        Ok(GameEvent::LevelAdvanced { level: next_level })
    } else {
        add_score(state, tuning.level_bonus * 2);
        state.phase = GamePhase::LevelCompleted;

        log::info!("Run completed with score {}", state.score);
        Ok(GameEvent::RunCompleted)
    }
}

/// Kill the actor (spike contact, or fall-out reported by the host)
///
/// Ignored while invincible or outside `Playing`. Returns the events produced.
pub fn kill_actor(world: &mut World, cause: DeathCause) -> Vec<GameEvent> {
    if world.actor.invincible || world.state.phase.is_terminal() {
        return Vec::new();
    }

    let tuning = &world.tuning;
    let state = &mut world.state;
    let mut events = vec![GameEvent::Died { cause }];

    state.lives = state.lives.saturating_sub(1);
    add_score(state, -tuning.death_penalty);

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver);
        log::info!("Game over with score {}", state.score);
    } else {
        world.actor.place_at_spawn(tuning, state.level_start_x);
        world.actor.grant_invincibility(tuning.invincibility_ticks);
        log::info!("Died ({:?}), {} lives left", cause, state.lives);
    }

    events
}
