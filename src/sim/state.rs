//! Game state and core simulation types
//!
//! `World` bundles everything one tick touches. The frame driver owns it and
//! hands it to the engine and rules by `&mut`, one tick at a time.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::error::SimError;
use super::rect::Rect;
use super::rules;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Exit door of the final level reached
    LevelCompleted,
    /// Out of lives
    GameOver,
}

impl GamePhase {
    /// Terminal phases halt the simulation until a reset
    pub fn is_terminal(self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// What killed the actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Spike,
    /// Reported by the host when the actor leaves the playable area
    FellOut,
}

/// Things that happened during a tick, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected { id: u32 },
    PlatformBroken { id: u32 },
    Died { cause: DeathCause },
    /// Moved on to the given (1-based) level
    LevelAdvanced { level: u32 },
    /// Final level's door reached
    RunCompleted,
    GameOver,
}

/// The player-controlled actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub rect: Rect,
    pub vel_y: f32,
    /// Horizontal move per tick while a direction is held
    pub speed: f32,
    pub jump_force: f32,
    pub grounded: bool,
    pub invincible: bool,
    pub invincible_ticks: u32,
    /// Moving platform carrying the actor this tick (by id, cleared every tick)
    pub carrier: Option<u32>,
    /// Horizontal displacement imparted by the carrier this tick
    pub carry_dx: f32,
}

impl Actor {
    pub fn new(tuning: &Tuning, level_start_x: f32) -> Self {
        let mut actor = Self {
            rect: Rect::new(0.0, 0.0, tuning.actor_size, tuning.actor_size),
            vel_y: 0.0,
            speed: tuning.actor_speed,
            jump_force: tuning.jump_force,
            grounded: false,
            invincible: false,
            invincible_ticks: 0,
            carrier: None,
            carry_dx: 0.0,
        };
        actor.place_at_spawn(tuning, level_start_x);
        // A fresh run may jump on its first tick
        actor.grounded = true;
        actor
    }

    /// Put the actor back at the spawn point of the level starting at `level_start_x`
    ///
    /// The spawn point is in mid-air, so any landing from before the move is void.
    pub fn place_at_spawn(&mut self, tuning: &Tuning, level_start_x: f32) {
        self.rect.pos.x = level_start_x + tuning.spawn_offset_x;
        self.rect.pos.y = tuning.spawn_y;
        self.vel_y = 0.0;
        self.grounded = false;
        self.carrier = None;
        self.carry_dx = 0.0;
    }

    /// Count down invincibility, clearing the flag when it runs out
    pub fn tick_invincibility(&mut self) {
        if self.invincible {
            self.invincible_ticks = self.invincible_ticks.saturating_sub(1);
            if self.invincible_ticks == 0 {
                self.invincible = false;
            }
        }
    }

    pub fn grant_invincibility(&mut self, ticks: u32) {
        self.invincible = ticks > 0;
        self.invincible_ticks = ticks;
    }
}

/// Oscillation state of a moving platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    /// X the platform oscillates around
    pub origin_x: f32,
    /// Maximum displacement from origin before turning around
    pub range: f32,
    pub speed: f32,
    /// +1.0 or -1.0
    pub direction: f32,
    /// Net x displacement during the last tick
    pub last_dx: f32,
}

impl Mover {
    pub fn new(origin_x: f32, range: f32, speed: f32) -> Self {
        Self {
            origin_x,
            range,
            speed,
            direction: 1.0,
            last_dx: 0.0,
        }
    }

    /// Move one tick, turning around once past the range
    pub fn advance(&mut self, rect: &mut Rect) {
        let old_x = rect.pos.x;
        rect.pos.x += self.speed * self.direction;
        if (rect.pos.x - self.origin_x).abs() > self.range {
            self.direction = -self.direction;
        }
        self.last_dx = rect.pos.x - old_x;
    }
}

/// Platform variants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlatformKind {
    Normal,
    Moving(Mover),
    /// Loses one health per falling contact, removed at zero
    Breakable { health: u32 },
    /// Kills on contact unless invincible
    Spike,
}

/// A platform entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub rect: Rect,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn is_spike(&self) -> bool {
        matches!(self.kind, PlatformKind::Spike)
    }
}

/// A collectible coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub rect: Rect,
    pub collected: bool,
}

/// Level exit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Door {
    pub rect: Rect,
    pub active: bool,
}

/// Run-level bookkeeping: lives, score, level progression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current level (1-based)
    pub current_level: u32,
    pub max_level: u32,
    pub lives: u32,
    pub max_lives: u32,
    /// May go negative after deaths
    pub score: i64,
    /// Best score seen this process (survives resets, never persisted)
    pub high_score: i64,
    /// Coins collected since the run started
    pub coins: u32,
    /// World x where the current level segment begins
    pub level_start_x: f32,
    pub phase: GamePhase,
}

impl GameState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            current_level: 1,
            max_level: tuning.max_level,
            lives: tuning.max_lives,
            max_lives: tuning.max_lives,
            score: 0,
            high_score: 0,
            coins: 0,
            level_start_x: 0.0,
            phase: GamePhase::Playing,
        }
    }

    pub fn level_completed(&self) -> bool {
        self.phase == GamePhase::LevelCompleted
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Restart is offered in either terminal phase
    pub fn can_restart(&self) -> bool {
        self.phase.is_terminal()
    }
}

/// Entity ID allocator (unique for the whole process run)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// RNG state wrapper for reproducibility
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Everything a tick reads or writes
#[derive(Debug, Clone)]
pub struct World {
    pub tuning: Tuning,
    pub rng_state: RngState,
    pub rng: Pcg32,
    pub ids: EntityIds,
    pub actor: Actor,
    /// Active platforms in generation order (ground first)
    pub platforms: Vec<Platform>,
    /// Uncollected coins only
    pub coins: Vec<Coin>,
    pub door: Door,
    pub state: GameState,
}

impl World {
    /// Create a world with the given seed and balance table, starting on level 1
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, SimError> {
        tuning.validate()?;

        let rng_state = RngState::new(seed);
        let mut world = Self {
            rng: rng_state.to_rng(),
            rng_state,
            ids: EntityIds::default(),
            actor: Actor::new(&tuning, 0.0),
            platforms: Vec::new(),
            coins: Vec::new(),
            door: Door {
                rect: Rect::default(),
                active: false,
            },
            state: GameState::new(&tuning),
            tuning,
        };
        rules::reset(&mut world)?;

        log::info!("World created with seed {}", seed);
        Ok(world)
    }

    /// Check the invariants the engine relies on
    pub fn validate(&self) -> Result<(), SimError> {
        let actor = &self.actor;
        if !(actor.rect.pos.is_finite() && actor.vel_y.is_finite()) {
            return Err(SimError::InvalidActor {
                x: actor.rect.pos.x,
                y: actor.rect.pos.y,
                vel_y: actor.vel_y,
            });
        }

        for platform in &self.platforms {
            if !platform.rect.is_well_formed() {
                return Err(SimError::InvalidPlatform {
                    id: platform.id,
                    details: format!("{:?}", platform.rect),
                });
            }
            match platform.kind {
                PlatformKind::Breakable { health: 0 } => {
                    return Err(SimError::ExhaustedPlatform { id: platform.id });
                }
                PlatformKind::Moving(mover)
                    if !(mover.speed.is_finite() && mover.range.is_finite()) =>
                {
                    return Err(SimError::InvalidPlatform {
                        id: platform.id,
                        details: format!("mover {:?}", mover),
                    });
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Level bounds the actor is clamped to: `[start, end)`
    pub fn level_bounds(&self) -> (f32, f32) {
        let start = self.state.level_start_x;
        (start, start + self.tuning.level_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_starts_on_level_one() {
        let world = World::new(12345, Tuning::default()).unwrap();
        assert_eq!(world.state.current_level, 1);
        assert_eq!(world.state.lives, 3);
        assert_eq!(world.state.phase, GamePhase::Playing);
        assert_eq!(world.actor.rect.pos.x, 50.0);
        assert_eq!(world.actor.rect.pos.y, 200.0);
        assert!(world.actor.grounded);
        assert!(!world.platforms.is_empty());
        assert!(world.door.active);
    }

    #[test]
    fn test_world_rejects_bad_tuning() {
        let tuning = Tuning {
            max_level: 0,
            ..Default::default()
        };
        assert!(matches!(World::new(1, tuning), Err(SimError::Tuning(_))));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = World::new(42, Tuning::default()).unwrap();
        let b = World::new(42, Tuning::default()).unwrap();
        assert_eq!(a.platforms.len(), b.platforms.len());
        for (pa, pb) in a.platforms.iter().zip(&b.platforms) {
            assert_eq!(pa.rect, pb.rect);
            assert_eq!(pa.kind, pb.kind);
        }
        assert_eq!(a.coins.len(), b.coins.len());
    }

    #[test]
    fn test_mover_turns_around_past_range() {
        let mut rect = Rect::new(0.0, 100.0, 150.0, 20.0);
        let mut mover = Mover::new(0.0, 100.0, 2.0);

        // 50 steps reach exactly +100 (not past it), the 51st overshoots
        for _ in 0..50 {
            mover.advance(&mut rect);
        }
        assert_eq!(mover.direction, 1.0);
        mover.advance(&mut rect);
        assert_eq!(rect.pos.x, 102.0);
        assert_eq!(mover.direction, -1.0);
        assert_eq!(mover.last_dx, 2.0);

        mover.advance(&mut rect);
        assert_eq!(rect.pos.x, 100.0);
        assert_eq!(mover.last_dx, -2.0);
    }

    #[test]
    fn test_invincibility_countdown() {
        let mut actor = Actor::new(&Tuning::default(), 0.0);
        actor.grant_invincibility(2);
        actor.tick_invincibility();
        assert!(actor.invincible);
        actor.tick_invincibility();
        assert!(!actor.invincible);
        assert_eq!(actor.invincible_ticks, 0);
    }

    #[test]
    fn test_validate_flags_exhausted_breakable() {
        let mut world = World::new(7, Tuning::default()).unwrap();
        world.platforms.push(Platform {
            id: 999,
            rect: Rect::new(10.0, 10.0, 100.0, 20.0),
            kind: PlatformKind::Breakable { health: 0 },
        });
        assert!(matches!(
            world.validate(),
            Err(SimError::ExhaustedPlatform { id: 999 })
        ));
    }
}
