//! Fixed timestep simulation tick
//!
//! One call advances the world by one display frame: move, fall, collect,
//! collide, clamp, and check the exit. Outcomes are applied through `rules`
//! and reported back in order.

use super::collision::{lands_on, overlaps};
use super::error::SimError;
use super::rules;
use super::state::{DeathCause, GameEvent, PlatformKind, World};

/// Held input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
}

/// What happened during a tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
}

impl TickReport {
    pub fn died(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::Died { .. }))
    }

    pub fn coins_collected(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::CoinCollected { .. }))
            .count()
    }
}

/// Advance the world by one tick
///
/// Terminal phases are a no-op. The world is validated before anything is
/// touched, so an `Err` always leaves it as it was.
pub fn tick(world: &mut World, input: &TickInput) -> Result<TickReport, SimError> {
    let mut report = TickReport::default();
    if world.state.phase.is_terminal() {
        return Ok(report);
    }
    world.validate()?;

    let World {
        actor,
        platforms,
        coins,
        state,
        tuning,
        ..
    } = world;

    // Horizontal movement (both held cancels out)
    if input.move_left {
        actor.rect.pos.x -= actor.speed;
    }
    if input.move_right {
        actor.rect.pos.x += actor.speed;
    }

    actor.tick_invincibility();

    if input.jump && actor.grounded {
        actor.vel_y = -actor.jump_force;
        actor.grounded = false;
    }

    actor.vel_y += tuning.gravity;
    actor.rect.pos.y += actor.vel_y;

    actor.carrier = None;
    actor.carry_dx = 0.0;

    // Coins
    for coin in coins.iter_mut() {
        if !coin.collected && overlaps(&actor.rect, &coin.rect) {
            coin.collected = true;
            state.coins += 1;
            rules::add_score(state, tuning.coin_value);
            report.events.push(GameEvent::CoinCollected { id: coin.id });
            log::debug!("Coin {} collected ({} total)", coin.id, state.coins);
        }
    }
    coins.retain(|c| !c.collected);

    // Platforms, newest first. Broken ones are dropped after the pass.
    actor.grounded = false;
    let mut died = false;
    let mut broken = Vec::new();

    for platform in platforms.iter_mut().rev() {
        if let PlatformKind::Moving(mover) = &mut platform.kind {
            mover.advance(&mut platform.rect);
        }

        if !overlaps(&actor.rect, &platform.rect) {
            continue;
        }

        match &mut platform.kind {
            // One death per tick: the respawn makes the actor invincible
            PlatformKind::Spike if !actor.invincible && !died => {
                died = true;
                continue;
            }
            PlatformKind::Breakable { health } if actor.vel_y > 0.0 => {
                *health = health.saturating_sub(1);
                if *health == 0 {
                    broken.push(platform.id);
                    rules::add_score(state, tuning.breakable_bonus);
                    report.events.push(GameEvent::PlatformBroken { id: platform.id });
                    continue;
                }
            }
            _ => {}
        }

        if lands_on(&actor.rect, actor.vel_y, &platform.rect) {
            actor.rect.pos.y = platform.rect.top() - actor.rect.size.y;
            actor.vel_y = 0.0;
            actor.grounded = true;

            if let PlatformKind::Moving(mover) = platform.kind {
                actor.carrier = Some(platform.id);
                actor.carry_dx = mover.last_dx;
            }
        }
    }

    if !broken.is_empty() {
        platforms.retain(|p| !broken.contains(&p.id));
    }

    if died {
        report
            .events
            .extend(rules::kill_actor(world, DeathCause::Spike));
        return Ok(report);
    }

    if actor.carrier.is_some() {
        actor.rect.pos.x += actor.carry_dx;
    }

    // Keep the actor inside the level segment and above the floor
    let level_start = state.level_start_x;
    let level_end = level_start + tuning.level_width;
    if actor.rect.left() < level_start {
        actor.rect.pos.x = level_start;
    }
    if actor.rect.right() > level_end {
        actor.rect.pos.x = level_end - actor.rect.size.x;
    }
    if actor.rect.bottom() > tuning.viewport_height {
        actor.rect.pos.y = tuning.viewport_height - actor.rect.size.y;
        actor.vel_y = 0.0;
        actor.grounded = true;
    }

    if world.door.active && overlaps(&world.actor.rect, &world.door.rect) {
        report.events.push(rules::complete_level(world)?);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rect::Rect;
    use crate::sim::state::{Coin, GamePhase, Mover, Platform};
    use crate::tuning::Tuning;

    /// A world with nothing but the ground, the door far away, and no coins
    fn bare_world() -> World {
        let mut world = World::new(1, Tuning::default()).unwrap();
        world.platforms.truncate(1);
        world.coins.clear();
        world
    }

    fn push_platform(world: &mut World, rect: Rect, kind: PlatformKind) -> u32 {
        let id = world.ids.next_id();
        world.platforms.push(Platform { id, rect, kind });
        id
    }

    /// Place the actor so that after one tick of gravity its bottom sinks just below `top`
    fn drop_onto(world: &mut World, x: f32, top: f32) {
        world.actor.rect.pos = glam::Vec2::new(x, top - world.actor.rect.size.y - 1.0);
        world.actor.vel_y = 2.0;
    }

    #[test]
    fn test_horizontal_movement() {
        let mut world = bare_world();
        let start = world.actor.rect.pos.x;

        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        tick(&mut world, &right).unwrap();
        assert_eq!(world.actor.rect.pos.x, start + 5.0);

        let both = TickInput {
            move_left: true,
            move_right: true,
            ..Default::default()
        };
        tick(&mut world, &both).unwrap();
        assert_eq!(world.actor.rect.pos.x, start + 5.0);
    }

    #[test]
    fn test_gravity_always_applies() {
        let mut world = bare_world();
        let y = world.actor.rect.pos.y;
        tick(&mut world, &TickInput::default()).unwrap();
        assert_eq!(world.actor.vel_y, 0.5);
        assert_eq!(world.actor.rect.pos.y, y + 0.5);
    }

    #[test]
    fn test_lands_on_ground_and_jumps() {
        let mut world = bare_world();
        for _ in 0..60 {
            tick(&mut world, &TickInput::default()).unwrap();
        }
        assert!(world.actor.grounded);
        assert_eq!(world.actor.vel_y, 0.0);
        assert_eq!(world.actor.rect.bottom(), 350.0);

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut world, &jump).unwrap();
        assert!(!world.actor.grounded);
        assert_eq!(world.actor.vel_y, -11.5);

        // Holding jump mid-air does nothing
        tick(&mut world, &jump).unwrap();
        assert_eq!(world.actor.vel_y, -11.0);
    }

    #[test]
    fn test_landing_snaps_to_platform_top() {
        let mut world = bare_world();
        push_platform(&mut world, Rect::new(0.0, 250.0, 200.0, 20.0), PlatformKind::Normal);
        drop_onto(&mut world, 60.0, 250.0);

        tick(&mut world, &TickInput::default()).unwrap();
        assert_eq!(world.actor.rect.bottom(), 250.0);
        assert_eq!(world.actor.vel_y, 0.0);
        assert!(world.actor.grounded);
    }

    #[test]
    fn test_no_landing_when_rising_through() {
        let mut world = bare_world();
        push_platform(&mut world, Rect::new(0.0, 250.0, 200.0, 20.0), PlatformKind::Normal);
        world.actor.rect.pos = glam::Vec2::new(60.0, 255.0);
        world.actor.vel_y = -8.0;

        tick(&mut world, &TickInput::default()).unwrap();
        assert!(!world.actor.grounded);
        assert_eq!(world.actor.vel_y, -7.5);
    }

    #[test]
    fn test_moving_platform_carries_actor() {
        let mut world = bare_world();
        let id = push_platform(
            &mut world,
            Rect::new(40.0, 250.0, 150.0, 20.0),
            PlatformKind::Moving(Mover::new(40.0, 100.0, 2.0)),
        );
        drop_onto(&mut world, 60.0, 250.0);

        tick(&mut world, &TickInput::default()).unwrap();
        assert_eq!(world.actor.carrier, Some(id));
        assert_eq!(world.actor.carry_dx, 2.0);
        assert_eq!(world.actor.rect.pos.x, 62.0);
        assert_eq!(world.platforms[1].rect.pos.x, 42.0);

        // Carrier is cleared every tick and re-established on contact
        tick(&mut world, &TickInput::default()).unwrap();
        assert_eq!(world.actor.carrier, Some(id));
        assert_eq!(world.actor.rect.pos.x, 64.0);
    }

    #[test]
    fn test_spike_kills_once_per_tick() {
        let mut world = bare_world();
        push_platform(&mut world, Rect::new(40.0, 250.0, 150.0, 15.0), PlatformKind::Spike);
        push_platform(&mut world, Rect::new(40.0, 245.0, 150.0, 15.0), PlatformKind::Spike);
        drop_onto(&mut world, 60.0, 250.0);

        let report = tick(&mut world, &TickInput::default()).unwrap();
        assert_eq!(
            report.events,
            vec![GameEvent::Died {
                cause: DeathCause::Spike
            }]
        );
        assert_eq!(world.state.lives, 2);
        assert_eq!(world.actor.rect.pos.x, 50.0);
        assert_eq!(world.actor.rect.pos.y, 200.0);
        assert!(!world.actor.grounded);
    }

    #[test]
    fn test_respawn_voids_landing_in_same_tick() {
        let mut world = bare_world();
        push_platform(
            &mut world,
            Rect::new(40.0, 250.0, 150.0, 20.0),
            PlatformKind::Moving(Mover::new(40.0, 100.0, 2.0)),
        );
        push_platform(&mut world, Rect::new(40.0, 250.0, 150.0, 15.0), PlatformKind::Spike);
        drop_onto(&mut world, 60.0, 250.0);

        let report = tick(&mut world, &TickInput::default()).unwrap();
        assert!(report.died());
        assert_eq!(world.actor.rect.pos.y, 200.0);
        assert!(!world.actor.grounded);
        assert_eq!(world.actor.carrier, None);

        // No jump from the mid-air spawn point
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut world, &jump).unwrap();
        assert!(world.actor.vel_y > 0.0);
        assert_eq!(world.actor.rect.pos.y, 200.5);
    }

    #[test]
    fn test_jump_on_first_tick() {
        let mut world = bare_world();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut world, &jump).unwrap();
        assert_eq!(world.actor.vel_y, -11.5);
        assert_eq!(world.actor.rect.pos.y, 188.5);
        assert!(!world.actor.grounded);
    }

    #[test]
    fn test_invincible_actor_stands_on_spikes() {
        let mut world = bare_world();
        push_platform(&mut world, Rect::new(40.0, 250.0, 150.0, 15.0), PlatformKind::Spike);
        world.actor.grant_invincibility(30);
        drop_onto(&mut world, 60.0, 250.0);

        let report = tick(&mut world, &TickInput::default()).unwrap();
        assert!(!report.died());
        assert!(world.actor.grounded);
        assert_eq!(world.actor.rect.bottom(), 250.0);
    }

    #[test]
    fn test_breakable_loses_health_then_breaks() {
        let mut world = bare_world();
        let id = push_platform(
            &mut world,
            Rect::new(40.0, 250.0, 150.0, 20.0),
            PlatformKind::Breakable { health: 2 },
        );
        drop_onto(&mut world, 60.0, 250.0);

        tick(&mut world, &TickInput::default()).unwrap();
        assert_eq!(world.platforms[1].kind, PlatformKind::Breakable { health: 1 });
        // Still lands on a damaged platform
        assert!(world.actor.grounded);

        let report = tick(&mut world, &TickInput::default()).unwrap();
        assert_eq!(report.events, vec![GameEvent::PlatformBroken { id }]);
        assert_eq!(world.platforms.len(), 1);
        assert_eq!(world.state.score, 50);
        assert!(!world.actor.grounded);
    }

    #[test]
    fn test_coin_collected_once() {
        let mut world = bare_world();
        let id = world.ids.next_id();
        let actor = world.actor.rect;
        world.coins.push(Coin {
            id,
            rect: Rect::new(actor.left() + 5.0, actor.top() + 5.0, 20.0, 20.0),
            collected: false,
        });

        let report = tick(&mut world, &TickInput::default()).unwrap();
        assert_eq!(report.events, vec![GameEvent::CoinCollected { id }]);
        assert_eq!(world.state.coins, 1);
        assert_eq!(world.state.score, 100);
        assert!(world.coins.is_empty());

        let report = tick(&mut world, &TickInput::default()).unwrap();
        assert_eq!(report.coins_collected(), 0);
        assert_eq!(world.state.coins, 1);
    }

    #[test]
    fn test_clamped_to_level_bounds() {
        let mut world = bare_world();
        world.actor.rect.pos.x = 2.0;
        let left = TickInput {
            move_left: true,
            ..Default::default()
        };
        tick(&mut world, &left).unwrap();
        assert_eq!(world.actor.rect.pos.x, 0.0);

        world.actor.rect.pos.x = 2968.0;
        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        world.door.active = false;
        tick(&mut world, &right).unwrap();
        assert_eq!(world.actor.rect.pos.x, 2970.0);
    }

    #[test]
    fn test_floor_clamp_without_ground() {
        let mut world = bare_world();
        world.platforms.clear();
        world.actor.rect.pos.y = 368.0;
        world.actor.vel_y = 10.0;

        tick(&mut world, &TickInput::default()).unwrap();
        assert_eq!(world.actor.rect.bottom(), 400.0);
        assert_eq!(world.actor.vel_y, 0.0);
        assert!(world.actor.grounded);
    }

    #[test]
    fn test_door_advances_level() {
        let mut world = bare_world();
        world.actor.rect.pos = world.door.rect.pos;

        let report = tick(&mut world, &TickInput::default()).unwrap();
        assert_eq!(report.events, vec![GameEvent::LevelAdvanced { level: 2 }]);
        assert_eq!(world.state.current_level, 2);
        assert_eq!(world.actor.rect.pos.x, 3050.0);
    }

    #[test]
    fn test_terminal_phase_is_noop() {
        let mut world = bare_world();
        world.state.phase = GamePhase::GameOver;
        let before = world.actor.rect;

        let report = tick(
            &mut world,
            &TickInput {
                move_right: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(report.events.is_empty());
        assert_eq!(world.actor.rect, before);
    }

    #[test]
    fn test_invalid_world_is_rejected_untouched() {
        let mut world = bare_world();
        push_platform(&mut world, Rect::new(0.0, 0.0, -5.0, 20.0), PlatformKind::Normal);
        let before = world.actor.rect;

        let result = tick(&mut world, &TickInput::default());
        assert!(matches!(result, Err(SimError::InvalidPlatform { .. })));
        assert_eq!(world.actor.rect, before);
    }

    #[test]
    fn test_determinism() {
        let mut a = World::new(99999, Tuning::default()).unwrap();
        let mut b = World::new(99999, Tuning::default()).unwrap();

        let inputs = [
            TickInput {
                move_right: true,
                ..Default::default()
            },
            TickInput {
                move_right: true,
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..300 {
            let input = &inputs[i % inputs.len()];
            let ra = tick(&mut a, input).unwrap();
            let rb = tick(&mut b, input).unwrap();
            assert_eq!(ra, rb);
        }

        assert_eq!(a.actor.rect, b.actor.rect);
        assert_eq!(a.state.score, b.state.score);
        assert_eq!(a.platforms.len(), b.platforms.len());
    }
}
