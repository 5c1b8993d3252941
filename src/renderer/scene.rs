//! Per-frame scene assembly
//!
//! Reads the world, never writes it. Only things inside the camera window
//! are emitted; coordinates are shifted into screen space.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::driver::{Camera, RestartButton};
use crate::sim::{Actor, GamePhase, Platform, PlatformKind, Rect, World};

/// Frames per blink phase while invincible (~100 ms at 60 Hz)
const BLINK_FRAMES: u64 = 6;

/// Segments used for coin circles
const COIN_SEGMENTS: u32 = 16;

/// Everything the render surface needs for one frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Triangle list, screen space
    pub vertices: Vec<Vertex>,
    /// HUD lines, top-left, in display order
    pub hud: Vec<String>,
    /// End-of-run panel (terminal phases only)
    pub overlay: Option<Overlay>,
}

/// End-of-run panel text
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub message: &'static str,
    pub lines: Vec<String>,
    pub button: Rect,
    pub button_label: &'static str,
    pub hint: &'static str,
}

/// Blink phase comes from the frame counter, not wall-clock time
pub fn actor_visible(actor: &Actor, frame: u64) -> bool {
    !actor.invincible || (frame / BLINK_FRAMES) % 2 == 0
}

fn to_screen(rect: &Rect, camera: &Camera) -> Rect {
    Rect {
        pos: Vec2::new(rect.pos.x - camera.x, rect.pos.y - camera.y),
        size: rect.size,
    }
}

fn platform_color(platform: &Platform) -> [f32; 4] {
    match platform.kind {
        PlatformKind::Normal => colors::PLATFORM_NORMAL,
        PlatformKind::Moving(_) => colors::PLATFORM_MOVING,
        PlatformKind::Breakable { .. } => colors::PLATFORM_BREAKABLE,
        PlatformKind::Spike => colors::PLATFORM_SPIKE,
    }
}

/// Build the render frame for the current world snapshot
pub fn build_frame(
    world: &World,
    camera: &Camera,
    frame: u64,
    restart_button: &RestartButton,
) -> Frame {
    let mut vertices = Vec::new();

    for platform in world.platforms.iter().filter(|p| camera.sees(&p.rect)) {
        let rect = to_screen(&platform.rect, camera);
        vertices.extend(shapes::quad(&rect, platform_color(platform)));
        if platform.is_spike() {
            vertices.extend(shapes::spike_row(&rect, colors::SPIKE_TEETH));
        }
    }

    for coin in world
        .coins
        .iter()
        .filter(|c| !c.collected && camera.sees(&c.rect))
    {
        let rect = to_screen(&coin.rect, camera);
        let radius = rect.size.x / 2.0;
        vertices.extend(shapes::circle(rect.center(), radius, colors::COIN, COIN_SEGMENTS));
        let shine = rect.pos + rect.size / 3.0;
        vertices.extend(shapes::circle(
            shine,
            rect.size.x / 6.0,
            colors::COIN_SHINE,
            COIN_SEGMENTS / 2,
        ));
    }

    if camera.sees(&world.door.rect) {
        let rect = to_screen(&world.door.rect, camera);
        vertices.extend(shapes::quad(&rect, colors::DOOR));
        vertices.extend(shapes::frame_outline(&rect, 2.0, [0.0, 0.0, 0.0, 1.0]));
    }

    if actor_visible(&world.actor, frame) {
        let rect = to_screen(&world.actor.rect, camera);
        vertices.extend(shapes::quad(&rect, colors::ACTOR));
    }

    let state = &world.state;
    let (level_start, _) = world.level_bounds();
    let hud = vec![
        format!("Level: {}/{}", state.current_level, state.max_level),
        format!(
            "Distance: {}m",
            (world.actor.rect.left() - level_start).floor() as i64
        ),
        format!("Lives: {}", state.lives),
        format!("Score: {}", state.score),
        format!("High Score: {}", state.high_score),
        format!("Coins: {}", state.coins),
    ];

    let overlay = match state.phase {
        GamePhase::Playing => None,
        phase => {
            let screen = Rect::new(0.0, 0.0, camera.width, camera.height);
            vertices.extend(shapes::quad(&screen, colors::OVERLAY));
            let button_color = if restart_button.hovered {
                colors::BUTTON_HOVER
            } else {
                colors::BUTTON
            };
            vertices.extend(shapes::quad(&restart_button.rect, button_color));

            Some(Overlay {
                message: if phase == GamePhase::GameOver {
                    "Game Over!"
                } else {
                    "Game Completed!"
                },
                lines: vec![
                    format!("Final Score: {}", state.score),
                    format!("High Score: {}", state.high_score),
                ],
                button: restart_button.rect,
                button_label: "Restart Game",
                hint: "Press R to restart",
            })
        }
    };

    Frame {
        vertices,
        hud,
        overlay,
    }
}
