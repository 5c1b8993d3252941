//! Frame driver
//!
//! Glue between the host and the simulation: key and pointer edges flip
//! input flags, each frame runs at most one tick, the camera follows the
//! actor, and a render frame is built from the result. A faulting tick is
//! logged and rolled back so the loop never stops on a logic error.

use glam::Vec2;

use crate::consts::{RESTART_BUTTON_HEIGHT, RESTART_BUTTON_WIDTH};
use crate::renderer::scene::{Frame, build_frame};
use crate::sim::{GameEvent, GamePhase, PlatformKind, Rect, TickInput, World, rules, tick};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Space,
    R,
    Other,
}

/// Held-input flags, last writer wins
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFlags {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
}

impl InputFlags {
    pub fn to_tick_input(self) -> TickInput {
        TickInput {
            move_left: self.move_left,
            move_right: self.move_right,
            jump: self.jump,
        }
    }
}

/// Horizontal view window (purely a view transform)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    /// Center on `target_x`, clamped to the level segment `[start, start + level_width)`
    pub fn follow(&mut self, target_x: f32, level_start: f32, level_width: f32) {
        self.x = target_x - self.width / 2.0;
        if self.x < level_start {
            self.x = level_start;
        }
        if self.x > level_start + level_width - self.width {
            self.x = level_start + level_width - self.width;
        }
    }

    /// Whether a world-space rectangle is at least partly on screen
    pub fn sees(&self, rect: &Rect) -> bool {
        rect.spans_x(self.x, self.x + self.width)
    }
}

/// Screen-space restart control shown over a finished run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestartButton {
    pub rect: Rect,
    pub hovered: bool,
}

impl RestartButton {
    /// Centered horizontally, just below the middle of the viewport
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            rect: Rect::new(
                viewport_width / 2.0 - RESTART_BUTTON_WIDTH / 2.0,
                viewport_height / 2.0 + 50.0,
                RESTART_BUTTON_WIDTH,
                RESTART_BUTTON_HEIGHT,
            ),
            hovered: false,
        }
    }
}

/// Owns the world and steps it once per display frame
pub struct FrameDriver {
    pub world: World,
    pub input: InputFlags,
    pub camera: Camera,
    pub restart_button: RestartButton,
    /// Frames driven so far (also the render blink clock)
    pub frame: u64,
    /// Ticks abandoned because of a simulation fault
    pub faults: u64,
    /// Idle/demo mode - a simple autopilot supplies the input
    pub autopilot: bool,
    /// Events from the most recent tick
    pub last_events: Vec<GameEvent>,
}

impl FrameDriver {
    pub fn new(world: World) -> Self {
        let (width, height) = (world.tuning.viewport_width, world.tuning.viewport_height);
        let mut driver = Self {
            world,
            input: InputFlags::default(),
            camera: Camera::new(width, height),
            restart_button: RestartButton::new(width, height),
            frame: 0,
            faults: 0,
            autopilot: false,
            last_events: Vec::new(),
        };
        driver.update_camera();
        driver
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.input.move_left = true,
            Key::Right => self.input.move_right = true,
            Key::Up | Key::Space => self.input.jump = true,
            Key::R => {
                self.request_restart();
            }
            Key::Other => {}
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.input.move_left = false,
            Key::Right => self.input.move_right = false,
            Key::Up | Key::Space => self.input.jump = false,
            Key::R | Key::Other => {}
        }
    }

    /// Pointer moved to `pos` (screen space); hover only tracks in a terminal phase
    pub fn pointer_move(&mut self, pos: Vec2) {
        if self.world.state.can_restart() {
            self.restart_button.hovered = self.restart_button.rect.contains_point(pos);
        }
    }

    /// Pointer clicked; restarts when the button is hovered over a finished run
    pub fn click(&mut self) -> bool {
        self.restart_button.hovered && self.request_restart()
    }

    /// Restart the run if it has finished. Returns whether a reset happened.
    pub fn request_restart(&mut self) -> bool {
        if !self.world.state.can_restart() {
            log::warn!("Restart ignored while {:?}", self.world.state.phase);
            return false;
        }

        match rules::reset(&mut self.world) {
            Ok(()) => {
                self.restart_button.hovered = false;
                self.input = InputFlags::default();
                self.update_camera();
                true
            }
            Err(err) => {
                log::error!("Restart failed: {}", err);
                false
            }
        }
    }

    /// Run one frame: sample input, tick if playing, follow the actor, build the render frame
    pub fn step(&mut self) -> Frame {
        self.frame += 1;
        self.last_events.clear();

        if self.autopilot {
            self.input = self.autopilot_input();
            if self.world.state.can_restart() {
                self.request_restart();
            }
        }

        if self.world.state.phase == GamePhase::Playing {
            let snapshot = self.world.clone();
            match tick(&mut self.world, &self.input.to_tick_input()) {
                Ok(report) => self.last_events = report.events,
                Err(err) => {
                    log::error!("Tick abandoned on frame {}: {}", self.frame, err);
                    self.world = snapshot;
                    self.faults += 1;
                }
            }
        }

        self.update_camera();
        build_frame(&self.world, &self.camera, self.frame, &self.restart_button)
    }

    fn update_camera(&mut self) {
        let (start, _) = self.world.level_bounds();
        self.camera
            .follow(self.world.actor.rect.left(), start, self.world.tuning.level_width);
    }

    /// Demo input: run right, hop over spikes and gaps, and hop now and then
    pub fn autopilot_input(&self) -> InputFlags {
        let actor = &self.world.actor.rect;
        let look_ahead = actor.right() + 60.0;

        let hazard_ahead = self.world.platforms.iter().any(|p| {
            p.kind == PlatformKind::Spike
                && p.rect.right() > actor.left()
                && p.rect.left() < look_ahead
                && p.rect.top() >= actor.top()
        });

        // Standing on a raised platform whose edge is coming up
        let edge_ahead = self.world.actor.grounded
            && self.world.platforms.iter().any(|p| {
                (p.rect.top() - actor.bottom()).abs() < 1.0
                    && p.rect.top() < self.world.tuning.ground_y
                    && p.rect.spans_x(actor.left(), actor.right())
                    && p.rect.right() < look_ahead
            });

        let periodic = self.frame % 90 < 3;

        InputFlags {
            move_left: false,
            move_right: true,
            jump: hazard_ahead || edge_ahead || periodic,
        }
    }
}
