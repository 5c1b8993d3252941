//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (generation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod error;
pub mod level;
pub mod rect;
pub mod rules;
pub mod state;
pub mod tick;

pub use collision::{lands_on, overlaps};
pub use error::SimError;
pub use level::{Level, generate_coins, generate_layout, generate_level};
pub use rect::Rect;
pub use rules::{add_score, complete_level, kill_actor, reset};
pub use state::{
    Actor, Coin, DeathCause, Door, EntityIds, GameEvent, GamePhase, GameState, Mover, Platform,
    PlatformKind, RngState, World,
};
pub use tick::{TickInput, TickReport, tick};
