//! Platform Blaster - simulation core of a 2D action platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, AI, world pipeline)
//! - `persistence`: Meta-progression record (loadout, save blob, shop)
//! - `settings`: Data-driven tuning knobs
//! - `audio`: Event to sound-cue mapping

pub mod audio;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use persistence::{Loadout, ProgressDelta, SaveData};
pub use settings::Tuning;

use glam::Vec2;
use thiserror::Error;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the rate all per-tick speeds are tuned for)
    pub const SIM_HZ: u32 = 60;
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Milliseconds per tick
    pub const TICK_MS: f32 = 1000.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Maximum simultaneous local players
    pub const MAX_PLAYERS: usize = 2;

    /// Visible screen size (boss arena is one screen)
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;
    /// Distance below the level floor after which a body is out of the world
    pub const FALL_MARGIN: f32 = 200.0;

    /// Player hitbox (smaller than the 64x64 sprite)
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;

    pub const ENEMY_WIDTH: f32 = 40.0;
    pub const ENEMY_HEIGHT: f32 = 50.0;

    pub const BOSS_WIDTH: f32 = 100.0;
    pub const BOSS_HEIGHT: f32 = 100.0;

    pub const COIN_SIZE: f32 = 20.0;
    pub const BOX_SIZE: f32 = 40.0;
    pub const POWER_UP_SIZE: f32 = 24.0;

    pub const GATE_WIDTH: f32 = 40.0;

    /// Projectile extents
    pub const SHOT_SIZE: f32 = 10.0;
    pub const ULTIMATE_SHOT_SIZE: f32 = 40.0;
    pub const ENEMY_SHOT_SIZE: f32 = 10.0;
    pub const BOSS_SHOT_SIZE: f32 = 16.0;
}

/// Crate level error for callers that load data and run a level
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Level(#[from] sim::LevelError),
    #[error(transparent)]
    Config(#[from] settings::ConfigError),
    #[error(transparent)]
    Shop(#[from] persistence::ShopError),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Unit vector for an angle in degrees (screen space, +y is down)
#[inline]
pub fn direction_from_degrees(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Rotate a vector by an angle in degrees
#[inline]
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Seconds to whole ticks (rounded, at least one for non-zero durations)
#[inline]
pub fn secs_to_ticks(secs: f32) -> u64 {
    if secs <= 0.0 {
        return 0;
    }
    ((secs * consts::SIM_HZ as f32).round() as u64).max(1)
}

/// Milliseconds to whole ticks
#[inline]
pub fn ms_to_ticks(ms: f32) -> u64 {
    secs_to_ticks(ms / 1000.0)
}
