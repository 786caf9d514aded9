//! Declarative level data and load-time validation
//!
//! Levels are plain data: platform rectangles, moving-platform parameters,
//! spawn lists, an optional boss descriptor and a gate. A level that fails
//! [`LevelData::validate`] never becomes a world.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::boss::{BossType, MAX_PHASES};
use super::platform::{Axis, MovingPlatform, Platform};
use super::rect::Rect;
use crate::consts::{BOSS_HEIGHT, BOSS_WIDTH, GATE_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH, TICK_MS};

/// Width of the single-screen boss arena
pub const ARENA_WIDTH: f32 = SCREEN_WIDTH;
/// Top of the arena floor
pub const ARENA_FLOOR_Y: f32 = 550.0;
/// Top of the two arena ledges
pub const ARENA_LEDGE_Y: f32 = 430.0;
/// Where players stand when the boss fight starts
pub const ARENA_PLAYER_SPAWN: Vec2 = Vec2::new(80.0, 480.0);
/// Clearance kept between the hovering boss and the ledges
const BOSS_LEDGE_CLEARANCE: f32 = 30.0;

const BUILTIN_LEVELS: [&str; 3] = [
    include_str!("../../levels/grassy_plains.json"),
    include_str!("../../levels/hazard_factory.json"),
    include_str!("../../levels/crystal_core.json"),
];

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to parse level data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown level id {0}")]
    UnknownLevel(u32),
    #[error("level has no platforms")]
    NoPlatforms,
    #[error("platform {index}: {reason}")]
    InvalidPlatform { index: usize, reason: &'static str },
    #[error("moving platform {index}: {reason}")]
    InvalidMovingPlatform { index: usize, reason: &'static str },
    #[error("enemy {index}: {reason}")]
    InvalidEnemy { index: usize, reason: &'static str },
    #[error("boss: {0}")]
    InvalidBoss(&'static str),
    #[error("unknown boss type {0}")]
    UnknownBossType(u8),
    #[error("boss gate without a boss descriptor")]
    MissingBoss,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingPlatformSpec {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub axis: Axis,
    /// Half-range of the oscillation
    pub range: f32,
    /// Signed speed; the sign is the starting direction
    pub speed: f32,
}

impl MovingPlatformSpec {
    pub fn build(&self) -> MovingPlatform {
        MovingPlatform::new(
            Rect::new(self.x, self.y, self.w, self.h),
            self.axis,
            self.range,
            self.speed.abs(),
            self.speed.signum(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpec {
    /// Top-left corner of the hitbox
    pub x: f32,
    pub y: f32,
    pub patrol_distance: f32,
    pub speed: f32,
    /// Seconds between shots
    pub shoot_cooldown: f32,
    /// Falls back to the tuned default
    #[serde(default)]
    pub health: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossSpec {
    /// 1, 2 or 3
    pub boss_type: u8,
    pub x: f32,
    pub y: f32,
    pub health: i32,
    /// Pixels per tick
    pub speed: f32,
    /// Ticks between volleys in phase 1
    pub shoot_interval: f32,
    pub phases: u8,
}

impl BossSpec {
    pub fn kind(&self) -> Result<BossType, LevelError> {
        BossType::from_id(self.boss_type).ok_or(LevelError::UnknownBossType(self.boss_type))
    }

    pub fn shoot_interval_ms(&self) -> f32 {
        self.shoot_interval * TICK_MS
    }

    /// Spawn point inside the arena: the authored x when it fits, else centered.
    /// Altitude is capped so the boss hovers above the ledges.
    pub fn spawn_pos(&self, arena_width: f32) -> Vec2 {
        let x = if self.x >= 0.0 && self.x + BOSS_WIDTH <= arena_width {
            self.x
        } else {
            (arena_width - BOSS_WIDTH) / 2.0
        };
        let y = self.y.min(ARENA_LEDGE_Y - BOSS_HEIGHT - BOSS_LEDGE_CLEARANCE);
        Vec2::new(x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    /// Starts the boss fight
    Boss,
    /// Ends the level straight away
    NextLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateSpec {
    pub x: f32,
    pub kind: GateKind,
}

fn default_world_height() -> f32 {
    600.0
}

fn default_player_spawn() -> Vec2 {
    Vec2::new(100.0, 400.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub id: u32,
    pub name: String,
    pub platforms: Vec<Rect>,
    #[serde(default)]
    pub moving_platforms: Vec<MovingPlatformSpec>,
    /// Coin centers
    #[serde(default)]
    pub coins: Vec<Vec2>,
    #[serde(default)]
    pub enemies: Vec<EnemySpec>,
    /// Top-left corners of the power-up boxes
    #[serde(default)]
    pub power_up_boxes: Vec<Vec2>,
    #[serde(default)]
    pub boss: Option<BossSpec>,
    pub gate: GateSpec,
    /// Lowest playable y; falling further than this ends the attempt
    #[serde(default = "default_world_height")]
    pub world_height: f32,
    #[serde(default = "default_player_spawn")]
    pub player_spawn: Vec2,
}

impl LevelData {
    /// Parse and validate a level
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: LevelData = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// One of the shipped levels (1..=3)
    pub fn builtin(id: u32) -> Result<Self, LevelError> {
        let json = id
            .checked_sub(1)
            .and_then(|i| BUILTIN_LEVELS.get(i as usize))
            .ok_or(LevelError::UnknownLevel(id))?;
        Self::from_json(json)
    }

    pub fn builtin_ids() -> impl Iterator<Item = u32> {
        1..=BUILTIN_LEVELS.len() as u32
    }

    /// Id of the level unlocked by clearing this one, if it exists
    pub fn next_level_id(&self) -> Option<u32> {
        let next = self.id + 1;
        Self::builtin_ids().any(|id| id == next).then_some(next)
    }

    pub fn validate(&self) -> Result<(), LevelError> {
        if self.platforms.is_empty() {
            return Err(LevelError::NoPlatforms);
        }
        for (index, p) in self.platforms.iter().enumerate() {
            if p.w <= 0.0 || p.h <= 0.0 {
                return Err(LevelError::InvalidPlatform {
                    index,
                    reason: "size must be positive",
                });
            }
        }
        for (index, m) in self.moving_platforms.iter().enumerate() {
            let reason = if m.w <= 0.0 || m.h <= 0.0 {
                Some("size must be positive")
            } else if m.range <= 0.0 {
                Some("range must be positive")
            } else if m.speed == 0.0 {
                Some("speed must be non-zero")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(LevelError::InvalidMovingPlatform { index, reason });
            }
        }
        for (index, e) in self.enemies.iter().enumerate() {
            let reason = if e.patrol_distance < 0.0 {
                Some("patrol distance must not be negative")
            } else if e.speed <= 0.0 {
                Some("speed must be positive")
            } else if e.shoot_cooldown <= 0.0 {
                Some("shoot cooldown must be positive")
            } else if e.health.is_some_and(|h| h <= 0) {
                Some("health must be positive")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(LevelError::InvalidEnemy { index, reason });
            }
        }
        if let Some(boss) = &self.boss {
            boss.kind()?;
            if boss.health <= 0 {
                return Err(LevelError::InvalidBoss("health must be positive"));
            }
            if boss.shoot_interval <= 0.0 {
                return Err(LevelError::InvalidBoss("shoot interval must be positive"));
            }
            if !(1..=MAX_PHASES).contains(&boss.phases) {
                return Err(LevelError::InvalidBoss("phases must be between 1 and 3"));
            }
            if boss.speed < 0.0 {
                return Err(LevelError::InvalidBoss("speed must not be negative"));
            }
        }
        if self.gate.kind == GateKind::Boss && self.boss.is_none() {
            return Err(LevelError::MissingBoss);
        }
        Ok(())
    }

    pub fn build_platforms(&self) -> Vec<Platform> {
        self.platforms.iter().map(|r| Platform { rect: *r }).collect()
    }

    pub fn build_moving_platforms(&self) -> Vec<MovingPlatform> {
        self.moving_platforms.iter().map(MovingPlatformSpec::build).collect()
    }

    /// Playable area. Anything whose top falls below `world_height` is out of the world.
    pub fn bounds(&self) -> Rect {
        let right = self
            .platforms
            .iter()
            .map(Rect::right)
            .chain(self.moving_platforms.iter().map(|m| m.x + m.w + m.range.max(0.0)))
            .fold(self.gate.x + GATE_WIDTH, f32::max);
        Rect::new(0.0, -SCREEN_HEIGHT, right, self.world_height + SCREEN_HEIGHT)
    }

    /// Gate trigger: a full-height column at the gate position
    pub fn gate_rect(&self) -> Rect {
        let bounds = self.bounds();
        Rect::new(self.gate.x, bounds.top(), GATE_WIDTH, bounds.h)
    }
}

/// Boss arena layout: a full-width floor and two ledges
pub fn arena_platforms() -> Vec<Platform> {
    vec![
        Platform::new(0.0, ARENA_FLOOR_Y, ARENA_WIDTH, 40.0),
        Platform::new(150.0, ARENA_LEDGE_Y, 200.0, 20.0),
        Platform::new(ARENA_WIDTH - 350.0, ARENA_LEDGE_Y, 200.0, 20.0),
    ]
}

/// Playable area of the boss arena
pub fn arena_bounds(world_height: f32) -> Rect {
    Rect::new(0.0, -SCREEN_HEIGHT, ARENA_WIDTH, world_height + SCREEN_HEIGHT)
}
