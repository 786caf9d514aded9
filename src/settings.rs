//! Gameplay tuning knobs
//!
//! Every design constant the simulation reads lives here so balance changes
//! never touch gameplay code. Values are per 60 Hz tick unless noted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected tuning data
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Movement ===
    /// Downward acceleration (px/tick²)
    pub gravity: f32,
    /// Maximum fall speed (px/tick)
    pub terminal_velocity: f32,
    /// Horizontal run speed (px/tick)
    pub run_speed: f32,
    /// Initial vertical velocity of a jump (negative = up)
    pub jump_power: f32,

    // === Dash ===
    pub dash_speed: f32,
    pub dash_duration_ms: f32,
    pub dash_cooldown_ms: f32,

    // === Player combat ===
    pub player_health: i32,
    /// Extra max health granted by the `health_up` upgrade
    pub health_upgrade_bonus: i32,
    pub base_shot_damage: i32,
    /// Extra damage per `damage_up` upgrade level
    pub damage_per_upgrade: i32,
    pub shot_speed: f32,
    pub shot_lifetime_ticks: u32,
    /// Power-up damage boost duration (seconds)
    pub boost_duration_secs: f32,
    pub heal_amount: i32,
    /// Invulnerability after taking a hit (ticks)
    pub player_hurt_ticks: u32,

    // === Ultimate ===
    pub ultimate_max_meter: u32,
    pub ultimate_damage_multiplier: i32,
    pub ultimate_speed: f32,

    // === Idle / emote ===
    pub idle_timeout_min_secs: f32,
    pub idle_timeout_max_secs: f32,
    pub emote_frames: u32,
    pub emote_ticks_per_frame: u32,

    // === Enemies ===
    pub enemy_health: i32,
    pub enemy_detection_range: f32,
    pub enemy_shot_speed: f32,
    pub enemy_shot_damage: i32,
    /// Fraction of the player hitbox height the enemy aims at (0 = head, 1 = feet)
    pub enemy_aim_height: f32,

    // === Boss ===
    pub boss_shot_speed: f32,
    pub boss_shot_damage: i32,
    pub boss_contact_damage: i32,
    /// Post-hit invulnerability window (ticks)
    pub boss_flash_ticks: u32,
    /// Angular step of the rotating pattern (degrees per volley)
    pub boss_spiral_step_deg: f32,
    pub explosion_frames: u32,
    pub explosion_ticks_per_frame: u32,

    // === Scoring ===
    pub coin_score: u64,
    pub enemy_score: u64,
    pub boss_score: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            terminal_velocity: 15.0,
            run_speed: 5.0,
            jump_power: -12.0,

            dash_speed: 15.0,
            dash_duration_ms: 200.0,
            dash_cooldown_ms: 800.0,

            player_health: 100,
            health_upgrade_bonus: 25,
            base_shot_damage: 10,
            damage_per_upgrade: 5,
            shot_speed: 12.0,
            shot_lifetime_ticks: 120,
            boost_duration_secs: 10.0,
            heal_amount: 25,
            player_hurt_ticks: 45,

            ultimate_max_meter: 5,
            ultimate_damage_multiplier: 10,
            ultimate_speed: 9.0,

            idle_timeout_min_secs: 5.0,
            idle_timeout_max_secs: 10.0,
            emote_frames: 8,
            emote_ticks_per_frame: 6,

            enemy_health: 30,
            enemy_detection_range: 500.0,
            enemy_shot_speed: 5.0,
            enemy_shot_damage: 10,
            enemy_aim_height: 0.75,

            boss_shot_speed: 5.0,
            boss_shot_damage: 25,
            boss_contact_damage: 20,
            boss_flash_ticks: 6,
            boss_spiral_step_deg: 15.0,
            explosion_frames: 10,
            explosion_ticks_per_frame: 5,

            coin_score: 10,
            enemy_score: 100,
            boss_score: 1000,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON (missing fields keep their defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gravity <= 0.0 {
            return Err(ConfigError::Invalid { field: "gravity", reason: "must be positive" });
        }
        if self.terminal_velocity <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "terminal_velocity",
                reason: "must be positive",
            });
        }
        if self.jump_power >= 0.0 {
            return Err(ConfigError::Invalid {
                field: "jump_power",
                reason: "must be negative (upward)",
            });
        }
        if self.idle_timeout_min_secs <= 0.0
            || self.idle_timeout_max_secs < self.idle_timeout_min_secs
        {
            return Err(ConfigError::Invalid {
                field: "idle_timeout_max_secs",
                reason: "idle timeout range is empty",
            });
        }
        if self.ultimate_max_meter == 0 {
            return Err(ConfigError::Invalid {
                field: "ultimate_max_meter",
                reason: "must be at least 1",
            });
        }
        if self.player_health <= 0 {
            return Err(ConfigError::Invalid { field: "player_health", reason: "must be positive" });
        }
        if self.emote_frames == 0 || self.explosion_frames == 0 {
            return Err(ConfigError::Invalid {
                field: "explosion_frames",
                reason: "animations need at least one frame",
            });
        }
        Ok(())
    }
}
