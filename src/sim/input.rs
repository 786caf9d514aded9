//! Per-tick player intent
//!
//! The simulation only consumes [`Actions`]; keyboard, gamepad and gesture
//! devices are mapped to it by the host.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::direction_from_degrees;

/// `move_x` below this steers left
pub const MOVE_LEFT_THRESHOLD: f32 = 0.4;
/// `move_x` above this steers right
pub const MOVE_RIGHT_THRESHOLD: f32 = 0.6;

/// Aim direction for a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShootDirection {
    /// Along the facing direction
    #[default]
    Horizontal,
    Up,
    Down,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
    Left,
    Right,
}

impl ShootDirection {
    /// Unit vector for this direction (screen space, +y down)
    pub fn vector(self, facing_right: bool) -> Vec2 {
        let degrees = match self {
            ShootDirection::Horizontal => {
                if facing_right {
                    0.0
                } else {
                    180.0
                }
            }
            ShootDirection::Right => 0.0,
            ShootDirection::DownRight => 45.0,
            ShootDirection::Down => 90.0,
            ShootDirection::DownLeft => 135.0,
            ShootDirection::Left => 180.0,
            ShootDirection::UpLeft => 225.0,
            ShootDirection::Up => 270.0,
            ShootDirection::UpRight => 315.0,
        };
        direction_from_degrees(degrees)
    }

    /// Map an aim stick (x right, y down, already dead-zoned) to 8-way aim.
    /// A centered stick means horizontal.
    pub fn from_stick(x: f32, y: f32) -> Self {
        if x == 0.0 && y == 0.0 {
            return ShootDirection::Horizontal;
        }
        // Angle with +y up so sectors read like a compass
        let angle = (-y).atan2(x).to_degrees();
        match angle {
            a if (-22.5..22.5).contains(&a) => ShootDirection::Right,
            a if (22.5..67.5).contains(&a) => ShootDirection::UpRight,
            a if (67.5..112.5).contains(&a) => ShootDirection::Up,
            a if (112.5..157.5).contains(&a) => ShootDirection::UpLeft,
            a if (-67.5..-22.5).contains(&a) => ShootDirection::DownRight,
            a if (-112.5..-67.5).contains(&a) => ShootDirection::Down,
            a if (-157.5..-112.5).contains(&a) => ShootDirection::DownLeft,
            _ => ShootDirection::Left,
        }
    }
}

/// Horizontal steering derived from `move_x`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalIntent {
    Left,
    Neutral,
    Right,
}

impl HorizontalIntent {
    pub fn from_move_x(move_x: f32) -> Self {
        if move_x < MOVE_LEFT_THRESHOLD {
            HorizontalIntent::Left
        } else if move_x > MOVE_RIGHT_THRESHOLD {
            HorizontalIntent::Right
        } else {
            HorizontalIntent::Neutral
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            HorizontalIntent::Left => -1.0,
            HorizontalIntent::Neutral => 0.0,
            HorizontalIntent::Right => 1.0,
        }
    }
}

/// Input snapshot for one player for one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Actions {
    /// 0.0 = full left, 0.5 = neutral, 1.0 = full right
    pub move_x: f32,
    pub jump: bool,
    pub shoot: bool,
    pub shoot_direction: ShootDirection,
    pub dash: bool,
    pub switch_weapon: bool,
    pub activate_ultimate: bool,
}

impl Default for Actions {
    fn default() -> Self {
        Self {
            move_x: 0.5,
            jump: false,
            shoot: false,
            shoot_direction: ShootDirection::Horizontal,
            dash: false,
            switch_weapon: false,
            activate_ultimate: false,
        }
    }
}

impl Actions {
    pub fn intent(&self) -> HorizontalIntent {
        HorizontalIntent::from_move_x(self.move_x)
    }

    /// Any input at all (used to interrupt idle/emote)
    pub fn any(&self) -> bool {
        self.intent() != HorizontalIntent::Neutral
            || self.jump
            || self.shoot
            || self.dash
            || self.switch_weapon
            || self.activate_ultimate
    }
}
