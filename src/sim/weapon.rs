//! Weapon modes and shot patterns
//!
//! Weapons are not player states: the equipped mode only selects which
//! pattern a shot request expands into.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::SHOT_SIZE;
use crate::persistence::Loadout;
use crate::rotate_degrees;

/// Spread shot fan half-angle (degrees)
pub const SPREAD_ANGLE_DEG: f32 = 15.0;
/// Spacing between burst rounds along the firing line
pub const BURST_SPACING: f32 = 18.0;
pub const BURST_ROUNDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    Default,
    SpreadShot,
    BurstShot,
}

impl WeaponKind {
    /// Ticks between shots
    pub fn cooldown_ticks(self) -> u64 {
        match self {
            WeaponKind::Default => 12,
            WeaponKind::SpreadShot => 18,
            WeaponKind::BurstShot => 24,
        }
    }

    pub fn shot_event_name(self) -> &'static str {
        match self {
            WeaponKind::Default => "default_shot",
            WeaponKind::SpreadShot => "spread_shot",
            WeaponKind::BurstShot => "burst_shot",
        }
    }

    /// Expand one shot request into projectile spawns
    pub fn fire(self, origin: Vec2, dir: Vec2, speed: f32, damage: i32) -> Vec<ShotSpec> {
        let dir = dir.normalize_or(Vec2::X);
        match self {
            WeaponKind::Default => vec![ShotSpec::new(origin, dir * speed, damage, SHOT_SIZE)],
            WeaponKind::SpreadShot => [-SPREAD_ANGLE_DEG, 0.0, SPREAD_ANGLE_DEG]
                .iter()
                .map(|deg| ShotSpec::new(origin, rotate_degrees(dir, *deg) * speed, damage, SHOT_SIZE))
                .collect(),
            WeaponKind::BurstShot => (0..BURST_ROUNDS)
                .map(|i| {
                    let pos = origin - dir * BURST_SPACING * i as f32;
                    ShotSpec::new(pos, dir * speed, damage, SHOT_SIZE)
                })
                .collect(),
        }
    }
}

/// Weapons the loadout allows, in switch order. `Default` is always first.
pub fn unlocked_weapons(loadout: &Loadout) -> Vec<WeaponKind> {
    let mut weapons = vec![WeaponKind::Default];
    if loadout.upgrades.spread_shot {
        weapons.push(WeaponKind::SpreadShot);
    }
    if loadout.upgrades.burst_shot {
        weapons.push(WeaponKind::BurstShot);
    }
    weapons
}

/// A projectile to spawn, centered on `pos`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotSpec {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: i32,
    pub size: f32,
}

impl ShotSpec {
    pub fn new(pos: Vec2, vel: Vec2, damage: i32, size: f32) -> Self {
        Self {
            pos,
            vel,
            damage,
            size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_single_projectile() {
        let shots = WeaponKind::Default.fire(Vec2::ZERO, Vec2::X, 10.0, 7);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].vel, Vec2::new(10.0, 0.0));
        assert_eq!(shots[0].damage, 7);
    }

    #[test]
    fn test_spread_fans_fifteen_degrees() {
        let shots = WeaponKind::SpreadShot.fire(Vec2::ZERO, Vec2::X, 10.0, 5);
        assert_eq!(shots.len(), 3);
        let angles: Vec<f32> = shots.iter().map(|s| s.vel.y.atan2(s.vel.x).to_degrees()).collect();
        assert!((angles[0] + 15.0).abs() < 1e-3);
        assert!(angles[1].abs() < 1e-3);
        assert!((angles[2] - 15.0).abs() < 1e-3);
        assert!(shots.iter().all(|s| (s.vel.length() - 10.0).abs() < 1e-3));
    }

    #[test]
    fn test_burst_is_offset_along_line() {
        let shots = WeaponKind::BurstShot.fire(Vec2::new(100.0, 0.0), Vec2::X, 10.0, 5);
        assert_eq!(shots.len(), 3);
        assert!(shots.iter().all(|s| s.vel == Vec2::new(10.0, 0.0)));
        assert_eq!(shots[1].pos.x, 100.0 - BURST_SPACING);
        assert_eq!(shots[2].pos.x, 100.0 - 2.0 * BURST_SPACING);
    }

    #[test]
    fn test_unlocked_weapons_follow_upgrades() {
        let mut loadout = Loadout::default();
        assert_eq!(unlocked_weapons(&loadout), vec![WeaponKind::Default]);
        loadout.upgrades.burst_shot = true;
        assert_eq!(unlocked_weapons(&loadout), vec![WeaponKind::Default, WeaponKind::BurstShot]);
        loadout.upgrades.spread_shot = true;
        assert_eq!(unlocked_weapons(&loadout).len(), 3);
    }
}
