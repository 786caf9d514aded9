//! Coins, destructible power-up boxes and the power-ups they drop

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::physics::Collidable;
use super::rect::Rect;
use crate::consts::{BOX_SIZE, COIN_SIZE, POWER_UP_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    /// Doubles shot damage until it expires
    DamageBoost,
    /// Restores some health
    Heal,
}

impl PowerUpKind {
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            PowerUpKind::DamageBoost
        } else {
            PowerUpKind::Heal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coin {
    pub rect: Rect,
}

impl Coin {
    /// Coin centered on a point
    pub fn at(center: Vec2) -> Self {
        Self {
            rect: Rect::from_center(center, COIN_SIZE, COIN_SIZE),
        }
    }
}

/// Breakable crate that drops a power-up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUpBox {
    pub rect: Rect,
}

impl PowerUpBox {
    /// Box resting with its top-left corner at `pos`
    pub fn at(pos: Vec2) -> Self {
        Self {
            rect: Rect::new(pos.x, pos.y, BOX_SIZE, BOX_SIZE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUp {
    pub rect: Rect,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn at(center: Vec2, kind: PowerUpKind) -> Self {
        Self {
            rect: Rect::from_center(center, POWER_UP_SIZE, POWER_UP_SIZE),
            kind,
        }
    }
}

impl Collidable for Coin {
    fn hitbox(&self) -> Rect {
        self.rect
    }
}

impl Collidable for PowerUpBox {
    fn hitbox(&self) -> Rect {
        self.rect
    }
}

impl Collidable for PowerUp {
    fn hitbox(&self) -> Rect {
        self.rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_coin_centered() {
        let coin = Coin::at(Vec2::new(250.0, 400.0));
        assert_eq!(coin.rect.center(), Vec2::new(250.0, 400.0));
    }

    #[test]
    fn test_roll_is_deterministic_and_covers_both() {
        let mut a = Pcg32::seed_from_u64(7);
        let mut b = Pcg32::seed_from_u64(7);
        let rolls_a: Vec<_> = (0..32).map(|_| PowerUpKind::roll(&mut a)).collect();
        let rolls_b: Vec<_> = (0..32).map(|_| PowerUpKind::roll(&mut b)).collect();
        assert_eq!(rolls_a, rolls_b);
        assert!(rolls_a.contains(&PowerUpKind::DamageBoost));
        assert!(rolls_a.contains(&PowerUpKind::Heal));
    }
}
