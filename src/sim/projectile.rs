//! Projectiles for players, enemies and the boss

use glam::Vec2;

use super::collision::{Solid, first_overlap};
use super::physics::{Body, Collidable, integrate};
use super::rect::Rect;
use super::weapon::ShotSpec;

/// Who fired a projectile (decides which targets it can hit)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileOwner {
    /// Player slot index
    Player(usize),
    Enemy,
    Boss,
}

/// Why a projectile left play this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    OutOfBounds,
    Lifetime,
    HitSolid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub body: Body,
    pub damage: i32,
    pub owner: ProjectileOwner,
    /// Ticks left before expiring; `None` = only bounds/solids remove it
    pub ttl_ticks: Option<u32>,
    /// Charged ultimate shot (larger sprite and hitbox)
    pub ultimate: bool,
}

impl Projectile {
    pub fn from_spec(spec: &ShotSpec, owner: ProjectileOwner) -> Self {
        let mut body = Body::new(Rect::from_center(spec.pos, spec.size, spec.size));
        body.vel = spec.vel;
        Self {
            body,
            damage: spec.damage,
            owner,
            ttl_ticks: None,
            ultimate: false,
        }
    }

    pub fn with_ttl(mut self, ticks: u32) -> Self {
        self.ttl_ticks = Some(ticks);
        self
    }

    pub fn as_ultimate(mut self) -> Self {
        self.ultimate = true;
        self
    }

    pub fn vel(&self) -> Vec2 {
        self.body.vel
    }

    /// Straight-line motion plus bounds/lifetime/solid checks.
    /// Returns why the projectile should be removed, if it should.
    pub fn update(&mut self, bounds: &Rect, solids: &[Solid]) -> Option<Expiry> {
        integrate(&mut self.body);

        if let Some(ttl) = self.ttl_ticks.as_mut() {
            *ttl = ttl.saturating_sub(1);
            if *ttl == 0 {
                return Some(Expiry::Lifetime);
            }
        }
        if !self.body.rect.intersects(bounds) {
            return Some(Expiry::OutOfBounds);
        }
        if first_overlap(&self.body.rect, solids).is_some() {
            return Some(Expiry::HitSolid);
        }
        None
    }
}

impl Collidable for Projectile {
    fn hitbox(&self) -> Rect {
        self.body.rect
    }
}
