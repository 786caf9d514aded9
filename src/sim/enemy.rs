//! Patrol-and-shoot enemy AI

use glam::Vec2;

use super::physics::{Body, Collidable};
use super::projectile::{Projectile, ProjectileOwner};
use super::rect::Rect;
use super::weapon::ShotSpec;
use crate::consts::{ENEMY_HEIGHT, ENEMY_SHOT_SIZE, ENEMY_WIDTH};
use crate::secs_to_ticks;
use crate::settings::Tuning;

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub body: Body,
    pub health: i32,
    /// Left edge at spawn; patrol displacement is measured from here
    pub start_x: f32,
    /// Half-distance of the patrol
    pub patrol_distance: f32,
    pub speed: f32,
    /// +1 or -1
    pub direction: f32,
    pub shoot_cooldown_ticks: u64,
    pub last_shot: u64,
    pub detection_range: f32,
}

impl Enemy {
    /// Spawn with the hitbox's top-left corner at `pos`
    pub fn new(
        pos: Vec2,
        patrol_distance: f32,
        speed: f32,
        shoot_cooldown_secs: f32,
        health: i32,
        now: u64,
        tuning: &Tuning,
    ) -> Self {
        Self {
            body: Body::new(Rect::new(pos.x, pos.y, ENEMY_WIDTH, ENEMY_HEIGHT)),
            health,
            start_x: pos.x,
            patrol_distance,
            speed,
            direction: 1.0,
            shoot_cooldown_ticks: secs_to_ticks(shoot_cooldown_secs),
            last_shot: now,
            detection_range: tuning.enemy_detection_range,
        }
    }

    pub fn displacement(&self) -> f32 {
        self.body.rect.x - self.start_x
    }

    /// Move along the patrol line, flipping once past the half-distance
    pub fn patrol(&mut self) {
        self.body.vel.x = self.speed * self.direction;
        self.body.rect.x += self.body.vel.x;
        if self.displacement().abs() > self.patrol_distance {
            self.direction = -self.direction;
        }
    }

    pub fn in_range(&self, target: &Rect) -> bool {
        (target.center().x - self.body.center().x).abs() <= self.detection_range
    }

    /// Patrol, then fire at `target` if it is in range and the cooldown has elapsed
    pub fn update(&mut self, now: u64, target: Option<&Rect>, tuning: &Tuning) -> Option<Projectile> {
        self.patrol();

        let target = target?;
        if !self.in_range(target) || now.saturating_sub(self.last_shot) < self.shoot_cooldown_ticks {
            return None;
        }
        self.last_shot = now;

        let origin = self.body.center();
        let aim = Vec2::new(target.center().x, target.top() + target.h * tuning.enemy_aim_height);
        let dir = (aim - origin).normalize_or(Vec2::new(-self.direction, 0.0));
        let spec = ShotSpec::new(origin, dir * tuning.enemy_shot_speed, tuning.enemy_shot_damage, ENEMY_SHOT_SIZE);
        Some(Projectile::from_spec(&spec, ProjectileOwner::Enemy))
    }

    /// Returns true when this hit killed the enemy
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health -= amount;
        self.health <= 0
    }
}

impl Collidable for Enemy {
    fn hitbox(&self) -> Rect {
        self.body.rect
    }
}
