//! Multi-phase boss AI
//!
//! One boss entity parameterized by a per-type profile: phase thresholds,
//! shoot-interval multipliers and the `(type, phase) -> pattern` table. Death
//! is a one-way sub-state machine: alive, falling, exploding, removed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::anim::Animation;
use super::collision::{Solid, move_and_collide};
use super::events::GameEvent;
use super::physics::{Body, Collidable, apply_gravity};
use super::projectile::{Projectile, ProjectileOwner};
use super::rect::Rect;
use super::weapon::ShotSpec;
use crate::consts::{BOSS_HEIGHT, BOSS_SHOT_SIZE, BOSS_WIDTH, TICK_MS};
use crate::direction_from_degrees;
use crate::settings::Tuning;

/// Highest phase any profile defines
pub const MAX_PHASES: u8 = 3;

/// Angle between projectiles of the radial burst (degrees)
const RADIAL_STEP_DEG: f32 = 45.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BossType {
    /// Type 1: single aimed-down shots only
    Sentinel,
    /// Type 2: radial bursts, then spirals
    Barrage,
    /// Type 3: cycles through every pattern as it weakens
    Prism,
}

impl BossType {
    /// Numeric id used by level data
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(BossType::Sentinel),
            2 => Some(BossType::Barrage),
            3 => Some(BossType::Prism),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        match self {
            BossType::Sentinel => 1,
            BossType::Barrage => 2,
            BossType::Prism => 3,
        }
    }

    pub fn profile(self) -> &'static BossProfile {
        match self {
            BossType::Sentinel => &SENTINEL,
            BossType::Barrage => &BARRAGE,
            BossType::Prism => &PRISM,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackPattern {
    /// One projectile straight down
    Single,
    /// Eight projectiles at 45 degree steps
    Radial,
    /// Two opposed projectiles on an angle that advances every volley
    Spiral,
}

/// Data-driven behavior of a boss type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossProfile {
    /// Health fractions below which phases 2 and 3 begin
    pub thresholds: [f32; 2],
    /// Shoot interval multiplier per phase (strictly decreasing)
    pub interval_multipliers: [f32; 3],
    /// Pattern per phase
    pub patterns: [AttackPattern; 3],
}

impl BossProfile {
    pub fn pattern(&self, phase: u8) -> AttackPattern {
        self.patterns[phase_index(phase)]
    }

    pub fn interval_multiplier(&self, phase: u8) -> f32 {
        self.interval_multipliers[phase_index(phase)]
    }

    /// Phase a boss at `health_ratio` should be in, capped at `max_phase`
    pub fn phase_for(&self, health_ratio: f32, max_phase: u8) -> u8 {
        let crossed = self.thresholds.iter().filter(|t| health_ratio < **t).count() as u8;
        (1 + crossed).min(max_phase.max(1))
    }
}

fn phase_index(phase: u8) -> usize {
    (phase.clamp(1, MAX_PHASES) - 1) as usize
}

const STANDARD_THRESHOLDS: [f32; 2] = [0.66, 0.33];
const STANDARD_MULTIPLIERS: [f32; 3] = [1.0, 0.7, 0.45];

static SENTINEL: BossProfile = BossProfile {
    thresholds: STANDARD_THRESHOLDS,
    interval_multipliers: STANDARD_MULTIPLIERS,
    patterns: [AttackPattern::Single; 3],
};

static BARRAGE: BossProfile = BossProfile {
    thresholds: STANDARD_THRESHOLDS,
    interval_multipliers: STANDARD_MULTIPLIERS,
    patterns: [AttackPattern::Radial, AttackPattern::Spiral, AttackPattern::Spiral],
};

static PRISM: BossProfile = BossProfile {
    thresholds: STANDARD_THRESHOLDS,
    interval_multipliers: STANDARD_MULTIPLIERS,
    patterns: [AttackPattern::Single, AttackPattern::Radial, AttackPattern::Spiral],
};

/// Death sub-state; transitions only move forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DeathState {
    Alive,
    Falling,
    Exploding,
    Removed,
}

/// Result of a hit on the boss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossDamage {
    Ignored,
    Hit,
    Killed,
}

/// World data the boss reads each tick
pub struct BossContext<'a> {
    pub now: u64,
    pub tuning: &'a Tuning,
    pub solids: &'a [Solid],
    /// Lowest y the boss can fall to when no platform is under it
    pub floor_y: f32,
}

#[derive(Debug, Clone)]
pub struct Boss {
    pub kind: BossType,
    pub body: Body,
    pub health: i32,
    pub max_health: i32,
    pub phase: u8,
    pub max_phase: u8,
    pub speed: f32,
    pub direction: f32,
    /// Phase-1 shoot interval in milliseconds
    pub base_interval_ms: f32,
    pub shoot_timer_ms: f32,
    pub spiral_angle: f32,
    /// Ignores damage while `now < flash_until`
    pub flash_until: u64,
    pub death: DeathState,
    /// Horizontal travel limits
    pub arena: Rect,
    explosion: Option<Animation>,
}

impl Boss {
    /// Spawn with the hitbox's top-left corner at `pos`
    pub fn new(
        kind: BossType,
        pos: Vec2,
        health: i32,
        speed: f32,
        shoot_interval_ms: f32,
        phases: u8,
        arena: Rect,
    ) -> Self {
        Self {
            kind,
            body: Body::new(Rect::new(pos.x, pos.y, BOSS_WIDTH, BOSS_HEIGHT)),
            health,
            max_health: health,
            phase: 1,
            max_phase: phases.clamp(1, MAX_PHASES),
            speed,
            direction: 1.0,
            base_interval_ms: shoot_interval_ms,
            shoot_timer_ms: 0.0,
            spiral_angle: 0.0,
            flash_until: 0,
            death: DeathState::Alive,
            arena,
            explosion: None,
        }
    }

    pub fn profile(&self) -> &'static BossProfile {
        self.kind.profile()
    }

    pub fn is_alive(&self) -> bool {
        self.death == DeathState::Alive
    }

    pub fn is_removed(&self) -> bool {
        self.death == DeathState::Removed
    }

    /// Current shoot interval; infinite once dying
    pub fn shoot_interval_ms(&self) -> f32 {
        if self.is_alive() {
            self.base_interval_ms * self.profile().interval_multiplier(self.phase)
        } else {
            f32::INFINITY
        }
    }

    pub fn current_pattern(&self) -> AttackPattern {
        self.profile().pattern(self.phase)
    }

    /// Contact damage dealt to players touching the boss, only while alive
    pub fn contact_damage(&self, tuning: &Tuning) -> Option<i32> {
        self.is_alive().then_some(tuning.boss_contact_damage)
    }

    pub fn update(&mut self, ctx: &BossContext, events: &mut Vec<GameEvent>) -> Vec<Projectile> {
        match self.death {
            DeathState::Alive => self.update_alive(ctx.tuning),
            DeathState::Falling => {
                self.update_falling(ctx, events);
                Vec::new()
            }
            DeathState::Exploding => {
                let done = self.explosion.as_mut().is_none_or(|anim| anim.advance());
                if done {
                    self.death = DeathState::Removed;
                    log::info!("Boss {:?} removed", self.kind);
                    events.push(GameEvent::BossDefeated { boss_type: self.kind });
                }
                Vec::new()
            }
            DeathState::Removed => Vec::new(),
        }
    }

    fn update_alive(&mut self, tuning: &Tuning) -> Vec<Projectile> {
        self.body.vel.x = self.speed * self.direction;
        self.body.rect.x += self.body.vel.x;
        if self.body.rect.left() < self.arena.left() {
            self.body.rect.set_left(self.arena.left());
            self.direction = 1.0;
        } else if self.body.rect.right() > self.arena.right() {
            self.body.rect.set_right(self.arena.right());
            self.direction = -1.0;
        }

        self.shoot_timer_ms += TICK_MS;
        let interval = self.shoot_interval_ms();
        if self.shoot_timer_ms < interval {
            return Vec::new();
        }
        self.shoot_timer_ms -= interval;
        self.fire(tuning)
    }

    /// Expand the current pattern into projectiles
    pub fn fire(&mut self, tuning: &Tuning) -> Vec<Projectile> {
        let origin = self.body.center();
        let angles: Vec<f32> = match self.current_pattern() {
            AttackPattern::Single => vec![90.0],
            AttackPattern::Radial => (0..8).map(|i| i as f32 * RADIAL_STEP_DEG).collect(),
            AttackPattern::Spiral => {
                let a = self.spiral_angle;
                self.spiral_angle = (self.spiral_angle + tuning.boss_spiral_step_deg) % 360.0;
                vec![a, a + 180.0]
            }
        };
        angles
            .into_iter()
            .map(|deg| {
                let spec = ShotSpec::new(
                    origin,
                    direction_from_degrees(deg) * tuning.boss_shot_speed,
                    tuning.boss_shot_damage,
                    BOSS_SHOT_SIZE,
                );
                Projectile::from_spec(&spec, ProjectileOwner::Boss)
            })
            .collect()
    }

    fn update_falling(&mut self, ctx: &BossContext, events: &mut Vec<GameEvent>) {
        apply_gravity(&mut self.body.vel, ctx.tuning.gravity, ctx.tuning.terminal_velocity);
        let result = move_and_collide(&mut self.body, ctx.solids);
        let mut landed = result.landed();
        if self.body.rect.bottom() >= ctx.floor_y {
            self.body.rect.set_bottom(ctx.floor_y);
            landed = true;
        }
        if landed {
            self.body.vel = Vec2::ZERO;
            self.death = DeathState::Exploding;
            self.explosion = Some(Animation::one_shot(
                ctx.tuning.explosion_frames,
                ctx.tuning.explosion_ticks_per_frame,
            ));
            events.push(GameEvent::Explosion);
            events.push(GameEvent::ScreenShake);
        }
    }

    /// Apply a hit. Ignored while flashing and once the death sequence has begun.
    pub fn take_damage(&mut self, amount: i32, now: u64, tuning: &Tuning, events: &mut Vec<GameEvent>) -> BossDamage {
        if !self.is_alive() || now < self.flash_until {
            return BossDamage::Ignored;
        }
        self.health = (self.health - amount).max(0);
        self.flash_until = now + tuning.boss_flash_ticks as u64;
        events.push(GameEvent::BossHit {
            damage: amount,
            health: self.health,
        });

        let ratio = self.health as f32 / self.max_health as f32;
        let phase = self.profile().phase_for(ratio, self.max_phase);
        let entered_phase = phase > self.phase;
        if entered_phase {
            self.phase = phase;
        }

        if self.health == 0 {
            self.death = DeathState::Falling;
            self.speed = 0.0;
            self.body.vel = Vec2::ZERO;
            log::info!("Boss {:?} defeated, falling", self.kind);
            events.push(GameEvent::BossFalling);
            return BossDamage::Killed;
        }
        if entered_phase {
            log::info!("Boss {:?} entered phase {}", self.kind, self.phase);
            events.push(GameEvent::BossPhase { phase: self.phase });
        }
        BossDamage::Hit
    }

    /// Animation name for the renderer
    pub fn anim_name(&self) -> &'static str {
        match self.death {
            DeathState::Alive if self.phase > 1 => "enraged",
            DeathState::Alive => "idle",
            DeathState::Falling => "falling",
            DeathState::Exploding => "exploding",
            DeathState::Removed => "removed",
        }
    }

    pub fn explosion_frame(&self) -> Option<u32> {
        self.explosion.as_ref().map(Animation::frame)
    }
}

impl Collidable for Boss {
    fn hitbox(&self) -> Rect {
        self.body.rect
    }
}
