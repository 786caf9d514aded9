//! Player controller
//!
//! Consumes one [`Actions`] snapshot per tick and drives movement, jumping,
//! dashing, shooting, the ultimate and the idle emote. The action state picks
//! the animation clip and also gates which inputs are executed.

use glam::Vec2;
use rand::Rng;

use super::anim::Animation;
use super::collision::{Solid, SolidId, carry, move_and_collide};
use super::events::GameEvent;
use super::input::{Actions, HorizontalIntent};
use super::physics::{Body, Collidable, apply_gravity};
use super::platform::MovingPlatform;
use super::projectile::{Projectile, ProjectileOwner};
use super::rect::Rect;
use super::weapon::{ShotSpec, WeaponKind, unlocked_weapons};
use crate::consts::{PLAYER_HEIGHT, PLAYER_WIDTH, ULTIMATE_SHOT_SIZE};
use crate::persistence::Loadout;
use crate::settings::Tuning;
use crate::{ms_to_ticks, secs_to_ticks};

/// Mutually exclusive action state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    Idle,
    Run,
    Jump,
    DoubleJump,
    Emote,
}

impl ActionState {
    /// Animation clip name
    pub fn name(self) -> &'static str {
        match self {
            ActionState::Idle => "idle",
            ActionState::Run => "run",
            ActionState::Jump => "jump",
            ActionState::DoubleJump => "double_jump",
            ActionState::Emote => "emote",
        }
    }

    /// Whether jump/shoot/dash/ultimate inputs are executed in this state
    pub fn allows_combat(self) -> bool {
        !matches!(self, ActionState::Emote)
    }

    pub fn is_airborne(self) -> bool {
        matches!(self, ActionState::Jump | ActionState::DoubleJump)
    }
}

/// Dash is a movement modifier layered over the action state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashState {
    pub active: bool,
    pub started_at: u64,
    /// Earliest tick a new dash may start
    pub ready_at: u64,
}

/// Outcome of a damage application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Ignored,
    Hurt,
    Died,
}

/// World data the controller reads each tick
pub struct PlayerContext<'a> {
    pub now: u64,
    pub tuning: &'a Tuning,
    pub solids: &'a [Solid],
    pub moving: &'a [MovingPlatform],
    /// Horizontal limits of the playable area
    pub bounds: Rect,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub slot: usize,
    pub body: Body,
    pub health: i32,
    pub max_health: i32,
    pub alive: bool,
    pub facing_right: bool,
    pub on_ground: bool,
    pub jumps_remaining: u8,
    pub max_jumps: u8,
    pub state: ActionState,
    pub dash: DashState,
    pub shot_ready_at: u64,
    pub weapons: Vec<WeaponKind>,
    pub weapon_index: usize,
    pub base_damage: i32,
    /// Damage boost is active while `now < boost_until`
    pub boost_until: u64,
    pub ultimate_meter: u32,
    pub ultimate_max_meter: u32,
    pub ultimate_ready: bool,
    pub coins: u64,
    pub score: u64,
    pub kills: u32,
    /// Moving platform stood on at the end of the last tick
    pub riding: Option<usize>,
    /// Invulnerable while `now < hurt_until`
    pub hurt_until: u64,
    idle_since: u64,
    idle_timeout: u64,
    emote: Option<Animation>,
    prev_jump: bool,
    prev_switch: bool,
    prev_ultimate: bool,
}

impl Player {
    /// Spawn with the hitbox's top-left corner at `pos`
    pub fn new<R: Rng>(slot: usize, pos: Vec2, loadout: &Loadout, tuning: &Tuning, rng: &mut R) -> Self {
        let max_health = tuning.player_health
            + if loadout.upgrades.health_up {
                tuning.health_upgrade_bonus
            } else {
                0
            };
        let max_jumps = loadout.max_jumps();
        Self {
            slot,
            body: Body::new(Rect::new(pos.x, pos.y, PLAYER_WIDTH, PLAYER_HEIGHT)),
            health: max_health,
            max_health,
            alive: true,
            facing_right: true,
            on_ground: false,
            jumps_remaining: max_jumps,
            max_jumps,
            state: ActionState::Idle,
            dash: DashState::default(),
            shot_ready_at: 0,
            weapons: unlocked_weapons(loadout),
            weapon_index: 0,
            base_damage: tuning.base_shot_damage
                + tuning.damage_per_upgrade * loadout.upgrades.damage_up as i32,
            boost_until: 0,
            ultimate_meter: 0,
            ultimate_max_meter: tuning.ultimate_max_meter,
            ultimate_ready: false,
            coins: 0,
            score: 0,
            kills: 0,
            riding: None,
            hurt_until: 0,
            idle_since: 0,
            idle_timeout: roll_idle_timeout(rng, tuning),
            emote: None,
            prev_jump: false,
            prev_switch: false,
            prev_ultimate: false,
        }
    }

    pub fn current_weapon(&self) -> WeaponKind {
        self.weapons.get(self.weapon_index).copied().unwrap_or(WeaponKind::Default)
    }

    pub fn is_boosted(&self, now: u64) -> bool {
        now < self.boost_until
    }

    /// Damage of one regular shot right now
    pub fn shot_damage(&self, now: u64) -> i32 {
        self.base_damage * if self.is_boosted(now) { 2 } else { 1 }
    }

    fn facing_sign(&self) -> f32 {
        if self.facing_right { 1.0 } else { -1.0 }
    }

    /// Advance one tick. Returns projectiles fired this tick.
    pub fn update<R: Rng>(
        &mut self,
        actions: &Actions,
        ctx: &PlayerContext,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) -> Vec<Projectile> {
        let mut shots = Vec::new();
        if !self.alive {
            return shots;
        }
        let now = ctx.now;
        let tuning = ctx.tuning;

        let jump_pressed = actions.jump && !self.prev_jump;
        let switch_pressed = actions.switch_weapon && !self.prev_switch;
        let ultimate_pressed = actions.activate_ultimate && !self.prev_ultimate;
        self.prev_jump = actions.jump;
        self.prev_switch = actions.switch_weapon;
        self.prev_ultimate = actions.activate_ultimate;

        let any_input = actions.any();
        // Gating uses the state the input arrived in, so the input that
        // cancels an emote is recognized but not executed.
        let combat_allowed = self.state.allows_combat();

        self.update_emote(any_input, now, tuning, rng);

        if switch_pressed && self.weapons.len() > 1 {
            self.weapon_index = (self.weapon_index + 1) % self.weapons.len();
            events.push(GameEvent::WeaponSwitch {
                player: self.slot,
                weapon: self.current_weapon(),
            });
        }

        // Dash
        if combat_allowed && actions.dash && !self.dash.active && now >= self.dash.ready_at {
            self.dash = DashState {
                active: true,
                started_at: now,
                ready_at: now + ms_to_ticks(tuning.dash_cooldown_ms),
            };
            events.push(GameEvent::Dash { player: self.slot });
        }
        if self.dash.active && now - self.dash.started_at >= ms_to_ticks(tuning.dash_duration_ms) {
            self.dash.active = false;
        }

        // Horizontal velocity is overwritten every tick (no inertia)
        let intent = actions.intent();
        if intent != HorizontalIntent::Neutral {
            self.facing_right = intent == HorizontalIntent::Right;
        }
        self.body.vel.x = if self.dash.active {
            self.facing_sign() * tuning.dash_speed
        } else {
            intent.sign() * tuning.run_speed
        };

        // Jump / double jump
        if combat_allowed && jump_pressed && self.jumps_remaining > 0 {
            let double = !self.on_ground;
            self.jumps_remaining -= 1;
            self.body.vel.y = tuning.jump_power;
            self.on_ground = false;
            if double {
                self.state = ActionState::DoubleJump;
                events.push(GameEvent::DoubleJump { player: self.slot });
            } else {
                self.state = ActionState::Jump;
                events.push(GameEvent::Jump { player: self.slot });
            }
        }

        // Physics
        apply_gravity(&mut self.body.vel, tuning.gravity, tuning.terminal_velocity);
        if let Some(platform) = self.riding.and_then(|i| ctx.moving.get(i)) {
            carry(&mut self.body, platform.delta, ctx.solids);
        }
        let result = move_and_collide(&mut self.body, ctx.solids);
        self.clamp_to_bounds(&ctx.bounds);

        let was_on_ground = self.on_ground;
        self.on_ground = result.landed();
        self.riding = match result.landed_on {
            Some(SolidId::Moving(i)) => Some(i),
            _ => None,
        };
        if self.on_ground {
            self.jumps_remaining = self.max_jumps;
            if !was_on_ground {
                events.push(GameEvent::Landing { player: self.slot });
            }
        } else if was_on_ground {
            // Left the ground without jumping: the ground jump is gone
            self.jumps_remaining = self.jumps_remaining.min(self.max_jumps.saturating_sub(1));
        }

        self.update_action_state(any_input, now, tuning, events);

        // Shooting
        if combat_allowed && actions.shoot && now >= self.shot_ready_at {
            let weapon = self.current_weapon();
            let dir = actions.shoot_direction.vector(self.facing_right);
            let origin = self.body.center() + dir * (PLAYER_WIDTH / 2.0);
            let damage = self.shot_damage(now);
            shots.extend(
                weapon
                    .fire(origin, dir, tuning.shot_speed, damage)
                    .iter()
                    .map(|spec| {
                        Projectile::from_spec(spec, ProjectileOwner::Player(self.slot))
                            .with_ttl(tuning.shot_lifetime_ticks)
                    }),
            );
            self.shot_ready_at = now + weapon.cooldown_ticks();
            events.push(GameEvent::Shot {
                player: self.slot,
                weapon,
            });
        }

        // Ultimate
        if combat_allowed && ultimate_pressed && self.ultimate_ready {
            if let Some(ultimate) = self.fire_ultimate(actions, now, tuning) {
                shots.push(ultimate);
                events.push(GameEvent::Ultimate { player: self.slot });
            }
        }

        shots
    }

    /// Spend a full meter on one heavy projectile
    pub fn fire_ultimate(&mut self, actions: &Actions, now: u64, tuning: &Tuning) -> Option<Projectile> {
        if !self.ultimate_ready {
            return None;
        }
        let dir = actions.shoot_direction.vector(self.facing_right);
        let spec = ShotSpec::new(
            self.body.center() + dir * (PLAYER_WIDTH / 2.0),
            dir * tuning.ultimate_speed,
            self.shot_damage(now) * tuning.ultimate_damage_multiplier,
            ULTIMATE_SHOT_SIZE,
        );
        self.ultimate_meter = 0;
        self.ultimate_ready = false;
        Some(Projectile::from_spec(&spec, ProjectileOwner::Player(self.slot)).as_ultimate())
    }

    fn update_emote<R: Rng>(&mut self, any_input: bool, now: u64, tuning: &Tuning, rng: &mut R) {
        if self.state != ActionState::Emote {
            return;
        }
        let finished = match self.emote.as_mut() {
            Some(anim) => !any_input && anim.advance(),
            None => true,
        };
        if any_input || finished {
            self.state = ActionState::Idle;
            self.emote = None;
            self.idle_since = now;
            self.idle_timeout = roll_idle_timeout(rng, tuning);
        }
    }

    fn update_action_state(&mut self, any_input: bool, now: u64, tuning: &Tuning, events: &mut Vec<GameEvent>) {
        if self.state == ActionState::Emote {
            return;
        }
        if self.on_ground {
            self.state = if self.body.vel.x != 0.0 {
                ActionState::Run
            } else {
                ActionState::Idle
            };
        } else if !self.state.is_airborne() {
            // Walked off a ledge
            self.state = ActionState::Jump;
        }

        if self.state != ActionState::Idle || any_input {
            self.idle_since = now;
        } else if now - self.idle_since >= self.idle_timeout {
            self.state = ActionState::Emote;
            self.emote = Some(Animation::one_shot(tuning.emote_frames, tuning.emote_ticks_per_frame));
            events.push(GameEvent::Emote { player: self.slot });
        }
    }

    fn clamp_to_bounds(&mut self, bounds: &Rect) {
        if self.body.rect.left() < bounds.left() {
            self.body.rect.set_left(bounds.left());
        }
        if self.body.rect.right() > bounds.right() {
            self.body.rect.set_right(bounds.right());
        }
    }

    /// Credit a kill toward the ultimate meter
    pub fn add_kill(&mut self, score: u64) {
        self.kills += 1;
        self.score += score;
        self.ultimate_meter = (self.ultimate_meter + 1).min(self.ultimate_max_meter);
        if self.ultimate_meter >= self.ultimate_max_meter {
            self.ultimate_ready = true;
        }
    }

    pub fn take_damage(&mut self, amount: i32, now: u64, tuning: &Tuning) -> DamageOutcome {
        if !self.alive || now < self.hurt_until {
            return DamageOutcome::Ignored;
        }
        self.health -= amount;
        self.hurt_until = now + tuning.player_hurt_ticks as u64;
        if self.health <= 0 {
            self.kill();
            DamageOutcome::Died
        } else {
            DamageOutcome::Hurt
        }
    }

    /// Immediate death (health depleted or fell out of the world)
    pub fn kill(&mut self) {
        self.health = 0;
        self.alive = false;
        self.dash.active = false;
        self.body.vel = Vec2::ZERO;
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn grant_boost(&mut self, now: u64, tuning: &Tuning) {
        self.boost_until = now + secs_to_ticks(tuning.boost_duration_secs);
    }

    /// Move to a new spot without recreating the player (boss arena entry)
    pub fn reposition(&mut self, pos: Vec2, now: u64) {
        self.body.teleport(pos);
        self.body.vel = Vec2::ZERO;
        self.on_ground = false;
        self.riding = None;
        self.dash.active = false;
        self.state = ActionState::Jump;
        self.emote = None;
        self.idle_since = now;
    }

    /// Animation name for the renderer (dash overlays the action state)
    pub fn anim_name(&self) -> &'static str {
        if !self.alive {
            "dead"
        } else if self.dash.active {
            "dash"
        } else {
            self.state.name()
        }
    }
}

impl Collidable for Player {
    fn hitbox(&self) -> Rect {
        self.body.rect
    }
}

fn roll_idle_timeout<R: Rng>(rng: &mut R, tuning: &Tuning) -> u64 {
    let secs = rng.random_range(tuning.idle_timeout_min_secs..=tuning.idle_timeout_max_secs);
    secs_to_ticks(secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::platform::{Axis, Platform, collect_solids};
    use crate::sim::input::ShootDirection;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Rig {
        player: Player,
        tuning: Tuning,
        statics: Vec<Platform>,
        moving: Vec<MovingPlatform>,
        rng: Pcg32,
        now: u64,
        events: Vec<GameEvent>,
    }

    impl Rig {
        fn new(loadout: Loadout) -> Self {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(1);
            // Standing on the floor at y=550
            let player = Player::new(0, Vec2::new(100.0, 500.0), &loadout, &tuning, &mut rng);
            Self {
                player,
                tuning,
                statics: vec![Platform::new(0.0, 550.0, 2000.0, 40.0)],
                moving: Vec::new(),
                rng,
                now: 0,
                events: Vec::new(),
            }
        }

        fn step(&mut self, actions: Actions) -> Vec<Projectile> {
            for m in &mut self.moving {
                m.update();
            }
            let solids = collect_solids(&self.statics, &self.moving);
            let ctx = PlayerContext {
                now: self.now,
                tuning: &self.tuning,
                solids: &solids,
                moving: &self.moving,
                bounds: Rect::new(0.0, -1000.0, 2000.0, 3000.0),
            };
            let shots = self.player.update(&actions, &ctx, &mut self.rng, &mut self.events);
            self.now += 1;
            shots
        }

        fn settle(&mut self) {
            for _ in 0..5 {
                self.step(Actions::default());
            }
            self.events.clear();
        }
    }

    fn jump() -> Actions {
        Actions {
            jump: true,
            ..Default::default()
        }
    }

    fn right() -> Actions {
        Actions {
            move_x: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_settles_on_ground() {
        let mut rig = Rig::new(Loadout::default());
        rig.settle();
        assert!(rig.player.on_ground);
        assert_eq!(rig.player.body.rect.bottom(), 550.0);
        assert_eq!(rig.player.state, ActionState::Idle);
        assert_eq!(rig.player.jumps_remaining, 1);
    }

    #[test]
    fn test_run_and_facing() {
        let mut rig = Rig::new(Loadout::default());
        rig.settle();
        let x0 = rig.player.body.rect.x;
        rig.step(right());
        assert_eq!(rig.player.state, ActionState::Run);
        assert_eq!(rig.player.body.rect.x, x0 + rig.tuning.run_speed);

        rig.step(Actions {
            move_x: 0.0,
            ..Default::default()
        });
        assert!(!rig.player.facing_right);
        rig.step(Actions::default());
        assert_eq!(rig.player.state, ActionState::Idle);
        assert_eq!(rig.player.body.vel.x, 0.0);
    }

    #[test]
    fn test_single_jump_without_upgrade() {
        let mut rig = Rig::new(Loadout::default());
        rig.settle();
        rig.step(jump());
        assert_eq!(rig.player.state, ActionState::Jump);
        assert_eq!(rig.player.jumps_remaining, 0);
        assert!(!rig.player.on_ground);

        rig.step(Actions::default());
        rig.step(jump());
        // No second jump available
        assert_eq!(rig.player.state, ActionState::Jump);
        assert!(!rig.events.iter().any(|e| matches!(e, GameEvent::DoubleJump { .. })));
    }

    #[test]
    fn test_double_jump_with_upgrade() {
        let mut loadout = Loadout::default();
        loadout.upgrades.double_jump = true;
        let mut rig = Rig::new(loadout);
        rig.settle();
        assert_eq!(rig.player.jumps_remaining, 2);

        rig.step(jump());
        rig.step(Actions::default());
        rig.step(jump());
        assert_eq!(rig.player.state, ActionState::DoubleJump);
        assert_eq!(rig.player.jumps_remaining, 0);
        assert!(rig.events.iter().any(|e| matches!(e, GameEvent::DoubleJump { .. })));
    }

    #[test]
    fn test_held_jump_fires_once() {
        let mut loadout = Loadout::default();
        loadout.upgrades.double_jump = true;
        let mut rig = Rig::new(loadout);
        rig.settle();
        for _ in 0..5 {
            rig.step(jump());
        }
        assert_eq!(rig.player.jumps_remaining, 1);
    }

    fn walk_off_ledge(loadout: Loadout) -> Rig {
        let mut rig = Rig::new(loadout);
        rig.statics = vec![Platform::new(0.0, 550.0, 150.0, 40.0)];
        rig.settle();
        for _ in 0..60 {
            rig.step(right());
            if !rig.player.on_ground {
                break;
            }
        }
        assert!(!rig.player.on_ground);
        assert_eq!(rig.player.state, ActionState::Jump);
        rig.events.clear();
        rig
    }

    #[test]
    fn test_walk_off_ledge_spends_ground_jump() {
        let mut rig = walk_off_ledge(Loadout::default());
        assert_eq!(rig.player.jumps_remaining, 0);
        for _ in 0..4 {
            rig.step(jump());
            rig.step(Actions::default());
        }
        assert!(rig.player.body.vel.y > 0.0);
        assert!(!rig.events.iter().any(|e| matches!(e, GameEvent::Jump { .. } | GameEvent::DoubleJump { .. })));
    }

    #[test]
    fn test_walk_off_ledge_leaves_one_double_jump() {
        let mut loadout = Loadout::default();
        loadout.upgrades.double_jump = true;
        let mut rig = walk_off_ledge(loadout);
        assert_eq!(rig.player.jumps_remaining, 1);
        for _ in 0..4 {
            rig.step(jump());
            rig.step(Actions::default());
        }
        assert_eq!(rig.player.jumps_remaining, 0);
        let doubles = rig
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::DoubleJump { .. }))
            .count();
        assert_eq!(doubles, 1);
        assert!(!rig.events.iter().any(|e| matches!(e, GameEvent::Jump { .. })));
    }

    #[test]
    fn test_landing_resets_counter_and_emits_event() {
        let mut loadout = Loadout::default();
        loadout.upgrades.double_jump = true;
        let mut rig = Rig::new(loadout);
        rig.settle();
        rig.step(jump());
        rig.step(Actions::default());
        rig.step(jump());
        for _ in 0..120 {
            rig.step(Actions::default());
            if rig.player.on_ground {
                break;
            }
        }
        assert!(rig.player.on_ground);
        assert_eq!(rig.player.jumps_remaining, 2);
        assert_eq!(rig.player.state, ActionState::Idle);
        assert!(rig.events.iter().any(|e| matches!(e, GameEvent::Landing { .. })));
    }

    #[test]
    fn test_dash_burst_and_cooldown() {
        let mut rig = Rig::new(Loadout::default());
        rig.settle();
        let x0 = rig.player.body.rect.x;
        let dash = Actions {
            dash: true,
            ..Default::default()
        };
        rig.step(dash);
        assert!(rig.player.dash.active);
        assert_eq!(rig.player.body.rect.x, x0 + rig.tuning.dash_speed);

        let duration = ms_to_ticks(rig.tuning.dash_duration_ms);
        for _ in 0..duration {
            rig.step(Actions::default());
        }
        assert!(!rig.player.dash.active);
        assert_eq!(rig.player.body.vel.x, 0.0);

        // Still cooling down
        rig.step(dash);
        assert!(!rig.player.dash.active);

        let cooldown = ms_to_ticks(rig.tuning.dash_cooldown_ms);
        for _ in 0..cooldown {
            rig.step(Actions::default());
        }
        rig.step(dash);
        assert!(rig.player.dash.active);
    }

    #[test]
    fn test_shot_cooldown_gates_requests() {
        let mut rig = Rig::new(Loadout::default());
        rig.settle();
        let shoot = Actions {
            shoot: true,
            ..Default::default()
        };
        assert_eq!(rig.step(shoot).len(), 1);
        assert!(rig.step(shoot).is_empty());
        for _ in 0..WeaponKind::Default.cooldown_ticks() {
            rig.step(Actions::default());
        }
        let shots = rig.step(shoot);
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0].damage, rig.tuning.base_shot_damage);
        assert!(shots[0].vel().x > 0.0);
    }

    #[test]
    fn test_aimed_shot_direction() {
        let mut rig = Rig::new(Loadout::default());
        rig.settle();
        let shots = rig.step(Actions {
            shoot: true,
            shoot_direction: ShootDirection::Up,
            ..Default::default()
        });
        assert!(shots[0].vel().y < 0.0);
        assert!(shots[0].vel().x.abs() < 1e-4);
    }

    #[test]
    fn test_weapon_switch_and_spread() {
        let mut loadout = Loadout::default();
        loadout.upgrades.spread_shot = true;
        let mut rig = Rig::new(loadout);
        rig.settle();
        rig.step(Actions {
            switch_weapon: true,
            ..Default::default()
        });
        assert_eq!(rig.player.current_weapon(), WeaponKind::SpreadShot);
        rig.step(Actions::default());
        let shots = rig.step(Actions {
            shoot: true,
            ..Default::default()
        });
        assert_eq!(shots.len(), 3);
        assert!(rig.events.iter().any(|e| e.name() == "spread_shot"));
    }

    #[test]
    fn test_switch_with_single_weapon_is_noop() {
        let mut rig = Rig::new(Loadout::default());
        rig.settle();
        rig.step(Actions {
            switch_weapon: true,
            ..Default::default()
        });
        assert_eq!(rig.player.current_weapon(), WeaponKind::Default);
    }

    #[test]
    fn test_boost_doubles_damage_until_expiry() {
        let mut rig = Rig::new(Loadout::default());
        rig.settle();
        rig.player.grant_boost(rig.now, &rig.tuning);
        assert_eq!(rig.player.shot_damage(rig.now), rig.tuning.base_shot_damage * 2);
        let expiry = rig.player.boost_until;
        assert_eq!(rig.player.shot_damage(expiry), rig.tuning.base_shot_damage);
    }

    #[test]
    fn test_damage_upgrade_raises_base() {
        let mut loadout = Loadout::default();
        loadout.upgrades.damage_up = 2;
        let rig = Rig::new(loadout);
        assert_eq!(rig.player.base_damage, 10 + 2 * 5);
    }

    #[test]
    fn test_ultimate_charge_and_fire() {
        let mut rig = Rig::new(Loadout::default());
        rig.settle();
        assert_eq!(rig.player.ultimate_max_meter, 5);
        for _ in 0..4 {
            rig.player.add_kill(0);
        }
        assert!(!rig.player.ultimate_ready);
        rig.player.add_kill(0);
        assert!(rig.player.ultimate_ready);

        let shots = rig.step(Actions {
            activate_ultimate: true,
            ..Default::default()
        });
        assert_eq!(shots.len(), 1);
        assert!(shots[0].ultimate);
        assert!(shots[0].damage > rig.player.base_damage);
        assert_eq!(rig.player.ultimate_meter, 0);
        assert!(!rig.player.ultimate_ready);
    }

    #[test]
    fn test_idle_timeout_starts_emote_and_input_cancels_it() {
        let mut rig = Rig::new(Loadout::default());
        rig.settle();
        let max_wait = secs_to_ticks(rig.tuning.idle_timeout_max_secs) + 2;
        for _ in 0..max_wait {
            rig.step(Actions::default());
            if rig.player.state == ActionState::Emote {
                break;
            }
        }
        assert_eq!(rig.player.state, ActionState::Emote);
        assert!(rig.events.iter().any(|e| matches!(e, GameEvent::Emote { .. })));

        // The cancelling jump is recognized but not executed
        rig.step(jump());
        assert_eq!(rig.player.state, ActionState::Idle);
        assert!(rig.player.on_ground);
        assert_eq!(rig.player.jumps_remaining, 1);

        // Next press jumps normally
        rig.step(Actions::default());
        rig.step(jump());
        assert_eq!(rig.player.state, ActionState::Jump);
    }

    #[test]
    fn test_emote_suppresses_shot() {
        let mut rig = Rig::new(Loadout::default());
        rig.settle();
        rig.player.state = ActionState::Emote;
        rig.player.emote = Some(Animation::one_shot(8, 6));
        let shots = rig.step(Actions {
            shoot: true,
            ..Default::default()
        });
        assert!(shots.is_empty());
        assert_eq!(rig.player.state, ActionState::Idle);
    }

    #[test]
    fn test_emote_plays_through_to_idle() {
        let mut rig = Rig::new(Loadout::default());
        rig.settle();
        rig.player.state = ActionState::Emote;
        rig.player.emote = Some(Animation::one_shot(2, 2));
        for _ in 0..4 {
            rig.step(Actions::default());
        }
        assert_eq!(rig.player.state, ActionState::Idle);
    }

    #[test]
    fn test_carried_by_moving_platform() {
        let mut rig = Rig::new(Loadout::default());
        rig.statics.clear();
        rig.moving.push(MovingPlatform::new(
            Rect::new(50.0, 550.0, 200.0, 25.0),
            Axis::X,
            500.0,
            2.0,
            1.0,
        ));
        rig.settle();
        assert!(rig.player.on_ground);
        assert_eq!(rig.player.riding, Some(0));

        let x0 = rig.player.body.rect.x;
        for _ in 0..10 {
            rig.step(Actions::default());
            assert!(rig.player.on_ground);
        }
        assert_eq!(rig.player.body.rect.x, x0 + 20.0);
    }

    #[test]
    fn test_vertical_platform_keeps_rider_grounded() {
        let mut rig = Rig::new(Loadout::default());
        rig.statics.clear();
        rig.moving.push(MovingPlatform::new(
            Rect::new(50.0, 550.0, 200.0, 25.0),
            Axis::Y,
            40.0,
            3.0,
            -1.0,
        ));
        rig.settle();
        for _ in 0..60 {
            rig.step(Actions::default());
            assert!(rig.player.on_ground);
            assert_eq!(rig.player.body.rect.bottom(), rig.moving[0].rect.top());
        }
    }

    #[test]
    fn test_damage_invulnerability_window() {
        let mut rig = Rig::new(Loadout::default());
        let t = rig.tuning.clone();
        assert_eq!(rig.player.take_damage(10, 0, &t), DamageOutcome::Hurt);
        assert_eq!(rig.player.take_damage(10, 1, &t), DamageOutcome::Ignored);
        assert_eq!(rig.player.health, 90);
        assert_eq!(rig.player.take_damage(500, 100, &t), DamageOutcome::Died);
        assert!(!rig.player.alive);
        assert_eq!(rig.player.health, 0);
    }

    #[test]
    fn test_health_upgrade() {
        let mut loadout = Loadout::default();
        loadout.upgrades.health_up = true;
        let mut rig = Rig::new(loadout);
        assert_eq!(rig.player.max_health, 125);
        rig.player.health = 100;
        rig.player.heal(100);
        assert_eq!(rig.player.health, 125);
    }

    fn arb_actions() -> impl Strategy<Value = Actions> {
        (0u8..3, any::<bool>(), any::<bool>()).prop_map(|(mv, jump, dash)| Actions {
            move_x: [0.0, 0.5, 1.0][mv as usize],
            jump,
            dash,
            ..Default::default()
        })
    }

    proptest! {
        #[test]
        fn prop_jump_counter_invariant(
            double in any::<bool>(),
            inputs in proptest::collection::vec(arb_actions(), 1..200),
        ) {
            let mut loadout = Loadout::default();
            loadout.upgrades.double_jump = double;
            let mut rig = Rig::new(loadout);
            let max = if double { 2 } else { 1 };
            for actions in inputs {
                rig.events.clear();
                rig.step(actions);
                prop_assert!(rig.player.jumps_remaining <= max);
                if rig.events.iter().any(|e| matches!(e, GameEvent::Landing { .. })) {
                    prop_assert_eq!(rig.player.jumps_remaining, max);
                }
                // Never sunk into the floor
                prop_assert!(rig.player.body.rect.bottom() <= 550.0);
            }
        }
    }
}
