//! World state and level lifecycle
//!
//! The world exclusively owns every live entity, partitioned into typed
//! arenas. Other code refers to entities by [`Handle`] only.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::arena::Arena;
use super::boss::Boss;
use super::enemy::Enemy;
use super::events::GameEvent;
use super::level::{
    ARENA_PLAYER_SPAWN, ARENA_WIDTH, BossSpec, GateKind, LevelData, arena_bounds, arena_platforms,
};
use super::pickup::{Coin, PowerUp, PowerUpBox};
use super::platform::{MovingPlatform, Platform};
use super::player::Player;
use super::projectile::Projectile;
use super::rect::Rect;
use crate::Error;
use crate::consts::{FALL_MARGIN, MAX_PLAYERS, PLAYER_WIDTH};
use crate::persistence::{Loadout, ProgressDelta};
use crate::settings::Tuning;

/// Current phase of a level attempt. Transitions are one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Running through the level toward the gate
    Platformer,
    BossFight,
    Victory,
    GameOver,
}

impl GamePhase {
    pub fn is_finished(self) -> bool {
        matches!(self, GamePhase::Victory | GamePhase::GameOver)
    }
}

/// Complete world for one level attempt
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub level_id: u32,
    pub level_name: String,
    /// Level unlocked by winning this one
    pub next_level: Option<u32>,
    pub phase: GamePhase,
    pub paused: bool,
    /// Simulation tick counter; every timer is a tick stamp against this
    pub time_ticks: u64,
    pub tuning: Tuning,
    loadout: Loadout,
    pub players: Vec<Player>,
    pub platforms: Vec<Platform>,
    pub moving_platforms: Vec<MovingPlatform>,
    pub enemies: Arena<Enemy>,
    pub player_shots: Arena<Projectile>,
    pub enemy_shots: Arena<Projectile>,
    pub boss_shots: Arena<Projectile>,
    pub coins: Arena<Coin>,
    pub boxes: Arena<PowerUpBox>,
    pub power_ups: Arena<PowerUp>,
    pub boss: Option<Boss>,
    boss_spec: Option<BossSpec>,
    pub gate: Option<(Rect, GateKind)>,
    /// Playable area; projectiles leaving it are removed
    pub bounds: Rect,
    pub world_height: f32,
    /// Events emitted since the last drain
    pub events: Vec<GameEvent>,
    outcome: Option<ProgressDelta>,
}

impl GameState {
    /// Build a world from level data. Invalid data refuses to start the level.
    pub fn new(level: &LevelData, loadout: &Loadout, tuning: Tuning, seed: u64) -> Result<Self, Error> {
        level.validate()?;
        tuning.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let player = Player::new(0, level.player_spawn, loadout, &tuning, &mut rng);

        let mut enemies = Arena::new();
        for spec in &level.enemies {
            enemies.insert(Enemy::new(
                Vec2::new(spec.x, spec.y),
                spec.patrol_distance,
                spec.speed,
                spec.shoot_cooldown,
                spec.health.unwrap_or(tuning.enemy_health),
                0,
                &tuning,
            ));
        }
        let mut coins = Arena::new();
        for pos in &level.coins {
            coins.insert(Coin::at(*pos));
        }
        let mut boxes = Arena::new();
        for pos in &level.power_up_boxes {
            boxes.insert(PowerUpBox::at(*pos));
        }

        log::info!(
            "Level {} \"{}\": {} platforms, {} moving, {} enemies, {} coins",
            level.id,
            level.name,
            level.platforms.len(),
            level.moving_platforms.len(),
            level.enemies.len(),
            level.coins.len()
        );

        Ok(Self {
            seed,
            rng,
            level_id: level.id,
            level_name: level.name.clone(),
            next_level: level.next_level_id(),
            phase: GamePhase::Platformer,
            paused: false,
            time_ticks: 0,
            tuning,
            loadout: loadout.clone(),
            players: vec![player],
            platforms: level.build_platforms(),
            moving_platforms: level.build_moving_platforms(),
            enemies,
            player_shots: Arena::new(),
            enemy_shots: Arena::new(),
            boss_shots: Arena::new(),
            coins,
            boxes,
            power_ups: Arena::new(),
            boss: None,
            boss_spec: level.boss,
            gate: Some((level.gate_rect(), level.gate.kind)),
            bounds: level.bounds(),
            world_height: level.world_height,
            events: Vec::new(),
            outcome: None,
        })
    }

    /// Join a second local player next to the first. Returns the new slot.
    pub fn add_player(&mut self) -> Option<usize> {
        if self.players.len() >= MAX_PLAYERS {
            return None;
        }
        let slot = self.players.len();
        let pos = self
            .players
            .first()
            .map(|p| p.body.pos() + Vec2::new(PLAYER_WIDTH * 2.0, 0.0))
            .unwrap_or(ARENA_PLAYER_SPAWN);
        let player = Player::new(slot, pos, &self.loadout, &self.tuning, &mut self.rng);
        self.players.push(player);
        log::info!("Player {} joined", slot + 1);
        Some(slot)
    }

    pub fn living_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.alive)
    }

    /// Coins picked up during this attempt
    pub fn coins_collected(&self) -> u64 {
        self.players.iter().map(|p| p.coins).sum()
    }

    pub fn score(&self) -> u64 {
        self.players.iter().map(|p| p.score).sum()
    }

    /// Lowest y a body can reach before it is out of the world
    pub fn kill_plane(&self) -> f32 {
        self.world_height + FALL_MARGIN
    }

    /// Take the events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Progress to commit once the attempt has ended
    pub fn outcome(&self) -> Option<ProgressDelta> {
        self.outcome
    }

    /// Touching a boss gate: clear the level and start the arena fight
    pub fn enter_boss_fight(&mut self) {
        let Some(spec) = self.boss_spec else {
            log::warn!("Boss gate reached without a boss descriptor");
            self.win();
            return;
        };
        let kind = match spec.kind() {
            Ok(kind) => kind,
            Err(err) => {
                log::warn!("Boss gate ignored: {}", err);
                self.win();
                return;
            }
        };

        self.enemies.retire_all();
        self.enemy_shots.retire_all();
        self.boss_shots.retire_all();
        self.coins.retire_all();
        self.boxes.retire_all();
        self.power_ups.retire_all();
        self.platforms = arena_platforms();
        self.moving_platforms.clear();
        self.bounds = arena_bounds(self.world_height);
        self.gate = None;

        let now = self.time_ticks;
        for (i, player) in self.players.iter_mut().enumerate() {
            let offset = Vec2::new(i as f32 * PLAYER_WIDTH * 2.0, 0.0);
            player.reposition(ARENA_PLAYER_SPAWN + offset, now);
        }

        self.boss = Some(Boss::new(
            kind,
            spec.spawn_pos(ARENA_WIDTH),
            spec.health,
            spec.speed,
            spec.shoot_interval_ms(),
            spec.phases,
            self.bounds,
        ));
        self.phase = GamePhase::BossFight;
        self.events.push(GameEvent::BossGate);
        log::info!("Boss fight: {:?} with {} health", kind, spec.health);
    }

    /// Level cleared: unlock the next level and bank coins, exactly once
    pub fn win(&mut self) {
        if self.phase.is_finished() {
            return;
        }
        self.phase = GamePhase::Victory;
        self.boss = None;
        self.outcome = Some(ProgressDelta {
            level_id: self.level_id,
            coins_earned: self.coins_collected(),
            unlocked_level: self.next_level,
        });
        self.events.push(GameEvent::Victory);
        log::info!(
            "Level {} cleared with {} coins, score {}",
            self.level_id,
            self.coins_collected(),
            self.score()
        );
    }

    /// Every player is down: bank coins, unlock nothing
    pub fn lose(&mut self) {
        if self.phase.is_finished() {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.outcome = Some(ProgressDelta {
            level_id: self.level_id,
            coins_earned: self.coins_collected(),
            unlocked_level: None,
        });
        self.events.push(GameEvent::GameOver);
        log::info!("Game over on level {} at tick {}", self.level_id, self.time_ticks);
    }

    /// Free everything retired this frame
    pub fn sweep(&mut self) -> usize {
        self.enemies.sweep()
            + self.player_shots.sweep()
            + self.enemy_shots.sweep()
            + self.boss_shots.sweep()
            + self.coins.sweep()
            + self.boxes.sweep()
            + self.power_ups.sweep()
    }
}
