//! Fixed timestep simulation tick
//!
//! Advances the world by one 60 Hz step in a fixed order. Removals during the
//! step only retire entities; the arenas are swept once the step is over.

use super::arena::{Arena, Handle};
use super::boss::{BossContext, BossDamage};
use super::collision::Solid;
use super::events::GameEvent;
use super::input::Actions;
use super::level::GateKind;
use super::physics::Collidable;
use super::pickup::{PowerUp, PowerUpKind};
use super::platform::collect_solids;
use super::player::{DamageOutcome, Player, PlayerContext};
use super::projectile::{Projectile, ProjectileOwner};
use super::rect::Rect;
use super::state::{GamePhase, GameState};
use crate::settings::Tuning;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// One snapshot per player slot; a missing slot is neutral input
    pub players: Vec<Actions>,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    /// Input for a single-player game
    pub fn single(actions: Actions) -> Self {
        Self {
            players: vec![actions],
            pause: false,
        }
    }

    pub fn actions(&self, slot: usize) -> Actions {
        self.players.get(slot).copied().unwrap_or_default()
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.pause && !state.phase.is_finished() {
        state.paused = !state.paused;
        log::debug!("Paused: {}", state.paused);
    }
    if state.paused || state.phase.is_finished() {
        return;
    }
    let now = state.time_ticks;

    // Platforms move first so riders are carried by this tick's displacement
    for platform in &mut state.moving_platforms {
        platform.update();
    }
    let solids = collect_solids(&state.platforms, &state.moving_platforms);

    update_players(state, input, &solids, now);
    update_enemies(state, now);
    update_boss(state, &solids, now);

    let bounds = state.bounds;
    advance_projectiles(&mut state.player_shots, &bounds, &solids);
    advance_projectiles(&mut state.enemy_shots, &bounds, &solids);
    advance_projectiles(&mut state.boss_shots, &bounds, &solids);

    resolve_player_shots(state, now);
    resolve_hostile_shots(state, now);
    resolve_boss_contact(state, now);
    resolve_pickups(state, now);
    check_transitions(state);

    state.sweep();
    state.time_ticks += 1;
}

fn update_players(state: &mut GameState, input: &TickInput, solids: &[Solid], now: u64) {
    let ctx = PlayerContext {
        now,
        tuning: &state.tuning,
        solids,
        moving: &state.moving_platforms,
        bounds: state.bounds,
    };
    for player in &mut state.players {
        let actions = input.actions(player.slot);
        for shot in player.update(&actions, &ctx, &mut state.rng, &mut state.events) {
            state.player_shots.insert(shot);
        }
    }
}

/// Living player whose center is horizontally nearest to `x`
fn nearest_target(players: &[Player], x: f32) -> Option<Rect> {
    players
        .iter()
        .filter(|p| p.alive)
        .min_by(|a, b| {
            let da = (a.body.center().x - x).abs();
            let db = (b.body.center().x - x).abs();
            da.total_cmp(&db)
        })
        .map(|p| p.body.rect)
}

fn update_enemies(state: &mut GameState, now: u64) {
    let mut fired = Vec::new();
    for (_, enemy) in state.enemies.iter_mut() {
        let target = nearest_target(&state.players, enemy.body.center().x);
        if let Some(shot) = enemy.update(now, target.as_ref(), &state.tuning) {
            fired.push(shot);
        }
    }
    for shot in fired {
        state.enemy_shots.insert(shot);
    }
}

fn update_boss(state: &mut GameState, solids: &[Solid], now: u64) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    let ctx = BossContext {
        now,
        tuning: &state.tuning,
        solids,
        floor_y: state.bounds.bottom(),
    };
    for shot in boss.update(&ctx, &mut state.events) {
        state.boss_shots.insert(shot);
    }
}

/// Move every projectile in a pool and retire the ones that left play
fn advance_projectiles(pool: &mut Arena<Projectile>, bounds: &Rect, solids: &[Solid]) {
    let expired: Vec<Handle> = pool
        .iter_mut()
        .filter_map(|(handle, shot)| shot.update(bounds, solids).map(|_| handle))
        .collect();
    for handle in expired {
        pool.retire(handle);
    }
}

/// Player projectiles against enemies, then the boss, then boxes.
/// The first target hit consumes the projectile.
fn resolve_player_shots(state: &mut GameState, now: u64) {
    for handle in state.player_shots.handles() {
        let Some(shot) = state.player_shots.get(handle) else {
            continue;
        };
        let hitbox = shot.hitbox();
        let damage = shot.damage;
        let shooter = match shot.owner {
            ProjectileOwner::Player(slot) => slot,
            _ => continue,
        };

        let enemy_hit = state
            .enemies
            .iter()
            .find(|(_, e)| e.overlaps(&hitbox))
            .map(|(h, _)| h);
        if let Some(enemy_handle) = enemy_hit {
            state.player_shots.retire(handle);
            let killed = state
                .enemies
                .get_mut(enemy_handle)
                .is_some_and(|e| e.take_damage(damage));
            state.events.push(GameEvent::EnemyHit { damage });
            if killed {
                state.enemies.retire(enemy_handle);
                let score = state.tuning.enemy_score;
                if let Some(player) = state.players.get_mut(shooter) {
                    player.add_kill(score);
                }
                state.events.push(GameEvent::EnemyKilled { player: shooter });
            }
            continue;
        }

        if let Some(boss) = state.boss.as_mut().filter(|b| b.is_alive()) {
            if boss.overlaps(&hitbox) {
                state.player_shots.retire(handle);
                let result = boss.take_damage(damage, now, &state.tuning, &mut state.events);
                if result == BossDamage::Killed {
                    let score = state.tuning.boss_score;
                    if let Some(player) = state.players.get_mut(shooter) {
                        player.score += score;
                    }
                }
                continue;
            }
        }

        let box_hit = state
            .boxes
            .iter()
            .find(|(_, b)| b.overlaps(&hitbox))
            .map(|(h, b)| (h, b.rect.center()));
        if let Some((box_handle, center)) = box_hit {
            state.player_shots.retire(handle);
            state.boxes.retire(box_handle);
            let kind = PowerUpKind::roll(&mut state.rng);
            state.power_ups.insert(PowerUp::at(center, kind));
            state.events.push(GameEvent::BoxBroken);
        }
    }
}

/// Enemy and boss projectiles against players
fn resolve_hostile_shots(state: &mut GameState, now: u64) {
    for pool in [&mut state.enemy_shots, &mut state.boss_shots] {
        for handle in pool.handles() {
            let Some(shot) = pool.get(handle) else {
                continue;
            };
            let hitbox = shot.hitbox();
            let damage = shot.damage;
            let Some(player) = state.players.iter_mut().find(|p| p.alive && p.overlaps(&hitbox)) else {
                continue;
            };
            pool.retire(handle);
            apply_player_damage(player, damage, now, &state.tuning, &mut state.events);
        }
    }
}

fn resolve_boss_contact(state: &mut GameState, now: u64) {
    let Some(boss) = state.boss.as_ref() else {
        return;
    };
    let Some(damage) = boss.contact_damage(&state.tuning) else {
        return;
    };
    let hitbox = boss.hitbox();
    for player in state.players.iter_mut().filter(|p| p.alive && p.overlaps(&hitbox)) {
        apply_player_damage(player, damage, now, &state.tuning, &mut state.events);
    }
}

fn apply_player_damage(
    player: &mut Player,
    damage: i32,
    now: u64,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    match player.take_damage(damage, now, tuning) {
        DamageOutcome::Ignored => {}
        DamageOutcome::Hurt => events.push(GameEvent::PlayerHit {
            player: player.slot,
            damage,
        }),
        DamageOutcome::Died => {
            events.push(GameEvent::PlayerHit {
                player: player.slot,
                damage,
            });
            events.push(GameEvent::PlayerDied { player: player.slot });
            log::info!("Player {} died", player.slot + 1);
        }
    }
}

/// Coins and power-ups are consumed by the first player touching them
fn resolve_pickups(state: &mut GameState, now: u64) {
    for player in state.players.iter_mut().filter(|p| p.alive) {
        let hitbox = player.hitbox();

        let touched: Vec<Handle> = state
            .coins
            .iter()
            .filter(|(_, c)| c.overlaps(&hitbox))
            .map(|(h, _)| h)
            .collect();
        for handle in touched {
            state.coins.retire(handle);
            player.coins += 1;
            player.score += state.tuning.coin_score;
            state.events.push(GameEvent::Coin { player: player.slot });
        }

        let touched: Vec<(Handle, PowerUpKind)> = state
            .power_ups
            .iter()
            .filter(|(_, p)| p.overlaps(&hitbox))
            .map(|(h, p)| (h, p.kind))
            .collect();
        for (handle, kind) in touched {
            state.power_ups.retire(handle);
            match kind {
                PowerUpKind::DamageBoost => player.grant_boost(now, &state.tuning),
                PowerUpKind::Heal => player.heal(state.tuning.heal_amount),
            }
            state.events.push(GameEvent::PowerUp {
                player: player.slot,
                kind,
            });
        }
    }
}

fn check_transitions(state: &mut GameState) {
    let kill_plane = state.kill_plane();
    for player in state.players.iter_mut().filter(|p| p.alive) {
        if player.body.rect.top() > kill_plane {
            player.kill();
            state.events.push(GameEvent::PlayerDied { player: player.slot });
            log::info!("Player {} fell out of the world", player.slot + 1);
        }
    }
    if state.players.iter().all(|p| !p.alive) {
        state.lose();
        return;
    }

    match state.phase {
        GamePhase::Platformer => {
            let Some((gate, kind)) = state.gate else {
                return;
            };
            if state.living_players().any(|p| p.overlaps(&gate)) {
                match kind {
                    GateKind::Boss => state.enter_boss_fight(),
                    GateKind::NextLevel => state.win(),
                }
            }
        }
        GamePhase::BossFight => {
            if state.boss.as_ref().is_some_and(|b| b.is_removed()) {
                state.win();
            }
        }
        GamePhase::Victory | GamePhase::GameOver => {}
    }
}
