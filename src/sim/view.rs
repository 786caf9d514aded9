//! Read-only snapshot for the renderer
//!
//! Positions plus an animation-state name per entity. The renderer decides
//! what a name looks like; the simulation never sees sprites.

use serde::Serialize;

use super::boss::DeathState;
use super::pickup::PowerUpKind;
use super::rect::Rect;
use super::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Platform,
    MovingPlatform,
    Player,
    Enemy,
    Boss,
    PlayerShot,
    UltimateShot,
    EnemyShot,
    BossShot,
    Coin,
    PowerUpBox,
    PowerUp,
    Gate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub kind: EntityKind,
    pub rect: Rect,
    pub anim: &'static str,
    /// Animation frame for clips the simulation drives
    pub frame: Option<u32>,
}

impl EntityView {
    fn new(kind: EntityKind, rect: Rect, anim: &'static str) -> Self {
        Self {
            kind,
            rect,
            anim,
            frame: None,
        }
    }
}

impl GameState {
    /// Everything visible this tick, in draw order
    pub fn view(&self) -> Vec<EntityView> {
        let mut out = Vec::new();

        out.extend(self.platforms.iter().map(|p| EntityView::new(EntityKind::Platform, p.rect, "static")));
        out.extend(
            self.moving_platforms
                .iter()
                .map(|p| EntityView::new(EntityKind::MovingPlatform, p.rect, "moving")),
        );
        if let Some((rect, _)) = self.gate {
            out.push(EntityView::new(EntityKind::Gate, rect, "gate"));
        }
        out.extend(self.coins.values().map(|c| EntityView::new(EntityKind::Coin, c.rect, "spin")));
        out.extend(
            self.boxes
                .values()
                .map(|b| EntityView::new(EntityKind::PowerUpBox, b.rect, "closed")),
        );
        out.extend(self.power_ups.values().map(|p| {
            let anim = match p.kind {
                PowerUpKind::DamageBoost => "damage_boost",
                PowerUpKind::Heal => "heal",
            };
            EntityView::new(EntityKind::PowerUp, p.rect, anim)
        }));
        out.extend(self.enemies.values().map(|e| {
            let anim = if e.direction < 0.0 { "patrol_left" } else { "patrol_right" };
            EntityView::new(EntityKind::Enemy, e.body.rect, anim)
        }));
        if let Some(boss) = self.boss.as_ref().filter(|b| b.death != DeathState::Removed) {
            out.push(EntityView {
                frame: boss.explosion_frame(),
                ..EntityView::new(EntityKind::Boss, boss.body.rect, boss.anim_name())
            });
        }
        out.extend(self.players.iter().map(|p| EntityView::new(EntityKind::Player, p.body.rect, p.anim_name())));
        out.extend(self.player_shots.values().map(|s| {
            let kind = if s.ultimate {
                EntityKind::UltimateShot
            } else {
                EntityKind::PlayerShot
            };
            EntityView::new(kind, s.body.rect, "fly")
        }));
        out.extend(
            self.enemy_shots
                .values()
                .map(|s| EntityView::new(EntityKind::EnemyShot, s.body.rect, "fly")),
        );
        out.extend(
            self.boss_shots
                .values()
                .map(|s| EntityView::new(EntityKind::BossShot, s.body.rect, "fly")),
        );
        out
    }
}
