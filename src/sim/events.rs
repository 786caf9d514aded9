//! Discrete game events emitted during a tick
//!
//! Audio, VFX and save-layer collaborators consume these after the tick; the
//! simulation never waits on them.

use super::boss::BossType;
use super::pickup::PowerUpKind;
use super::weapon::WeaponKind;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Jump { player: usize },
    DoubleJump { player: usize },
    Landing { player: usize },
    Dash { player: usize },
    Shot { player: usize, weapon: WeaponKind },
    Ultimate { player: usize },
    WeaponSwitch { player: usize, weapon: WeaponKind },
    Emote { player: usize },
    EnemyHit { damage: i32 },
    EnemyKilled { player: usize },
    BossHit { damage: i32, health: i32 },
    BossPhase { phase: u8 },
    BossFalling,
    Explosion,
    ScreenShake,
    BossDefeated { boss_type: BossType },
    PlayerHit { player: usize, damage: i32 },
    PlayerDied { player: usize },
    Coin { player: usize },
    BoxBroken,
    PowerUp { player: usize, kind: PowerUpKind },
    BossGate,
    Victory,
    GameOver,
}

impl GameEvent {
    /// Cue name handed to the audio/VFX layer
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::Jump { .. } => "jump",
            GameEvent::DoubleJump { .. } => "double_jump",
            GameEvent::Landing { .. } => "landing",
            GameEvent::Dash { .. } => "dash",
            GameEvent::Shot { weapon, .. } => weapon.shot_event_name(),
            GameEvent::Ultimate { .. } => "ultimate",
            GameEvent::WeaponSwitch { .. } => "weapon_switch",
            GameEvent::Emote { .. } => "emote",
            GameEvent::EnemyHit { .. } => "enemy_hit",
            GameEvent::EnemyKilled { .. } => "enemy_killed",
            GameEvent::BossHit { .. } => "boss_hit",
            GameEvent::BossPhase { .. } => "boss_phase",
            GameEvent::BossFalling => "boss_falling",
            GameEvent::Explosion => "explosion",
            GameEvent::ScreenShake => "screen_shake",
            GameEvent::BossDefeated { .. } => "boss_defeated",
            GameEvent::PlayerHit { .. } => "player_hit",
            GameEvent::PlayerDied { .. } => "player_died",
            GameEvent::Coin { .. } => "coin",
            GameEvent::BoxBroken => "box_broken",
            GameEvent::PowerUp { .. } => "power_up",
            GameEvent::BossGate => "boss_gate",
            GameEvent::Victory => "victory",
            GameEvent::GameOver => "game_over",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shot_names_follow_weapon() {
        let shot = GameEvent::Shot {
            player: 0,
            weapon: WeaponKind::Default,
        };
        assert_eq!(shot.name(), "default_shot");
        let spread = GameEvent::Shot {
            player: 0,
            weapon: WeaponKind::SpreadShot,
        };
        assert_eq!(spread.name(), "spread_shot");
    }

    #[test]
    fn test_core_cue_names() {
        assert_eq!(GameEvent::Landing { player: 0 }.name(), "landing");
        assert_eq!(GameEvent::Jump { player: 1 }.name(), "jump");
        assert_eq!(GameEvent::Explosion.name(), "explosion");
    }
}
