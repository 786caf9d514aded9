//! Sound cue mapping
//!
//! Turns simulation events into sound cues for the playback collaborator.
//! Pure data: nothing here touches an audio device, and the simulation never
//! waits on it.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Jump,
    DoubleJump,
    Landing,
    Dash,
    DefaultShot,
    SpreadShot,
    BurstShot,
    Ultimate,
    WeaponSwitch,
    Emote,
    EnemyHit,
    EnemyKilled,
    BossHit,
    BossPhase,
    Explosion,
    PlayerHit,
    PlayerDied,
    Coin,
    BoxBroken,
    PowerUp,
    BossGate,
    Victory,
    GameOver,
}

impl SoundCue {
    /// Cue for an event; events with no sound (screen shake, etc.) map to `None`
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        use crate::sim::WeaponKind;

        let cue = match event {
            GameEvent::Jump { .. } => SoundCue::Jump,
            GameEvent::DoubleJump { .. } => SoundCue::DoubleJump,
            GameEvent::Landing { .. } => SoundCue::Landing,
            GameEvent::Dash { .. } => SoundCue::Dash,
            GameEvent::Shot { weapon, .. } => match weapon {
                WeaponKind::Default => SoundCue::DefaultShot,
                WeaponKind::SpreadShot => SoundCue::SpreadShot,
                WeaponKind::BurstShot => SoundCue::BurstShot,
            },
            GameEvent::Ultimate { .. } => SoundCue::Ultimate,
            GameEvent::WeaponSwitch { .. } => SoundCue::WeaponSwitch,
            GameEvent::Emote { .. } => SoundCue::Emote,
            GameEvent::EnemyHit { .. } => SoundCue::EnemyHit,
            GameEvent::EnemyKilled { .. } => SoundCue::EnemyKilled,
            GameEvent::BossHit { .. } => SoundCue::BossHit,
            GameEvent::BossPhase { .. } => SoundCue::BossPhase,
            GameEvent::Explosion => SoundCue::Explosion,
            GameEvent::PlayerHit { .. } => SoundCue::PlayerHit,
            GameEvent::PlayerDied { .. } => SoundCue::PlayerDied,
            GameEvent::Coin { .. } => SoundCue::Coin,
            GameEvent::BoxBroken => SoundCue::BoxBroken,
            GameEvent::PowerUp { .. } => SoundCue::PowerUp,
            GameEvent::BossGate => SoundCue::BossGate,
            GameEvent::Victory => SoundCue::Victory,
            GameEvent::GameOver => SoundCue::GameOver,
            GameEvent::BossFalling | GameEvent::ScreenShake | GameEvent::BossDefeated { .. } => {
                return None;
            }
        };
        Some(cue)
    }

    /// Asset key the playback layer looks up
    pub fn key(self) -> &'static str {
        match self {
            SoundCue::Jump => "jump",
            SoundCue::DoubleJump => "double_jump",
            SoundCue::Landing => "landing",
            SoundCue::Dash => "dash",
            SoundCue::DefaultShot => "default_shot",
            SoundCue::SpreadShot => "spread_shot",
            SoundCue::BurstShot => "burst_shot",
            SoundCue::Ultimate => "ultimate",
            SoundCue::WeaponSwitch => "weapon_switch",
            SoundCue::Emote => "emote",
            SoundCue::EnemyHit => "enemy_hit",
            SoundCue::EnemyKilled => "enemy_killed",
            SoundCue::BossHit => "boss_hit",
            SoundCue::BossPhase => "boss_phase",
            SoundCue::Explosion => "explosion",
            SoundCue::PlayerHit => "player_hit",
            SoundCue::PlayerDied => "player_died",
            SoundCue::Coin => "coin",
            SoundCue::BoxBroken => "box_broken",
            SoundCue::PowerUp => "power_up",
            SoundCue::BossGate => "boss_gate",
            SoundCue::Victory => "victory",
            SoundCue::GameOver => "game_over",
        }
    }
}

/// A cue ready for playback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueuedCue {
    pub cue: SoundCue,
    pub volume: f32,
}

/// Per-frame cue queue handed to the playback collaborator
#[derive(Debug, Clone)]
pub struct AudioQueue {
    pending: Vec<SoundCue>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioQueue {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Queue cues for a batch of events. A cue already queued this frame is skipped.
    pub fn push_events(&mut self, events: &[GameEvent]) {
        for cue in events.iter().filter_map(SoundCue::for_event) {
            if !self.pending.contains(&cue) {
                self.pending.push(cue);
            }
        }
    }

    /// Take this frame's cues. Muted or silent queues yield nothing.
    pub fn drain(&mut self) -> Vec<QueuedCue> {
        let volume = self.effective_volume();
        let cues = std::mem::take(&mut self.pending);
        if volume <= 0.0 {
            return Vec::new();
        }
        log::trace!("Playing {} cues", cues.len());
        cues.into_iter().map(|cue| QueuedCue { cue, volume }).collect()
    }
}
