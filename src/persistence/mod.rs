//! Meta-progression record exchanged with the save layer
//!
//! The simulation reads a [`Loadout`] at level start and reports a
//! [`ProgressDelta`] when the attempt ends. Storage itself belongs to the host:
//! this module only converts to and from JSON.

mod shop;

pub use shop::{ShopError, ShopItem};

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Purchased upgrades. Any key absent from saved data is "not purchased".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Upgrades {
    pub double_jump: bool,
    pub spread_shot: bool,
    pub burst_shot: bool,
    pub health_up: bool,
    /// Damage upgrade level (0 = none)
    pub damage_up: u32,
}

/// What the simulation needs from the save at level start
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Loadout {
    pub upgrades: Upgrades,
}

impl Loadout {
    /// Parse a loadout; missing or unknown keys never fail
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Number of jumps available after landing
    pub fn max_jumps(&self) -> u8 {
        if self.upgrades.double_jump { 2 } else { 1 }
    }
}

/// Result of one level attempt, to be committed by the save layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressDelta {
    pub level_id: u32,
    pub coins_earned: u64,
    /// Level unlocked by winning, if any
    pub unlocked_level: Option<u32>,
}

/// Persistent meta-progression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    pub total_coins: u64,
    pub unlocked_levels: BTreeSet<u32>,
    pub upgrades: Upgrades,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            total_coins: 0,
            unlocked_levels: BTreeSet::from([1]),
            upgrades: Upgrades::default(),
        }
    }
}

impl SaveData {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn loadout(&self) -> Loadout {
        Loadout {
            upgrades: self.upgrades.clone(),
        }
    }

    pub fn is_unlocked(&self, level_id: u32) -> bool {
        self.unlocked_levels.contains(&level_id)
    }

    /// Commit the outcome of a level attempt
    pub fn apply(&mut self, delta: &ProgressDelta) {
        self.total_coins += delta.coins_earned;
        if let Some(level) = delta.unlocked_level {
            if self.unlocked_levels.insert(level) {
                log::info!("Unlocked level {}", level);
            }
        }
    }
}
