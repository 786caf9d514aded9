//! Upgrade shop: prices and purchase rules

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::SaveData;

/// Highest purchasable damage upgrade level
pub const MAX_DAMAGE_LEVEL: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopItem {
    SpreadShot,
    BurstShot,
    HealthUp,
    DoubleJump,
    DamageUp,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShopError {
    #[error("{0:?} is already owned")]
    AlreadyOwned(ShopItem),
    #[error("not enough coins: need {price}, have {available}")]
    InsufficientCoins { price: u64, available: u64 },
}

impl ShopItem {
    pub fn price(self) -> u64 {
        match self {
            ShopItem::SpreadShot => 25,
            ShopItem::BurstShot => 40,
            ShopItem::HealthUp => 50,
            ShopItem::DoubleJump => 60,
            ShopItem::DamageUp => 30,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShopItem::SpreadShot => "Spread Shot",
            ShopItem::BurstShot => "Burst Shot",
            ShopItem::HealthUp => "Health Upgrade",
            ShopItem::DoubleJump => "Double Jump",
            ShopItem::DamageUp => "Damage Upgrade",
        }
    }

    fn owned(self, save: &SaveData) -> bool {
        let u = &save.upgrades;
        match self {
            ShopItem::SpreadShot => u.spread_shot,
            ShopItem::BurstShot => u.burst_shot,
            ShopItem::HealthUp => u.health_up,
            ShopItem::DoubleJump => u.double_jump,
            ShopItem::DamageUp => u.damage_up >= MAX_DAMAGE_LEVEL,
        }
    }
}

impl SaveData {
    /// Buy an upgrade with banked coins
    pub fn purchase(&mut self, item: ShopItem) -> Result<(), ShopError> {
        if item.owned(self) {
            return Err(ShopError::AlreadyOwned(item));
        }
        let price = item.price();
        if self.total_coins < price {
            return Err(ShopError::InsufficientCoins {
                price,
                available: self.total_coins,
            });
        }
        self.total_coins -= price;

        let u = &mut self.upgrades;
        match item {
            ShopItem::SpreadShot => u.spread_shot = true,
            ShopItem::BurstShot => u.burst_shot = true,
            ShopItem::HealthUp => u.health_up = true,
            ShopItem::DoubleJump => u.double_jump = true,
            ShopItem::DamageUp => u.damage_up += 1,
        }
        log::info!("Purchased {} for {} coins", item.name(), price);
        Ok(())
    }
}
