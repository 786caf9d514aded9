//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (arena slot order)
//! - No rendering, audio or file access

pub mod anim;
pub mod arena;
pub mod boss;
pub mod clock;
pub mod collision;
pub mod enemy;
pub mod events;
pub mod input;
pub mod level;
pub mod physics;
pub mod pickup;
pub mod platform;
pub mod player;
pub mod projectile;
pub mod rect;
pub mod state;
pub mod tick;
pub mod view;
pub mod weapon;

pub use arena::{Arena, Handle};
pub use boss::{AttackPattern, Boss, BossType, DeathState};
pub use clock::FixedTimestep;
pub use collision::{CollisionResult, move_and_collide};
pub use enemy::Enemy;
pub use events::GameEvent;
pub use input::{Actions, ShootDirection};
pub use level::{GateKind, LevelData, LevelError};
pub use physics::{Body, Collidable};
pub use platform::{Axis, MovingPlatform, Platform};
pub use player::{ActionState, Player};
pub use projectile::{Projectile, ProjectileOwner};
pub use rect::Rect;
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use view::{EntityKind, EntityView};
pub use weapon::WeaponKind;
