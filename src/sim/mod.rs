//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time advances only through `tick`
//! - Seeded RNG only
//! - Stable iteration order (by entity ID / slot)
//! - No rendering or platform dependencies

pub mod collision;
pub mod cooldown;
pub mod entity;
pub mod physics;
pub mod player;
pub mod pool;
pub mod resolver;
pub mod schedule;
pub mod spawner;
pub mod state;
pub mod terrain;
pub mod tick;

pub use collision::Aabb;
pub use cooldown::{Cooldown, CooldownGate};
pub use entity::{Body, Enemy, EntityKind, EntityView, Facing, Player, PowerUp, Projectile};
pub use physics::{Contacts, MotionConfig, step_body};
pub use pool::{EntityList, ProjectilePool};
pub use schedule::{Deferred, Scheduler};
pub use state::{EntitySnapshot, GameEvent, GamePhase, GameState, Snapshot};
pub use terrain::{BlockRef, TerrainGrid};
pub use tick::{TickInput, tick};
