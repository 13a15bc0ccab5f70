//! Dig Blaster - A side-scrolling dig-and-shoot arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, spawning, game state)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants that are not exposed as tuning knobs
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player ship body (sprite is 6x4 texels at 4px)
    pub const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 16.0);
    /// Enemy body is smaller than its sprite
    pub const ENEMY_SIZE: Vec2 = Vec2::new(14.0, 14.0);
    pub const PROJECTILE_SIZE: Vec2 = Vec2::new(4.0, 4.0);
    pub const POWERUP_SIZE: Vec2 = Vec2::new(8.0, 8.0);

    /// Player spawn point
    pub const PLAYER_START: Vec2 = Vec2::new(100.0, 350.0);
}

/// Center x of a grid column
#[inline]
pub fn column_center_x(col: u32, block_w: f32) -> f32 {
    col as f32 * block_w + block_w / 2.0
}
