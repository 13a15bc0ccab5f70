//! Data-driven game balance
//!
//! Every number a designer might want to tweak lives here. Values are loaded
//! from JSON; missing fields fall back to the defaults.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Reasons a tuning document can be rejected
#[derive(Debug)]
pub enum TuningError {
    /// The document is not valid JSON for `Tuning`
    Parse(serde_json::Error),
    /// The values parse but describe an unplayable game
    Invalid(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning parse error: {}", e),
            TuningError::Invalid(reason) => write!(f, "invalid tuning: {}", reason),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    /// Downward acceleration (px/s²)
    pub gravity: f32,

    // === Terrain ===
    pub grid_cols: u32,
    pub grid_rows: u32,
    pub block_width: f32,
    pub block_height: f32,
    /// Center y of the top block row
    pub grid_start_y: f32,

    // === Player ===
    pub player_speed: f32,
    pub jump_impulse: f32,
    pub starting_health: u8,
    pub max_health: u8,

    // === Actions ===
    pub fire_cooldown_ms: f64,
    pub dig_cooldown_ms: f64,
    pub dig_radius: f32,
    /// How far below the player center the dig is centered
    pub dig_offset_y: f32,

    // === Projectiles ===
    pub projectile_speed: f32,
    pub projectile_ttl_ms: f64,
    pub projectile_pool_cap: usize,
    /// Horizontal distance from the ship center where shots appear
    pub muzzle_offset: f32,
    pub projectile_min_x: f32,
    pub projectile_max_x: f32,
    pub projectile_min_y: f32,

    // === Spawning ===
    pub enemy_spawn_interval_ms: f64,
    pub powerup_spawn_interval_ms: f64,
    pub enemy_max_speed: i32,
    pub spawn_min_y: i32,
    pub spawn_max_y: i32,

    // === Scoring ===
    pub enemy_kill_score: u64,
    pub powerup_score: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,
            gravity: 600.0,

            grid_cols: 40,
            grid_rows: 8,
            block_width: 20.0,
            block_height: 24.0,
            grid_start_y: 420.0,

            player_speed: 160.0,
            jump_impulse: 350.0,
            starting_health: 3,
            max_health: 5,

            fire_cooldown_ms: 300.0,
            dig_cooldown_ms: 500.0,
            dig_radius: 28.0,
            dig_offset_y: 10.0,

            projectile_speed: 500.0,
            projectile_ttl_ms: 1200.0,
            projectile_pool_cap: 30,
            muzzle_offset: 24.0,
            projectile_min_x: -50.0,
            projectile_max_x: 900.0,
            projectile_min_y: -50.0,

            enemy_spawn_interval_ms: 3000.0,
            powerup_spawn_interval_ms: 5000.0,
            enemy_max_speed: 60,
            spawn_min_y: 450,
            spawn_max_y: 600,

            enemy_kill_score: 10,
            powerup_score: 25,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.grid_cols == 0 || self.grid_rows == 0 {
            return Err(TuningError::Invalid("terrain grid must have at least one cell"));
        }
        if self.block_width <= 0.0 || self.block_height <= 0.0 {
            return Err(TuningError::Invalid("block size must be positive"));
        }
        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            return Err(TuningError::Invalid("world size must be positive"));
        }
        if self.spawn_min_y > self.spawn_max_y {
            return Err(TuningError::Invalid("spawn y range is empty"));
        }
        if self.enemy_max_speed < 0 {
            return Err(TuningError::Invalid("enemy speed must not be negative"));
        }
        if self.enemy_spawn_interval_ms <= 0.0 || self.powerup_spawn_interval_ms <= 0.0 {
            return Err(TuningError::Invalid("spawn intervals must be positive"));
        }
        if self.starting_health == 0 || self.starting_health > self.max_health {
            return Err(TuningError::Invalid(
                "starting health must be in 1..=max_health",
            ));
        }
        if self.projectile_pool_cap == 0 {
            return Err(TuningError::Invalid("projectile pool needs at least one slot"));
        }
        Ok(())
    }

    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }
}
