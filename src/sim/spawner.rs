//! Periodic enemy and power-up spawning
//!
//! Both timers are deferred events that re-arm themselves on every firing,
//! independent of how many entities are alive. Positions are grid-aligned in
//! x and uniformly random in y.

use glam::Vec2;
use rand::Rng;

use super::schedule::{Deferred, Scheduler};
use crate::column_center_x;
use crate::tuning::Tuning;

/// Queue the first firing of both spawn timers
pub fn arm(scheduler: &mut Scheduler, now_ms: f64, tuning: &Tuning) {
    scheduler.schedule(now_ms + tuning.enemy_spawn_interval_ms, Deferred::SpawnEnemy);
    scheduler.schedule(
        now_ms + tuning.powerup_spawn_interval_ms,
        Deferred::SpawnPowerUp,
    );
}

/// Queue the next firing of a periodic timer, measured from when it was due
pub fn rearm(scheduler: &mut Scheduler, due_ms: f64, event: Deferred, tuning: &Tuning) {
    let interval = match event {
        Deferred::SpawnEnemy => tuning.enemy_spawn_interval_ms,
        Deferred::SpawnPowerUp => tuning.powerup_spawn_interval_ms,
        Deferred::ExpireProjectile { .. } => return,
    };
    scheduler.schedule(due_ms + interval, event);
}

/// Random grid-aligned spawn position
pub fn roll_position(rng: &mut impl Rng, tuning: &Tuning) -> Vec2 {
    let col = rng.random_range(0..tuning.grid_cols);
    let y = rng.random_range(tuning.spawn_min_y..=tuning.spawn_max_y);
    Vec2::new(column_center_x(col, tuning.block_width), y as f32)
}

/// Random horizontal patrol speed; a zero roll becomes full speed right
pub fn roll_enemy_speed(rng: &mut impl Rng, tuning: &Tuning) -> f32 {
    let max = tuning.enemy_max_speed;
    match rng.random_range(-max..=max) {
        0 => max.max(1) as f32,
        v => v as f32,
    }
}
