//! Cooldown gates for repeatable player actions
//!
//! A gate is a pure timestamp comparison: an action is allowed once at least
//! `duration_ms` has passed since it was last recorded. Polling never mutates.

use serde::{Deserialize, Serialize};

/// Minimum interval between uses of a single action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    pub duration_ms: f64,
    /// `None` until the action is used for the first time
    pub last_use_ms: Option<f64>,
}

impl Cooldown {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            last_use_ms: None,
        }
    }

    #[inline]
    pub fn ready(&self, now_ms: f64) -> bool {
        match self.last_use_ms {
            Some(last) => now_ms - last >= self.duration_ms,
            None => true,
        }
    }

    #[inline]
    pub fn record_use(&mut self, now_ms: f64) {
        self.last_use_ms = Some(now_ms);
    }
}

/// Fire and dig cooldowns for the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CooldownGate {
    pub fire: Cooldown,
    pub dig: Cooldown,
}

impl CooldownGate {
    pub fn new(fire_cooldown_ms: f64, dig_cooldown_ms: f64) -> Self {
        Self {
            fire: Cooldown::new(fire_cooldown_ms),
            dig: Cooldown::new(dig_cooldown_ms),
        }
    }

    pub fn can_fire(&self, now_ms: f64) -> bool {
        self.fire.ready(now_ms)
    }

    pub fn record_fire(&mut self, now_ms: f64) {
        self.fire.record_use(now_ms);
    }

    pub fn can_dig(&self, now_ms: f64) -> bool {
        self.dig.ready(now_ms)
    }

    pub fn record_dig(&mut self, now_ms: f64) {
        self.dig.record_use(now_ms);
    }
}
