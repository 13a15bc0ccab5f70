//! Game state and core simulation types
//!
//! `GameState` is the single owner of everything the simulation mutates:
//! terrain, entity pools, score, health and the deferred-event queue. Score
//! and health only change through the methods here, which enforce their
//! invariants and decide when the run ends.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::cooldown::CooldownGate;
use super::entity::{Enemy, EntityKind, EntityView, Player, PowerUp};
use super::pool::{EntityList, ProjectilePool};
use super::schedule::Scheduler;
use super::spawner;
use super::terrain::{BlockRef, TerrainGrid};
use crate::consts::PLAYER_START;
use crate::tuning::{Tuning, TuningError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended (health reached zero); ticks are inert
    GameOver,
}

/// State changes reported to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: u32, kind: EntityKind, pos: Vec2 },
    Destroyed { id: u32, kind: EntityKind },
    BlockRemoved { block: BlockRef },
    ScoreChanged { score: u64 },
    HealthChanged { health: u8 },
    /// Dig readiness flipped (HUD indicator color)
    DigReadyChanged { ready: bool },
    GameOver { score: u64 },
}

/// Held state of the edge-triggered buttons on the previous tick
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct HeldButtons {
    pub fire: bool,
    pub dig: bool,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Never decreases
    pub score: u64,
    /// Always within [0, max_health]
    pub health: u8,
    /// Simulation clock (ms)
    pub time_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub terrain: TerrainGrid,
    pub projectiles: ProjectilePool,
    /// Active enemies (sorted by id)
    pub enemies: EntityList<Enemy>,
    /// Active power-ups (sorted by id)
    pub powerups: EntityList<PowerUp>,
    pub cooldowns: CooldownGate,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) scheduler: Scheduler,
    pub(crate) rng: Pcg32,
    pub(crate) held: HeldButtons,
    /// Last dig readiness reported through `events`
    pub(crate) dig_ready: bool,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a new game with custom tuning, rejecting values the spawners
    /// or terrain cannot run with
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let mut scheduler = Scheduler::new();
        spawner::arm(&mut scheduler, 0.0, &tuning);

        log::info!(
            "New run: seed={}, grid={}x{}, health={}/{}",
            seed,
            tuning.grid_cols,
            tuning.grid_rows,
            tuning.starting_health,
            tuning.max_health
        );

        Self {
            seed,
            phase: GamePhase::Playing,
            score: 0,
            health: tuning.starting_health,
            time_ms: 0.0,
            time_ticks: 0,
            player: Player::new(PLAYER_START, tuning.player_speed),
            terrain: TerrainGrid::from_tuning(&tuning),
            projectiles: ProjectilePool::new(tuning.projectile_pool_cap),
            enemies: EntityList::new(),
            powerups: EntityList::new(),
            cooldowns: CooldownGate::new(tuning.fire_cooldown_ms, tuning.dig_cooldown_ms),
            events: Vec::new(),
            scheduler,
            rng: Pcg32::seed_from_u64(seed),
            held: HeldButtons::default(),
            dig_ready: true,
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Award points. Score never decreases.
    pub fn add_score(&mut self, points: u64) {
        if points == 0 {
            return;
        }
        self.score = self.score.saturating_add(points);
        self.events.push(GameEvent::ScoreChanged { score: self.score });
    }

    /// Take one point of damage. Ends the run when health reaches zero.
    pub fn damage_player(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.health = self.health.saturating_sub(1);
        self.events.push(GameEvent::HealthChanged {
            health: self.health,
        });
        if self.health == 0 {
            self.end_run();
        }
    }

    /// Restore one point of health, capped at the maximum
    pub fn heal_player(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.health = self.health.saturating_add(1).min(self.tuning.max_health);
        self.events.push(GameEvent::HealthChanged {
            health: self.health,
        });
    }

    fn end_run(&mut self) {
        self.phase = GamePhase::GameOver;
        self.player.alive = false;
        self.player.vel = Vec2::ZERO;
        log::info!(
            "Game over at {:.0}ms: score={}, tick={}",
            self.time_ms,
            self.score,
            self.time_ticks
        );
        self.events.push(GameEvent::GameOver { score: self.score });
    }

    /// Create an enemy at `pos` moving horizontally at `vel_x`
    pub fn spawn_enemy(&mut self, pos: Vec2, vel_x: f32) -> u32 {
        let id = self.next_entity_id();
        self.enemies.create(Enemy::new(id, pos, vel_x));
        log::debug!("Enemy {} spawned at ({}, {}) vx={}", id, pos.x, pos.y, vel_x);
        self.events.push(GameEvent::Spawned {
            id,
            kind: EntityKind::Enemy,
            pos,
        });
        id
    }

    /// Create a floating power-up at `pos`
    pub fn spawn_powerup(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.powerups.create(PowerUp { id, pos });
        log::debug!("Power-up {} spawned at ({}, {})", id, pos.x, pos.y);
        self.events.push(GameEvent::Spawned {
            id,
            kind: EntityKind::PowerUp,
            pos,
        });
        id
    }

    /// Remove an enemy. Returns false if it was already gone.
    pub fn destroy_enemy(&mut self, id: u32) -> bool {
        let removed = self.enemies.destroy(id).is_some();
        if removed {
            self.events.push(GameEvent::Destroyed {
                id,
                kind: EntityKind::Enemy,
            });
        }
        removed
    }

    /// Remove a power-up. Returns false if it was already gone.
    pub fn destroy_powerup(&mut self, id: u32) -> bool {
        let removed = self.powerups.destroy(id).is_some();
        if removed {
            self.events.push(GameEvent::Destroyed {
                id,
                kind: EntityKind::PowerUp,
            });
        }
        removed
    }

    /// Remove a projectile. Returns false if it was already gone.
    pub fn destroy_projectile(&mut self, id: u32) -> bool {
        let removed = self.projectiles.destroy(id).is_some();
        if removed {
            self.events.push(GameEvent::Destroyed {
                id,
                kind: EntityKind::Projectile,
            });
        }
        removed
    }

    /// Remove a terrain block. Returns false if it was already gone.
    pub fn remove_block(&mut self, block: BlockRef) -> bool {
        let removed = self.terrain.remove_block(block);
        if removed {
            self.events.push(GameEvent::BlockRemoved { block });
        }
        removed
    }

    /// Dig readiness for the HUD indicator (pure poll)
    pub fn can_dig_now(&self) -> bool {
        self.cooldowns.can_dig(self.time_ms)
    }

    /// Every entity in draw order: terrain is static, then player, enemies,
    /// power-ups, projectiles
    pub fn entities(&self) -> impl Iterator<Item = EntityView<'_>> {
        std::iter::once(EntityView::Player(&self.player))
            .chain(self.enemies.iter().map(EntityView::Enemy))
            .chain(self.powerups.iter().map(EntityView::PowerUp))
            .chain(self.projectiles.iter().map(EntityView::Projectile))
    }

    /// Serializable frame for hosts that render from JSON
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            health: self.health,
            time_ms: self.time_ms,
            dig_ready: self.can_dig_now(),
            blocks_remaining: self.terrain.solid_count(),
            entities: self
                .entities()
                .map(|e| EntitySnapshot {
                    id: e.id(),
                    kind: e.kind(),
                    pos: e.pos(),
                    flip_x: e.flip_x(),
                })
                .collect(),
        }
    }
}

/// One entity in a `Snapshot`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub flip_x: bool,
}

/// Everything a HUD and sprite renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub health: u8,
    pub time_ms: f64,
    pub dig_ready: bool,
    pub blocks_remaining: usize,
    pub entities: Vec<EntitySnapshot>,
}
