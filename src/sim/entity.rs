//! Entity types
//!
//! Every physical thing in the world is a box with a position. The `Body`
//! trait exposes that shared shape; `EntityView` lets observers match on
//! the concrete kind without guessing at fields.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// Sprite/entity kind, reported to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Projectile,
    Enemy,
    PowerUp,
}

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// +1 right, -1 left
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Shared positional/physical view of an entity
pub trait Body {
    fn pos(&self) -> Vec2;
    fn size(&self) -> Vec2;

    fn aabb(&self) -> Aabb {
        Aabb::new(self.pos(), self.size() / 2.0)
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub facing: Facing,
    pub speed: f32,
    /// Resting on a solid surface after the last motion step
    pub grounded: bool,
    /// Cleared at game over; the ship stays in the world, frozen
    pub alive: bool,
}

impl Player {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            facing: Facing::Right,
            speed,
            grounded: false,
            alive: true,
        }
    }
}

impl Body for Player {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        PLAYER_SIZE
    }
}

/// A laser shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Simulation time (ms) at spawn
    pub spawned_at_ms: f64,
    pub ttl_ms: f64,
}

impl Projectile {
    /// Time at which the shot expires regardless of anything else
    pub fn expires_at_ms(&self) -> f64 {
        self.spawned_at_ms + self.ttl_ms
    }

    /// Outside the region where shots are kept alive
    pub fn out_of_bounds(&self, min_x: f32, max_x: f32, min_y: f32) -> bool {
        self.pos.y <= min_y || self.pos.x <= min_x || self.pos.x >= max_x
    }
}

impl Body for Projectile {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        PROJECTILE_SIZE
    }
}

/// A patrolling enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, vel_x: f32) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::new(vel_x, 0.0),
            size: ENEMY_SIZE,
        }
    }
}

impl Body for Enemy {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        self.size
    }
}

/// A floating health/score pickup (no gravity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub pos: Vec2,
}

impl Body for PowerUp {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        POWERUP_SIZE
    }
}

/// Entities that live in an `EntityList` and are addressed by id
pub trait Identified {
    fn id(&self) -> u32;
}

impl Identified for Enemy {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Identified for PowerUp {
    fn id(&self) -> u32 {
        self.id
    }
}

/// Borrowed, kind-tagged view of any entity
#[derive(Debug, Clone, Copy)]
pub enum EntityView<'a> {
    Player(&'a Player),
    Projectile(&'a Projectile),
    Enemy(&'a Enemy),
    PowerUp(&'a PowerUp),
}

impl EntityView<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityView::Player(_) => EntityKind::Player,
            EntityView::Projectile(_) => EntityKind::Projectile,
            EntityView::Enemy(_) => EntityKind::Enemy,
            EntityView::PowerUp(_) => EntityKind::PowerUp,
        }
    }

    /// Entity id (the player has none and reports 0)
    pub fn id(&self) -> u32 {
        match self {
            EntityView::Player(_) => 0,
            EntityView::Projectile(p) => p.id,
            EntityView::Enemy(e) => e.id,
            EntityView::PowerUp(p) => p.id,
        }
    }

    pub fn body(&self) -> &dyn Body {
        match self {
            EntityView::Player(p) => *p,
            EntityView::Projectile(p) => *p,
            EntityView::Enemy(e) => *e,
            EntityView::PowerUp(p) => *p,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.body().pos()
    }

    /// Sprite mirroring hint (only the player turns around)
    pub fn flip_x(&self) -> bool {
        matches!(self, EntityView::Player(p) if p.facing == Facing::Left)
    }
}
