//! Player controller
//!
//! Turns held buttons into velocity, facing, jumps, shots and digs. Fire and
//! dig trigger on the press edge only and are gated by their cooldowns.

use glam::Vec2;

use super::entity::{EntityKind, Facing, Projectile};
use super::schedule::Deferred;
use super::state::{GameEvent, GameState};
use super::terrain::BlockRef;
use super::tick::TickInput;

/// Apply one tick of input to the player
pub fn apply_input(state: &mut GameState, input: &TickInput) {
    let fire_edge = input.fire && !state.held.fire;
    let dig_edge = input.down && !state.held.dig;
    state.held.fire = input.fire;
    state.held.dig = input.down;

    if !state.player.alive {
        return;
    }

    steer(state, input);

    let now = state.time_ms;
    if dig_edge && state.cooldowns.can_dig(now) {
        dig(state);
        state.cooldowns.record_dig(now);
    }
    if fire_edge && state.cooldowns.can_fire(now) {
        fire(state);
        state.cooldowns.record_fire(now);
    }
}

/// Horizontal movement, facing and jump
fn steer(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;

    if input.left || input.a {
        player.vel.x = -player.speed;
        player.facing = Facing::Left;
    } else if input.right || input.d {
        player.vel.x = player.speed;
        player.facing = Facing::Right;
    } else {
        player.vel.x = 0.0;
    }

    if (input.up || input.w) && player.grounded {
        player.vel.y = -state.tuning.jump_impulse;
        player.grounded = false;
    }
}

/// Launch a projectile in the facing direction. Returns its id, or `None`
/// when the pool has no free slot and the shot is dropped.
pub fn fire(state: &mut GameState) -> Option<u32> {
    let dir = state.player.facing.sign();
    let pos = state.player.pos + Vec2::new(dir * state.tuning.muzzle_offset, 0.0);
    let id = state.next_entity_id();
    let projectile = Projectile {
        id,
        pos,
        vel: Vec2::new(state.tuning.projectile_speed * dir, 0.0),
        spawned_at_ms: state.time_ms,
        ttl_ms: state.tuning.projectile_ttl_ms,
    };
    let expires_at = projectile.expires_at_ms();

    if !state.projectiles.spawn(projectile) {
        return None;
    }
    state
        .scheduler
        .schedule(expires_at, Deferred::ExpireProjectile { id });
    state.events.push(GameEvent::Spawned {
        id,
        kind: EntityKind::Projectile,
        pos,
    });
    Some(id)
}

/// Remove the terrain around a point just below the ship
pub fn dig(state: &mut GameState) -> Vec<BlockRef> {
    let center = state.player.pos + Vec2::new(0.0, state.tuning.dig_offset_y);
    let removed = state
        .terrain
        .remove_within_radius(center, state.tuning.dig_radius);
    log::debug!(
        "Dig at ({}, {}) removed {} blocks",
        center.x,
        center.y,
        removed.len()
    );
    state
        .events
        .extend(removed.iter().map(|&block| GameEvent::BlockRemoved { block }));
    removed
}
