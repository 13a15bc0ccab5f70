//! Interaction resolver
//!
//! Runs after motion. Each relation first collects the overlapping pairs from
//! a stable view of the pools, then applies the outcomes, so a pair is
//! resolved exactly once and an entity consumed by one pair cannot be counted
//! again in the same relation.

use super::collision::Aabb;
use super::entity::Body;
use super::state::GameState;
use super::terrain::BlockRef;

/// Resolve the three scored relations in their fixed order
pub fn resolve(state: &mut GameState) {
    projectiles_vs_enemies(state);
    player_vs_enemies(state);
    player_vs_powerups(state);
}

/// Shots that struck a solid block destroy themselves and the block
pub fn projectiles_vs_terrain(state: &mut GameState) {
    let strikes: Vec<(u32, BlockRef)> = state
        .projectiles
        .iter()
        .filter_map(|p| {
            let aabb = p.aabb();
            let block = state.terrain.overlapping(&aabb).next();
            block.map(|b| (p.id, b))
        })
        .collect();

    for (id, block) in strikes {
        state.destroy_projectile(id);
        state.remove_block(block);
    }
}

/// Projectile x Enemy: both destroyed, score += kill score
///
/// Shots are visited in pool order and each takes the lowest-id enemy it
/// overlaps that no earlier shot has claimed.
fn projectiles_vs_enemies(state: &mut GameState) {
    let shots: Vec<(u32, Aabb)> = state.projectiles.iter().map(|p| (p.id, p.aabb())).collect();

    let mut hits: Vec<(u32, u32)> = Vec::new();
    for (shot_id, shot) in shots {
        let target = state
            .enemies
            .iter()
            .filter(|e| !hits.iter().any(|&(_, hit)| hit == e.id))
            .find(|e| e.aabb().overlaps(&shot));
        if let Some(enemy) = target {
            hits.push((shot_id, enemy.id));
        }
    }

    for (shot_id, enemy_id) in hits {
        let shot_gone = state.destroy_projectile(shot_id);
        let enemy_gone = state.destroy_enemy(enemy_id);
        if shot_gone && enemy_gone {
            log::debug!("Projectile {} hit enemy {}", shot_id, enemy_id);
            state.add_score(state.tuning.enemy_kill_score);
        }
    }
}

/// Player x Enemy: enemy destroyed, player loses one health
fn player_vs_enemies(state: &mut GameState) {
    if !state.player.alive {
        return;
    }
    let ship = state.player.aabb();
    let contacts: Vec<u32> = state
        .enemies
        .iter()
        .filter(|e| e.aabb().overlaps(&ship))
        .map(|e| e.id)
        .collect();

    for enemy_id in contacts {
        if state.destroy_enemy(enemy_id) {
            log::debug!("Enemy {} rammed the player", enemy_id);
            state.damage_player();
        }
        if state.is_game_over() {
            break;
        }
    }
}

/// Player x PowerUp: pickup destroyed, score bonus and one health back
fn player_vs_powerups(state: &mut GameState) {
    if !state.player.alive {
        return;
    }
    let ship = state.player.aabb();
    let pickups: Vec<u32> = state
        .powerups
        .iter()
        .filter(|p| p.aabb().overlaps(&ship))
        .map(|p| p.id)
        .collect();

    for id in pickups {
        if state.destroy_powerup(id) {
            log::debug!("Power-up {} collected", id);
            state.add_score(state.tuning.powerup_score);
            state.heal_player();
        }
    }
}
