//! Motion integrator for gravity-bound bodies
//!
//! Axis-separated box physics against the terrain grid and the world edges.
//! X is resolved first, then Y. Horizontal resolution ignores blocks the body
//! was already inside (fresh spawns overlapping ground); vertical resolution
//! always pushes out, so embedded bodies climb to the surface.

use glam::Vec2;

use super::collision::Aabb;
use super::terrain::TerrainGrid;
use crate::tuning::Tuning;

/// World parameters for one motion step
#[derive(Debug, Clone, Copy)]
pub struct MotionConfig {
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// World extent; bodies are kept within [0, bounds]
    pub bounds: Vec2,
}

impl MotionConfig {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            gravity: tuning.gravity,
            bounds: tuning.world_size(),
        }
    }
}

/// Which sides of a body were blocked during a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Advance one body by `dt` seconds and resolve collisions.
///
/// Velocity on a blocked axis is zeroed; callers that want to bounce read the
/// returned contacts.
pub fn step_body(
    pos: &mut Vec2,
    vel: &mut Vec2,
    size: Vec2,
    terrain: &TerrainGrid,
    dt: f32,
    cfg: MotionConfig,
) -> Contacts {
    let half = size / 2.0;
    let mut contacts = Contacts::default();

    vel.y += cfg.gravity * dt;

    // --- X axis ---
    let before = Aabb::new(*pos, half);
    pos.x += vel.x * dt;
    if vel.x != 0.0 {
        let moved = Aabb::new(*pos, half);
        let hits = terrain
            .overlapping(&moved)
            .filter(|&b| !terrain.block_aabb(b).overlaps(&before))
            .map(|b| terrain.block_aabb(b));

        if vel.x > 0.0 {
            if let Some(wall) = hits.map(|a| a.min().x).reduce(f32::min) {
                pos.x = wall - half.x;
                vel.x = 0.0;
                contacts.right = true;
            }
        } else if let Some(wall) = hits.map(|a| a.max().x).reduce(f32::max) {
            pos.x = wall + half.x;
            vel.x = 0.0;
            contacts.left = true;
        }
    }

    // --- Y axis ---
    pos.y += vel.y * dt;
    let moved = Aabb::new(*pos, half);
    let mut hits = terrain.overlapping(&moved).map(|b| terrain.block_aabb(b)).peekable();
    if hits.peek().is_some() {
        if vel.y >= 0.0 {
            if let Some(floor) = hits.map(|a| a.min().y).reduce(f32::min) {
                pos.y = floor - half.y;
                contacts.down = true;
            }
        } else if let Some(ceiling) = hits.map(|a| a.max().y).reduce(f32::max) {
            pos.y = ceiling + half.y;
            contacts.up = true;
        }
        vel.y = 0.0;
    }

    // --- World bounds ---
    if pos.x - half.x <= 0.0 {
        pos.x = half.x;
        vel.x = vel.x.max(0.0);
        contacts.left = true;
    } else if pos.x + half.x >= cfg.bounds.x {
        pos.x = cfg.bounds.x - half.x;
        vel.x = vel.x.min(0.0);
        contacts.right = true;
    }
    if pos.y - half.y < 0.0 {
        pos.y = half.y;
        vel.y = vel.y.max(0.0);
        contacts.up = true;
    } else if pos.y + half.y >= cfg.bounds.y {
        pos.y = cfg.bounds.y - half.y;
        vel.y = vel.y.min(0.0);
        contacts.down = true;
    }

    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{ENEMY_SIZE, PLAYER_SIZE, SIM_DT};
    use crate::sim::terrain::BlockRef;

    fn setup() -> (TerrainGrid, MotionConfig) {
        let tuning = Tuning::default();
        (
            TerrainGrid::from_tuning(&tuning),
            MotionConfig::from_tuning(&tuning),
        )
    }

    #[test]
    fn test_falls_and_lands_on_terrain() {
        let (terrain, cfg) = setup();
        let mut pos = Vec2::new(100.0, 350.0);
        let mut vel = Vec2::ZERO;

        let mut landed = false;
        for _ in 0..120 {
            let c = step_body(&mut pos, &mut vel, PLAYER_SIZE, &terrain, SIM_DT, cfg);
            if c.down {
                landed = true;
                break;
            }
        }
        assert!(landed);
        // Top of the terrain is at 408, ship is 16 tall
        assert_eq!(pos.y, 400.0);
        assert_eq!(vel.y, 0.0);
    }

    #[test]
    fn test_resting_body_stays_grounded() {
        let (terrain, cfg) = setup();
        let mut pos = Vec2::new(100.0, 400.0);
        let mut vel = Vec2::ZERO;
        for _ in 0..10 {
            let c = step_body(&mut pos, &mut vel, PLAYER_SIZE, &terrain, SIM_DT, cfg);
            assert!(c.down);
            assert_eq!(pos.y, 400.0);
        }
    }

    #[test]
    fn test_falls_into_dug_hole() {
        let (mut terrain, cfg) = setup();
        for col in 4..=6 {
            terrain.remove_block(BlockRef { col, row: 0 });
        }
        let mut pos = Vec2::new(100.0, 400.0);
        let mut vel = Vec2::ZERO;
        for _ in 0..60 {
            step_body(&mut pos, &mut vel, ENEMY_SIZE, &terrain, SIM_DT, cfg);
        }
        // Row 1 top is at 432
        assert_eq!(pos.y, 425.0);
    }

    #[test]
    fn test_wall_blocks_horizontal_motion() {
        let (mut terrain, cfg) = setup();
        // Carve a pocket in row 0 spanning columns 4..=5 (x 80..120)
        terrain.remove_block(BlockRef { col: 4, row: 0 });
        terrain.remove_block(BlockRef { col: 5, row: 0 });

        let mut pos = Vec2::new(100.0, 425.0);
        let mut vel = Vec2::new(60.0, 0.0);
        let mut hit = Contacts::default();
        for _ in 0..60 {
            hit = step_body(&mut pos, &mut vel, ENEMY_SIZE, &terrain, SIM_DT, cfg);
            if hit.right {
                break;
            }
        }
        assert!(hit.right);
        assert_eq!(pos.x, 113.0);
        assert_eq!(vel.x, 0.0);
    }

    #[test]
    fn test_embedded_spawn_climbs_to_surface() {
        let (terrain, cfg) = setup();
        let mut pos = Vec2::new(210.0, 450.0);
        let mut vel = Vec2::new(-30.0, 0.0);
        for _ in 0..10 {
            step_body(&mut pos, &mut vel, ENEMY_SIZE, &terrain, SIM_DT, cfg);
        }
        assert_eq!(pos.y, 401.0);
    }

    #[test]
    fn test_world_edges_clamp() {
        let (terrain, cfg) = setup();
        let mut pos = Vec2::new(8.0, 100.0);
        let mut vel = Vec2::new(-160.0, 0.0);
        let c = step_body(&mut pos, &mut vel, ENEMY_SIZE, &terrain, SIM_DT, cfg);
        assert!(c.left);
        assert_eq!(pos.x, 7.0);

        let mut pos = Vec2::new(795.0, 100.0);
        let mut vel = Vec2::new(160.0, 0.0);
        let c = step_body(&mut pos, &mut vel, ENEMY_SIZE, &terrain, SIM_DT, cfg);
        assert!(c.right);
        assert_eq!(pos.x, 793.0);
    }
}
