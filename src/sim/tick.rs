//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically:
//! deferred events -> player input -> motion -> interactions -> HUD signals.

use super::entity::EntityView;
use super::physics::{MotionConfig, step_body};
use super::player;
use super::resolver;
use super::schedule::Deferred;
use super::spawner;
use super::state::{GameEvent, GameState};
use crate::consts::PLAYER_SIZE;

/// Held buttons for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump
    pub up: bool,
    /// Dig (edge-triggered)
    pub down: bool,
    /// Shoot (edge-triggered)
    pub fire: bool,
    pub a: bool,
    pub d: bool,
    pub w: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one timestep of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    // Nothing moves, spawns or expires once the run has ended
    if state.is_game_over() {
        return;
    }

    let input = if input.idle_mode {
        autopilot(state)
    } else {
        input.clone()
    };

    state.time_ticks += 1;
    state.time_ms += dt as f64 * 1000.0;

    run_deferred(state);
    player::apply_input(state, &input);
    integrate(state, dt);
    resolver::projectiles_vs_terrain(state);
    resolver::resolve(state);

    let ready = state.can_dig_now();
    if ready != state.dig_ready {
        state.dig_ready = ready;
        state.events.push(GameEvent::DigReadyChanged { ready });
    }
}

/// Drain every deferred event that has come due
fn run_deferred(state: &mut GameState) {
    while let Some((due, event)) = state.scheduler.pop_due(state.time_ms) {
        match event {
            Deferred::SpawnEnemy => {
                let pos = spawner::roll_position(&mut state.rng, &state.tuning);
                let vel_x = spawner::roll_enemy_speed(&mut state.rng, &state.tuning);
                state.spawn_enemy(pos, vel_x);
            }
            Deferred::SpawnPowerUp => {
                let pos = spawner::roll_position(&mut state.rng, &state.tuning);
                state.spawn_powerup(pos);
            }
            Deferred::ExpireProjectile { id } => {
                if state.destroy_projectile(id) {
                    log::trace!("Projectile {} expired", id);
                }
            }
        }
        spawner::rearm(&mut state.scheduler, due, event, &state.tuning);
    }
}

/// Move every physical entity and drop shots that left the play area
fn integrate(state: &mut GameState, dt: f32) {
    let cfg = MotionConfig::from_tuning(&state.tuning);

    let player = &mut state.player;
    if player.alive {
        let contacts = step_body(
            &mut player.pos,
            &mut player.vel,
            PLAYER_SIZE,
            &state.terrain,
            dt,
            cfg,
        );
        player.grounded = contacts.down;
    }

    // Enemies patrol: bounce off whichever side blocked them
    for enemy in state.enemies.iter_mut() {
        let speed = enemy.vel.x.abs();
        let contacts = step_body(
            &mut enemy.pos,
            &mut enemy.vel,
            enemy.size,
            &state.terrain,
            dt,
            cfg,
        );
        if contacts.left && !contacts.right {
            enemy.vel.x = speed;
        } else if contacts.right && !contacts.left {
            enemy.vel.x = -speed;
        }
    }

    for shot in state.projectiles.iter_mut() {
        shot.pos += shot.vel * dt;
    }

    let tuning = &state.tuning;
    let escaped: Vec<u32> = state
        .projectiles
        .iter()
        .filter(|p| {
            p.out_of_bounds(
                tuning.projectile_min_x,
                tuning.projectile_max_x,
                tuning.projectile_min_y,
            )
        })
        .map(|p| p.id)
        .collect();
    for id in escaped {
        state.destroy_projectile(id);
    }
}

/// Demo AI: chase the nearest enemy and shoot it, grab power-ups when the
/// coast is clear, dig down toward enemies underneath
fn autopilot(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    let me = state.player.pos;
    // Edge-triggered buttons must be released between presses
    let pulse = state.time_ticks % 2 == 0;

    let nearest = |kind_filter: fn(&EntityView<'_>) -> bool| {
        state
            .entities()
            .filter(kind_filter)
            .min_by(|a, b| {
                a.pos()
                    .distance_squared(me)
                    .total_cmp(&b.pos().distance_squared(me))
            })
            .map(|e| e.pos())
    };

    if let Some(target) = nearest(|e| matches!(e, EntityView::Enemy(_))) {
        let delta = target - me;
        if delta.y > 20.0 && delta.x.abs() < 16.0 {
            input.down = pulse;
        } else if delta.y.abs() < 12.0 {
            // Level with the target: face it and shoot
            let facing_right = state.player.facing.sign() > 0.0;
            if (delta.x > 0.0) != facing_right {
                input.left = delta.x < 0.0;
                input.right = delta.x > 0.0;
            }
            input.fire = pulse;
        } else {
            input.left = delta.x < -4.0;
            input.right = delta.x > 4.0;
        }
    } else if let Some(target) = nearest(|e| matches!(e, EntityView::PowerUp(_))) {
        let delta = target - me;
        input.left = delta.x < -4.0;
        input.right = delta.x > 4.0;
        input.up = delta.y < -30.0;
        input.down = delta.y > 20.0 && delta.x.abs() < 16.0 && pulse;
    }

    input
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::Tuning;
    use crate::consts::SIM_DT;
    use crate::sim::entity::{EntityKind, Facing, Projectile};
    use crate::sim::state::GamePhase;
    use crate::sim::terrain::BlockRef;

    fn press_fire() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_player_lands_on_terrain() {
        let mut state = GameState::new(12345);
        let input = TickInput::default();
        for _ in 0..60 {
            tick(&mut state, &input, SIM_DT);
        }
        assert!(state.player.grounded);
        assert_eq!(state.player.pos.y, 400.0);
    }

    #[test]
    fn test_jump_leaves_ground() {
        let mut state = GameState::new(12345);
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        let jump = TickInput {
            w: true,
            ..Default::default()
        };
        tick(&mut state, &jump, SIM_DT);
        assert!(!state.player.grounded);
        assert!(state.player.pos.y < 400.0);
    }

    fn spawned(events: &[GameEvent], kind: EntityKind) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::Spawned { kind: k, .. } if *k == kind))
            .count()
    }

    #[test]
    fn test_spawn_timers_fire_on_wall_time() {
        let mut state = GameState::new(7);
        let input = TickInput::default();
        let mut enemies = 0;
        let mut powerups = 0;

        while state.time_ms < 2900.0 {
            tick(&mut state, &input, SIM_DT);
            enemies += spawned(&state.events, EntityKind::Enemy);
        }
        assert_eq!(enemies, 0);

        while state.time_ms < 5100.0 {
            tick(&mut state, &input, SIM_DT);
            enemies += spawned(&state.events, EntityKind::Enemy);
            powerups += spawned(&state.events, EntityKind::PowerUp);
        }
        assert_eq!(enemies, 1);
        assert_eq!(powerups, 1);
    }

    #[test]
    fn test_spawners_catch_up_after_long_frame() {
        let mut state = GameState::new(7);
        state.player.alive = false;
        tick(&mut state, &TickInput::default(), 10.0);
        assert_eq!(state.time_ms, 10_000.0);
        // Enemy timer fired at 3, 6, 9 s; power-up at 5, 10 s
        assert_eq!(spawned(&state.events, EntityKind::Enemy), 3);
        assert_eq!(spawned(&state.events, EntityKind::PowerUp), 2);
        assert_eq!(state.scheduler.next_due(), Some(12_000.0));
    }

    #[test]
    fn test_shot_expires_by_ttl() {
        // Fired left from x=700 the shot would need ~1.45s to leave the
        // play area, so the 1200ms lifetime is what removes it
        let mut state = GameState::new(1);
        state.player.pos = Vec2::new(700.0, 100.0);
        state.player.facing = Facing::Left;
        tick(&mut state, &press_fire(), SIM_DT);
        assert_eq!(state.projectiles.active_count(), 1);
        let expires_at = state.time_ms + 1200.0;

        let idle = TickInput::default();
        while state.time_ms < expires_at {
            tick(&mut state, &idle, SIM_DT);
            let expected = if state.time_ms < expires_at { 1 } else { 0 };
            assert_eq!(state.projectiles.active_count(), expected);
        }
    }

    #[test]
    fn test_shot_leaves_bounds_at_900() {
        let tuning = Tuning {
            projectile_ttl_ms: 60_000.0,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(1, tuning).expect("valid tuning");
        state.player.alive = false;
        let id = state.next_entity_id();
        state.projectiles.spawn(Projectile {
            id,
            pos: Vec2::new(100.0, 350.0),
            vel: Vec2::new(500.0, 0.0),
            spawned_at_ms: 0.0,
            ttl_ms: 60_000.0,
        });

        // 50 Hz keeps the per-tick step an exact 10px
        let dt = 0.02;
        for _ in 0..79 {
            tick(&mut state, &TickInput::default(), dt);
        }
        assert!(state.projectiles.contains(id));

        // 80 ticks = 1.6s -> x = 900
        tick(&mut state, &TickInput::default(), dt);
        assert!(!state.projectiles.contains(id));
    }

    #[test]
    fn test_three_enemy_hits_end_run_on_third_frame() {
        let mut state = GameState::new(5);
        state.player.pos = Vec2::new(400.0, 200.0);
        let idle = TickInput::default();

        for hit in 1..=3u8 {
            let at = state.player.pos;
            state.spawn_enemy(at, 60.0);
            tick(&mut state, &idle, SIM_DT);
            assert_eq!(state.health, 3 - hit);
            assert_eq!(state.is_game_over(), hit == 3);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver { score: 0 }));
    }

    #[test]
    fn test_enemy_bounces_off_world_edge() {
        let mut state = GameState::new(3);
        state.player.alive = false;
        let id = state.spawn_enemy(Vec2::new(30.0, 401.0), -60.0);

        let idle = TickInput::default();
        for _ in 0..60 {
            tick(&mut state, &idle, SIM_DT);
            if state.enemies.get(id).is_some_and(|e| e.vel.x > 0.0) {
                break;
            }
        }

        let enemy = state.enemies.get(id).expect("enemy alive");
        assert_eq!(enemy.pos.x, 7.0);
        assert_eq!(enemy.vel.x, 60.0);
    }

    #[test]
    fn test_enemy_patrols_dug_pit() {
        let mut state = GameState::new(3);
        state.player.alive = false;
        state.player.pos = Vec2::new(600.0, 400.0);
        for col in 3..=6 {
            state.remove_block(BlockRef { col, row: 0 });
        }
        // Resting on row 1, walled in by columns 2 and 7 of row 0
        let id = state.spawn_enemy(Vec2::new(100.0, 425.0), 45.0);

        let idle = TickInput::default();
        let mut last_sign = 1.0;
        let mut reversals = 0;
        for _ in 0..400 {
            tick(&mut state, &idle, SIM_DT);
            let enemy = state.enemies.get(id).expect("enemy alive");
            assert_eq!(enemy.vel.x.abs(), 45.0);
            assert!((67.0..=133.0).contains(&enemy.pos.x));
            let sign = enemy.vel.x.signum();
            if sign != last_sign {
                reversals += 1;
                last_sign = sign;
            }
        }
        assert!(reversals >= 3);
    }

    #[test]
    fn test_ticks_after_game_over_are_inert() {
        let mut state = GameState::new(5);
        state.health = 1;
        state.player.pos = Vec2::new(400.0, 200.0);
        let at = state.player.pos;
        state.spawn_enemy(at, 60.0);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.is_game_over());

        let time = state.time_ms;
        let pos = state.player.pos;
        for _ in 0..600 {
            tick(&mut state, &press_fire(), SIM_DT);
        }
        assert_eq!(state.time_ms, time);
        assert_eq!(state.player.pos, pos);
        assert!(state.enemies.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_dig_readiness_signal() {
        let mut state = GameState::new(1);
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        let dig = TickInput {
            down: true,
            ..Default::default()
        };
        tick(&mut state, &dig, SIM_DT);
        assert!(state.events.contains(&GameEvent::DigReadyChanged { ready: false }));
        assert!(state.terrain.solid_count() < 320);

        let mut became_ready = false;
        for _ in 0..40 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            if state.events.contains(&GameEvent::DigReadyChanged { ready: true }) {
                became_ready = true;
                break;
            }
        }
        assert!(became_ready);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            press_fire(),
            TickInput {
                down: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..1200 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input, SIM_DT);
            tick(&mut state2, input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.snapshot(), state2.snapshot());
    }

    #[test]
    fn test_idle_mode_plays_without_panicking() {
        let mut state = GameState::new(2024);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..(60 * 60) {
            tick(&mut state, &input, SIM_DT);
        }
        assert!(state.time_ticks > 0);
        assert!(state.health <= 5);
    }
}
