//! End-to-end gameplay scenarios driven through the public API

use std::collections::VecDeque;
use std::time::Duration;

use glam::Vec2;
use proptest::prelude::*;

use geo_wars::config::{GameConfig, Rgb};
use geo_wars::consts::{SIM_DT, TICK};
use geo_wars::sim::{GameState, Tag, step};
use geo_wars::{Game, InputEvent, degrees_of};

/// 800x600 arena, fixed-speed enemies, small player out of the line of fire
fn arena_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.window.width = 800.0;
    config.window.height = 600.0;
    config.enemy.min_speed = 50.0;
    config.enemy.max_speed = 50.0;
    config.enemy.shape_radius = 20.0;
    config.enemy.collision_radius = 20.0;
    config.player.shape_radius = 4.0;
    config.player.collision_radius = 4.0;
    config.bullet.shape_radius = 5.0;
    config.bullet.collision_radius = 5.0;
    config.bullet.speed = 600.0;
    config
}

/// State with the random arrival process pushed far into the future
fn quiet_state(config: GameConfig) -> GameState {
    let mut state = GameState::new(config, 1234);
    state.spawner.countdown = 1.0e6;
    state
}

#[test]
fn bullet_splits_three_sided_enemy() {
    let mut state = quiet_state(arena_config());
    let enemy_pos = Vec2::new(600.0, 300.0);
    let enemy_vel = Vec2::new(0.0, 50.0);
    let enemy = state.spawn_enemy_at(enemy_pos, enemy_vel, 3, Rgb::new(10, 200, 30));

    // Put the player 50 units left of the enemy and fire straight at it
    let player = state.player().unwrap();
    state.store.components.transforms.get_mut(player).unwrap().pos = enemy_pos - Vec2::new(50.0, 0.0);
    state.spawn_bullet(enemy_pos).unwrap();

    let mut ticks = 0;
    let mut before_hit = enemy_pos;
    while state.count(Tag::SmallEnemy) == 0 && ticks < 30 {
        if let Some(t) = state.store.components.transforms.get(enemy) {
            before_hit = t.pos;
        }
        step(&mut state, SIM_DT);
        ticks += 1;
    }
    assert!(ticks <= 5, "bullet took {ticks} ticks to connect");
    assert_eq!(state.count(Tag::LargeEnemy), 0);
    assert_eq!(state.score, 3);

    // The enemy moved once more in the step it was hit, far from any wall
    let last = before_hit + enemy_vel * SIM_DT;

    let smalls = state.store.entities_with_tag(Tag::SmallEnemy);
    assert_eq!(smalls.len(), 3);

    let c = &state.store.components;
    for (i, id) in smalls.iter().enumerate() {
        let offset = c.transforms.get(*id).unwrap().pos - last;
        let angle = degrees_of(offset);
        let expected = i as f32 * 120.0;
        let diff = (angle - expected).abs();
        assert!(diff < 0.05 || (360.0 - diff) < 0.05, "small {i} at {angle} degrees");
        assert!((offset.length() - 1.5 * 20.0).abs() < 1e-2);
        assert_eq!(c.collisions.get(*id).unwrap().radius, 10.0);
        assert_eq!(c.shapes.get(*id).unwrap().radius, 10.0);
        assert_eq!(c.scores.get(*id).unwrap().points, 30);
    }
}

#[test]
fn pause_freezes_a_full_second() {
    let mut game = Game::from_state(quiet_state(arena_config()));
    game.state.spawn_enemy_at(Vec2::new(300.0, 200.0), Vec2::new(50.0, 0.0), 4, Rgb::default());
    game.state.spawn_bullet(Vec2::new(700.0, 500.0));
    game.state.store.update();
    game.state.paused = true;

    let before = game.state.snapshot(0);
    let mut events = VecDeque::new();
    let steps = game.frame(Duration::from_secs(1), &mut events);
    assert_eq!(steps, 60);
    assert_eq!(game.state.snapshot(0), before);
    assert_eq!(game.state.store.pending_len(), 0);
}

#[test]
fn destroyed_player_respawns_at_center() {
    let mut state = quiet_state(arena_config());
    let old = state.player().unwrap();
    state.player_input_mut().unwrap().right = true;
    for _ in 0..10 {
        step(&mut state, SIM_DT);
    }
    assert_ne!(state.player_position(), Some(state.arena().center()));

    state.store.destroy(old);
    step(&mut state, SIM_DT);

    let new = state.player().unwrap();
    assert_ne!(new, old);
    let tfm = state.player_transform().unwrap();
    assert_eq!(tfm.pos, state.arena().center());
    assert_eq!(tfm.vel, Vec2::ZERO);
    assert_eq!(state.store.components.inputs.get(new), Some(&Default::default()));
    assert_eq!(state.count(Tag::Player), 1);
}

#[test]
fn ramming_enemy_costs_points_and_respawns_player() {
    let mut state = quiet_state(arena_config());
    let center = state.arena().center();
    state.spawn_enemy_at(center + Vec2::new(10.0, 0.0), Vec2::ZERO, 5, Rgb::default());

    // The enemy is committed at the top of the step and collides in the same step
    step(&mut state, SIM_DT);
    assert_eq!(state.score, -500);
    assert!(state.player().is_none());
    assert_eq!(state.count(Tag::LargeEnemy), 0);
    assert_eq!(state.count(Tag::SmallEnemy), 0);

    step(&mut state, SIM_DT);
    assert_eq!(state.count(Tag::Player), 1);
    assert_eq!(state.score, -500);
}

#[test]
fn fourth_special_weapon_is_ignored() {
    let mut game = Game::from_state(quiet_state(arena_config()));
    let mut events: VecDeque<_> = (0..5).map(|_| InputEvent::FireSpecial(Vec2::new(0.0, 0.0))).collect();
    game.frame(TICK, &mut events);
    assert_eq!(game.state.count(Tag::SpecialWeapon), 3);
    assert_eq!(game.state.spawner.special_weapon_uses, 3);
    assert_eq!(game.snapshot().special_weapons_left, 0);
}

#[test]
fn enemies_arrive_over_time() {
    let mut state = GameState::new(arena_config(), 77);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..(60 * 20) {
        step(&mut state, SIM_DT);
        seen.extend(state.store.entities_with_tag(Tag::LargeEnemy));
    }
    // Mean interval 2s over 20s: expect roughly ten arrivals
    assert!(seen.len() >= 2 && seen.len() <= 30, "{} arrivals", seen.len());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn split_count_and_geometry(vertices in 3u32..=12, x in 200.0f32..600.0, y in 150.0f32..450.0) {
        let mut state = quiet_state(arena_config());
        let parent = state.spawn_enemy_at(Vec2::new(x, y), Vec2::ZERO, vertices, Rgb::new(1, 1, 1));
        state.store.update();

        let kids = state.spawn_small_enemies(parent);
        prop_assert_eq!(kids.len() as u32, vertices);
        let c = &state.store.components;
        let step_deg = 360.0 / vertices as f32;
        for (i, id) in kids.iter().enumerate() {
            prop_assert_eq!(c.scores.get(*id).unwrap().points, i64::from(vertices) * 10);
            prop_assert_eq!(c.collisions.get(*id).unwrap().radius, 10.0);
            let offset = c.transforms.get(*id).unwrap().pos - Vec2::new(x, y);
            let diff = (degrees_of(offset) - i as f32 * step_deg).abs();
            prop_assert!(diff < 0.05 || (360.0 - diff) < 0.05);
        }
    }

    #[test]
    fn special_weapon_never_exceeds_three(attempts in 0usize..10) {
        let mut state = quiet_state(arena_config());
        let fired = (0..attempts)
            .filter(|_| state.spawn_special_weapon(Vec2::ZERO).is_some())
            .count();
        prop_assert_eq!(fired, attempts.min(3));
        prop_assert!(state.spawner.special_weapon_uses <= 3);
    }
}
