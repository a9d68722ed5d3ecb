//! Movement and wall bounces
//!
//! Two bounds rules run every step, one after the other:
//! - `collision::keep_in_bounds` clamps by collision radius and flips velocity
//! - the integration loop here reflects by half the shape radius without moving

use glam::Vec2;

use super::arena::Arena;
use super::collision;
use super::state::GameState;
use crate::consts::BOUNCE_EXTENT_FACTOR;

/// Advance every entity by one step
pub fn run(state: &mut GameState, dt: f32) {
    clamp_player(state);
    collision::keep_in_bounds(state);
    steer_player(state);
    integrate(state, dt);
}

/// Keep the player fully inside the arena regardless of its velocity
pub fn clamp_player(state: &mut GameState) {
    let Some(id) = state.player() else {
        return;
    };
    let arena = state.arena();
    let c = &mut state.store.components;
    let (Some(tfm), Some(collision)) = (c.transforms.get_mut(id), c.collisions.get(id)) else {
        return;
    };
    tfm.pos = arena.clamp_inset(tfm.pos, collision.radius);
}

/// Set the player velocity from the held directions
pub fn steer_player(state: &mut GameState) {
    let Some(id) = state.player() else {
        return;
    };
    let speed = state.config.player.speed;
    let c = &mut state.store.components;
    let Some(input) = c.inputs.get(id).copied() else {
        return;
    };
    if let Some(tfm) = c.transforms.get_mut(id) {
        tfm.vel = input.axis().normalize_or_zero() * speed;
    }
}

/// Move, spin and bounce every entity
pub fn integrate(state: &mut GameState, dt: f32) {
    let arena = state.arena();
    let ids = state.store.entities();
    let c = &mut state.store.components;
    for id in ids {
        let extent = c
            .shapes
            .get(id)
            .map_or(0.0, |s| s.radius * BOUNCE_EXTENT_FACTOR);
        let Some(tfm) = c.transforms.get_mut(id) else {
            continue;
        };
        tfm.pos += tfm.vel * dt;
        tfm.rotation = (tfm.rotation + tfm.rotation_speed * dt).rem_euclid(360.0);
        tfm.vel = bounce(tfm.pos, tfm.vel, extent, &arena);
    }
}

/// Point the velocity back inside on any axis where the extent pokes out
fn bounce(pos: Vec2, mut vel: Vec2, extent: f32, arena: &Arena) -> Vec2 {
    if pos.x - extent < arena.left {
        vel.x = vel.x.abs();
    } else if pos.x + extent > arena.right() {
        vel.x = -vel.x.abs();
    }
    if pos.y - extent < arena.top {
        vel.y = vel.y.abs();
    } else if pos.y + extent > arena.bottom() {
        vel.y = -vel.y.abs();
    }
    vel
}
