//! Collision detection, scoring and the bounds clamp pass
//!
//! Order inside `run` matters:
//! 1. Bullets vs enemies. Large enemies die on the spot so a second bullet in
//!    the same step cannot score them again; bullets and small enemies are
//!    queued and destroyed after the loop.
//! 2. Special weapons vs enemies. The weapon survives every hit.
//! 3. Player vs large enemies, with the score penalty.

use glam::Vec2;

use super::entity::{EntityId, Tag};
use super::state::GameState;
use crate::consts::PLAYER_HIT_PENALTY;

/// What happened during one collision pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub large_enemies_killed: u32,
    pub small_enemies_killed: u32,
    pub bullets_spent: u32,
    pub player_hits: u32,
    /// Net score change of the pass
    pub score_delta: i64,
}

/// Two circles touch or overlap
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) <= ra + rb
}

/// Position and collision radius, if the entity has both components
fn body(state: &GameState, id: EntityId) -> Option<(Vec2, f32)> {
    let c = &state.store.components;
    Some((c.transforms.get(id)?.pos, c.collisions.get(id)?.radius))
}

fn points(state: &GameState, id: EntityId) -> i64 {
    state.store.components.scores.get(id).map_or(0, |s| s.points)
}

fn hits(state: &GameState, a: EntityId, b: EntityId) -> bool {
    match (body(state, a), body(state, b)) {
        (Some((pa, ra)), Some((pb, rb))) => circles_overlap(pa, ra, pb, rb),
        _ => false,
    }
}

/// Run the full collision pass for one step
pub fn run(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    bullets_vs_enemies(state, &mut report);
    special_weapons_vs_enemies(state, &mut report);
    player_vs_enemies(state, &mut report);

    if report != CollisionReport::default() {
        log::trace!("Collisions: {:?}", report);
    }
    report
}

fn bullets_vs_enemies(state: &mut GameState, report: &mut CollisionReport) {
    let arena = state.arena();
    let mut spent_bullets: Vec<EntityId> = Vec::new();
    let mut dead_small: Vec<EntityId> = Vec::new();

    for bullet in state.store.entities_with_tag(Tag::Bullet) {
        // Re-check the walls on velocity only; the position is left alone
        if let Some((pos, r)) = body(state, bullet) {
            if let Some(tfm) = state.store.components.transforms.get_mut(bullet) {
                if pos.x - r < arena.left || pos.x + r > arena.right() {
                    tfm.vel.x = -tfm.vel.x;
                }
                if pos.y - r < arena.top || pos.y + r > arena.bottom() {
                    tfm.vel.y = -tfm.vel.y;
                }
            }
        }

        for enemy in state.store.entities_with_tag(Tag::LargeEnemy) {
            if !hits(state, bullet, enemy) {
                continue;
            }
            spent_bullets.push(bullet);
            let gained = points(state, enemy);
            state.score += gained;
            report.score_delta += gained;
            report.large_enemies_killed += 1;
            state.spawn_small_enemies(enemy);
            state.store.destroy(enemy);
            log::debug!("Bullet {} destroyed enemy {} (+{})", bullet.raw(), enemy.raw(), gained);
        }

        for small in state.store.entities_with_tag(Tag::SmallEnemy) {
            if !hits(state, bullet, small) {
                continue;
            }
            spent_bullets.push(bullet);
            let gained = points(state, small);
            state.score += gained;
            report.score_delta += gained;
            report.small_enemies_killed += 1;
            dead_small.push(small);
        }
    }

    spent_bullets.dedup();
    report.bullets_spent = spent_bullets.len() as u32;
    for id in spent_bullets.into_iter().chain(dead_small) {
        state.store.destroy(id);
    }
}

fn special_weapons_vs_enemies(state: &mut GameState, report: &mut CollisionReport) {
    for weapon in state.store.entities_with_tag(Tag::SpecialWeapon) {
        for enemy in state.store.entities_with_tag(Tag::LargeEnemy) {
            if hits(state, weapon, enemy) {
                let gained = points(state, enemy);
                state.store.destroy(enemy);
                state.score += gained;
                report.score_delta += gained;
                report.large_enemies_killed += 1;
            }
        }
        for small in state.store.entities_with_tag(Tag::SmallEnemy) {
            if hits(state, weapon, small) {
                let gained = points(state, small);
                state.store.destroy(small);
                state.score += gained;
                report.score_delta += gained;
                report.small_enemies_killed += 1;
            }
        }
    }
}

fn player_vs_enemies(state: &mut GameState, report: &mut CollisionReport) {
    for enemy in state.store.entities_with_tag(Tag::LargeEnemy) {
        let Some(player) = state.player() else {
            return;
        };
        if !hits(state, player, enemy) {
            continue;
        }
        state.score -= PLAYER_HIT_PENALTY;
        report.score_delta -= PLAYER_HIT_PENALTY;
        report.player_hits += 1;
        state.store.destroy(enemy);
        state.store.destroy(player);
        log::info!("Player hit by enemy {} (-{})", enemy.raw(), PLAYER_HIT_PENALTY);
    }
}

/// Clamp-and-reflect pass by collision radius
///
/// Any entity touching or crossing an edge has that velocity component
/// negated and its position pulled back inside.
pub fn keep_in_bounds(state: &mut GameState) {
    let arena = state.arena();
    let ids = state.store.entities();
    let c = &mut state.store.components;
    for id in ids {
        let (Some(tfm), Some(collision)) = (c.transforms.get_mut(id), c.collisions.get(id)) else {
            continue;
        };
        let r = collision.radius;
        if tfm.pos.x - r <= arena.left || tfm.pos.x + r >= arena.right() {
            tfm.vel.x = -tfm.vel.x;
        }
        if tfm.pos.y - r <= arena.top || tfm.pos.y + r >= arena.bottom() {
            tfm.vel.y = -tfm.vel.y;
        }
        tfm.pos = arena.clamp_inset(tfm.pos, r);
    }
}
