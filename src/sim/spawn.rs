//! Spawning rules
//!
//! Every entity in the game is created here: the player, large enemies
//! (Poisson arrivals), the small enemies a large one splits into, bullets
//! and the limited special weapon.

use glam::Vec2;
use rand::Rng;

use super::components::{Collision, Input, Lifespan, Score, Shape, Transform};
use super::entity::{EntityId, Tag};
use super::state::GameState;
use crate::bearing;
use crate::config::{ProjectileConfig, Rgb};
use crate::consts::*;

/// Sample an exponentially distributed wait with the given mean (seconds)
///
/// Inverse CDF of the exponential distribution with rate `1 / mean`.
pub fn sample_arrival<R: Rng + ?Sized>(rng: &mut R, mean: f32) -> f32 {
    let u: f32 = rng.random();
    -mean * (1.0 - u).ln()
}

/// Uniform sample in `[lo, hi]`, or the midpoint when the range is empty
fn sample_axis<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if lo < hi {
        rng.random_range(lo..=hi)
    } else {
        (lo + hi) / 2.0
    }
}

impl GameState {
    /// Spawn the player at the arena center, at rest, with no keys held
    pub fn spawn_player(&mut self) -> EntityId {
        let center = self.arena().center();
        let cfg = &self.config.player;
        let id = self.store.add_entity(Tag::Player);

        let c = &mut self.store.components;
        c.transforms.insert(
            id,
            Transform::new(center, Vec2::ZERO).with_rotation_speed(cfg.angular_speed),
        );
        c.shapes.insert(
            id,
            Shape {
                radius: cfg.shape_radius,
                vertices: cfg.vertices,
                fill: cfg.fill,
                outline: cfg.outline,
                outline_thickness: cfg.outline_thickness,
            },
        );
        c.collisions.insert(
            id,
            Collision {
                radius: cfg.collision_radius,
            },
        );
        c.inputs.insert(id, Input::default());

        self.player = Some(id);
        log::info!("Player spawned at ({:.0}, {:.0})", center.x, center.y);
        id
    }

    /// Count down to the next enemy arrival; spawn one when it elapses
    pub fn enemy_spawner(&mut self, dt: f32) {
        self.spawner.countdown -= dt;
        if self.spawner.countdown < 0.0 {
            self.spawner.countdown = sample_arrival(&mut self.rng, self.config.enemy.spawn_interval);
            self.spawn_enemy();
        }
    }

    /// Spawn a large enemy with random position, heading, speed, sides and color
    pub fn spawn_enemy(&mut self) -> EntityId {
        let arena = self.arena();
        let cfg = &self.config.enemy;
        let cr = cfg.collision_radius;

        let pos = Vec2::new(
            sample_axis(&mut self.rng, arena.left + cr, arena.right() - cr),
            sample_axis(&mut self.rng, arena.top + cr, arena.bottom() - cr),
        );
        let heading = bearing(self.rng.random_range(0.0..360.0));
        let speed = self.rng.random_range(cfg.min_speed..=cfg.max_speed);
        let vertices = self.rng.random_range(cfg.min_vertices..=cfg.max_vertices);
        let fill = Rgb::new(self.rng.random(), self.rng.random(), self.rng.random());

        self.spawn_enemy_at(pos, heading * speed, vertices, fill)
    }

    /// Spawn a large enemy with explicit parameters; score equals `vertices`
    pub fn spawn_enemy_at(&mut self, pos: Vec2, vel: Vec2, vertices: u32, fill: Rgb) -> EntityId {
        let cfg = &self.config.enemy;
        let id = self.store.add_entity(Tag::LargeEnemy);

        let c = &mut self.store.components;
        c.transforms.insert(id, Transform::new(pos, vel));
        c.shapes.insert(
            id,
            Shape {
                radius: cfg.shape_radius,
                vertices,
                fill,
                outline: cfg.outline,
                outline_thickness: cfg.outline_thickness,
            },
        );
        c.collisions.insert(
            id,
            Collision {
                radius: cfg.collision_radius,
            },
        );
        c.scores.insert(
            id,
            Score {
                points: i64::from(vertices),
            },
        );

        log::debug!(
            "Enemy {} spawned at ({:.0}, {:.0}) with {} sides",
            id.raw(),
            pos.x,
            pos.y,
            vertices
        );
        id
    }

    /// Split a large enemy into `V` small ones fanning out from its position
    ///
    /// Returns the new (pending) entities in bearing order. A parent without
    /// transform, shape, collision or score components yields nothing.
    pub fn spawn_small_enemies(&mut self, parent: EntityId) -> Vec<EntityId> {
        let c = &self.store.components;
        let (Some(tfm), Some(shape), Some(collision), Some(score)) = (
            c.transforms.get(parent).copied(),
            c.shapes.get(parent).copied(),
            c.collisions.get(parent).copied(),
            c.scores.get(parent).copied(),
        ) else {
            log::warn!("Cannot split enemy {}: missing components", parent.raw());
            return Vec::new();
        };

        let count = shape.vertices;
        if count == 0 {
            return Vec::new();
        }
        let step = 360.0 / count as f32;
        let speed = self.config.enemy.max_speed;
        let lifespan = self.config.enemy.small_lifespan;

        let mut spawned = Vec::with_capacity(count as usize);
        for i in 0..count {
            let dir = bearing(i as f32 * step);
            let id = self.store.add_entity(Tag::SmallEnemy);

            let c = &mut self.store.components;
            c.transforms.insert(
                id,
                Transform::new(
                    tfm.pos + dir * shape.radius * SMALL_ENEMY_SPAWN_OFFSET,
                    dir * speed,
                ),
            );
            c.shapes.insert(
                id,
                Shape {
                    radius: shape.radius / 2.0,
                    ..shape
                },
            );
            c.collisions.insert(
                id,
                Collision {
                    radius: collision.radius / 2.0,
                },
            );
            c.lifespans.insert(id, Lifespan::new(lifespan));
            c.scores.insert(
                id,
                Score {
                    points: score.points * SMALL_ENEMY_SCORE_MULTIPLIER,
                },
            );
            spawned.push(id);
        }

        log::debug!("Enemy {} split into {} small enemies", parent.raw(), count);
        spawned
    }

    /// Fire a bullet from the player toward `target`
    ///
    /// No-op without an active player.
    pub fn spawn_bullet(&mut self, target: Vec2) -> Option<EntityId> {
        let cfg = self.config.bullet.clone();
        self.spawn_projectile(Tag::Bullet, &cfg, target)
    }

    /// Fire the special weapon toward `target`, at most three times per session
    pub fn spawn_special_weapon(&mut self, target: Vec2) -> Option<EntityId> {
        if self.spawner.special_weapon_uses >= MAX_SPECIAL_WEAPON_USES {
            log::debug!("Special weapon exhausted");
            return None;
        }
        let cfg = self.config.special_weapon.clone();
        let id = self.spawn_projectile(Tag::SpecialWeapon, &cfg, target)?;
        self.spawner.special_weapon_uses += 1;
        log::info!(
            "Special weapon fired ({} of {})",
            self.spawner.special_weapon_uses,
            MAX_SPECIAL_WEAPON_USES
        );
        Some(id)
    }

    pub fn special_weapons_left(&self) -> u32 {
        MAX_SPECIAL_WEAPON_USES.saturating_sub(self.spawner.special_weapon_uses)
    }

    fn spawn_projectile(&mut self, tag: Tag, cfg: &ProjectileConfig, target: Vec2) -> Option<EntityId> {
        let Some(origin) = self.player_position() else {
            log::debug!("No player to fire {} from", tag.as_str());
            return None;
        };
        // Clicking on the player gives no direction; the projectile stays put
        let dir = (target - origin).normalize_or_zero();

        let id = self.store.add_entity(tag);
        let c = &mut self.store.components;
        c.transforms.insert(id, Transform::new(origin, dir * cfg.speed));
        c.shapes.insert(
            id,
            Shape {
                radius: cfg.shape_radius,
                vertices: cfg.vertices,
                fill: cfg.fill,
                outline: cfg.outline,
                outline_thickness: cfg.outline_thickness,
            },
        );
        c.collisions.insert(
            id,
            Collision {
                radius: cfg.collision_radius,
            },
        );
        c.lifespans.insert(id, Lifespan::new(cfg.lifespan));
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::degrees_of;
    use crate::sim::arena::Arena;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn state() -> GameState {
        GameState::new(GameConfig::default(), 42)
    }

    #[test]
    fn test_player_spawns_at_center_at_rest() {
        let state = state();
        let t = state.player_transform().unwrap();
        assert_eq!(t.pos, state.arena().center());
        assert_eq!(t.vel, Vec2::ZERO);
        let id = state.player().unwrap();
        assert_eq!(state.store.components.inputs.get(id), Some(&Input::default()));
        assert_eq!(
            state.store.components.collisions.get(id).unwrap().radius,
            state.config.player.collision_radius
        );
    }

    #[test]
    fn test_enemy_spawner_first_step_spawns() {
        let mut state = state();
        state.enemy_spawner(SIM_DT);
        state.store.update();
        assert_eq!(state.count(Tag::LargeEnemy), 1);
        assert!(state.spawner.countdown >= 0.0);
    }

    #[test]
    fn test_enemy_spawner_waits_for_countdown() {
        let mut state = state();
        state.spawner.countdown = 1.0;
        for _ in 0..30 {
            state.enemy_spawner(SIM_DT);
        }
        state.store.update();
        assert_eq!(state.count(Tag::LargeEnemy), 0);
        assert!((state.spawner.countdown - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_arrival_mean_close_to_interval() {
        let mut rng = Pcg32::seed_from_u64(7);
        let n = 20_000;
        let mean: f32 = (0..n).map(|_| sample_arrival(&mut rng, 2.0)).sum::<f32>() / n as f32;
        assert!((mean - 2.0).abs() < 0.1, "mean was {mean}");
    }

    #[test]
    fn test_spawn_enemy_respects_config_ranges() {
        let mut state = state();
        let arena = state.arena();
        for _ in 0..200 {
            let id = state.spawn_enemy();
            let c = &state.store.components;
            let t = c.transforms.get(id).unwrap();
            let shape = c.shapes.get(id).unwrap();
            let cfg = &state.config.enemy;
            assert!(arena.contains_inset(t.pos, cfg.collision_radius));
            let speed = t.vel.length();
            assert!(speed >= cfg.min_speed - 1e-3 && speed <= cfg.max_speed + 1e-3);
            assert!((cfg.min_vertices..=cfg.max_vertices).contains(&shape.vertices));
            assert_eq!(c.scores.get(id).unwrap().points, i64::from(shape.vertices));
            assert_eq!(shape.outline, cfg.outline);
        }
    }

    #[test]
    fn test_spawn_enemy_follows_moved_arena() {
        let mut state = state();
        let moved = Arena::new(5000.0, 5000.0, 200.0, 100.0);
        state.set_bounds(Box::new(moved));
        let id = state.spawn_enemy();
        let pos = state.store.components.transforms.get(id).unwrap().pos;
        assert!(moved.contains_inset(pos, state.config.enemy.collision_radius));
    }

    #[test]
    fn test_small_enemies_fan_out_evenly() {
        let mut state = state();
        let parent = state.spawn_enemy_at(Vec2::new(400.0, 300.0), Vec2::ZERO, 4, Rgb::new(1, 2, 3));
        let kids = state.spawn_small_enemies(parent);
        assert_eq!(kids.len(), 4);

        let c = &state.store.components;
        let parent_shape = *c.shapes.get(parent).unwrap();
        for (i, id) in kids.iter().enumerate() {
            let t = c.transforms.get(*id).unwrap();
            let offset = t.pos - Vec2::new(400.0, 300.0);
            assert!((offset.length() - 1.5 * parent_shape.radius).abs() < 1e-3);
            let expected = i as f32 * 90.0;
            let diff = (degrees_of(offset) - expected).abs();
            assert!(diff < 1e-2 || (360.0 - diff) < 1e-2);
            assert!((t.vel.length() - state.config.enemy.max_speed).abs() < 1e-3);
            assert!(t.vel.normalize().dot(offset.normalize()) > 0.999);

            let shape = c.shapes.get(*id).unwrap();
            assert_eq!(shape.radius, parent_shape.radius / 2.0);
            assert_eq!(shape.vertices, 4);
            assert_eq!(shape.fill, Rgb::new(1, 2, 3));
            assert_eq!(c.scores.get(*id).unwrap().points, 40);
            assert_eq!(
                c.collisions.get(*id).unwrap().radius,
                state.config.enemy.collision_radius / 2.0
            );
            assert_eq!(c.lifespans.get(*id).unwrap().total, state.config.enemy.small_lifespan);
        }
    }

    #[test]
    fn test_bullet_heads_toward_target() {
        let mut state = state();
        let origin = state.player_position().unwrap();
        let id = state.spawn_bullet(origin + Vec2::new(0.0, -10.0)).unwrap();
        let t = state.store.components.transforms.get(id).unwrap();
        assert_eq!(t.pos, origin);
        assert!((t.vel - Vec2::new(0.0, -state.config.bullet.speed)).length() < 1e-3);
        assert!(state.store.components.lifespans.contains(id));
    }

    #[test]
    fn test_bullet_at_player_position_has_zero_velocity() {
        let mut state = state();
        let origin = state.player_position().unwrap();
        let id = state.spawn_bullet(origin).unwrap();
        let vel = state.store.components.transforms.get(id).unwrap().vel;
        assert_eq!(vel, Vec2::ZERO);
        assert!(vel.x.is_finite());
    }

    #[test]
    fn test_no_projectiles_without_player() {
        let mut state = state();
        let player = state.player().unwrap();
        state.store.destroy(player);
        assert!(state.spawn_bullet(Vec2::ZERO).is_none());
        assert!(state.spawn_special_weapon(Vec2::ZERO).is_none());
        assert_eq!(state.spawner.special_weapon_uses, 0);
    }

    #[test]
    fn test_special_weapon_capped_at_three() {
        let mut state = state();
        let target = Vec2::new(0.0, 0.0);
        for _ in 0..3 {
            assert!(state.spawn_special_weapon(target).is_some());
        }
        assert_eq!(state.special_weapons_left(), 0);
        assert!(state.spawn_special_weapon(target).is_none());
        assert_eq!(state.spawner.special_weapon_uses, 3);
        state.store.update();
        assert_eq!(state.count(Tag::SpecialWeapon), 3);
    }
}
