//! Per-entity component data
//!
//! Each component type lives in its own sparse table keyed by `EntityId`.
//! Keeping the tables separate lets a system borrow transforms mutably while
//! reading collision radii.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use crate::config::Rgb;

/// Position and motion
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Degrees
    pub rotation: f32,
    /// Degrees per second
    pub rotation_speed: f32,
}

impl Transform {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            rotation: 0.0,
            rotation_speed: 0.0,
        }
    }

    pub fn with_rotation_speed(mut self, rotation_speed: f32) -> Self {
        self.rotation_speed = rotation_speed;
        self
    }
}

/// Visual descriptor of a regular polygon
///
/// Only the renderer draws it, but `vertices` is also the split count of a
/// large enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub radius: f32,
    pub vertices: u32,
    pub fill: Rgb,
    pub outline: Rgb,
    pub outline_thickness: f32,
}

/// Circle used for overlap tests
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collision {
    pub radius: f32,
}

/// Countdown to automatic destruction (seconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lifespan {
    pub remaining: f32,
    pub total: f32,
}

impl Lifespan {
    pub fn new(total: f32) -> Self {
        Self {
            remaining: total,
            total,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Remaining fraction of the lifespan, used by the renderer for fading
    pub fn fade_ratio(&self) -> f32 {
        if self.total <= 0.0 {
            return 0.0;
        }
        (self.remaining / self.total).clamp(0.0, 1.0)
    }
}

/// Points awarded when this entity is destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub points: i64,
}

/// Held directions, written by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Input {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Input {
    /// Unnormalized direction from the held keys (+y is down)
    pub fn axis(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        dir
    }
}

/// Sparse component table keyed by entity id
#[derive(Debug, Clone)]
pub struct ComponentTable<T> {
    rows: BTreeMap<EntityId, T>,
}

impl<T> Default for ComponentTable<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }
}

impl<T> ComponentTable<T> {
    pub fn insert(&mut self, id: EntityId, value: T) -> Option<T> {
        self.rows.insert(id, value)
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        self.rows.remove(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in id order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.rows.iter().map(|(id, v)| (*id, v))
    }
}

/// All component tables of the world
#[derive(Debug, Clone, Default)]
pub struct Components {
    pub transforms: ComponentTable<Transform>,
    pub shapes: ComponentTable<Shape>,
    pub collisions: ComponentTable<Collision>,
    pub lifespans: ComponentTable<Lifespan>,
    pub scores: ComponentTable<Score>,
    pub inputs: ComponentTable<Input>,
}

impl Components {
    /// Drop every component of `id`
    pub fn remove_all(&mut self, id: EntityId) {
        self.transforms.remove(id);
        self.shapes.remove(id);
        self.collisions.remove(id);
        self.lifespans.remove(id);
        self.scores.remove(id);
        self.inputs.remove(id);
    }
}
