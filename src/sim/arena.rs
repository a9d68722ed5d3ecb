//! Playable rectangle and the query that supplies it
//!
//! Systems never cache the arena: every bounds or spawn computation asks the
//! `ArenaBounds` source again, so a moving camera is picked up immediately.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned playable rectangle (screen coordinates, +y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Arena anchored at the origin
    pub fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Clamp a point so a circle of `radius` around it stays inside
    ///
    /// If the arena is narrower than the circle the point lands on the
    /// arena center for that axis.
    pub fn clamp_inset(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            clamp_axis(pos.x, self.left + radius, self.right() - radius),
            clamp_axis(pos.y, self.top + radius, self.bottom() - radius),
        )
    }

    /// Whether a circle of `radius` at `pos` lies fully inside
    pub fn contains_inset(&self, pos: Vec2, radius: f32) -> bool {
        pos.x - radius >= self.left
            && pos.x + radius <= self.right()
            && pos.y - radius >= self.top
            && pos.y + radius <= self.bottom()
    }
}

fn clamp_axis(v: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi {
        (lo + hi) / 2.0
    } else {
        v.max(lo).min(hi)
    }
}

/// Source of the current playable rectangle
pub trait ArenaBounds {
    fn arena(&self) -> Arena;
}

impl ArenaBounds for Arena {
    fn arena(&self) -> Arena {
        *self
    }
}

/// Camera-style view: a rectangle of `size` centered on `center`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: Vec2,
    pub size: Vec2,
}

impl Viewport {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }
}

impl ArenaBounds for Viewport {
    fn arena(&self) -> Arena {
        let top_left = self.center - self.size / 2.0;
        Arena::new(top_left.x, top_left.y, self.size.x, self.size.y)
    }
}
