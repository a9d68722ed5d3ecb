//! Geo Wars - simulation core of an arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity store, spawning, motion, collisions, scoring)
//! - `config`: Validated game configuration loaded from JSON
//! - `game`: Frame driver that feeds input and runs fixed steps
//! - `stats`: Frame-rate statistic for the HUD

pub mod config;
pub mod game;
pub mod sim;
pub mod stats;

pub use config::{ConfigError, GameConfig};
pub use game::{Direction, Game, InputEvent, InputSource};
pub use stats::FrameStats;

use glam::Vec2;

/// Game rule constants
pub mod consts {
    use std::time::Duration;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Same timestep for the frame accumulator (rounded down so 60 ticks fit in one second)
    pub const TICK: Duration = Duration::from_nanos(16_666_666);

    /// Special weapon uses per session
    pub const MAX_SPECIAL_WEAPON_USES: u32 = 3;
    /// Points lost when the player rams a large enemy
    pub const PLAYER_HIT_PENALTY: i64 = 500;
    /// Small enemies are worth this many times their parent
    pub const SMALL_ENEMY_SCORE_MULTIPLIER: i64 = 10;
    /// Small enemies spawn this many parent radii away from the parent center
    pub const SMALL_ENEMY_SPAWN_OFFSET: f32 = 1.5;
    /// Fraction of the shape radius used as the extent for wall bounces
    pub const BOUNCE_EXTENT_FACTOR: f32 = 0.5;
}

/// Unit vector for a bearing in degrees (0° points along +x, angles grow toward +y)
#[inline]
pub fn bearing(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Bearing of a vector in degrees, normalized to [0, 360)
#[inline]
pub fn degrees_of(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees().rem_euclid(360.0)
}
