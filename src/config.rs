//! Game configuration
//!
//! Loaded once at startup from a JSON file. Anything unreadable or out of
//! range is a fatal error: the simulation never starts with a bad config.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// File could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid JSON for `GameConfig`
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Parsed, but a value is out of range
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Window / arena size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub shape_radius: f32,
    pub collision_radius: f32,
    /// Movement speed (pixels/s)
    pub speed: f32,
    /// Spin of the player shape (degrees/s)
    pub angular_speed: f32,
    pub fill: Rgb,
    pub outline: Rgb,
    pub outline_thickness: f32,
    pub vertices: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyConfig {
    pub shape_radius: f32,
    pub collision_radius: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub outline: Rgb,
    pub outline_thickness: f32,
    pub min_vertices: u32,
    pub max_vertices: u32,
    /// Lifespan of the small enemies a large one splits into (seconds)
    pub small_lifespan: f32,
    /// Mean time between large enemy arrivals (seconds)
    pub spawn_interval: f32,
}

/// Shared by bullets and the special weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileConfig {
    pub shape_radius: f32,
    pub collision_radius: f32,
    pub speed: f32,
    pub fill: Rgb,
    pub outline: Rgb,
    pub outline_thickness: f32,
    pub vertices: u32,
    /// Seconds before the projectile expires
    pub lifespan: f32,
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub bullet: ProjectileConfig,
    pub special_weapon: ProjectileConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig {
                width: 1280.0,
                height: 768.0,
            },
            player: PlayerConfig {
                shape_radius: 32.0,
                collision_radius: 32.0,
                speed: 300.0,
                angular_speed: 90.0,
                fill: Rgb::new(5, 5, 5),
                outline: Rgb::new(255, 0, 0),
                outline_thickness: 4.0,
                vertices: 8,
            },
            enemy: EnemyConfig {
                shape_radius: 32.0,
                collision_radius: 32.0,
                min_speed: 100.0,
                max_speed: 200.0,
                outline: Rgb::new(255, 255, 255),
                outline_thickness: 2.0,
                min_vertices: 3,
                max_vertices: 8,
                small_lifespan: 1.5,
                spawn_interval: 2.0,
            },
            bullet: ProjectileConfig {
                shape_radius: 10.0,
                collision_radius: 10.0,
                speed: 800.0,
                fill: Rgb::new(255, 255, 255),
                outline: Rgb::new(255, 255, 255),
                outline_thickness: 2.0,
                vertices: 20,
                lifespan: 1.0,
            },
            special_weapon: ProjectileConfig {
                shape_radius: 250.0,
                collision_radius: 250.0,
                speed: 800.0,
                fill: Rgb::new(255, 215, 0),
                outline: Rgb::new(255, 0, 0),
                outline_thickness: 8.0,
                vertices: 40,
                lifespan: 1.0,
            },
        }
    }
}

impl GameConfig {
    /// Read, parse and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("window.width", self.window.width)?;
        positive("window.height", self.window.height)?;

        let p = &self.player;
        positive("player.shape_radius", p.shape_radius)?;
        positive("player.collision_radius", p.collision_radius)?;
        non_negative("player.speed", p.speed)?;
        non_negative("player.outline_thickness", p.outline_thickness)?;
        polygon("player.vertices", p.vertices)?;
        if !p.angular_speed.is_finite() {
            return Err(invalid("player.angular_speed must be finite"));
        }

        let e = &self.enemy;
        positive("enemy.shape_radius", e.shape_radius)?;
        positive("enemy.collision_radius", e.collision_radius)?;
        non_negative("enemy.min_speed", e.min_speed)?;
        non_negative("enemy.max_speed", e.max_speed)?;
        if e.min_speed > e.max_speed {
            return Err(invalid(format!(
                "enemy.min_speed ({}) exceeds enemy.max_speed ({})",
                e.min_speed, e.max_speed
            )));
        }
        non_negative("enemy.outline_thickness", e.outline_thickness)?;
        polygon("enemy.min_vertices", e.min_vertices)?;
        if e.min_vertices > e.max_vertices {
            return Err(invalid(format!(
                "enemy.min_vertices ({}) exceeds enemy.max_vertices ({})",
                e.min_vertices, e.max_vertices
            )));
        }
        positive("enemy.small_lifespan", e.small_lifespan)?;
        positive("enemy.spawn_interval", e.spawn_interval)?;

        projectile("bullet", &self.bullet)?;
        projectile("special_weapon", &self.special_weapon)?;
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}

fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be positive, got {value}")))
    }
}

fn non_negative(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must not be negative, got {value}")))
    }
}

fn polygon(name: &str, vertices: u32) -> Result<(), ConfigError> {
    if vertices >= 3 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be at least 3, got {vertices}")))
    }
}

fn projectile(prefix: &str, c: &ProjectileConfig) -> Result<(), ConfigError> {
    positive(&format!("{prefix}.shape_radius"), c.shape_radius)?;
    positive(&format!("{prefix}.collision_radius"), c.collision_radius)?;
    non_negative(&format!("{prefix}.speed"), c.speed)?;
    non_negative(&format!("{prefix}.outline_thickness"), c.outline_thickness)?;
    polygon(&format!("{prefix}.vertices"), c.vertices)?;
    positive(&format!("{prefix}.lifespan"), c.lifespan)
}
