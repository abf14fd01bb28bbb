//! Tunable game constants, loadable from YAML.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound on fixed steps a single clamped frame may run.
pub const MAX_STEPS_PER_FRAME: u32 = 1000;

/// Errors from loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration for a game session.
///
/// `Default` reproduces the shipped level. Any section missing from a YAML
/// file falls back to its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanderConfig {
    pub physics: PhysicsConfig,
    pub fuel: FuelConfig,
    pub level: LevelConfig,
    pub view: ViewConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Vertical acceleration applied while not thrusting.
    pub gravity: f32,
    /// Magnitude of the thrust acceleration. Thrust replaces gravity.
    pub thrust: f32,
    /// Angular speed while a rotation key is held, in degrees per second.
    pub rotation_speed_degrees: f32,
    /// Simulation step in seconds.
    pub fixed_timestep: f32,
    /// Upper bound on the frame time fed into the accumulator.
    pub max_frame_time: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -1.5,
            thrust: 1.0,
            rotation_speed_degrees: 60.0,
            fixed_timestep: 0.016_666_6,
            max_frame_time: 0.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuelConfig {
    pub initial: u32,
    /// Units burned per fixed step while thrusting.
    pub per_step: u32,
}

impl Default for FuelConfig {
    fn default() -> Self {
        Self {
            initial: 1000,
            per_step: 1,
        }
    }
}

/// Position and collision box of a single body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub position: Vec2,
    /// Collision box width and height.
    pub size: Vec2,
}

/// A horizontal row of identical ground rocks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RockRow {
    pub count: u32,
    /// Center of the first rock.
    pub origin: Vec2,
    /// Horizontal distance between rock centers.
    pub spacing: f32,
    pub size: Vec2,
}

impl RockRow {
    /// Centers of every rock, left to right.
    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        (0..self.count).map(|i| self.origin + Vec2::new(i as f32 * self.spacing, 0.0))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub player: BodyConfig,
    pub start_platform: BodyConfig,
    pub victory_platform: BodyConfig,
    pub rocks: RockRow,
    pub flame_scale: f32,
    pub screen_scale: f32,
    pub background_scale: f32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            player: BodyConfig {
                position: Vec2::new(-4.0, 2.0),
                size: Vec2::new(0.7, 0.5),
            },
            start_platform: BodyConfig {
                position: Vec2::new(-4.0, -2.0),
                size: Vec2::ONE,
            },
            victory_platform: BodyConfig {
                position: Vec2::new(3.0, 1.5),
                size: Vec2::splat(0.8),
            },
            rocks: RockRow {
                count: 11,
                origin: Vec2::new(-5.0, -3.5),
                spacing: 1.0,
                size: Vec2::ONE,
            },
            flame_scale: 0.5,
            screen_scale: 3.0,
            background_scale: 10.0,
        }
    }
}

/// Presentation constants. The kernel never reads these; they travel with
/// the session config so a single file describes the whole game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub window_width: u32,
    pub window_height: u32,
    pub clear_color: [f32; 4],
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            left: -5.0,
            right: 5.0,
            bottom: -3.75,
            top: 3.75,
            window_width: 1080,
            window_height: 720,
            clear_color: [0.1922, 0.549, 0.9059, 1.0],
        }
    }
}

impl LanderConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(src: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let src = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&src)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded config");
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let physics = &self.physics;
        if !(physics.fixed_timestep.is_finite() && physics.fixed_timestep > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "fixed_timestep must be positive, got {}",
                physics.fixed_timestep
            )));
        }
        if !physics.max_frame_time.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "max_frame_time must be finite, got {}",
                physics.max_frame_time
            )));
        }
        if physics.max_frame_time < physics.fixed_timestep {
            return Err(ConfigError::Invalid(
                "max_frame_time must be at least one fixed_timestep".into(),
            ));
        }
        let steps_per_frame = physics.max_frame_time / physics.fixed_timestep;
        if steps_per_frame > MAX_STEPS_PER_FRAME as f32 {
            return Err(ConfigError::Invalid(format!(
                "fixed_timestep {} allows {steps_per_frame} steps per frame, limit is {MAX_STEPS_PER_FRAME}",
                physics.fixed_timestep
            )));
        }

        let level = &self.level;
        let boxes = [
            ("player", level.player.size),
            ("start_platform", level.start_platform.size),
            ("victory_platform", level.victory_platform.size),
            ("rocks", level.rocks.size),
        ];
        for (name, size) in boxes {
            if !(size.x > 0.0 && size.y > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} size must be positive, got ({}, {})",
                    size.x, size.y
                )));
            }
        }

        if self.view.left >= self.view.right || self.view.bottom >= self.view.top {
            return Err(ConfigError::Invalid("view bounds are inverted".into()));
        }
        Ok(())
    }
}
