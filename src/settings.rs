//! Game settings and balance
//!
//! Defaults reproduce the reference tuning in [`crate::consts`]. Hosts may
//! override any subset from JSON; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Scheduling ===
    /// Milliseconds between enemy spawns
    pub spawn_interval_ms: u32,
    /// Milliseconds between simulation ticks (host frame cadence)
    pub frame_period_ms: f64,
    /// Fixed RNG seed (None = seeded by the host clock)
    pub seed: Option<u64>,

    // === Player / projectiles ===
    pub player_radius: f32,
    pub projectile_radius: f32,
    /// Units per tick
    pub projectile_speed: f32,

    // === Enemies ===
    pub enemy_min_radius: f32,
    pub enemy_max_radius: f32,
    /// Units per tick
    pub enemy_speed: f32,
    pub enemy_saturation: f32,
    pub enemy_lightness: f32,

    // === Hits ===
    pub shrink_step: f32,
    pub shrink_floor: f32,
    pub shrink_ticks: u32,
    pub hit_points: u64,
    pub kill_points: u64,
    pub collision_epsilon: f32,

    // === Particles ===
    /// Velocity multiplier per tick (1.0 = particles never slow down)
    pub particle_friction: f32,
    pub particle_alpha_decay: f32,
    pub particle_max_radius: f32,
    pub particle_max_speed: f32,

    // === Visuals ===
    /// Opacity of the per-frame overpaint (lower = longer trails)
    pub trail_alpha: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            frame_period_ms: FRAME_PERIOD_MS,
            seed: None,

            player_radius: PLAYER_RADIUS,
            projectile_radius: PROJECTILE_RADIUS,
            projectile_speed: PROJECTILE_SPEED,

            enemy_min_radius: ENEMY_MIN_RADIUS,
            enemy_max_radius: ENEMY_MAX_RADIUS,
            enemy_speed: ENEMY_SPEED,
            enemy_saturation: ENEMY_SATURATION,
            enemy_lightness: ENEMY_LIGHTNESS,

            shrink_step: SHRINK_STEP,
            shrink_floor: SHRINK_FLOOR,
            shrink_ticks: SHRINK_TICKS,
            hit_points: HIT_POINTS,
            kill_points: KILL_POINTS,
            collision_epsilon: COLLISION_EPSILON,

            particle_friction: PARTICLE_FRICTION,
            particle_alpha_decay: PARTICLE_ALPHA_DECAY,
            particle_max_radius: PARTICLE_MAX_RADIUS,
            particle_max_speed: PARTICLE_MAX_SPEED,

            trail_alpha: TRAIL_ALPHA,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spawn_interval_ms == 0 {
            return Err(invalid("spawn_interval_ms", "must be at least 1"));
        }
        positive("frame_period_ms", self.frame_period_ms as f32)?;

        positive("player_radius", self.player_radius)?;
        positive("projectile_radius", self.projectile_radius)?;
        positive("projectile_speed", self.projectile_speed)?;

        positive("enemy_min_radius", self.enemy_min_radius)?;
        positive("enemy_max_radius", self.enemy_max_radius)?;
        if self.enemy_min_radius >= self.enemy_max_radius {
            return Err(invalid(
                "enemy_min_radius",
                "must be smaller than enemy_max_radius",
            ));
        }
        positive("enemy_speed", self.enemy_speed)?;
        unit_range("enemy_saturation", self.enemy_saturation / 100.0)?;
        unit_range("enemy_lightness", self.enemy_lightness / 100.0)?;

        positive("shrink_step", self.shrink_step)?;
        finite("shrink_floor", self.shrink_floor)?;
        positive("collision_epsilon", self.collision_epsilon)?;

        unit_range("particle_friction", self.particle_friction)?;
        unit_range("particle_alpha_decay", self.particle_alpha_decay)?;
        finite("particle_max_radius", self.particle_max_radius)?;
        finite("particle_max_speed", self.particle_max_speed)?;
        unit_range("trail_alpha", self.trail_alpha)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be finite"))
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be positive"))
    }
}

/// (0, 1]
fn unit_range(field: &'static str, value: f32) -> Result<(), ConfigError> {
    positive(field, value)?;
    if value <= 1.0 {
        Ok(())
    } else {
        Err(invalid(field, "must not exceed 1"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_tuning() {
        let settings = Settings::default();
        assert_eq!(settings.spawn_interval_ms, 800);
        assert_eq!(settings.particle_friction, 1.0);
        assert_eq!(settings.particle_alpha_decay, 0.02);
        assert_eq!(settings.projectile_speed, 9.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "spawn_interval_ms": 500, "seed": 7 }"#).unwrap();
        assert_eq!(settings.spawn_interval_ms, 500);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.enemy_max_radius, ENEMY_MAX_RADIUS);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            particle_friction: 0.99,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Settings::from_json(r#"{ "enemy_min_radius": 30, "enemy_max_radius": 10 }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "enemy_min_radius",
                ..
            }
        ));

        let err = Settings::from_json(r#"{ "particle_friction": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "particle_friction",
                ..
            }
        ));

        let err = Settings::from_json(r#"{ "spawn_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validate_catches_non_finite() {
        let settings = Settings {
            projectile_speed: f32::NAN,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
