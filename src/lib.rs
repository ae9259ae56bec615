//! Ball Shooter - defend the center of the screen
//!
//! Core modules:
//! - `sim`: Tick-counted simulation (entities, spawning, collisions, removal)
//! - `round`: Round controller (score, start/resize/fire/end lifecycle)
//! - `renderer`: Drawing surface abstraction
//! - `platform`: Host scheduling (frame ticks, spawn interval, input tasks)
//! - `hud`: Score and game-over display collaborator
//! - `settings`: Data-driven game balance

pub mod error;
pub mod hud;
pub mod platform;
pub mod renderer;
pub mod round;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, GeometryError};
pub use hud::Hud;
pub use round::Round;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants (reference tuning)
pub mod consts {
    /// Enemy spawn cadence (milliseconds)
    pub const SPAWN_INTERVAL_MS: u32 = 800;
    /// Frame cadence of the host ticker (~60 Hz)
    pub const FRAME_PERIOD_MS: f64 = 1000.0 / 60.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 10.0;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const PROJECTILE_SPEED: f32 = 9.0;

    /// Enemy radius is drawn from [MIN, MAX)
    pub const ENEMY_MIN_RADIUS: f32 = 10.0;
    pub const ENEMY_MAX_RADIUS: f32 = 30.0;
    /// Enemy speed (units per tick)
    pub const ENEMY_SPEED: f32 = 1.0;
    /// Enemy color saturation/lightness (percent)
    pub const ENEMY_SATURATION: f32 = 50.0;
    pub const ENEMY_LIGHTNESS: f32 = 50.0;

    /// Particle velocity multiplier per tick (1.0 = no drag)
    pub const PARTICLE_FRICTION: f32 = 1.0;
    /// Particle alpha lost per tick
    pub const PARTICLE_ALPHA_DECAY: f32 = 0.02;
    /// Burst particle radius is drawn from [0, MAX)
    pub const PARTICLE_MAX_RADIUS: f32 = 2.0;
    /// Burst particle velocity scale per axis
    pub const PARTICLE_MAX_SPEED: f32 = 8.0;

    /// Radius an enemy loses on a non-lethal hit
    pub const SHRINK_STEP: f32 = 10.0;
    /// Enemies that would shrink to this radius or below are destroyed
    pub const SHRINK_FLOOR: f32 = 10.0;
    /// Shrink animation length (ticks, ~0.5s)
    pub const SHRINK_TICKS: u32 = 30;

    /// Score awards
    pub const HIT_POINTS: u64 = 10;
    pub const KILL_POINTS: u64 = 25;

    /// Gap (distance minus radii) below which two circles touch
    pub const COLLISION_EPSILON: f32 = 1.0;

    /// Opacity of the per-frame black overpaint (motion trails)
    pub const TRAIL_ALPHA: f32 = 0.1;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Angle of the ray from `from` to `to` (radians, atan2 convention)
#[inline]
pub fn heading(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

/// Velocity of magnitude `speed` aimed from `from` at `to`.
///
/// Coincident points aim along +x rather than producing NaN.
#[inline]
pub fn direction_toward(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    polar_to_cartesian(speed, heading(from, to))
}
