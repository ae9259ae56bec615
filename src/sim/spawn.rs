//! Enemy spawning
//!
//! Enemies appear just beyond a random viewport edge and head straight for
//! the center at constant speed.

use glam::Vec2;
use rand::Rng;

use super::collision::Viewport;
use super::entity::{Enemy, EntityId};
use crate::direction_toward;
use crate::platform::{TimerId, Timers};
use crate::renderer::Color;
use crate::settings::Settings;

/// Manufacture one enemy outside the viewport, aimed at its center
pub fn spawn_enemy<R: Rng>(
    rng: &mut R,
    viewport: &Viewport,
    settings: &Settings,
    id: EntityId,
) -> Enemy {
    let min_r = settings.enemy_min_radius;
    let max_r = settings.enemy_max_radius;
    let radius = rng.random::<f32>() * (max_r - min_r) + min_r;

    let (w, h) = (viewport.width(), viewport.height());
    let pos = if rng.random::<f32>() < 0.5 {
        // Left or right edge, random height
        let x = if rng.random::<f32>() < 0.5 {
            -radius
        } else {
            w + radius
        };
        Vec2::new(x, rng.random::<f32>() * h)
    } else {
        // Top or bottom edge, random width
        let y = if rng.random::<f32>() < 0.5 {
            -radius
        } else {
            h + radius
        };
        Vec2::new(rng.random::<f32>() * w, y)
    };

    let color = Color::hsl(
        rng.random::<f32>() * 360.0,
        settings.enemy_saturation,
        settings.enemy_lightness,
    );
    let vel = direction_toward(pos, viewport.center(), settings.enemy_speed);

    Enemy::new(id, pos, vel, radius, color)
}

/// Periodic enemy spawn timer
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    period_ms: u32,
    timer: Option<TimerId>,
}

impl SpawnScheduler {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            timer: None,
        }
    }

    /// Start spawning, replacing any interval already running
    pub fn start<T: Timers + ?Sized>(&mut self, timers: &mut T) {
        self.stop(timers);
        self.timer = Some(timers.set_interval(self.period_ms));
        log::debug!("Spawn interval started ({} ms)", self.period_ms);
    }

    pub fn stop<T: Timers + ?Sized>(&mut self, timers: &mut T) {
        if let Some(id) = self.timer.take() {
            timers.clear_interval(id);
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Whether `id` is this scheduler's live interval
    pub fn owns(&self, id: TimerId) -> bool {
        self.timer == Some(id)
    }
}
