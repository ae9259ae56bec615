//! Entity types
//!
//! Every entity owns its position, radius and color. `update` draws the
//! entity at its current state and then advances it by one tick.

use glam::Vec2;

use crate::renderer::{Color, Surface};

/// Unique identifier for a transient entity within a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Hands out monotonically increasing ids
#[derive(Debug, Clone)]
pub struct EntityIdGenerator {
    next_id: u32,
}

impl Default for EntityIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityIdGenerator {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    pub fn next(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}

/// The defended point at the center of the viewport
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Player {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            radius,
            color: Color::WHITE,
        }
    }

    /// Players never move
    pub fn update<S: Surface>(&self, surface: &mut S) {
        surface.fill_circle(self.pos, self.radius, self.color);
    }
}

/// A shot fired from the center
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Projectile {
    pub fn new(id: EntityId, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            color: Color::WHITE,
        }
    }

    pub fn update<S: Surface>(&mut self, surface: &mut S) {
        surface.fill_circle(self.pos, self.radius, self.color);
        self.pos += self.vel;
    }
}

/// In-flight radius animation after a non-lethal hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShrinkTween {
    pub from: f32,
    pub to: f32,
    pub elapsed: u32,
    pub duration: u32,
}

impl ShrinkTween {
    /// Radius at the current progress (quadratic ease-out)
    pub fn radius(&self) -> f32 {
        if self.duration == 0 {
            return self.to;
        }
        let t = (self.elapsed as f32 / self.duration as f32).min(1.0);
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// A circle converging on the player
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    pub shrink: Option<ShrinkTween>,
}

impl Enemy {
    pub fn new(id: EntityId, pos: Vec2, vel: Vec2, radius: f32, color: Color) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            color,
            shrink: None,
        }
    }

    pub fn update<S: Surface>(&mut self, surface: &mut S) {
        surface.fill_circle(self.pos, self.radius, self.color);
        self.pos += self.vel;
    }

    /// Radius once any running shrink animation completes
    pub fn settled_radius(&self) -> f32 {
        self.shrink.map_or(self.radius, |tween| tween.to)
    }

    /// Start animating toward `settled_radius() - step` over `ticks` ticks
    pub fn begin_shrink(&mut self, step: f32, ticks: u32) {
        let to = self.settled_radius() - step;
        let tween = ShrinkTween {
            from: self.radius,
            to,
            elapsed: 0,
            duration: ticks,
        };
        if ticks == 0 {
            self.radius = to;
            self.shrink = None;
        } else {
            self.shrink = Some(tween);
        }
    }

    /// Advance the shrink animation by one tick
    pub fn advance_shrink(&mut self) {
        if let Some(tween) = self.shrink.as_mut() {
            tween.elapsed += 1;
            // Never grow, even if a new tween started mid-animation
            self.radius = self.radius.min(tween.radius());
            if tween.is_finished() {
                self.radius = tween.to;
                self.shrink = None;
            }
        }
    }
}

/// Decorative spark from a hit
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    /// 1.0 = opaque, removed at 0.0
    pub alpha: f32,
}

impl Particle {
    pub fn new(id: EntityId, pos: Vec2, vel: Vec2, radius: f32, color: Color) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            color,
            alpha: 1.0,
        }
    }

    /// Draw at the current alpha, then apply friction, fade and move
    pub fn update<S: Surface>(&mut self, surface: &mut S, friction: f32, alpha_decay: f32) {
        let (pos, radius, color) = (self.pos, self.radius, self.color);
        surface.with_alpha(self.alpha, |s| s.fill_circle(pos, radius, color));
        self.vel *= friction;
        self.alpha = (self.alpha - alpha_decay).max(0.0);
        self.pos += self.vel;
    }

    pub fn is_faded(&self) -> bool {
        self.alpha <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::renderer::{DrawCommand, RecordingSurface};

    fn surface() -> RecordingSurface {
        RecordingSurface::new(800.0, 600.0)
    }

    #[test]
    fn test_id_generator_is_monotonic() {
        let mut ids = EntityIdGenerator::new();
        let a = ids.next();
        let b = ids.next();
        assert!(b > a);
        assert_ne!(a, b);
    }

    #[test]
    fn test_player_draws_without_moving() {
        let mut s = surface();
        let player = Player::new(Vec2::new(400.0, 300.0), PLAYER_RADIUS);
        player.update(&mut s);
        player.update(&mut s);
        assert_eq!(player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(s.circle_count(), 2);
    }

    #[test]
    fn test_projectile_draws_then_moves() {
        let mut s = surface();
        let mut p = Projectile::new(EntityId(1), Vec2::new(400.0, 300.0), Vec2::new(9.0, 0.0), 5.0);
        p.update(&mut s);
        assert_eq!(p.pos, Vec2::new(409.0, 300.0));
        // Drawn at the pre-move position
        assert!(matches!(
            s.commands()[0],
            DrawCommand::Circle { center, .. } if center == Vec2::new(400.0, 300.0)
        ));
    }

    #[test]
    fn test_particle_default_friction_keeps_speed() {
        let mut s = surface();
        let vel = Vec2::new(1.5, -2.0);
        let mut p = Particle::new(EntityId(1), Vec2::ZERO, vel, 1.0, Color::WHITE);
        for _ in 0..10 {
            p.update(&mut s, PARTICLE_FRICTION, PARTICLE_ALPHA_DECAY);
        }
        assert_eq!(p.vel, vel);
        assert!((p.alpha - 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_particle_friction_slows() {
        let mut s = surface();
        let mut p = Particle::new(EntityId(1), Vec2::ZERO, Vec2::new(4.0, 0.0), 1.0, Color::WHITE);
        p.update(&mut s, 0.5, PARTICLE_ALPHA_DECAY);
        assert_eq!(p.vel, Vec2::new(2.0, 0.0));
        // Friction applies before the move
        assert_eq!(p.pos, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_particle_alpha_does_not_leak() {
        let mut s = surface();
        let mut p = Particle::new(EntityId(1), Vec2::ZERO, Vec2::ZERO, 1.0, Color::WHITE);
        p.alpha = 0.4;
        p.update(&mut s, 1.0, 0.02);
        assert_eq!(s.global_alpha(), 1.0);
        assert!(matches!(
            s.commands()[0],
            DrawCommand::Circle { alpha, .. } if (alpha - 0.4).abs() < 1e-6
        ));
    }

    #[test]
    fn test_particle_alpha_floor() {
        let mut s = surface();
        let mut p = Particle::new(EntityId(1), Vec2::ZERO, Vec2::ZERO, 1.0, Color::WHITE);
        p.alpha = 0.01;
        p.update(&mut s, 1.0, 0.02);
        assert_eq!(p.alpha, 0.0);
        assert!(p.is_faded());
    }

    #[test]
    fn test_enemy_shrink_animates_over_several_ticks() {
        let mut e = Enemy::new(EntityId(1), Vec2::ZERO, Vec2::ZERO, 25.0, Color::WHITE);
        e.begin_shrink(SHRINK_STEP, 4);
        assert_eq!(e.radius, 25.0);
        assert_eq!(e.settled_radius(), 15.0);

        let mut last = e.radius;
        for _ in 0..3 {
            e.advance_shrink();
            assert!(e.radius < last);
            assert!(e.radius > 15.0);
            last = e.radius;
        }
        e.advance_shrink();
        assert_eq!(e.radius, 15.0);
        assert!(e.shrink.is_none());
    }

    #[test]
    fn test_enemy_second_hit_mid_tween_stacks() {
        let mut e = Enemy::new(EntityId(1), Vec2::ZERO, Vec2::ZERO, 30.0, Color::WHITE);
        e.begin_shrink(10.0, 10);
        e.advance_shrink();
        let mid = e.radius;
        e.begin_shrink(10.0, 10);
        assert_eq!(e.settled_radius(), 10.0);
        for _ in 0..10 {
            let before = e.radius;
            e.advance_shrink();
            assert!(e.radius <= before);
            assert!(e.radius <= mid);
        }
        assert_eq!(e.radius, 10.0);
    }

    #[test]
    fn test_enemy_update_does_not_change_radius() {
        let mut s = surface();
        let mut e = Enemy::new(EntityId(1), Vec2::ZERO, Vec2::new(1.0, 0.0), 20.0, Color::WHITE);
        e.update(&mut s);
        assert_eq!(e.radius, 20.0);
        assert_eq!(e.pos, Vec2::new(1.0, 0.0));
    }
}
