//! Simulation step
//!
//! One call advances every live entity by one tick, resolves collisions and
//! then removes whatever finished its lifecycle. Removal is deferred until
//! every collection has been scanned.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::circles_touch;
use super::entity::{Enemy, EntityIdGenerator, Particle};
use super::removal::RemovalSet;
use super::state::{GameEvent, GamePhase, GameState};
use crate::renderer::{Color, Surface};
use crate::settings::Settings;

/// Advance the round by one tick, drawing every entity onto `surface`
pub fn tick<S: Surface>(
    state: &mut GameState,
    surface: &mut S,
    settings: &Settings,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Don't tick unless a round is running
    if state.phase != GamePhase::Playing {
        return events;
    }
    state.time_ticks += 1;

    let mut removals = RemovalSet::new();

    // Trails: partially paint over the previous frame instead of clearing
    surface.fade(Color::BLACK, settings.trail_alpha);

    state.player.update(surface);

    for projectile in state.projectiles.iter_mut() {
        projectile.update(surface);
        if state
            .viewport
            .circle_outside(projectile.pos, projectile.radius)
        {
            removals.mark_projectile(projectile.id);
            events.push(GameEvent::ProjectileLeftViewport {
                projectile: projectile.id,
            });
        }
    }

    for particle in state.particles.iter_mut() {
        particle.update(
            surface,
            settings.particle_friction,
            settings.particle_alpha_decay,
        );
        if particle.is_faded() {
            removals.mark_particle(particle.id);
        }
    }

    if resolve_enemies(state, surface, settings, &mut removals, &mut events) {
        state.phase = GamePhase::GameOver;
    }

    removals.apply(state);

    log::trace!(
        "tick {}: {} projectiles, {} particles, {} enemies",
        state.time_ticks,
        state.projectiles.len(),
        state.particles.len(),
        state.enemies.len()
    );

    events
}

/// Move and draw enemies, then check them against the player and every
/// projectile. Returns true if an enemy reached the player.
fn resolve_enemies<S: Surface>(
    state: &mut GameState,
    surface: &mut S,
    settings: &Settings,
    removals: &mut RemovalSet,
    events: &mut Vec<GameEvent>,
) -> bool {
    let GameState {
        player,
        projectiles,
        particles,
        enemies,
        score,
        rng,
        ids,
        ..
    } = state;
    let epsilon = settings.collision_epsilon;

    for enemy in enemies.iter_mut() {
        enemy.advance_shrink();
        enemy.update(surface);

        if circles_touch(player.pos, player.radius, enemy.pos, enemy.radius, epsilon) {
            log::debug!("Enemy {:?} reached the player", enemy.id);
            events.push(GameEvent::PlayerHit {
                enemy: enemy.id,
                score: *score,
            });
            // Halt immediately: nothing else scores once the round is lost
            return true;
        }

        for projectile in projectiles.iter() {
            // Spent on an earlier hit or already off screen
            if removals.is_projectile_marked(projectile.id) {
                continue;
            }
            if !circles_touch(
                projectile.pos,
                projectile.radius,
                enemy.pos,
                enemy.radius,
                epsilon,
            ) {
                continue;
            }

            spawn_burst(particles, rng, ids, projectile.pos, enemy, settings);
            removals.mark_projectile(projectile.id);

            if enemy.settled_radius() - settings.shrink_step > settings.shrink_floor {
                *score += settings.hit_points;
                enemy.begin_shrink(settings.shrink_step, settings.shrink_ticks);
                log::debug!("Enemy {:?} shrunk to {}", enemy.id, enemy.settled_radius());
                events.push(GameEvent::EnemyShrunk {
                    enemy: enemy.id,
                    projectile: projectile.id,
                    points: settings.hit_points,
                    score: *score,
                });
            } else {
                *score += settings.kill_points;
                removals.mark_enemy(enemy.id);
                log::debug!("Enemy {:?} destroyed", enemy.id);
                events.push(GameEvent::EnemyDestroyed {
                    enemy: enemy.id,
                    projectile: projectile.id,
                    points: settings.kill_points,
                    score: *score,
                });
                // A destroyed enemy can't be hit again
                break;
            }
        }
    }

    false
}

/// Scatter `2 * radius` sparks in the enemy's color from the impact point
fn spawn_burst(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    ids: &mut EntityIdGenerator,
    at: Vec2,
    enemy: &Enemy,
    settings: &Settings,
) {
    let count = (enemy.radius * 2.0).ceil().max(0.0) as usize;
    let max_speed = settings.particle_max_speed;
    particles.reserve(count);
    for _ in 0..count {
        let radius = rng.random::<f32>() * settings.particle_max_radius;
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * (rng.random::<f32>() * max_speed),
            (rng.random::<f32>() - 0.5) * (rng.random::<f32>() * max_speed),
        );
        particles.push(Particle::new(ids.next(), at, vel, radius, enemy.color));
    }
}
