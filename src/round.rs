//! Round controller
//!
//! Owns the score, the live entities and the two recurring callbacks (frame
//! tick and spawn interval). Hosts feed it [`Task`]s; it never reaches for
//! ambient state.

use glam::Vec2;

use crate::direction_toward;
use crate::error::{ConfigError, GeometryError, ensure_finite};
use crate::hud::Hud;
use crate::platform::{Task, TaskQueue, TimerId, Timers};
use crate::renderer::Surface;
use crate::settings::Settings;
use crate::sim::{
    GameEvent, GamePhase, GameState, Projectile, SpawnScheduler, Viewport, spawn_enemy, tick,
};

/// A playable round and its lifecycle
#[derive(Debug, Clone)]
pub struct Round {
    settings: Settings,
    state: GameState,
    spawner: SpawnScheduler,
    /// Outstanding frame request while ticking
    frame: Option<TimerId>,
}

impl Round {
    /// Create an idle round; nothing ticks until [`Round::start`]
    pub fn new(settings: Settings, viewport: Viewport, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;
        let state = GameState::new(viewport, seed, settings.player_radius);
        let spawner = SpawnScheduler::new(settings.spawn_interval_ms);
        Ok(Self {
            settings,
            state,
            spawner,
            frame: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for hosts that script scenarios (demos, tests)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    /// Whether a frame request is outstanding
    pub fn is_ticking(&self) -> bool {
        self.frame.is_some()
    }

    pub fn is_spawning(&self) -> bool {
        self.spawner.is_running()
    }

    /// Reset everything and begin ticking and spawning.
    ///
    /// Safe to call while a round is running: previous timers are cancelled
    /// before new ones are started.
    pub fn start<T, H>(&mut self, timers: &mut T, hud: &mut H)
    where
        T: Timers + ?Sized,
        H: Hud + ?Sized,
    {
        self.stop_timers(timers);

        let viewport = self.state.viewport;
        self.state.reset(viewport);
        self.state.phase = GamePhase::Playing;

        hud.show_score(0);
        hud.hide_game_over();

        self.frame = Some(timers.request_frame());
        self.spawner.start(timers);

        log::info!(
            "Round started ({}x{})",
            viewport.width(),
            viewport.height()
        );
    }

    /// Adopt a new viewport size and restart the round
    pub fn resize<T, S, H>(
        &mut self,
        width: f32,
        height: f32,
        timers: &mut T,
        surface: &mut S,
        hud: &mut H,
    ) -> Result<(), GeometryError>
    where
        T: Timers + ?Sized,
        S: Surface,
        H: Hud + ?Sized,
    {
        let viewport = Viewport::new(width, height)?;
        surface.resize(width, height);
        self.state.viewport = viewport;
        log::info!("Viewport resized to {}x{}", width, height);
        self.start(timers, hud);
        Ok(())
    }

    /// Shoot from the center toward `target` (viewport coordinates).
    ///
    /// Clicks outside a running round are ignored.
    pub fn fire(&mut self, target: Vec2) -> Result<(), GeometryError> {
        ensure_finite("target x", target.x)?;
        ensure_finite("target y", target.y)?;

        if self.state.phase != GamePhase::Playing {
            log::debug!("Ignoring fire while {:?}", self.state.phase);
            return Ok(());
        }

        let center = self.state.viewport.center();
        let vel = direction_toward(center, target, self.settings.projectile_speed);
        let id = self.state.next_entity_id();
        self.state.projectiles.push(Projectile::new(
            id,
            center,
            vel,
            self.settings.projectile_radius,
        ));
        Ok(())
    }

    /// Finish the round: stop both timers and show the final score
    pub fn end<T, H>(&mut self, timers: &mut T, hud: &mut H)
    where
        T: Timers + ?Sized,
        H: Hud + ?Sized,
    {
        self.stop_timers(timers);
        self.state.phase = GamePhase::GameOver;
        hud.show_game_over(self.state.score);
        log::info!(
            "Round over after {} ticks, score {}",
            self.state.time_ticks,
            self.state.score
        );
    }

    /// Dispatch one host task
    pub fn handle<T, S, H>(&mut self, task: Task, timers: &mut T, surface: &mut S, hud: &mut H)
    where
        T: Timers + ?Sized,
        S: Surface,
        H: Hud + ?Sized,
    {
        match task {
            Task::Frame(id) => self.on_frame(id, timers, surface, hud),
            Task::Interval(id) => self.on_spawn(id),
            Task::Start => self.start(timers, hud),
            Task::Fire(target) => {
                if let Err(e) = self.fire(target) {
                    log::warn!("Ignoring click: {}", e);
                }
            }
            Task::Resize { width, height } => {
                if let Err(e) = self.resize(width, height, timers, surface, hud) {
                    log::warn!("Ignoring resize: {}", e);
                }
            }
        }
    }

    /// Handle every task due up to `until_ms`; returns how many ran
    pub fn pump<S, H>(
        &mut self,
        queue: &mut TaskQueue,
        until_ms: f64,
        surface: &mut S,
        hud: &mut H,
    ) -> usize
    where
        S: Surface,
        H: Hud + ?Sized,
    {
        let mut handled = 0;
        while let Some(task) = queue.next_task(until_ms) {
            self.handle(task, queue, surface, hud);
            handled += 1;
        }
        handled
    }

    fn on_frame<T, S, H>(&mut self, id: TimerId, timers: &mut T, surface: &mut S, hud: &mut H)
    where
        T: Timers + ?Sized,
        S: Surface,
        H: Hud + ?Sized,
    {
        if self.frame != Some(id) {
            log::trace!("Dropping stale frame {:?}", id);
            return;
        }

        // Keep the cadence alive before doing any work
        self.frame = Some(timers.request_frame());

        let events = tick(&mut self.state, surface, &self.settings);
        for event in &events {
            if let Some(score) = event.score() {
                hud.show_score(score);
            }
            if let GameEvent::PlayerHit { enemy, .. } = event {
                log::debug!("Player hit by enemy {:?}", enemy);
            }
        }

        if self.state.phase == GamePhase::GameOver {
            self.end(timers, hud);
        }
    }

    fn on_spawn(&mut self, id: TimerId) {
        if !self.spawner.owns(id) || self.state.phase != GamePhase::Playing {
            log::trace!("Dropping stale spawn {:?}", id);
            return;
        }
        let enemy_id = self.state.next_entity_id();
        let enemy = spawn_enemy(
            &mut self.state.rng,
            &self.state.viewport,
            &self.settings,
            enemy_id,
        );
        log::debug!(
            "Spawned enemy {:?} r={:.1} at ({:.0}, {:.0})",
            enemy.id,
            enemy.radius,
            enemy.pos.x,
            enemy.pos.y
        );
        self.state.enemies.push(enemy);
    }

    fn stop_timers<T: Timers + ?Sized>(&mut self, timers: &mut T) {
        if let Some(id) = self.frame.take() {
            timers.cancel_frame(id);
        }
        self.spawner.stop(timers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hud::LogHud;
    use crate::renderer::{Color, RecordingSurface};
    use crate::sim::Enemy;

    struct Harness {
        round: Round,
        queue: TaskQueue,
        surface: RecordingSurface,
        hud: LogHud,
    }

    impl Harness {
        fn new() -> Self {
            let settings = Settings::default();
            let queue = TaskQueue::new(settings.frame_period_ms);
            let round = Round::new(settings, Viewport::new(800.0, 600.0).unwrap(), 12345).unwrap();
            Self {
                round,
                queue,
                surface: RecordingSurface::new(800.0, 600.0).with_capacity_limit(256),
                hud: LogHud::default(),
            }
        }

        fn started() -> Self {
            let mut h = Self::new();
            h.queue.push(Task::Start);
            h.run_for(0.0);
            h
        }

        fn run_for(&mut self, ms: f64) -> usize {
            let until = self.queue.now_ms() + ms;
            self.round
                .pump(&mut self.queue, until, &mut self.surface, &mut self.hud)
        }
    }

    #[test]
    fn test_new_round_is_idle() {
        let mut h = Harness::new();
        assert_eq!(h.round.phase(), GamePhase::Idle);
        assert_eq!(h.run_for(10_000.0), 0);
        assert!(h.round.state().enemies.is_empty());
    }

    #[test]
    fn test_new_round_rejects_bad_settings() {
        let settings = Settings {
            spawn_interval_ms: 0,
            ..Default::default()
        };
        assert!(Round::new(settings, Viewport::new(800.0, 600.0).unwrap(), 1).is_err());
    }

    #[test]
    fn test_start_schedules_frame_and_spawns() {
        let h = Harness::started();
        assert_eq!(h.round.phase(), GamePhase::Playing);
        assert!(h.round.is_ticking());
        assert!(h.round.is_spawning());
        assert!(h.queue.frame_pending());
        assert_eq!(h.queue.active_intervals(), 1);
        assert_eq!(h.hud.score, 0);
        assert_eq!(h.hud.final_score, None);
    }

    #[test]
    fn test_double_start_does_not_duplicate_timers() {
        let mut h = Harness::started();
        h.queue.push(Task::Start);
        h.queue.push(Task::Start);
        h.run_for(0.0);
        assert_eq!(h.queue.active_intervals(), 1);

        h.run_for(1700.0);
        assert_eq!(h.round.state().enemies.len(), 2);
        // ~60 Hz, not doubled
        let ticks = h.round.state().time_ticks;
        assert!((100..=103).contains(&ticks), "ticks = {ticks}");
    }

    #[test]
    fn test_spawn_cadence() {
        let mut h = Harness::started();
        h.run_for(799.0);
        assert!(h.round.state().enemies.is_empty());
        h.run_for(1.0);
        assert_eq!(h.round.state().enemies.len(), 1);
        h.run_for(800.0);
        assert_eq!(h.round.state().enemies.len(), 2);
        for enemy in &h.round.state().enemies {
            assert!(enemy.radius >= 10.0 && enemy.radius < 30.0);
        }
    }

    #[test]
    fn test_fire_aims_from_center() {
        let mut h = Harness::started();
        h.round.fire(Vec2::new(500.0, 300.0)).unwrap();
        let p = &h.round.state().projectiles[0];
        assert_eq!(p.pos, Vec2::new(400.0, 300.0));
        assert_eq!(p.vel, Vec2::new(9.0, 0.0));
        assert_eq!(p.radius, 5.0);
        assert_eq!(p.color, Color::WHITE);
    }

    #[test]
    fn test_fire_rejects_non_finite_target() {
        let mut h = Harness::started();
        assert!(h.round.fire(Vec2::new(f32::NAN, 1.0)).is_err());
        assert!(h.round.fire(Vec2::new(1.0, f32::INFINITY)).is_err());
        assert!(h.round.state().projectiles.is_empty());

        // Through the task path it is logged and dropped
        h.queue.push(Task::Fire(Vec2::new(f32::NAN, 0.0)));
        h.run_for(0.0);
        assert!(h.round.state().projectiles.is_empty());
    }

    #[test]
    fn test_fire_ignored_outside_round() {
        let mut h = Harness::new();
        h.round.fire(Vec2::new(10.0, 10.0)).unwrap();
        assert!(h.round.state().projectiles.is_empty());
    }

    #[test]
    fn test_resize_restarts_round() {
        let mut h = Harness::started();
        h.round.fire(Vec2::new(0.0, 0.0)).unwrap();
        h.run_for(1000.0);
        assert!(h.round.state().entity_count() > 0);

        h.queue.push(Task::Resize {
            width: 1024.0,
            height: 768.0,
        });
        h.run_for(0.0);
        let state = h.round.state();
        assert_eq!(state.viewport, Viewport::new(1024.0, 768.0).unwrap());
        assert_eq!(state.player.pos, Vec2::new(512.0, 384.0));
        assert_eq!(state.entity_count(), 0);
        assert_eq!(state.score, 0);
        assert_eq!((h.surface.width, h.surface.height), (1024.0, 768.0));
        assert_eq!(h.queue.active_intervals(), 1);
    }

    #[test]
    fn test_resize_rejects_bad_geometry() {
        let mut h = Harness::started();
        h.run_for(100.0);
        let ticks = h.round.state().time_ticks;

        h.queue.push(Task::Resize {
            width: f32::NAN,
            height: 600.0,
        });
        h.queue.push(Task::Resize {
            width: 0.0,
            height: 600.0,
        });
        h.run_for(0.0);
        assert_eq!(h.round.state().viewport, Viewport::new(800.0, 600.0).unwrap());
        assert_eq!(h.round.state().time_ticks, ticks);
        assert_eq!(h.round.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_score_reported_on_change() {
        let mut h = Harness::started();
        let state = h.round.state_mut();
        let id = state.next_entity_id();
        state.enemies.push(Enemy::new(
            id,
            Vec2::new(600.0, 300.0),
            Vec2::ZERO,
            15.0,
            Color::WHITE,
        ));
        h.round.fire(Vec2::new(800.0, 300.0)).unwrap();

        // 600 - 15 - 5 - 400 = 180 units at 9 per tick
        let frame_ms = h.round.settings().frame_period_ms;
        h.run_for(25.0 * frame_ms);
        assert_eq!(h.round.score(), 25);
        assert_eq!(h.hud.score, 25);
    }

    #[test]
    fn test_game_over_stops_timers() {
        let mut h = Harness::started();
        let state = h.round.state_mut();
        let id = state.next_entity_id();
        state.score = 40;
        state.enemies.push(Enemy::new(
            id,
            Vec2::new(430.0, 300.0),
            Vec2::new(-1.0, 0.0),
            20.0,
            Color::WHITE,
        ));

        h.run_for(100.0);
        assert_eq!(h.round.phase(), GamePhase::GameOver);
        assert_eq!(h.hud.final_score, Some(40));
        assert!(!h.round.is_ticking());
        assert!(!h.round.is_spawning());
        assert!(!h.queue.frame_pending());
        assert_eq!(h.queue.active_intervals(), 0);

        // Nothing moves while over
        let ticks = h.round.state().time_ticks;
        let enemies = h.round.state().enemies.len();
        assert_eq!(h.run_for(10_000.0), 0);
        assert_eq!(h.round.state().time_ticks, ticks);
        assert_eq!(h.round.state().enemies.len(), enemies);

        // And it resumes on start
        h.queue.push(Task::Start);
        h.run_for(0.0);
        assert_eq!(h.round.phase(), GamePhase::Playing);
        assert_eq!(h.round.score(), 0);
        assert_eq!(h.hud.final_score, None);
        h.run_for(100.0);
        assert!(h.round.state().time_ticks > 0);
    }

    #[test]
    fn test_stale_tasks_are_ignored() {
        let mut h = Harness::started();
        h.round.handle(
            Task::Frame(TimerId(9999)),
            &mut h.queue,
            &mut h.surface,
            &mut h.hud,
        );
        h.round.handle(
            Task::Interval(TimerId(9999)),
            &mut h.queue,
            &mut h.surface,
            &mut h.hud,
        );
        assert_eq!(h.round.state().time_ticks, 0);
        assert!(h.round.state().enemies.is_empty());
    }

    /// Surface whose circle draws blow up mid-frame
    struct FailingSurface;

    impl Surface for FailingSurface {
        fn resize(&mut self, _width: f32, _height: f32) {}
        fn fade(&mut self, _color: Color, _alpha: f32) {}
        fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {
            panic!("draw failed");
        }
        fn save(&mut self) {}
        fn restore(&mut self) {}
        fn set_global_alpha(&mut self, _alpha: f32) {}
    }

    #[test]
    fn test_next_frame_requested_before_tick_work() {
        let mut h = Harness::started();
        let frame_ms = h.round.settings().frame_period_ms;
        let task = h.queue.next_task(frame_ms);
        assert!(matches!(task, Some(Task::Frame(_))));
        assert!(!h.queue.frame_pending());

        let task = task.unwrap();
        let mut surface = FailingSurface;
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            h.round
                .handle(task, &mut h.queue, &mut surface, &mut h.hud)
        }));
        assert!(result.is_err());

        // The cadence survived the failed frame
        assert!(h.queue.frame_pending());
        assert!(h.round.is_ticking());
        let ticks = h.round.state().time_ticks;
        h.run_for(10.0 * frame_ms);
        assert!(h.round.state().time_ticks > ticks);
    }

    #[test]
    fn test_unattended_round_ends() {
        let mut h = Harness::started();
        h.run_for(60_000.0);
        assert_eq!(h.round.phase(), GamePhase::GameOver);
        assert_eq!(h.hud.final_score, Some(0));
        assert!(!h.queue.frame_pending());
    }
}
