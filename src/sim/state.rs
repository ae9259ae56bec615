//! Game state and core simulation types
//!
//! Everything a round mutates lives in [`GameState`]: one owner, no
//! back-references between entities.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Viewport;
use super::entity::{Enemy, EntityId, EntityIdGenerator, Particle, Player, Projectile};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Never started
    #[default]
    Idle,
    /// Ticking and spawning
    Playing,
    /// Player was hit; waiting for a restart
    GameOver,
}

/// Notable outcomes of a single tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A projectile left the viewport and was discarded
    ProjectileLeftViewport { projectile: EntityId },
    /// A hit shrank an enemy; `score` is the total after the award
    EnemyShrunk {
        enemy: EntityId,
        projectile: EntityId,
        points: u64,
        score: u64,
    },
    /// A hit destroyed an enemy; `score` is the total after the award
    EnemyDestroyed {
        enemy: EntityId,
        projectile: EntityId,
        points: u64,
        score: u64,
    },
    /// An enemy reached the player; the round is over
    PlayerHit { enemy: EntityId, score: u64 },
}

impl GameEvent {
    /// Score total carried by scoring events
    pub fn score(&self) -> Option<u64> {
        match *self {
            GameEvent::EnemyShrunk { score, .. } | GameEvent::EnemyDestroyed { score, .. } => {
                Some(score)
            }
            _ => None,
        }
    }
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct GameState {
    pub viewport: Viewport,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub enemies: Vec<Enemy>,
    pub score: u64,
    /// Ticks simulated this round
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Source of every random draw (spawns, bursts)
    pub rng: Pcg32,
    pub ids: EntityIdGenerator,
}

impl GameState {
    /// Fresh state with the player at the viewport center
    pub fn new(viewport: Viewport, seed: u64, player_radius: f32) -> Self {
        Self {
            viewport,
            player: Player::new(viewport.center(), player_radius),
            projectiles: Vec::new(),
            particles: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Idle,
            rng: Pcg32::seed_from_u64(seed),
            ids: EntityIdGenerator::new(),
        }
    }

    /// Clear the round for a new start on `viewport`.
    ///
    /// The RNG stream continues so consecutive rounds differ.
    pub fn reset(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.player.pos = viewport.center();
        self.projectiles.clear();
        self.particles.clear();
        self.enemies.clear();
        self.score = 0;
        self.time_ticks = 0;
    }

    pub fn next_entity_id(&mut self) -> EntityId {
        self.ids.next()
    }

    /// Live entity count across all transient collections
    pub fn entity_count(&self) -> usize {
        self.projectiles.len() + self.particles.len() + self.enemies.len()
    }
}
