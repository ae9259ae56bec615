//! Tick-counted simulation module
//!
//! All gameplay logic lives here:
//! - Motion is counted in ticks, never wall-clock time
//! - Seeded RNG only
//! - Removal is deferred to the end of each tick
//! - No platform dependencies; drawing goes through [`crate::renderer::Surface`]

pub mod collision;
pub mod entity;
pub mod removal;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Viewport, circle_gap, circles_touch};
pub use entity::{Enemy, EntityId, EntityIdGenerator, Particle, Player, Projectile, ShrinkTween};
pub use removal::RemovalSet;
pub use spawn::{SpawnScheduler, spawn_enemy};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::tick;
