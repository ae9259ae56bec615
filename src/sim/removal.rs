//! Deferred removal
//!
//! Entities are never removed while their collection is being scanned.
//! A tick marks ids here and compacts every collection once all scans are
//! done, so positions seen earlier in the tick stay valid.

use std::collections::HashSet;

use super::entity::EntityId;
use super::state::GameState;

/// Ids marked for removal during the current tick
#[derive(Debug, Clone, Default)]
pub struct RemovalSet {
    projectiles: HashSet<EntityId>,
    particles: HashSet<EntityId>,
    enemies: HashSet<EntityId>,
}

impl RemovalSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_projectile(&mut self, id: EntityId) {
        self.projectiles.insert(id);
    }

    pub fn mark_particle(&mut self, id: EntityId) {
        self.particles.insert(id);
    }

    pub fn mark_enemy(&mut self, id: EntityId) {
        self.enemies.insert(id);
    }

    pub fn is_projectile_marked(&self, id: EntityId) -> bool {
        self.projectiles.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty() && self.particles.is_empty() && self.enemies.is_empty()
    }

    /// Drop every marked entity, preserving the order of survivors
    pub fn apply(self, state: &mut GameState) {
        if self.is_empty() {
            return;
        }
        state
            .projectiles
            .retain(|p| !self.projectiles.contains(&p.id));
        state.particles.retain(|p| !self.particles.contains(&p.id));
        state.enemies.retain(|e| !self.enemies.contains(&e.id));
    }
}
