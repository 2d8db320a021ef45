use crate::api::types::EntityId;
use crate::components::actor::{Actor, ActorKind};

/// Simple actor storage using a flat Vec.
/// Designed for small entity counts (a cavern holds dozens, not thousands).
pub struct Scene {
    actors: Vec<Actor>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            actors: Vec::with_capacity(64),
        }
    }

    /// Create a scene with a specific actor capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            actors: Vec::with_capacity(capacity),
        }
    }

    /// Add an actor to the scene.
    pub fn spawn(&mut self, actor: Actor) {
        self.actors.push(actor);
    }

    /// Remove an actor by ID. Returns the removed actor if found.
    pub fn despawn(&mut self, id: EntityId) -> Option<Actor> {
        let idx = self.actors.iter().position(|a| a.id == id)?;
        Some(self.actors.remove(idx))
    }

    pub fn get(&self, id: EntityId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|a| a.id == id)
    }

    /// Borrow one actor mutably together with every other actor.
    /// Used to resolve player-versus-candidates combat without aliasing.
    pub fn split_mut(
        &mut self,
        id: EntityId,
    ) -> Option<(&mut Actor, impl Iterator<Item = &mut Actor> + '_)> {
        let idx = self.actors.iter().position(|a| a.id == id)?;
        let (before, rest) = self.actors.split_at_mut(idx);
        let (actor, after) = rest.split_first_mut()?;
        Some((actor, before.iter_mut().chain(after.iter_mut())))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.iter_mut()
    }

    /// Active hostiles, in spawn order.
    pub fn hostiles(&self) -> impl Iterator<Item = &Actor> {
        self.actors
            .iter()
            .filter(|a| a.active && a.kind == ActorKind::Hostile)
    }

    /// Find the first actor with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Actor> {
        self.actors.iter().find(|a| a.tag == tag)
    }

    pub fn find_by_tag_mut(&mut self, tag: &str) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|a| a.tag == tag)
    }

    /// Record the start-of-tick state of every actor for interpolation.
    pub fn capture_all(&mut self) {
        for actor in &mut self.actors {
            actor.capture_state();
        }
    }

    /// Drop actors that left the simulation. Spawn order of the survivors
    /// is preserved so iteration stays deterministic.
    pub fn remove_inactive(&mut self) -> Vec<EntityId> {
        let removed: Vec<EntityId> = self
            .actors
            .iter()
            .filter(|a| !a.active)
            .map(|a| a.id)
            .collect();
        if !removed.is_empty() {
            self.actors.retain(|a| a.active);
            log::debug!("removed {} inactive actors", removed.len());
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn clear(&mut self) {
        self.actors.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
