//! Conjured object guard - ownership of an object mid-activation
//!
//! A freshly conjured object moves `Created -> Delivered -> Equipped`. Only
//! `Equipped` hands ownership over to the host; dropping the guard in any
//! other state destroys the object, so every early return cleans up.

use tracing::debug;

use crate::application::ports::outbound::HostWorldPort;
use crate::domain::value_objects::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConjurationState {
    Created,
    Delivered,
    Equipped,
}

pub struct ConjuredObject<'w, W: HostWorldPort + ?Sized> {
    world: &'w W,
    entity: EntityId,
    state: ConjurationState,
}

impl<'w, W: HostWorldPort + ?Sized> ConjuredObject<'w, W> {
    pub fn new(world: &'w W, entity: EntityId) -> Self {
        Self {
            world,
            entity,
            state: ConjurationState::Created,
        }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn mark_delivered(&mut self) {
        debug_assert_eq!(self.state, ConjurationState::Created);
        self.state = ConjurationState::Delivered;
    }

    /// Hand the object over to the host for good
    pub fn commit(mut self) -> EntityId {
        debug_assert_eq!(self.state, ConjurationState::Delivered);
        self.state = ConjurationState::Equipped;
        self.entity
    }
}

impl<W: HostWorldPort + ?Sized> Drop for ConjuredObject<'_, W> {
    fn drop(&mut self) {
        if self.state != ConjurationState::Equipped {
            debug!(entity = %self.entity, state = ?self.state, "Obliterating conjured object");
            self.world.destroy_entity(self.entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Blueprint, DEFAULT_BLUEPRINT};
    use crate::infrastructure::in_memory_host::InMemoryHost;

    fn stone(host: &InMemoryHost) -> EntityId {
        let blueprint = Blueprint::resolve(DEFAULT_BLUEPRINT, |_| true).unwrap();
        host.create_entity(&blueprint)
    }

    #[test]
    fn test_drop_in_created_state_destroys() {
        let host = InMemoryHost::with_default_blueprints();
        let entity = stone(&host);
        {
            let guard = ConjuredObject::new(&host, entity);
            assert_eq!(guard.state, ConjurationState::Created);
        }
        assert!(!host.is_valid(entity));
    }

    #[test]
    fn test_drop_after_delivery_destroys() {
        let host = InMemoryHost::with_default_blueprints();
        let entity = stone(&host);
        {
            let mut guard = ConjuredObject::new(&host, entity);
            guard.mark_delivered();
        }
        assert!(!host.is_valid(entity));
    }

    #[test]
    fn test_commit_keeps_object() {
        let host = InMemoryHost::with_default_blueprints();
        let entity = stone(&host);
        let mut guard = ConjuredObject::new(&host, entity);
        guard.mark_delivered();
        assert_eq!(guard.commit(), entity);
        assert!(host.is_valid(entity));
    }
}
