//! Host world port - Object lifecycle, equipping, events and messaging
//!
//! This port replaces the host engine's generic event bus with one typed
//! method per interaction the ability resolver needs. The infrastructure layer
//! provides the concrete implementation.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Blueprint;
use crate::domain::value_objects::{AbilityId, BodyPartSlot, EntityId, EventId, ExistenceSupport};

/// A "subject did verb to object's slot" notification handed to the host's
/// message system for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorMessage {
    pub subject: EntityId,
    pub verb: String,
    pub preposition: String,
    pub object: EntityId,
    /// How the object's slot is named, e.g. "grasp" or "left hand"
    pub slot_description: String,
    /// Render the subject as "a stone" rather than "the stone"
    pub indefinite_subject: bool,
    /// Render the object possessively, e.g. "your grasp"
    pub possessive_object: bool,
}

/// Port for the host's world: entities, inventories, equipment and events
///
/// All calls are synchronous and complete before returning; the host is
/// turn-based and never interleaves another actor's logic inside a call.
pub trait HostWorldPort: Send + Sync {
    /// Whether `entity` refers to a live, valid game object
    fn is_valid(&self, entity: EntityId) -> bool;

    /// Instantiate one entity from a blueprint
    fn create_entity(&self, blueprint: &Blueprint) -> EntityId;

    /// Remove an entity from the game without leaving remains
    fn destroy_entity(&self, entity: EntityId);

    fn mark_non_stackable(&self, entity: EntityId);

    /// Strip whatever existence support the blueprint attached by default
    fn remove_existence_support(&self, entity: EntityId);

    fn attach_existence_support(&self, entity: EntityId, support: ExistenceSupport);

    /// Display name with an indefinite article, e.g. "an ephemeral stone"
    fn indefinite_name(&self, entity: EntityId) -> String;

    /// Place `entity` into `actor`'s inventory
    fn deliver_to_inventory(&self, entity: EntityId, actor: EntityId);

    /// The entity whose inventory currently holds `entity`, if any
    fn inventory_holder(&self, entity: EntityId) -> Option<EntityId>;

    /// Ask `actor` to equip `entity` into `slot`; returns false if rejected
    fn fire_equip(&self, actor: EntityId, entity: EntityId, slot: &BodyPartSlot, silent: bool)
        -> bool;

    /// Run the reality distortion gate for `device` used by `actor`.
    /// Returns false when something in the world suppresses the effect.
    fn fire_distortion_check(
        &self,
        actor: EntityId,
        device: AbilityId,
        triggering_event: Option<EventId>,
    ) -> bool;

    fn emit_flavor(&self, message: FlavorMessage);

    /// Tell the UI layer that raised `event` to close its interface
    fn signal_interface_exit(&self, event: EventId);
}
