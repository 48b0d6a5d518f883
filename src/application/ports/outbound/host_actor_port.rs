//! Host actor port - Per-creature queries and failure reporting

use crate::domain::value_objects::{AbilityId, BodyPartSlot, BodyPartType, EntityId};

/// Port for actor-level operations owned by the host
pub trait HostActorPort: Send + Sync {
    /// Cooldown, resource and state gate for an activated ability
    fn is_ability_usable(&self, actor: EntityId, ability: AbilityId) -> bool;

    /// Show `message` to the actor. Always returns false so callers can
    /// `return actors.report_failure(..)` from a failing check.
    fn report_failure(&self, actor: EntityId, message: &str) -> bool;

    /// First unequipped slot of `preferred` type, else of `alternate` type
    fn preferred_unequipped_slot(
        &self,
        actor: EntityId,
        preferred: &BodyPartType,
        alternate: &BodyPartType,
    ) -> Option<BodyPartSlot>;
}
