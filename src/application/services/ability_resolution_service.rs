//! Ability resolution service - runs one conjuring activation end to end
//!
//! An activation walks a fixed sequence of checks. Each one either passes or
//! ends the transaction:
//!
//! 1. the actor must be a valid entity (silent)
//! 2. the ability must be usable right now (silent)
//! 3. a free thrown-weapon slot, else a free hand, must exist
//! 4. the host's reality distortion gate must allow the effect (silent)
//! 5. the object must end up in the actor's inventory
//! 6. the host must accept a silent equip into the chosen slot
//!
//! The object is conjured before step 3 and is destroyed on every failure.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::conjured_object::ConjuredObject;
use crate::application::dto::{ActivationError, ActivationOutcome, ActivationRequest};
use crate::application::ports::inbound::ActivateAbilityUseCase;
use crate::application::ports::outbound::{FlavorMessage, HostActorPort, HostWorldPort};
use crate::domain::entities::Mutation;
use crate::domain::value_objects::{BodyPartSlot, BodyPartType, EntityId, ExistenceSupport};

const MANIFEST_VERB: &str = "shimmer";
const MANIFEST_PREPOSITION: &str = "into existence in";

/// Service that resolves activations of one mutation against the host
pub struct AbilityResolver<W: HostWorldPort, A: HostActorPort> {
    mutation: Mutation,
    world: Arc<W>,
    actors: Arc<A>,
}

impl<W, A> AbilityResolver<W, A>
where
    W: HostWorldPort,
    A: HostActorPort,
{
    pub fn new(mutation: Mutation, world: Arc<W>, actors: Arc<A>) -> Self {
        Self {
            mutation,
            world,
            actors,
        }
    }

    pub fn mutation(&self) -> &Mutation {
        &self.mutation
    }

    /// Slot a conjured object should land in: a free thrown-weapon slot if
    /// there is one, otherwise a free hand.
    pub fn target_slot(&self, actor: EntityId) -> Option<BodyPartSlot> {
        self.actors.preferred_unequipped_slot(
            actor,
            &BodyPartType::ThrownWeapon,
            &BodyPartType::Hand,
        )
    }

    /// Create one object from the configured blueprint, bound to the
    /// mutation's owner rather than whoever triggered the activation.
    pub fn generate_object(&self) -> EntityId {
        let entity = self.world.create_entity(&self.mutation.definition.blueprint);
        self.world.mark_non_stackable(entity);
        self.world.remove_existence_support(entity);
        self.world
            .attach_existence_support(entity, ExistenceSupport::conjured_by(self.mutation.owner));
        entity
    }

    /// Run the activation and report any user-facing failure to the actor
    #[instrument(skip(self), fields(ability = %self.mutation.definition.display_name))]
    pub fn activate(&self, request: ActivationRequest) -> ActivationOutcome {
        let result = self.resolve(&request);
        match &result {
            Ok(entity) => {
                info!(actor = %request.actor, entity = %entity, "Ability activated");
            }
            Err(error) => {
                debug!(actor = %request.actor, %error, "Activation failed");
                if let Some(message) = error.user_message() {
                    self.actors.report_failure(request.actor, &message);
                }
            }
        }
        ActivationOutcome::from(result)
    }

    fn resolve(&self, request: &ActivationRequest) -> Result<EntityId, ActivationError> {
        let actor = request.actor;
        let definition = &self.mutation.definition;

        if !self.world.is_valid(actor) {
            return Err(ActivationError::InvalidActor);
        }
        if !self
            .actors
            .is_ability_usable(actor, definition.activated_ability_id)
        {
            return Err(ActivationError::AbilityUnusable);
        }

        let slot = self.target_slot(actor);
        let mut object = ConjuredObject::new(&*self.world, self.generate_object());

        let Some(slot) = slot else {
            return Err(ActivationError::NoAvailableSlot {
                object: self.world.indefinite_name(object.entity()),
            });
        };
        debug!(slot = %slot.ordinal_name, part_type = %slot.part_type, "Resolved target slot");

        if !self.world.fire_distortion_check(
            actor,
            definition.activated_ability_id,
            request.triggering_event,
        ) {
            return Err(ActivationError::DistortionBlocked);
        }

        self.world.deliver_to_inventory(object.entity(), actor);
        if !self.world.is_valid(object.entity())
            || self.world.inventory_holder(object.entity()) != Some(actor)
        {
            warn!(entity = %object.entity(), "Conjured object missing from inventory after delivery");
            return Err(ActivationError::DeliveryFailed);
        }
        object.mark_delivered();

        if !self.world.fire_equip(actor, object.entity(), &slot, true) {
            warn!(entity = %object.entity(), slot = %slot.ordinal_name, "Equip event rejected");
            return Err(ActivationError::EquipRejected);
        }
        let entity = object.commit();

        self.world.emit_flavor(FlavorMessage {
            subject: entity,
            verb: MANIFEST_VERB.to_string(),
            preposition: MANIFEST_PREPOSITION.to_string(),
            object: actor,
            slot_description: slot.holding_description().to_string(),
            indefinite_subject: true,
            possessive_object: true,
        });
        if let Some(event) = request.triggering_event {
            self.world.signal_interface_exit(event);
        }

        Ok(entity)
    }
}

impl<W, A> ActivateAbilityUseCase for AbilityResolver<W, A>
where
    W: HostWorldPort,
    A: HostActorPort,
{
    fn command_id(&self) -> &str {
        &self.mutation.definition.command_id
    }

    fn activate(&self, request: ActivationRequest) -> ActivationOutcome {
        AbilityResolver::activate(self, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::GENERIC_FAILURE_MESSAGE;
    use crate::domain::entities::{AbilityDefinition, Blueprint, DEFAULT_BLUEPRINT, DEFAULT_COMMAND_ID};
    use crate::domain::value_objects::{AbilityId, EventId};
    use crate::infrastructure::in_memory_host::{DistortionCheck, InMemoryHost};

    struct Fixture {
        host: Arc<InMemoryHost>,
        resolver: AbilityResolver<InMemoryHost, InMemoryHost>,
        owner: EntityId,
    }

    fn fixture(slots: Vec<BodyPartSlot>) -> Fixture {
        let host = Arc::new(InMemoryHost::with_default_blueprints());
        let ability_id = AbilityId::new();
        let owner = host.spawn_actor("you", true, slots);
        host.grant_ability(owner, ability_id);

        let blueprint = Blueprint::resolve(DEFAULT_BLUEPRINT, |name| host.has_blueprint(name)).unwrap();
        let definition = AbilityDefinition::new(blueprint, DEFAULT_COMMAND_ID, ability_id).unwrap();
        let mutation = Mutation::new(definition, owner, 1);
        let resolver = AbilityResolver::new(mutation, host.clone(), host.clone());

        Fixture {
            host,
            resolver,
            owner,
        }
    }

    fn player_slots() -> Vec<BodyPartSlot> {
        vec![
            BodyPartSlot::new(BodyPartType::Hand, "right hand"),
            BodyPartSlot::new(BodyPartType::Hand, "left hand"),
            BodyPartSlot::new(BodyPartType::ThrownWeapon, "thrown weapon"),
        ]
    }

    #[test]
    fn test_successful_activation_equips_into_thrown_slot() {
        let f = fixture(player_slots());
        let event = EventId::new();

        let outcome = f
            .resolver
            .activate(ActivationRequest::new(f.owner).with_triggering_event(event));

        assert!(outcome.success);
        let entity = outcome.produced_entity.unwrap();
        assert!(f.host.is_valid(entity));
        assert_eq!(f.host.inventory_holder(entity), Some(f.owner));

        let slot = f.host.equipped_slot(entity).unwrap();
        assert_eq!(slot.part_type, BodyPartType::ThrownWeapon);

        let flavor = f.host.flavor_messages();
        assert_eq!(flavor.len(), 1);
        assert_eq!(flavor[0].slot_description, "grasp");
        assert_eq!(flavor[0].verb, "shimmer");
        assert!(f.host.failure_messages(f.owner).is_empty());
        assert_eq!(f.host.interface_exits(), vec![event]);
        assert_eq!(
            f.host.rendered_messages(),
            vec!["An ephemeral stone shimmers into existence in your grasp.".to_string()]
        );
    }

    #[test]
    fn test_conjured_object_is_bound_to_owner() {
        let f = fixture(player_slots());
        let entity = f
            .resolver
            .activate(ActivationRequest::new(f.owner))
            .produced_entity
            .unwrap();

        assert!(f.host.is_non_stackable(entity));
        assert_eq!(
            f.host.existence_support(entity),
            Some(ExistenceSupport::conjured_by(f.owner))
        );
    }

    #[test]
    fn test_support_follows_bearer_not_activator() {
        let f = fixture(player_slots());
        let puppet = f
            .host
            .spawn_actor("puppet", false, vec![BodyPartSlot::new(BodyPartType::Hand, "hand")]);
        f.host
            .grant_ability(puppet, f.resolver.mutation().definition.activated_ability_id);

        let entity = f
            .resolver
            .activate(ActivationRequest::new(puppet))
            .produced_entity
            .unwrap();

        assert_eq!(f.host.inventory_holder(entity), Some(puppet));
        assert_eq!(
            f.host.existence_support(entity).map(|s| s.supported_by),
            Some(f.owner)
        );
    }

    #[test]
    fn test_falls_back_to_hand_slot() {
        let f = fixture(vec![BodyPartSlot::new(BodyPartType::Hand, "left hand")]);
        let outcome = f.resolver.activate(ActivationRequest::new(f.owner));

        assert!(outcome.success);
        assert_eq!(f.host.flavor_messages()[0].slot_description, "left hand");
        assert_eq!(
            f.host.rendered_messages(),
            vec!["An ephemeral stone shimmers into existence in your left hand.".to_string()]
        );
    }

    #[test]
    fn test_no_slot_reports_object_and_destroys_it() {
        let f = fixture(vec![BodyPartSlot::new(BodyPartType::Head, "head")]);
        let before = f.host.live_entity_count();

        let outcome = f.resolver.activate(ActivationRequest::new(f.owner));

        assert!(!outcome.success);
        assert!(matches!(outcome.error, Some(ActivationError::NoAvailableSlot { .. })));
        assert_eq!(f.host.live_entity_count(), before);
        assert_eq!(
            f.host.failure_messages(f.owner),
            vec!["You have no place available to hold an ephemeral stone.".to_string()]
        );
        assert!(f.host.flavor_messages().is_empty());
    }

    #[test]
    fn test_distortion_failure_is_silent() {
        let f = fixture(player_slots());
        f.host.suppress_distortion(f.owner);
        let before = f.host.live_entity_count();

        let outcome = f.resolver.activate(ActivationRequest::new(f.owner));

        assert!(!outcome.success);
        assert_eq!(outcome.error, Some(ActivationError::DistortionBlocked));
        assert!(outcome.failure_message.is_none());
        assert_eq!(f.host.live_entity_count(), before);
        assert!(f.host.failure_messages(f.owner).is_empty());
        assert!(f.host.flavor_messages().is_empty());
    }

    #[test]
    fn test_rejected_equip_reports_generic_failure_once() {
        let f = fixture(player_slots());
        f.host.reject_equips(true);
        let before = f.host.live_entity_count();

        let outcome = f.resolver.activate(ActivationRequest::new(f.owner));

        assert!(!outcome.success);
        assert_eq!(outcome.error, Some(ActivationError::EquipRejected));
        assert_eq!(f.host.live_entity_count(), before);
        assert_eq!(
            f.host.failure_messages(f.owner),
            vec![GENERIC_FAILURE_MESSAGE.to_string()]
        );
        assert!(f.host.flavor_messages().is_empty());
    }

    #[test]
    fn test_lost_delivery_reports_generic_failure() {
        let f = fixture(player_slots());
        f.host.drop_deliveries(true);
        let before = f.host.live_entity_count();

        let outcome = f.resolver.activate(ActivationRequest::new(f.owner));

        assert_eq!(outcome.error, Some(ActivationError::DeliveryFailed));
        assert_eq!(f.host.live_entity_count(), before);
        assert_eq!(
            f.host.failure_messages(f.owner),
            vec![GENERIC_FAILURE_MESSAGE.to_string()]
        );
    }

    #[test]
    fn test_distortion_check_gets_ability_and_triggering_event() {
        let f = fixture(player_slots());
        let event = EventId::new();

        let outcome = f
            .resolver
            .activate(ActivationRequest::new(f.owner).with_triggering_event(event));

        assert!(outcome.success);
        assert_eq!(
            f.host.distortion_checks(),
            vec![DistortionCheck {
                actor: f.owner,
                device: f.resolver.mutation().definition.activated_ability_id,
                triggering_event: Some(event),
            }]
        );
    }

    #[test]
    fn test_no_slot_fails_before_distortion_check() {
        let f = fixture(vec![BodyPartSlot::new(BodyPartType::Head, "head")]);

        f.resolver.activate(ActivationRequest::new(f.owner));

        assert!(f.host.distortion_checks().is_empty());
    }

    #[test]
    fn test_failed_activation_does_not_exit_interface() {
        let no_slot = fixture(vec![BodyPartSlot::new(BodyPartType::Head, "head")]);
        let distorted = fixture(player_slots());
        distorted.host.suppress_distortion(distorted.owner);
        let lost = fixture(player_slots());
        lost.host.drop_deliveries(true);
        let rejected = fixture(player_slots());
        rejected.host.reject_equips(true);

        for f in [no_slot, distorted, lost, rejected] {
            let outcome = f
                .resolver
                .activate(ActivationRequest::new(f.owner).with_triggering_event(EventId::new()));

            assert!(!outcome.success);
            assert!(f.host.interface_exits().is_empty(), "{:?}", outcome.error);
            assert!(f.host.flavor_messages().is_empty());
        }
    }

    #[test]
    fn test_invalid_actor_is_silent() {
        let f = fixture(player_slots());
        let before = f.host.live_entity_count();

        let outcome = f.resolver.activate(ActivationRequest::new(EntityId::new()));

        assert_eq!(outcome.error, Some(ActivationError::InvalidActor));
        assert!(outcome.failure_message.is_none());
        assert_eq!(f.host.live_entity_count(), before);
    }

    #[test]
    fn test_unusable_ability_is_silent() {
        let f = fixture(player_slots());
        f.host.set_cooldown(f.owner, f.resolver.mutation().definition.activated_ability_id, 3);
        let before = f.host.live_entity_count();

        let outcome = f.resolver.activate(ActivationRequest::new(f.owner));

        assert_eq!(outcome.error, Some(ActivationError::AbilityUnusable));
        assert!(f.host.failure_messages(f.owner).is_empty());
        assert_eq!(f.host.live_entity_count(), before);
    }

    #[test]
    fn test_two_activations_produce_independent_objects() {
        let f = fixture(player_slots());

        let first = f.resolver.activate(ActivationRequest::new(f.owner));
        let second = f.resolver.activate(ActivationRequest::new(f.owner));

        let first = first.produced_entity.unwrap();
        let second = second.produced_entity.unwrap();
        assert_ne!(first, second);
        for entity in [first, second] {
            assert!(f.host.is_valid(entity));
            assert_eq!(
                f.host.existence_support(entity).map(|s| s.supported_by),
                Some(f.owner)
            );
        }
        // Thrown weapon slot first, then a hand
        assert_eq!(f.host.equipped_slot(first).unwrap().part_type, BodyPartType::ThrownWeapon);
        assert_eq!(f.host.equipped_slot(second).unwrap().part_type, BodyPartType::Hand);
    }

    #[test]
    fn test_objects_vanish_when_owner_is_gone() {
        let f = fixture(player_slots());
        let entity = f
            .resolver
            .activate(ActivationRequest::new(f.owner))
            .produced_entity
            .unwrap();

        f.host.end_turn();
        assert!(f.host.is_valid(entity));

        f.host.destroy_entity(f.owner);
        f.host.end_turn();
        assert!(!f.host.is_valid(entity));
    }

    #[test]
    fn test_handle_command_routes_only_own_command() {
        let f = fixture(player_slots());

        assert!(f
            .resolver
            .handle_command("CommandSomethingElse", ActivationRequest::new(f.owner))
            .is_none());
        assert!(f.host.flavor_messages().is_empty());

        let outcome = f
            .resolver
            .handle_command(DEFAULT_COMMAND_ID, ActivationRequest::new(f.owner))
            .unwrap();
        assert!(outcome.success);
    }
}
