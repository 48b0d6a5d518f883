//! In-memory host - A self-contained stand-in for the game engine
//!
//! Implements every outbound port over plain maps so the resolver can run
//! without a live engine: the demo binary drives it, and the service tests use
//! it as their test double. It also plays the host's part in the turn loop by
//! removing conjured objects whose supporter has gone away.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::application::ports::outbound::{
    BlueprintRegistryPort, FlavorMessage, HostActorPort, HostWorldPort,
};
use crate::domain::entities::{Blueprint, DEFAULT_BLUEPRINT};
use crate::domain::value_objects::{
    capitalize, preferred_unequipped_slot, with_indefinite_article, AbilityId, BodyPartId,
    BodyPartSlot, BodyPartType, EntityId, EventId, ExistenceSupport,
};

/// How the host instantiates a blueprint
#[derive(Debug, Clone)]
struct BlueprintTemplate {
    display_name: String,
    /// Objects from this blueprint start out with their own existence support
    ships_with_support: bool,
}

#[derive(Debug, Clone)]
struct ItemState {
    display_name: String,
    non_stackable: bool,
    support: Option<ExistenceSupport>,
    holder: Option<EntityId>,
    equipped_in: Option<BodyPartId>,
}

#[derive(Debug, Clone)]
struct ActorState {
    name: String,
    is_player: bool,
    slots: Vec<BodyPartSlot>,
    /// Remaining cooldown turns per granted ability
    abilities: HashMap<AbilityId, u32>,
    failures: Vec<String>,
    distortion_suppressed: bool,
}

/// Arguments one distortion check was fired with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistortionCheck {
    pub actor: EntityId,
    pub device: AbilityId,
    pub triggering_event: Option<EventId>,
}

#[derive(Debug, Default)]
struct HostState {
    blueprints: HashMap<String, BlueprintTemplate>,
    items: HashMap<EntityId, ItemState>,
    actors: HashMap<EntityId, ActorState>,
    flavor: Vec<FlavorMessage>,
    rendered: Vec<String>,
    interface_exits: Vec<EventId>,
    distortion_checks: Vec<DistortionCheck>,
    reject_equips: bool,
    drop_deliveries: bool,
}

impl HostState {
    fn is_valid(&self, entity: EntityId) -> bool {
        self.items.contains_key(&entity) || self.actors.contains_key(&entity)
    }

    fn display_name(&self, entity: EntityId) -> String {
        if let Some(item) = self.items.get(&entity) {
            return item.display_name.clone();
        }
        self.actors
            .get(&entity)
            .map(|actor| actor.name.clone())
            .unwrap_or_else(|| "something".to_string())
    }

    fn possessive(&self, entity: EntityId) -> String {
        match self.actors.get(&entity) {
            Some(actor) if actor.is_player => "your".to_string(),
            Some(actor) => format!("{}'s", actor.name),
            None => format!("{}'s", self.display_name(entity)),
        }
    }

    fn render(&self, message: &FlavorMessage) -> String {
        let subject_name = self.display_name(message.subject);
        let subject = if message.indefinite_subject {
            with_indefinite_article(&subject_name)
        } else {
            format!("the {}", subject_name)
        };
        let object = if message.possessive_object {
            format!("{} {}", self.possessive(message.object), message.slot_description)
        } else {
            format!("{} {}", self.display_name(message.object), message.slot_description)
        };
        format!(
            "{} {}s {} {}.",
            capitalize(&subject),
            message.verb,
            message.preposition,
            object
        )
    }

    fn remove_item(&mut self, entity: EntityId) -> Option<ItemState> {
        let item = self.items.remove(&entity)?;
        if let Some(holder) = item.holder.and_then(|h| self.actors.get_mut(&h)) {
            for slot in holder.slots.iter_mut() {
                if slot.equipped == Some(entity) {
                    slot.equipped = None;
                }
            }
        }
        Some(item)
    }
}

/// Host engine stand-in backed by in-memory maps
#[derive(Debug, Default)]
pub struct InMemoryHost {
    state: Mutex<HostState>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host preloaded with the blueprints the shipped abilities rely on
    pub fn with_default_blueprints() -> Self {
        let host = Self::new();
        host.register_blueprint(DEFAULT_BLUEPRINT, "ephemeral stone", true);
        host
    }

    fn state(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register_blueprint(
        &self,
        name: impl Into<String>,
        display_name: impl Into<String>,
        ships_with_support: bool,
    ) {
        self.state().blueprints.insert(
            name.into(),
            BlueprintTemplate {
                display_name: display_name.into(),
                ships_with_support,
            },
        );
    }

    pub fn has_blueprint(&self, name: &str) -> bool {
        self.state().blueprints.contains_key(name)
    }

    pub fn spawn_actor(
        &self,
        name: impl Into<String>,
        is_player: bool,
        slots: Vec<BodyPartSlot>,
    ) -> EntityId {
        let id = EntityId::new();
        self.state().actors.insert(
            id,
            ActorState {
                name: name.into(),
                is_player,
                slots,
                abilities: HashMap::new(),
                failures: Vec::new(),
                distortion_suppressed: false,
            },
        );
        id
    }

    pub fn grant_ability(&self, actor: EntityId, ability: AbilityId) {
        if let Some(state) = self.state().actors.get_mut(&actor) {
            state.abilities.insert(ability, 0);
        }
    }

    /// Advance one turn: tick cooldowns and drop unsupported objects.
    /// Returns the entities that were removed.
    pub fn end_turn(&self) -> Vec<EntityId> {
        let mut state = self.state();

        for actor in state.actors.values_mut() {
            for cooldown in actor.abilities.values_mut() {
                *cooldown = cooldown.saturating_sub(1);
            }
        }

        let lapsed: Vec<(EntityId, bool)> = state
            .items
            .iter()
            .filter_map(|(id, item)| {
                let support = item.support?;
                let supported = support.supported_by == *id || state.is_valid(support.supported_by);
                (support.validate_every_turn && !supported).then_some((*id, support.silent_removal))
            })
            .collect();

        let mut removed = Vec::with_capacity(lapsed.len());
        for (id, silent) in lapsed {
            if let Some(item) = state.remove_item(id) {
                if !silent {
                    let subject = format!("the {}", item.display_name);
                    let line = format!("{} crumbles away.", capitalize(&subject));
                    state.rendered.push(line);
                }
                debug!(entity = %id, "Existence support lapsed");
                removed.push(id);
            }
        }
        removed
    }

    pub fn failure_messages(&self, actor: EntityId) -> Vec<String> {
        self.state()
            .actors
            .get(&actor)
            .map(|a| a.failures.clone())
            .unwrap_or_default()
    }

    /// Message log as the player would read it
    pub fn rendered_messages(&self) -> Vec<String> {
        self.state().rendered.clone()
    }

    pub fn live_entity_count(&self) -> usize {
        let state = self.state();
        state.items.len() + state.actors.len()
    }

    pub fn interface_exits(&self) -> Vec<EventId> {
        self.state().interface_exits.clone()
    }

    pub fn equipped_slot(&self, entity: EntityId) -> Option<BodyPartSlot> {
        let state = self.state();
        let item = state.items.get(&entity)?;
        let slot_id = item.equipped_in?;
        let holder = state.actors.get(&item.holder?)?;
        holder.slots.iter().find(|s| s.id == slot_id).cloned()
    }

    pub fn is_non_stackable(&self, entity: EntityId) -> bool {
        self.state()
            .items
            .get(&entity)
            .map(|item| item.non_stackable)
            .unwrap_or(false)
    }

    pub fn existence_support(&self, entity: EntityId) -> Option<ExistenceSupport> {
        self.state().items.get(&entity).and_then(|item| item.support)
    }
}

/// Failure injection and inspection used by the service tests
#[cfg(test)]
impl InMemoryHost {
    pub fn set_cooldown(&self, actor: EntityId, ability: AbilityId, turns: u32) {
        if let Some(state) = self.state().actors.get_mut(&actor) {
            if let Some(cooldown) = state.abilities.get_mut(&ability) {
                *cooldown = turns;
            }
        }
    }

    /// Make every distortion check by `actor` fail, as inside a
    /// normality field
    pub fn suppress_distortion(&self, actor: EntityId) {
        if let Some(state) = self.state().actors.get_mut(&actor) {
            state.distortion_suppressed = true;
        }
    }

    pub fn reject_equips(&self, reject: bool) {
        self.state().reject_equips = reject;
    }

    /// Make inventory deliveries silently go nowhere
    pub fn drop_deliveries(&self, drop: bool) {
        self.state().drop_deliveries = drop;
    }

    pub fn flavor_messages(&self) -> Vec<FlavorMessage> {
        self.state().flavor.clone()
    }

    pub fn distortion_checks(&self) -> Vec<DistortionCheck> {
        self.state().distortion_checks.clone()
    }
}

impl HostWorldPort for InMemoryHost {
    fn is_valid(&self, entity: EntityId) -> bool {
        self.state().is_valid(entity)
    }

    fn create_entity(&self, blueprint: &Blueprint) -> EntityId {
        let id = EntityId::new();
        let mut state = self.state();
        let (display_name, ships_with_support) = match state.blueprints.get(blueprint.as_str()) {
            Some(template) => (template.display_name.clone(), template.ships_with_support),
            None => (blueprint.as_str().to_lowercase(), false),
        };
        let support = ships_with_support.then_some(ExistenceSupport {
            supported_by: id,
            validate_every_turn: false,
            silent_removal: false,
        });
        state.items.insert(
            id,
            ItemState {
                display_name,
                non_stackable: false,
                support,
                holder: None,
                equipped_in: None,
            },
        );
        debug!(entity = %id, blueprint = %blueprint, "Created entity");
        id
    }

    fn destroy_entity(&self, entity: EntityId) {
        let mut state = self.state();
        if state.remove_item(entity).is_none() && state.actors.remove(&entity).is_none() {
            return;
        }
        debug!(entity = %entity, "Destroyed entity");
    }

    fn mark_non_stackable(&self, entity: EntityId) {
        if let Some(item) = self.state().items.get_mut(&entity) {
            item.non_stackable = true;
        }
    }

    fn remove_existence_support(&self, entity: EntityId) {
        if let Some(item) = self.state().items.get_mut(&entity) {
            item.support = None;
        }
    }

    fn attach_existence_support(&self, entity: EntityId, support: ExistenceSupport) {
        if let Some(item) = self.state().items.get_mut(&entity) {
            item.support = Some(support);
        }
    }

    fn indefinite_name(&self, entity: EntityId) -> String {
        with_indefinite_article(&self.state().display_name(entity))
    }

    fn deliver_to_inventory(&self, entity: EntityId, actor: EntityId) {
        let mut state = self.state();
        if state.drop_deliveries || !state.actors.contains_key(&actor) {
            return;
        }
        if let Some(item) = state.items.get_mut(&entity) {
            item.holder = Some(actor);
        }
    }

    fn inventory_holder(&self, entity: EntityId) -> Option<EntityId> {
        self.state().items.get(&entity).and_then(|item| item.holder)
    }

    fn fire_equip(
        &self,
        actor: EntityId,
        entity: EntityId,
        slot: &BodyPartSlot,
        silent: bool,
    ) -> bool {
        let mut state = self.state();
        if state.reject_equips {
            return false;
        }
        if state.items.get(&entity).and_then(|item| item.holder) != Some(actor) {
            return false;
        }
        let Some(actor_state) = state.actors.get_mut(&actor) else {
            return false;
        };
        let Some(target) = actor_state
            .slots
            .iter_mut()
            .find(|s| s.id == slot.id && s.is_free())
        else {
            return false;
        };
        target.equipped = Some(entity);
        let ordinal_name = target.ordinal_name.clone();

        if let Some(item) = state.items.get_mut(&entity) {
            item.equipped_in = Some(slot.id);
        }
        if !silent {
            let line = format!(
                "{} {} now holds {}.",
                capitalize(&state.possessive(actor)),
                ordinal_name,
                with_indefinite_article(&state.display_name(entity))
            );
            state.rendered.push(line);
        }
        true
    }

    fn fire_distortion_check(
        &self,
        actor: EntityId,
        device: AbilityId,
        triggering_event: Option<EventId>,
    ) -> bool {
        let check = DistortionCheck {
            actor,
            device,
            triggering_event,
        };
        let mut state = self.state();
        let allowed = state
            .actors
            .get(&check.actor)
            .map(|a| !a.distortion_suppressed)
            .unwrap_or(false);
        debug!(
            actor = %check.actor,
            device = %check.device,
            event = ?check.triggering_event,
            allowed,
            "Reality distortion check"
        );
        state.distortion_checks.push(check);
        allowed
    }

    fn emit_flavor(&self, message: FlavorMessage) {
        let mut state = self.state();
        let line = state.render(&message);
        info!("{}", line);
        state.rendered.push(line);
        state.flavor.push(message);
    }

    fn signal_interface_exit(&self, event: EventId) {
        self.state().interface_exits.push(event);
    }
}

impl HostActorPort for InMemoryHost {
    fn is_ability_usable(&self, actor: EntityId, ability: AbilityId) -> bool {
        self.state()
            .actors
            .get(&actor)
            .and_then(|a| a.abilities.get(&ability))
            .map(|cooldown| *cooldown == 0)
            .unwrap_or(false)
    }

    fn report_failure(&self, actor: EntityId, message: &str) -> bool {
        if let Some(state) = self.state().actors.get_mut(&actor) {
            state.failures.push(message.to_string());
        }
        false
    }

    fn preferred_unequipped_slot(
        &self,
        actor: EntityId,
        preferred: &BodyPartType,
        alternate: &BodyPartType,
    ) -> Option<BodyPartSlot> {
        let state = self.state();
        let actor = state.actors.get(&actor)?;
        preferred_unequipped_slot(&actor.slots, preferred, alternate).cloned()
    }
}

impl BlueprintRegistryPort for InMemoryHost {
    fn contains(&self, blueprint: &str) -> bool {
        self.has_blueprint(blueprint)
    }
}
