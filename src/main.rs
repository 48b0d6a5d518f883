//! Earthen Barrage - a conjuring mutation for a turn-based roguelike
//!
//! The binary:
//! - Loads the ability configuration from file and environment
//! - Seeds an in-memory host with a player and the ability's blueprint
//! - Prints the damage and penetration table
//! - Triggers the ability a few times and prints each outcome as JSON

mod application;
mod domain;
mod infrastructure;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::application::dto::ActivationRequest;
use crate::application::ports::inbound::ActivateAbilityUseCase;
use crate::application::services::AbilityResolver;
use crate::domain::entities::Mutation;
use crate::domain::value_objects::{
    damage_for_level, penetration_bonus, AbilityId, BodyPartSlot, BodyPartType, EventId,
};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::in_memory_host::InMemoryHost;

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "earthen_barrage=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Ability: {}", config.ability.display_name);
    tracing::info!("  Blueprint: {}", config.ability.blueprint);
    tracing::info!("  Level: {}", config.ability.level);

    let host = Arc::new(InMemoryHost::with_default_blueprints());
    let ability_id = AbilityId::new();
    let definition = config
        .ability
        .to_definition(&*host, ability_id)
        .context("Invalid ability configuration")?;

    let player = host.spawn_actor(
        config.demo.player_name.clone(),
        true,
        vec![
            BodyPartSlot::new(BodyPartType::Head, "head"),
            BodyPartSlot::new(BodyPartType::Hand, "right hand"),
            BodyPartSlot::new(BodyPartType::Hand, "left hand"),
            BodyPartSlot::new(BodyPartType::ThrownWeapon, "thrown weapon"),
        ],
    );
    host.grant_ability(player, ability_id);

    let mutation = Mutation::new(definition, player, config.ability.level);
    println!("{}", mutation.definition.display_name);
    println!("{}", mutation.description());
    println!("{}", mutation.level_text(mutation.level));
    println!();
    println!("{:>5}  {:<8}  {:<7}  {}", "Level", "Damage", "Range", "Penetration");
    for level in 1..=config.demo.table_max_level {
        let damage = damage_for_level(level);
        println!(
            "{:>5}  {:<8}  {:<7}  +{}",
            level,
            damage.to_string(),
            format!("{}-{}", damage.min(), damage.max()),
            penetration_bonus(level)
        );
    }
    println!();

    let resolver = AbilityResolver::new(mutation, host.clone(), host.clone());
    let command_id = resolver.command_id().to_string();
    let mut rng = rand::thread_rng();
    let mut conjured = Vec::new();

    for attempt in 1..=config.demo.activations {
        let request = ActivationRequest::new(player).with_triggering_event(EventId::new());
        let Some(outcome) = resolver.handle_command(&command_id, request) else {
            continue;
        };
        println!(
            "Activation {}: {}",
            attempt,
            serde_json::to_string(&outcome).context("Failed to serialize outcome")?
        );
        if let Some(entity) = outcome.produced_entity {
            conjured.push(entity);
            let mutation = resolver.mutation();
            let damage = mutation.damage();
            println!(
                "  Sample throw: {} -> {} (penetration +{})",
                damage,
                damage.roll(&mut rng),
                mutation.penetration_bonus()
            );
        }
        host.end_turn();
    }

    println!();
    for line in host.rendered_messages() {
        println!("{}", line);
    }
    for line in host.failure_messages(player) {
        println!("{}", line);
    }

    println!();
    println!(
        "Live entities: {}, interface exits: {}",
        host.live_entity_count(),
        host.interface_exits().len()
    );
    for entity in conjured {
        let slot = host
            .equipped_slot(entity)
            .map(|slot| slot.ordinal_name)
            .unwrap_or_else(|| "nowhere".to_string());
        let bound_to_owner = host
            .existence_support(entity)
            .is_some_and(|support| support.supported_by == player);
        println!(
            "  {} in {} (non-stackable: {}, bound to owner: {})",
            entity,
            slot,
            host.is_non_stackable(entity),
            bound_to_owner
        );
    }

    Ok(())
}
