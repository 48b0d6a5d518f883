//! Application configuration

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

use crate::application::ports::outbound::BlueprintRegistryPort;
use crate::domain::entities::{
    AbilityDefinition, Blueprint, DefinitionError, MutationKind, DEFAULT_BLUEPRINT,
    DEFAULT_COMMAND_ID, DEFAULT_COUNT, DEFAULT_DISPLAY_NAME,
};
use crate::domain::value_objects::{AbilityId, WillpowerScaling};

/// Optional config file, looked up without extension so any supported format works
pub const CONFIG_FILE: &str = "earthen_barrage";
pub const ENV_PREFIX: &str = "EARTHEN_BARRAGE";

/// Application configuration loaded from file and environment
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ability: AbilitySettings,
    pub demo: DemoSettings,
}

/// Raw ability settings, validated into an [`AbilityDefinition`]
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AbilitySettings {
    pub display_name: String,
    pub kind: MutationKind,
    pub blueprint: String,
    pub command_id: String,
    /// Mutation level the bearer starts with
    pub level: i32,
    pub willpower: WillpowerScaling,
    pub count: u32,
}

impl Default for AbilitySettings {
    fn default() -> Self {
        Self {
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            kind: MutationKind::Mental,
            blueprint: DEFAULT_BLUEPRINT.to_string(),
            command_id: DEFAULT_COMMAND_ID.to_string(),
            level: 1,
            willpower: WillpowerScaling::default(),
            count: DEFAULT_COUNT,
        }
    }
}

impl AbilitySettings {
    /// Validate against the host's blueprints and freeze into a definition
    pub fn to_definition(
        &self,
        registry: &dyn BlueprintRegistryPort,
        activated_ability_id: AbilityId,
    ) -> Result<AbilityDefinition, DefinitionError> {
        let blueprint = Blueprint::resolve(&self.blueprint, |name| registry.contains(name))?;
        Ok(
            AbilityDefinition::new(blueprint, self.command_id.clone(), activated_ability_id)?
                .with_display_name(self.display_name.clone())
                .with_kind(self.kind)
                .with_willpower(self.willpower)
                .with_count(self.count),
        )
    }
}

/// Settings for the bundled demo run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    pub player_name: String,
    /// How many times the demo triggers the ability
    pub activations: u32,
    /// Highest level printed in the scaling table
    pub table_max_level: i32,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            player_name: "you".to_string(),
            activations: 4,
            table_max_level: 12,
        }
    }
}

impl AppConfig {
    /// Load `earthen_barrage.{toml,json,...}` if present, then apply
    /// `EARTHEN_BARRAGE__SECTION__KEY` environment overrides
    pub fn load() -> Result<Self> {
        let builder = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );
        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        builder
            .build()
            .context("Failed to read configuration sources")?
            .try_deserialize()
            .context("Configuration does not match the expected shape")
    }
}
