//! Ability definition - the fixed configuration of a conjuring mutation

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AbilityId, WillpowerScaling};

pub const DEFAULT_BLUEPRINT: &str = "Ephemeral Stone";
pub const DEFAULT_COMMAND_ID: &str = "CommandEarthenBarrage";
pub const DEFAULT_DISPLAY_NAME: &str = "Earthen Barrage";
pub const DEFAULT_COUNT: u32 = 1000;

/// Errors raised while building an ability definition
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    #[error("Blueprint name cannot be empty")]
    EmptyBlueprint,

    #[error("Unknown blueprint: {0}")]
    UnknownBlueprint(String),

    #[error("Command ID cannot be empty")]
    EmptyCommandId,
}

/// Name of an entity template the host knows how to instantiate.
///
/// Only constructed through [`Blueprint::resolve`], so a `Blueprint` in hand
/// has already been checked against the host's registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Blueprint(String);

impl Blueprint {
    pub fn resolve(
        name: &str,
        is_known: impl FnOnce(&str) -> bool,
    ) -> Result<Self, DefinitionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DefinitionError::EmptyBlueprint);
        }
        if !is_known(name) {
            return Err(DefinitionError::UnknownBlueprint(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Blueprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mutation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    Mental,
    Physical,
}

/// Immutable configuration for one conjuring ability
#[derive(Debug, Clone, Serialize)]
pub struct AbilityDefinition {
    pub display_name: String,
    pub kind: MutationKind,
    /// Template of the conjured object
    pub blueprint: Blueprint,
    /// Host command that triggers activation
    pub command_id: String,
    pub activated_ability_id: AbilityId,
    pub willpower: WillpowerScaling,
    /// Reserved multiplier, not read by any resolution step
    pub count: u32,
}

impl AbilityDefinition {
    pub fn new(
        blueprint: Blueprint,
        command_id: impl Into<String>,
        activated_ability_id: AbilityId,
    ) -> Result<Self, DefinitionError> {
        let command_id = command_id.into();
        if command_id.trim().is_empty() {
            return Err(DefinitionError::EmptyCommandId);
        }
        Ok(Self {
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            kind: MutationKind::Mental,
            blueprint,
            command_id,
            activated_ability_id,
            willpower: WillpowerScaling::default(),
            count: DEFAULT_COUNT,
        })
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_kind(mut self, kind: MutationKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_willpower(mut self, willpower: WillpowerScaling) -> Self {
        self.willpower = willpower;
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }
}
