//! Domain entities - Core game objects with identity

mod ability;
mod mutation;

pub use ability::{
    AbilityDefinition, Blueprint, DefinitionError, MutationKind, DEFAULT_BLUEPRINT,
    DEFAULT_COMMAND_ID, DEFAULT_COUNT, DEFAULT_DISPLAY_NAME,
};
pub use mutation::Mutation;
