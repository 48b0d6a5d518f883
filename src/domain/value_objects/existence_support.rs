//! Existence support - ties one entity's presence to another's validity

use serde::{Deserialize, Serialize};

use super::EntityId;

/// Dependency record checked by the host's turn loop.
///
/// While `supported_by` stays valid the supported entity persists; once it
/// doesn't, the host removes the supported entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistenceSupport {
    pub supported_by: EntityId,
    pub validate_every_turn: bool,
    /// Remove without any message when support lapses
    pub silent_removal: bool,
}

impl ExistenceSupport {
    /// Support record for conjured objects: validated each turn, removed silently
    pub fn conjured_by(supporter: EntityId) -> Self {
        Self {
            supported_by: supporter,
            validate_every_turn: true,
            silent_removal: true,
        }
    }
}
