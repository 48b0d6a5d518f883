//! Activation request/outcome DTOs

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{EntityId, EventId};

pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong.";

/// One call from the host's ability-trigger dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationRequest {
    pub actor: EntityId,
    /// Accepted for interface parity, no resolution step reads it
    pub target: Option<EntityId>,
    pub triggering_event: Option<EventId>,
}

impl ActivationRequest {
    pub fn new(actor: EntityId) -> Self {
        Self {
            actor,
            target: None,
            triggering_event: None,
        }
    }

    pub fn with_triggering_event(mut self, event: EventId) -> Self {
        self.triggering_event = Some(event);
        self
    }
}

/// Why an activation did not go through.
///
/// `InvalidActor`, `AbilityUnusable` and `DistortionBlocked` are silent: the
/// host has either already told the player or wants nothing shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ActivationError {
    #[error("Actor is not a valid entity")]
    InvalidActor,

    #[error("Ability is not currently usable")]
    AbilityUnusable,

    #[error("You have no place available to hold {object}.")]
    NoAvailableSlot { object: String },

    #[error("Reality distortion check failed")]
    DistortionBlocked,

    #[error("Conjured object did not arrive in the actor's inventory")]
    DeliveryFailed,

    #[error("Equip event was rejected")]
    EquipRejected,
}

impl ActivationError {
    /// Text shown to the actor, or `None` for silent failures
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::InvalidActor | Self::AbilityUnusable | Self::DistortionBlocked => None,
            Self::NoAvailableSlot { .. } => Some(self.to_string()),
            Self::DeliveryFailed | Self::EquipRejected => {
                Some(GENERIC_FAILURE_MESSAGE.to_string())
            }
        }
    }
}

/// Result of one activation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationOutcome {
    pub success: bool,
    pub failure_message: Option<String>,
    /// Only set on success
    pub produced_entity: Option<EntityId>,
    pub error: Option<ActivationError>,
}

impl ActivationOutcome {
    pub fn succeeded(entity: EntityId) -> Self {
        Self {
            success: true,
            failure_message: None,
            produced_entity: Some(entity),
            error: None,
        }
    }

    pub fn failed(error: ActivationError) -> Self {
        Self {
            success: false,
            failure_message: error.user_message(),
            produced_entity: None,
            error: Some(error),
        }
    }
}

impl From<Result<EntityId, ActivationError>> for ActivationOutcome {
    fn from(result: Result<EntityId, ActivationError>) -> Self {
        match result {
            Ok(entity) => Self::succeeded(entity),
            Err(error) => Self::failed(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_tiers() {
        assert_eq!(ActivationError::InvalidActor.user_message(), None);
        assert_eq!(ActivationError::AbilityUnusable.user_message(), None);
        assert_eq!(ActivationError::DistortionBlocked.user_message(), None);
        assert_eq!(
            ActivationError::NoAvailableSlot {
                object: "an ephemeral stone".to_string()
            }
            .user_message()
            .as_deref(),
            Some("You have no place available to hold an ephemeral stone.")
        );
        assert_eq!(
            ActivationError::EquipRejected.user_message().as_deref(),
            Some(GENERIC_FAILURE_MESSAGE)
        );
        assert_eq!(
            ActivationError::DeliveryFailed.user_message().as_deref(),
            Some(GENERIC_FAILURE_MESSAGE)
        );
    }

    #[test]
    fn test_outcome_from_result() {
        let entity = EntityId::new();
        let outcome = ActivationOutcome::from(Ok::<_, ActivationError>(entity));
        assert!(outcome.success);
        assert_eq!(outcome.produced_entity, Some(entity));

        let outcome = ActivationOutcome::from(Err::<EntityId, _>(ActivationError::DistortionBlocked));
        assert!(!outcome.success);
        assert!(outcome.failure_message.is_none());
        assert!(outcome.produced_entity.is_none());
    }

    #[test]
    fn test_outcome_serializes_reason() {
        let outcome = ActivationOutcome::failed(ActivationError::EquipRejected);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["reason"], "equip_rejected");
        assert_eq!(json["failure_message"], "Something went wrong.");
    }
}
