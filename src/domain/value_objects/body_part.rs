//! Body parts - equip locations on an actor

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{BodyPartId, EntityId};

/// Category of a body part slot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPartType {
    /// Dedicated slot for throwing weapons
    ThrownWeapon,
    Hand,
    Head,
    Body,
    Back,
    Arm,
    Feet,
    /// Any other category the host defines
    Other(String),
}

impl BodyPartType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::ThrownWeapon => "Thrown Weapon",
            Self::Hand => "Hand",
            Self::Head => "Head",
            Self::Body => "Body",
            Self::Back => "Back",
            Self::Arm => "Arm",
            Self::Feet => "Feet",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for BodyPartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single equip location on an actor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyPartSlot {
    pub id: BodyPartId,
    pub part_type: BodyPartType,
    /// Descriptive name such as "left hand"
    pub ordinal_name: String,
    /// Entity currently equipped here, if any
    pub equipped: Option<EntityId>,
}

impl BodyPartSlot {
    pub fn new(part_type: BodyPartType, ordinal_name: impl Into<String>) -> Self {
        Self {
            id: BodyPartId::new(),
            part_type,
            ordinal_name: ordinal_name.into(),
            equipped: None,
        }
    }

    pub fn is_free(&self) -> bool {
        self.equipped.is_none()
    }

    /// How flavor text refers to this slot once something lands in it
    pub fn holding_description(&self) -> &str {
        match self.part_type {
            BodyPartType::ThrownWeapon => "grasp",
            _ => &self.ordinal_name,
        }
    }
}

/// Pick the first free slot of the preferred type, else the first free slot
/// of the alternate type.
pub fn preferred_unequipped_slot<'a>(
    slots: &'a [BodyPartSlot],
    preferred: &BodyPartType,
    alternate: &BodyPartType,
) -> Option<&'a BodyPartSlot> {
    let free_of = |wanted: &BodyPartType| {
        slots
            .iter()
            .find(|slot| slot.is_free() && &slot.part_type == wanted)
    };
    free_of(preferred).or_else(|| free_of(alternate))
}
