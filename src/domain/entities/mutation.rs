//! Mutation entity - an ability definition as borne by one creature

use serde::Serialize;

use super::AbilityDefinition;
use crate::domain::value_objects::{
    damage_for_level, penetration_bonus, with_indefinite_article, DiceExpression, EntityId,
};

/// An ability attached to its bearer at a given level.
///
/// The bearer (`owner`) is what keeps conjured objects in existence, which is
/// not necessarily the creature that triggers a particular activation.
#[derive(Debug, Clone, Serialize)]
pub struct Mutation {
    pub definition: AbilityDefinition,
    pub owner: EntityId,
    pub level: i32,
}

impl Mutation {
    pub fn new(definition: AbilityDefinition, owner: EntityId, level: i32) -> Self {
        Self {
            definition,
            owner,
            level,
        }
    }

    pub fn damage(&self) -> DiceExpression {
        damage_for_level(self.level)
    }

    pub fn penetration_bonus(&self) -> i32 {
        penetration_bonus(self.level)
    }

    /// Player-facing summary of what the mutation does at `level`
    pub fn level_text(&self, level: i32) -> String {
        let level = level.max(1);
        format!(
            "Damage: {}\nPenetration bonus: +{}",
            damage_for_level(level),
            penetration_bonus(level)
        )
    }

    pub fn description(&self) -> String {
        format!(
            "You call {} up out of the earth and hold it ready to throw.",
            with_indefinite_article(&self.definition.blueprint.as_str().to_lowercase())
        )
    }
}
