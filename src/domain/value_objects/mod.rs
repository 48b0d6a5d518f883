//! Value objects - Immutable objects defined by their attributes

mod body_part;
mod dice;
mod existence_support;
mod grammar;
mod ids;
mod willpower;

pub use body_part::{preferred_unequipped_slot, BodyPartSlot, BodyPartType};
pub use dice::{damage_for_level, penetration_bonus, DiceExpression};
pub use existence_support::ExistenceSupport;
pub use grammar::{capitalize, with_indefinite_article};
pub use ids::*;
pub use willpower::WillpowerScaling;
