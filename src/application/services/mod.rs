//! Application services - Use case implementations
//!
//! Services depend only on the outbound ports, never on a concrete host.

pub mod ability_resolution_service;
pub mod conjured_object;

pub use ability_resolution_service::AbilityResolver;
#[allow(unused_imports)]
pub use conjured_object::{ConjurationState, ConjuredObject};
