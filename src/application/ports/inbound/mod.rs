//! Inbound ports - Interfaces that the application exposes to the host engine

mod activate_ability_use_case;

pub use activate_ability_use_case::ActivateAbilityUseCase;
