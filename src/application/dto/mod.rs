//! Data Transfer Objects - Values crossing the host boundary
//!
//! DTOs live in the application layer so the host-facing adapters can
//! serialize them without pulling transport concerns into the domain model.

pub mod activation;

pub use activation::{ActivationError, ActivationOutcome, ActivationRequest};
#[allow(unused_imports)]
pub use activation::GENERIC_FAILURE_MESSAGE;
