//! Outbound ports - Interfaces that the application requires from the host engine

mod blueprint_registry_port;
mod host_actor_port;
mod host_world_port;

pub use blueprint_registry_port::BlueprintRegistryPort;
pub use host_actor_port::HostActorPort;
pub use host_world_port::{FlavorMessage, HostWorldPort};
