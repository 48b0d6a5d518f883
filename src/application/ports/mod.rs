//! Ports - Boundaries between the application and the host engine

pub mod inbound;
pub mod outbound;
