//! Application layer - Use cases orchestrated over the host ports

pub mod dto;
pub mod ports;
pub mod services;
