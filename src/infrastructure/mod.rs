//! Infrastructure layer - Adapters and process setup
//!
//! This layer contains:
//! - Config: Application configuration from file and environment
//! - In-memory host: Port implementations standing in for the game engine

pub mod config;
pub mod in_memory_host;
