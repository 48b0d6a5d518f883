//! Domain layer - Core game rules with no knowledge of the host engine
//!
//! This layer contains:
//! - Entities: ability definitions and the mutation that bears them
//! - Value Objects: ids, dice expressions, body parts, existence support

pub mod entities;
pub mod value_objects;
