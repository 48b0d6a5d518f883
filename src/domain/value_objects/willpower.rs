//! Willpower scaling constants
//!
//! Carried as tuning data on the ability definition. No formula reads them yet.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WillpowerScaling {
    pub baseline: i32,
    pub factor: i32,
    pub ceiling_factor: i32,
    pub floor_divisor: i32,
}

impl Default for WillpowerScaling {
    fn default() -> Self {
        Self {
            baseline: 16,
            factor: 5,
            ceiling_factor: 5,
            floor_divisor: 5,
        }
    }
}
