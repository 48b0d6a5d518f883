//! Strongly-typed identifiers for host-side handles

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque handle newtype over a random v4 UUID
macro_rules! host_handle {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

// Any game object the host knows about: creatures, items, conjured stones
host_handle!(EntityId);
host_handle!(AbilityId);
host_handle!(EventId);
host_handle!(BodyPartId);
