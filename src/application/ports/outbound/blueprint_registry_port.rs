//! Blueprint registry port - Lookup of the host's entity templates

/// Port used when an ability definition is loaded, so that an unknown
/// blueprint is rejected up front instead of at activation time.
pub trait BlueprintRegistryPort: Send + Sync {
    fn contains(&self, blueprint: &str) -> bool;
}
