//! Happenstance core - restaurant/event pairing and snapshot change detection
//!
//! This library pairs each upcoming event with a nearby restaurant and
//! ranked alternates, then hashes the published datasets so downstream
//! publication only happens when content actually changed.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{compute_meta, haversine_miles, CompatibilityTable, HashStore, PairingConfig, PairingEngine};
pub use models::{ContentMeta, Event, Pairing, Restaurant};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let engine = PairingEngine::new("Troy", PairingConfig::default());
        assert_eq!(engine.config().limit, 3);
        assert!(haversine_miles(42.73, -73.69, 42.73, -73.69) < 0.01);
    }
}
