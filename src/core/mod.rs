// Core algorithm exports
pub mod compatibility;
pub mod distance;
pub mod hashing;
pub mod pairing;
pub mod window;

pub use compatibility::{CompatibilityError, CompatibilityRule, CompatibilityTable};
pub use distance::{distance_miles, haversine_miles, km_to_miles};
pub use hashing::{canonical_json, canonicalize, compute_meta, content_digest, dataset_key, HashError, HashStore, Record};
pub use pairing::{stamp_match_reasons, DistanceTiers, PairingConfig, PairingEngine, PairingResult};
pub use window::filter_events_by_window;
