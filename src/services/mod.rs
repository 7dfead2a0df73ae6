// Service exports
pub mod aggregate;
pub mod error;
pub mod hash_store;
pub mod input;
pub mod output;

pub use aggregate::{build_snapshot, gap_bullets, Snapshot};
pub use error::SnapshotError;
pub use hash_store::PreviousMetaStore;
pub use input::{decode_records, load_records};
pub use output::{persist_snapshot, write_json};
