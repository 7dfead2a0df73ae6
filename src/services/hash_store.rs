use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use crate::core::{dataset_key, HashStore};
use crate::services::SnapshotError;

/// Datasets whose summaries live in `meta.json`
const DATASETS: [&str; 2] = ["restaurants", "events"];

/// Previous-run digests recovered from the last published `meta.json`
///
/// Keys are scoped by the profile recorded in that document, so switching
/// profiles never reuses another profile's hashes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviousMetaStore {
    hashes: BTreeMap<String, String>,
}

impl PreviousMetaStore {
    /// Read `meta.json`; a missing file is the first-run case and yields
    /// an empty store
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No previous meta document");
                return Ok(Self::default());
            }
            Err(e) => return Err(SnapshotError::io(path, e)),
        };

        let document: Value = serde_json::from_str(&text).map_err(|e| SnapshotError::json(path, e))?;
        Ok(Self::from_document(&document))
    }

    /// Extract `<dataset>.hash` entries from a meta document
    pub fn from_document(document: &Value) -> Self {
        let profile = document
            .get("profile")
            .and_then(Value::as_str)
            .unwrap_or("default");

        let hashes = DATASETS
            .iter()
            .filter_map(|dataset| {
                document
                    .get(dataset)
                    .and_then(|summary| summary.get("hash"))
                    .and_then(Value::as_str)
                    .map(|hash| (dataset_key(dataset, profile), hash.to_string()))
            })
            .collect();

        Self { hashes }
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

impl HashStore for PreviousMetaStore {
    fn previous_hash(&self, key: &str) -> Option<String> {
        self.hashes.get(key).cloned()
    }
}
