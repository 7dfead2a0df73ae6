use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::services::SnapshotError;

/// Load a JSON array of records, skipping elements that don't fit `T`
///
/// Each element is decoded on its own so one bad upstream record can't
/// block the run. Trailing `_meta` sentinels from a previous snapshot are
/// ignored.
pub fn load_records<T, P>(path: P, dataset: &str) -> Result<Vec<T>, SnapshotError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| SnapshotError::io(path, e))?;
    let values: Vec<Value> = serde_json::from_str(&text).map_err(|e| SnapshotError::json(path, e))?;
    Ok(decode_records(values, dataset))
}

pub fn decode_records<T: DeserializeOwned>(values: Vec<Value>, dataset: &str) -> Vec<T> {
    let total = values.len();
    let records: Vec<T> = values
        .into_iter()
        .enumerate()
        .filter(|(_, value)| value.get("_meta").is_none())
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(dataset, index, error = %e, "Skipping malformed record");
                None
            }
        })
        .collect();

    tracing::debug!(dataset, loaded = records.len(), total, "Loaded records");
    records
}
