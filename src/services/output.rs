use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::services::{aggregate::Snapshot, SnapshotError};

/// Published file names
pub const RESTAURANTS_FILE: &str = "restaurants.json";
pub const EVENTS_FILE: &str = "events.json";
pub const META_FILE: &str = "meta.json";
pub const CONFIG_FILE: &str = "config.json";

/// Write pretty-printed JSON through a temporary sibling and rename
pub fn write_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SnapshotError::io(parent, e))?;
    }

    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, &bytes).map_err(|e| SnapshotError::io(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| SnapshotError::io(path, e))?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote JSON");
    Ok(())
}

/// Write all snapshot artifacts into `dir`
///
/// `meta.json` goes last: it carries the hashes the next run compares
/// against.
pub fn persist_snapshot<P: AsRef<Path>>(dir: P, snapshot: &Snapshot) -> Result<Vec<PathBuf>, SnapshotError> {
    let dir = dir.as_ref();
    let written = vec![
        dir.join(RESTAURANTS_FILE),
        dir.join(EVENTS_FILE),
        dir.join(CONFIG_FILE),
        dir.join(META_FILE),
    ];

    write_json(&written[0], &snapshot.restaurants)?;
    write_json(&written[1], &snapshot.events)?;
    write_json(&written[2], &snapshot.config)?;
    write_json(&written[3], &snapshot.meta)?;

    tracing::info!(dir = %dir.display(), "Snapshot persisted");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_write_json_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");

        write_json(&path, &json!({"ok": true})).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["ok"], true);
        assert!(!path.with_extension("json.tmp").exists());
    }
}
