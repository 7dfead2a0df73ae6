use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::models::{ContentMeta, Event, Restaurant};

/// Errors that make a snapshot unpublishable
///
/// A corrupted hash would poison every later change comparison, so none of
/// these are recovered locally.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("{dataset} record {index}: serialization failed: {source}")]
    Serialize {
        dataset: String,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("{dataset} record {index}: field `{field}` is not a finite number")]
    NonFinite {
        dataset: String,
        index: usize,
        field: &'static str,
    },
}

/// A record that can take part in a content hash
///
/// `serde_json` silently writes non-finite floats as `null`, so records
/// report such fields before they are serialized.
pub trait Record: Serialize {
    fn non_finite_field(&self) -> Option<&'static str>;
}

fn first_non_finite(fields: &[(&'static str, Option<f64>)]) -> Option<&'static str> {
    fields
        .iter()
        .find(|(_, value)| value.is_some_and(|v| !v.is_finite()))
        .map(|(name, _)| *name)
}

impl Record for Restaurant {
    fn non_finite_field(&self) -> Option<&'static str> {
        first_non_finite(&[
            ("rating", self.rating),
            ("latitude", self.latitude),
            ("longitude", self.longitude),
        ])
    }
}

impl Record for Event {
    fn non_finite_field(&self) -> Option<&'static str> {
        first_non_finite(&[("latitude", self.latitude), ("longitude", self.longitude)])
    }
}

/// Untyped records hash like typed ones only if their numbers already
/// carry the typed form: a float field must be written `4.0`, not `4`.
impl Record for Value {
    fn non_finite_field(&self) -> Option<&'static str> {
        None
    }
}

/// Read-only lookup of the digest published by the previous run
///
/// Keys are dataset identities such as `restaurants:default`. A missing
/// key is the normal first-run condition.
pub trait HashStore {
    fn previous_hash(&self, key: &str) -> Option<String>;
}

impl HashStore for HashMap<String, String> {
    fn previous_hash(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl HashStore for BTreeMap<String, String> {
    fn previous_hash(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Dataset identity used as the hash store key
pub fn dataset_key(dataset: &str, profile: &str) -> String {
    format!("{}:{}", dataset, profile)
}

/// Canonical JSON text of a value
///
/// Object keys are sorted at every depth, no whitespace is emitted, and
/// numbers use `serde_json`'s shortest round-trip form with `-0.0` written
/// as `0.0`. Changing any of this invalidates every stored hash.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(item, out);
            }
            out.push('}');
        }
        Value::Number(n) if n.as_f64() == Some(0.0) && n.is_f64() => out.push_str("0.0"),
        leaf => out.push_str(&leaf.to_string()),
    }
}

/// Canonical serialization of an ordered record sequence
pub fn canonicalize<R: Record>(dataset: &str, records: &[R]) -> Result<String, HashError> {
    let values = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            if let Some(field) = record.non_finite_field() {
                return Err(HashError::NonFinite {
                    dataset: dataset.to_string(),
                    index,
                    field,
                });
            }
            serde_json::to_value(record).map_err(|source| HashError::Serialize {
                dataset: dataset.to_string(),
                index,
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(canonical_json(&Value::Array(values)))
}

/// SHA-256 of canonical text, lowercase hex
pub fn content_digest(canonical: &str) -> String {
    hex::encode(Sha256::digest(canonical.as_bytes()))
}

/// Hash `records` and compare against the previous run
///
/// `changed` is true when the digests differ or no previous digest exists.
pub fn compute_meta<R: Record>(
    dataset: &str,
    profile: &str,
    records: &[R],
    store: &dyn HashStore,
) -> Result<ContentMeta, HashError> {
    let key = dataset_key(dataset, profile);
    let previous = store.previous_hash(&key);

    let hash = content_digest(&canonicalize(dataset, records)?);
    let changed = previous.as_deref() != Some(hash.as_str());

    tracing::debug!(dataset = %key, %hash, changed, items = records.len(), "Computed content hash");

    Ok(ContentMeta {
        hash,
        item_count: records.len(),
        changed,
    })
}
