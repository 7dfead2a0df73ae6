use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};

use crate::models::domain::{ContentMeta, Pairing};

/// Records followed by their trailing `_meta` sentinel
///
/// Serializes as a plain JSON array whose last element is
/// `{"_meta": {"hash": .., "item_count": .., "changed": ..}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedCollection<T> {
    pub items: Vec<T>,
    pub meta: ContentMeta,
}

#[derive(Serialize)]
struct MetaSentinel<'a> {
    #[serde(rename = "_meta")]
    meta: &'a ContentMeta,
}

impl<T: Serialize> Serialize for PublishedCollection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.items.len() + 1))?;
        for item in &self.items {
            seq.serialize_element(item)?;
        }
        seq.serialize_element(&MetaSentinel { meta: &self.meta })?;
        seq.end()
    }
}

/// Search parameters echoed into `meta.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    pub mode: String,
    pub radius_km: f64,
    pub limit: usize,
}

/// The `meta.json` document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaDocument {
    pub generated_at: DateTime<Utc>,
    pub profile: String,
    pub region: String,
    #[serde(default)]
    pub branding: BTreeMap<String, String>,
    #[serde(default)]
    pub pairing_rules: Vec<String>,
    pub search: SearchParams,
    #[serde(default)]
    pub gap_bullets: Vec<String>,
    pub events: ContentMeta,
    pub restaurants: ContentMeta,
    #[serde(default)]
    pub pairings: Vec<Pairing>,
}

/// The `config.json` document read by the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigDocument {
    pub branding: BTreeMap<String, String>,
    pub pairing_rules: Vec<String>,
}
