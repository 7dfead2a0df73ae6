use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a compatibility table
#[derive(Debug, Error)]
pub enum CompatibilityError {
    #[error("Failed to read compatibility table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid compatibility table: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Compatibility rule {0} has an empty category")]
    EmptyCategory(usize),
}

/// One category → phrase mapping
///
/// Templates may use `{cuisine}` (first letter capitalized),
/// `{cuisine_lower}` and `{category}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityRule {
    pub category: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub template: String,
}

/// Data-driven lookup from event category to a pairing phrase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityTable {
    #[serde(default)]
    pub rules: Vec<CompatibilityRule>,
    #[serde(default = "default_fallback")]
    pub fallback: String,
    #[serde(default = "default_empty_cuisine")]
    pub empty_cuisine: String,
}

fn default_fallback() -> String { "{cuisine} is a solid pick nearby".to_string() }
fn default_empty_cuisine() -> String { "Quality dining option".to_string() }

impl Default for CompatibilityTable {
    fn default() -> Self {
        let rule = |category: &str, aliases: &[&str], template: &str| CompatibilityRule {
            category: category.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            template: template.to_string(),
        };

        Self {
            rules: vec![
                rule("live music", &["music", "concert", "jazz", "orchestra"], "{cuisine} pairs well with live music"),
                rule("art", &["arts", "gallery", "museum"], "{cuisine} is an upscale pick for art events"),
                rule("sports", &["sport", "game", "run"], "{cuisine} is great sports event food"),
                rule("family", &["kids", "children"], "Family-friendly {cuisine_lower}"),
                rule("theater", &["theatre", "comedy", "show"], "{cuisine} before the show"),
                rule("food", &["festival", "market"], "{cuisine} to round out a food-focused outing"),
            ],
            fallback: default_fallback(),
            empty_cuisine: default_empty_cuisine(),
        }
    }
}

impl CompatibilityTable {
    /// Parse a table from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, CompatibilityError> {
        let table: Self = toml::from_str(text)?;
        table.check()?;
        Ok(table)
    }

    /// Load a table from a TOML file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CompatibilityError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CompatibilityError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    fn check(&self) -> Result<(), CompatibilityError> {
        for (index, rule) in self.rules.iter().enumerate() {
            if normalize(&rule.category).is_empty() {
                return Err(CompatibilityError::EmptyCategory(index));
            }
        }
        Ok(())
    }

    /// Rule for a category, if any
    ///
    /// Exact key/alias matches win over keys found as whole words inside
    /// a longer category ("outdoor live music" → "live music").
    pub fn rule_for(&self, category: &str) -> Option<&CompatibilityRule> {
        let category = normalize(category);
        if category.is_empty() {
            return None;
        }

        let keys = |rule: &CompatibilityRule| {
            std::iter::once(normalize(&rule.category))
                .chain(rule.aliases.iter().map(|a| normalize(a)))
                .filter(|k| !k.is_empty())
                .collect::<Vec<_>>()
        };

        self.rules
            .iter()
            .find(|rule| keys(rule).iter().any(|k| *k == category))
            .or_else(|| {
                self.rules
                    .iter()
                    .find(|rule| keys(rule).iter().any(|k| contains_words(&category, k)))
            })
    }

    /// Phrase explaining why `cuisine` suits an event of `category`
    ///
    /// Never fails: unknown categories fall back to a cuisine-only phrase.
    pub fn phrase(&self, category: &str, cuisine: &str) -> String {
        let cuisine = cuisine.trim();
        if cuisine.is_empty() {
            return self.empty_cuisine.clone();
        }

        let template = self
            .rule_for(category)
            .map(|rule| rule.template.as_str())
            .unwrap_or(self.fallback.as_str());

        template
            .replace("{cuisine_lower}", &cuisine.to_lowercase())
            .replace("{cuisine}", &capitalize(cuisine))
            .replace("{category}", &normalize(category))
    }
}

/// Lowercase and collapse whitespace
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn contains_words(haystack: &str, needle: &str) -> bool {
    let hay: Vec<&str> = haystack.split(' ').collect();
    let words: Vec<&str> = needle.split(' ').collect();
    words.len() <= hay.len() && hay.windows(words.len()).any(|w| w == words.as_slice())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
