use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::{DistanceTiers, PairingConfig};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_profile")]
    pub profile: String,
    pub region: String,
    #[serde(default = "default_event_window_days")]
    pub event_window_days: u32,
    #[serde(default)]
    pub branding: BTreeMap<String, String>,
    #[serde(default)]
    pub pairing_rules: Vec<String>,
    #[serde(default)]
    pub target_cuisines: Vec<String>,
    #[serde(default)]
    pub target_categories: Vec<String>,
    #[serde(default)]
    pub pairing: PairingConfig,
    #[serde(default)]
    pub distance_tiers: DistanceTiers,
    #[serde(default)]
    pub search: SearchSettings,
    /// TOML file replacing the built-in compatibility table
    #[serde(default)]
    pub compatibility_table: Option<PathBuf>,
    #[serde(default)]
    pub paths: PathSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_search_mode")]
    pub mode: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { mode: default_search_mode() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathSettings {
    #[serde(default = "default_restaurants_path")]
    pub restaurants: PathBuf,
    #[serde(default = "default_events_path")]
    pub events: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            restaurants: default_restaurants_path(),
            events: default_events_path(),
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_profile() -> String { "default".to_string() }
fn default_event_window_days() -> u32 { 30 }
fn default_search_mode() -> String { "static".to_string() }
fn default_restaurants_path() -> PathBuf { PathBuf::from("data/restaurants.json") }
fn default_events_path() -> PathBuf { PathBuf::from("data/events.json") }
fn default_output_dir() -> PathBuf { PathBuf::from("docs") }
fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from files and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Profile file (config/<profile>.toml)
    /// 4. Local overrides (config/local.toml)
    /// 5. Environment variables (prefixed with HAPPENSTANCE)
    ///
    /// The profile comes from the argument, else `HAPPENSTANCE_PROFILE`.
    pub fn load(profile: Option<&str>) -> Result<Self, ConfigError> {
        let profile = profile
            .map(str::to_string)
            .or_else(|| std::env::var("HAPPENSTANCE_PROFILE").ok());

        let mut builder = Config::builder()
            .add_source(File::with_name("config/default").required(false));

        if let Some(name) = &profile {
            builder = builder.add_source(File::with_name(&format!("config/{}", name)).required(false));
        }

        builder = builder
            .add_source(File::with_name("config/local").required(false))
            // e.g., HAPPENSTANCE__PAIRING__LIMIT -> pairing.limit
            .add_source(
                Environment::with_prefix("HAPPENSTANCE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        if let Some(name) = profile {
            builder = builder.set_override("profile", name)?;
        }

        let settings: Self = builder.build()?.try_deserialize()?;
        settings.check()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("HAPPENSTANCE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.check()?;
        Ok(settings)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if !(self.pairing.radius_km.is_finite() && self.pairing.radius_km > 0.0) {
            return Err(ConfigError::Message(format!(
                "pairing.radius_km must be a positive number, got {}",
                self.pairing.radius_km
            )));
        }
        if self.pairing.limit == 0 {
            return Err(ConfigError::Message("pairing.limit must be at least 1".to_string()));
        }
        if self.distance_tiers.walking_max_miles > self.distance_tiers.short_drive_max_miles {
            return Err(ConfigError::Message(
                "distance_tiers.walking_max_miles exceeds short_drive_max_miles".to_string(),
            ));
        }
        Ok(())
    }
}
