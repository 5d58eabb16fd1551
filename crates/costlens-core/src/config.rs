//! Configuration management for CostLens
//!
//! Layers, lowest priority first: built-in defaults, a TOML file, then
//! `COSTLENS__SECTION__KEY` environment variables.
//!
//! The built-in defaults match `config/default.toml`, so the dashboard team
//! map and the sample data apply even when no file is found.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "COSTLENS";

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Pricing configuration
    pub pricing: PricingConfig,

    /// Group assignment configuration
    pub groups: GroupsConfig,

    /// Event data configuration
    pub data: DataConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from an explicit file (required) or the per-user
    /// config file (optional), overlaid with environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        match path {
            Some(path) => {
                debug!(path = %path.display(), "Using config file");
                builder = builder.add_source(config::File::from(path).required(true));
            }
            None => {
                if let Some(path) = default_config_path() {
                    debug!(path = %path.display(), "Looking for user config file");
                    builder = builder.add_source(config::File::from(path).required(false));
                }
            }
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

/// `config.toml` in the platform config directory, e.g. `~/.config/costlens/`
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "costlens")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// HTTP API port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Pricing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Price of one token
    pub cost_per_unit: f64,
    /// Currency label used in output
    pub currency: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            cost_per_unit: 15.0,
            currency: "IDR".to_string(),
        }
    }
}

/// One campaign-to-group assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupAssignmentEntry {
    /// Campaign identifier
    pub campaign: String,
    /// Group the campaign belongs to
    pub group: String,
}

impl GroupAssignmentEntry {
    fn new(campaign: &str, group: &str) -> Self {
        Self {
            campaign: campaign.to_string(),
            group: group.to_string(),
        }
    }
}

/// Group assignment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupsConfig {
    /// Explicit campaign assignments
    pub assignments: Vec<GroupAssignmentEntry>,
    /// Group for campaigns without an assignment; a blank value leaves them
    /// without a group
    pub fallback: Option<String>,
}

impl Default for GroupsConfig {
    fn default() -> Self {
        Self {
            assignments: vec![
                GroupAssignmentEntry::new("CAMP-001", "CRM"),
                GroupAssignmentEntry::new("CAMP-002", "Digital Support"),
                GroupAssignmentEntry::new("CAMP-003", "DMS"),
                GroupAssignmentEntry::new("CAMP-004", "CRM"),
                GroupAssignmentEntry::new("CAMP-005", "Digital Support"),
            ],
            fallback: Some("CRM".to_string()),
        }
    }
}

/// Event data configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Default events file when none is given on the command line
    pub events_path: Option<PathBuf>,
    /// Reject records whose delivery funnel is not monotonic
    pub strict_funnel: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            events_path: Some(PathBuf::from("data/events.json")),
            strict_funnel: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (json or pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
