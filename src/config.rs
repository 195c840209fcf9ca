//! Configuration management for the schema validator
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (schema-validator.toml)
//! - Environment variables (SCHEMA_VALIDATOR__*)
//!
//! ## Example config file (schema-validator.toml):
//! ```toml
//! [validation]
//! max_depth = 1000
//! unknown_keywords = "allow"
//!
//! [output]
//! format = "pretty"
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::walker::{UnknownKeywordPolicy, ValidatorOptions, DEFAULT_MAX_DEPTH};

/// Main configuration for the validator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Deepest schema nesting that is walked
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Report keywords that have no rule
    #[serde(default)]
    pub unknown_keywords: UnknownKeywordPolicy,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            unknown_keywords: UnknownKeywordPolicy::Allow,
        }
    }
}

impl ValidatorConfig {
    /// Load configuration, adding a required file on top of the defaults
    pub fn load_from(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = [
            "schema-validator.toml",
            ".schema-validator.toml",
            "config/schema-validator.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) =
            directories::ProjectDirs::from("dev", "familiar", "schema-validator")
        {
            let xdg_config = config_dir.config_dir().join("schema-validator.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        // SCHEMA_VALIDATOR__VALIDATION__MAX_DEPTH=50
        builder = builder.add_source(
            Environment::with_prefix("SCHEMA_VALIDATOR")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Options for a [`SchemaValidator`](crate::SchemaValidator)
    pub fn validator_options(&self) -> ValidatorOptions {
        ValidatorOptions {
            max_depth: self.validation.max_depth,
            unknown_keywords: self.validation.unknown_keywords,
        }
    }
}
