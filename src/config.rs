//! Configuration management for the AAS validator
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (aas-validator.toml)
//! - Environment variables (AASV__*)
//!
//! ## Example config file (aas-validator.toml):
//! ```toml
//! [export]
//! typed_values = true
//! output_format = "compact"
//!
//! [check]
//! extensions = ["json"]
//! ignore_paths = ["drafts"]
//! fail_fast = false
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::model::ExportOptions;

/// Main configuration for the validator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Batch check settings
    #[serde(default)]
    pub check: CheckConfig,
}

/// Export configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Emit coerced values instead of raw literals
    #[serde(default)]
    pub typed_values: bool,

    /// Output format (pretty or compact)
    #[serde(default)]
    pub output_format: OutputFormat,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

impl OutputFormat {
    pub fn render(&self, value: &serde_json::Value) -> serde_json::Result<String> {
        match self {
            OutputFormat::Pretty => serde_json::to_string_pretty(value),
            OutputFormat::Compact => serde_json::to_string(value),
        }
    }
}

/// Batch check configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// File extensions to check
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Paths (relative to the checked root) to skip
    #[serde(default)]
    pub ignore_paths: Vec<String>,

    /// Stop at the first failing file
    #[serde(default)]
    pub fail_fast: bool,
}

fn default_extensions() -> Vec<String> {
    vec!["json".to_string()]
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            ignore_paths: Vec::new(),
            fail_fast: false,
        }
    }
}

impl CheckConfig {
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|x| x.to_str())
            .map(|x| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(x)))
            .unwrap_or(false)
    }

    pub fn is_ignored(&self, relative: &Path) -> bool {
        self.ignore_paths.iter().any(|p| relative.starts_with(p))
    }
}

impl ExportConfig {
    /// Immutable options passed to export calls
    pub fn options(&self) -> ExportOptions {
        ExportOptions {
            typed_values: self.typed_values,
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = [
            "aas-validator.toml",
            ".aas-validator.toml",
            "config/aas-validator.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("org", "openaas", "aas-validator") {
            let xdg_config = config_dir.config_dir().join("aas-validator.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // AASV__EXPORT__TYPED_VALUES=true
        builder = builder.add_source(
            Environment::with_prefix("AASV")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("check.extensions")
                .with_list_parse_key("check.ignore_paths")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
