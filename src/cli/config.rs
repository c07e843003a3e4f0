//! Configuration management for biorisk
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.biorisk/config.toml

use crate::errors::{Result, RiskError};
use crate::fusion::FusionPolicy;
use crate::ranges::{ReferenceRange, ReferenceRangeTable};
use crate::rules::RulePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete configuration for biorisk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub rules: RulePolicy,

    #[serde(default)]
    pub fusion: FusionPolicy,

    #[serde(default)]
    pub batch: BatchConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Replaces the clinical default reference ranges when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranges: Option<Vec<ReferenceRange>>,
}

/// Model adapter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub artifact_path: String,
}

/// Batch evaluation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub max_parallel: usize,
}

/// Log output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when neither RUST_LOG nor -v/-q is given
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            rules: RulePolicy::default(),
            fusion: FusionPolicy::default(),
            batch: BatchConfig::default(),
            logging: LoggingConfig::default(),
            ranges: None,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            artifact_path: "~/.biorisk/models/diabetes_logistic.json".to_string(),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_parallel: num_cpus::get(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RiskError::Configuration(format!("Failed to read config {}: {}", path.display(), e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| RiskError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Config::default())
    }

    /// Standard config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".biorisk").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.model.artifact_path.trim().is_empty() {
            return Err(RiskError::Configuration(
                "model.artifact_path must not be empty".to_string(),
            ));
        }

        self.rules.validate()?;
        self.fusion.validate()?;

        if self.batch.max_parallel == 0 {
            return Err(RiskError::Configuration(
                "batch.max_parallel must be greater than 0".to_string(),
            ));
        }

        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            other => {
                return Err(RiskError::Configuration(format!(
                    "Invalid log level: {}",
                    other
                )))
            }
        }

        if let Some(ranges) = &self.ranges {
            let table = ReferenceRangeTable::from_ranges(ranges.clone())?;
            if table.max_weight() < self.fusion.severe_weight {
                return Err(RiskError::Configuration(format!(
                    "no reference range reaches fusion.severe_weight {}",
                    self.fusion.severe_weight
                )));
            }
        }

        Ok(())
    }

    /// Save configuration to file
    ///
    /// Filesystem failures surface as `RiskError::Io`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = self.to_toml()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| RiskError::Configuration(format!("Failed to serialize config: {}", e)))
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Model artifact path with tilde expanded
    pub fn model_path(&self) -> PathBuf {
        Self::expand_path(&self.model.artifact_path)
    }
}
