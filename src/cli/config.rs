//! Configuration management for lawnbook
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.lawnbook/config.toml

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{LawnError, Result};
use crate::models::Cadence;
use crate::season::{parse_month, SeasonCalendar, SeasonRule};

/// Log levels accepted in `[logging] default_level`
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Complete configuration for lawnbook
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub paths: PathsConfig,
    pub logging: LoggingConfig,
    /// Season key → cadence replacing that season's default
    pub season_overrides: BTreeMap<String, Cadence>,
    pub seasons: Vec<SeasonConfig>,
}

/// File system paths configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub data_file: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub default_level: String,
}

/// One row of the season table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeasonConfig {
    pub key: String,
    pub label: String,
    pub months: Vec<String>,
    pub default_frequency: Cadence,
}

impl SeasonConfig {
    /// Convert to a rule, parsing month names
    pub fn to_rule(&self) -> Result<SeasonRule> {
        let months = self
            .months
            .iter()
            .map(|m| parse_month(m))
            .collect::<Result<Vec<_>>>()
            .map_err(|e| LawnError::ConfigError(format!("season '{}': {}", self.key, e)))?;

        Ok(SeasonRule::new(
            self.key.clone(),
            self.label.clone(),
            months,
            self.default_frequency,
        ))
    }
}

impl From<&SeasonRule> for SeasonConfig {
    fn from(rule: &SeasonRule) -> Self {
        Self {
            key: rule.key.clone(),
            label: rule.label.clone(),
            months: rule.months.iter().map(|m| m.name().to_string()).collect(),
            default_frequency: rule.default_cadence,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            logging: LoggingConfig::default(),
            season_overrides: BTreeMap::new(),
            seasons: SeasonCalendar::standard()
                .rules()
                .iter()
                .map(SeasonConfig::from)
                .collect(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_file: "~/.lawnbook/jobs.json".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default_level: "warn".to_string(),
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
            .map_err(|e| LawnError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config = Self::from_toml(&contents)?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| LawnError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Standard config location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".lawnbook").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.paths.data_file.trim().is_empty() {
            return Err(LawnError::ConfigError(
                "data_file must not be empty".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.default_level.as_str()) {
            return Err(LawnError::ConfigError(format!(
                "Invalid log level: {}",
                self.logging.default_level
            )));
        }

        self.season_calendar()?;
        Ok(())
    }

    /// Season table with overrides applied
    pub fn season_calendar(&self) -> Result<SeasonCalendar> {
        let rules = self
            .seasons
            .iter()
            .map(SeasonConfig::to_rule)
            .collect::<Result<Vec<_>>>()?;

        let mut calendar = SeasonCalendar::new(rules)
            .map_err(|e| LawnError::ConfigError(e.to_string()))?;

        for (key, cadence) in &self.season_overrides {
            calendar = calendar
                .with_cadence_override(key, *cadence)
                .map_err(|e| LawnError::ConfigError(e.to_string()))?;
        }

        Ok(calendar)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| LawnError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| LawnError::ConfigError(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| LawnError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
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

    /// Get job book file path
    pub fn data_file(&self) -> PathBuf {
        Self::expand_path(&self.paths.data_file)
    }
}
