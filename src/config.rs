//! Configuration loading and management
//!
//! Handles parsing of `config.toml` from the data directory (or an explicit
//! `--config` path).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::task::{Period, Priority};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Task seeding and defaults
    #[serde(default)]
    pub tasks: TasksConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tasks: TasksConfig::default(),
        }
    }
}

/// Task-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Title given to the seeded starter tasks
    #[serde(default = "default_seed_title")]
    pub seed_title: String,

    /// Area assigned to the seeded starter tasks (also the fallback area
    /// for `task add`)
    #[serde(default = "default_seed_area")]
    pub seed_area: String,

    /// Period used when `task add` does not specify one
    #[serde(default = "default_period")]
    pub default_period: String,

    /// Priority used when `task add` does not specify one
    #[serde(default = "default_priority")]
    pub default_priority: String,
}

fn default_seed_title() -> String {
    "First Task".to_string()
}

fn default_seed_area() -> String {
    "Personal".to_string()
}

fn default_period() -> String {
    "anytime".to_string()
}

fn default_priority() -> String {
    "medium".to_string()
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            seed_title: default_seed_title(),
            seed_area: default_seed_area(),
            default_period: default_period(),
            default_priority: default_priority(),
        }
    }
}

impl TasksConfig {
    /// Parsed form of `default_period`
    pub fn default_period(&self) -> Period {
        self.default_period.parse().unwrap_or(Period::Anytime)
    }

    /// Parsed form of `default_priority`
    pub fn default_priority(&self) -> Priority {
        self.default_priority.parse().unwrap_or(Priority::Medium)
    }

    fn validate(&self) -> crate::error::Result<()> {
        if self.seed_title.trim().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "tasks.seed_title cannot be empty".to_string(),
            ));
        }
        if self.seed_area.trim().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "tasks.seed_area cannot be empty".to_string(),
            ));
        }
        self.default_period.parse::<Period>().map_err(|_| {
            crate::error::Error::InvalidConfig(format!(
                "tasks.default_period '{}' is not a valid period",
                self.default_period
            ))
        })?;
        self.default_priority.parse::<Priority>().map_err(|_| {
            crate::error::Error::InvalidConfig(format!(
                "tasks.default_priority '{}' is not a valid priority",
                self.default_priority
            ))
        })?;
        Ok(())
    }
}

impl Config {
    /// Load configuration from a `config.toml` file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the given path, or return defaults when the
    /// file is missing or invalid
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> crate::error::Result<()> {
        self.tasks.validate()?;
        Ok(())
    }
}
