/*
 * giftex - Secret gift exchange assignment generator.
 * Copyright (C) 2025  giftex contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

//! Configuration management with validation and defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure for giftex
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Enable colored output
    pub color: bool,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: true,
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log file path (empty = no file logging)
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from multiple sources with precedence:
    /// 1. /etc/giftex/giftex.toml (system-wide)
    /// 2. ~/.config/giftex/config.toml (user)
    /// 3. Environment variables (GIFTEX_*)
    pub fn load() -> Self {
        let mut config = Config::default();

        let system_config = Path::new("/etc/giftex/giftex.toml");
        if system_config.exists() {
            if let Ok(content) = fs::read_to_string(system_config) {
                if let Ok(parsed) = toml::from_str::<Config>(&content) {
                    config = config.merge(parsed);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("giftex").join("config.toml");
            if user_config.exists() {
                if let Ok(content) = fs::read_to_string(user_config) {
                    if let Ok(parsed) = toml::from_str::<Config>(&content) {
                        config = config.merge(parsed);
                    }
                }
            }
        }

        config.apply_env_overrides()
    }

    /// Merge another config into this one (other takes precedence for non-default values)
    fn merge(mut self, other: Config) -> Self {
        let default = Config::default();

        if other.color != default.color {
            self.color = other.color;
        }
        if other.logging.level != default.logging.level {
            self.logging.level = other.logging.level;
        }
        if other.logging.file != default.logging.file {
            self.logging.file = other.logging.file;
        }

        self
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("GIFTEX_COLOR") {
            self.color = val == "1" || val.to_lowercase() == "true";
        }

        if let Ok(val) = std::env::var("GIFTEX_LOG_LEVEL") {
            self.logging.level = val;
        }

        if let Ok(val) = std::env::var("GIFTEX_LOG_FILE") {
            self.logging.file = Some(PathBuf::from(val));
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.logging.level.as_str()) {
            return Err(format!("unknown log level '{}'", self.logging.level));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.color);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_keeps_non_defaults() {
        let base = Config::default();
        let other = Config {
            color: false,
            logging: LoggingConfig {
                level: "debug".to_string(),
                file: None,
            },
        };

        let merged = base.merge(other);
        assert!(!merged.color);
        assert_eq!(merged.logging.level, "debug");
    }

    #[test]
    fn test_toml_round_trip() {
        let parsed: Config = toml::from_str(
            r#"
            color = false

            [logging]
            level = "warn"
            "#,
        )
        .unwrap();

        assert!(!parsed.color);
        assert_eq!(parsed.logging.level, "warn");
    }
}
