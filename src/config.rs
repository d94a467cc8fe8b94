//! User configuration
//!
//! Layered configuration: environment variables → config file → defaults

use std::path::PathBuf;

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, Result};
use crate::tui::theme::ColorMode;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// UI refresh rate in FPS
    pub ui_refresh_fps: u32,

    /// Interval in milliseconds between repository state polls
    pub poll_interval_ms: u64,

    /// Color mode override: "basic", "indexed" or "truecolor".
    /// Unset means auto-detect from the terminal.
    pub color_mode: Option<String>,

    /// Enable debug logging
    pub debug: bool,

    /// Log file path (if set, logs to file instead of stderr)
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui_refresh_fps: 30,
            poll_interval_ms: 1000,
            color_mode: None,
            debug: false,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from all sources
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        let config: Config = Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Config::default()))
            // Layer config file if it exists
            .merge(Toml::file(&config_path))
            // Layer environment variables (GLANCE_DEBUG, etc.)
            .merge(Env::prefixed("GLANCE_"))
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|_e| {
                Error::Config(ConfigError::DirectoryCreationFailed(parent.to_path_buf()))
            })?;
        }

        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        std::fs::write(&config_path, toml)
            .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        Ok(())
    }

    /// Resolve the configured color mode, if any
    pub fn color_mode(&self) -> Result<Option<ColorMode>> {
        match self.color_mode.as_deref() {
            None => Ok(None),
            Some("basic") => Ok(Some(ColorMode::Basic)),
            Some("indexed") => Ok(Some(ColorMode::Indexed)),
            Some("truecolor") => Ok(Some(ColorMode::TrueColor)),
            Some(other) => Err(Error::Config(ConfigError::InvalidValue {
                key: "color_mode".to_string(),
                reason: format!("unknown mode '{other}'"),
            })),
        }
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("com", "git-glance", "git-glance").ok_or_else(|| {
            Error::Config(ConfigError::LoadFailed(
                "Could not determine home directory".to_string(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.ui_refresh_fps, 30);
        assert_eq!(config.poll_interval_ms, 1000);
        assert!(config.color_mode.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("ui_refresh_fps"));
        assert!(toml.contains("poll_interval_ms"));
    }

    #[test]
    fn test_color_mode_parsing() {
        let mut config = Config::default();
        assert!(config.color_mode().unwrap().is_none());

        config.color_mode = Some("truecolor".to_string());
        assert_eq!(config.color_mode().unwrap(), Some(ColorMode::TrueColor));

        config.color_mode = Some("magenta".to_string());
        assert!(config.color_mode().is_err());
    }
}
