//! Configuration management for wiretray.
//!
//! Loads and saves a TOML settings file in the per-user config directory,
//! creating it with defaults on first start. Writes are atomic.

use crate::{
    AppError, AppResult,
    config::{CommandConfig, MIN_POLL_INTERVAL_MS, PollConfig, TunnelsConfig},
};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use wiretray_core::TunnelManager;

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Tunnel discovery and probing paths.
    #[serde(default)]
    pub tunnels: TunnelsConfig,
    /// External command invocation.
    #[serde(default)]
    pub command: CommandConfig,
    /// Status polling.
    #[serde(default)]
    pub poll: PollConfig,
}

impl Config {
    /// Load configuration from the per-user config directory.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, writing defaults if it does not exist.
    #[track_caller]
    #[instrument]
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to read config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let config: Config = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to parse config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            info!(config_path = ?path, "Configuration loaded");

            Ok(config)
        } else {
            info!(config_path = ?path, "No config found, creating default");
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Check values that would make the app misbehave.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn validate(&self) -> AppResult<()> {
        if self.poll.interval_ms < MIN_POLL_INTERVAL_MS {
            return Err(AppError::ConfigError {
                reason: format!(
                    "poll.interval_ms must be at least {} (got {})",
                    MIN_POLL_INTERVAL_MS, self.poll.interval_ms
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.command.program.trim().is_empty() {
            return Err(AppError::ConfigError {
                reason: "command.program must not be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Save configuration to `path` using the atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames over the target.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let temp_path = path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Build the tunnel manager described by this configuration.
    pub fn tunnel_manager(&self) -> TunnelManager {
        TunnelManager::new(
            &self.tunnels.config_dir,
            &self.tunnels.interface_dir,
            self.command.toggle_command(),
        )
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "wiretray", "WireTray").ok_or_else(|| {
            AppError::ConfigError {
                reason: "Failed to get config directory".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }
}
