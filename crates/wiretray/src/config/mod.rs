mod command_config;
#[allow(clippy::module_inception)]
mod config;
mod poll_config;
mod tunnels_config;

pub(crate) use {
    command_config::CommandConfig, config::Config, poll_config::PollConfig,
    tunnels_config::TunnelsConfig,
};

use std::path::PathBuf;

use wiretray_core::{DEFAULT_CONFIG_DIR, DEFAULT_INTERFACE_DIR, ToggleCommand};

pub(crate) const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
pub(crate) const MIN_POLL_INTERVAL_MS: u64 = 100;

pub(crate) fn default_config_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_DIR)
}

pub(crate) fn default_interface_dir() -> PathBuf {
    PathBuf::from(DEFAULT_INTERFACE_DIR)
}

pub(crate) fn default_elevate() -> Vec<String> {
    ToggleCommand::default().elevate
}

pub(crate) fn default_program() -> String {
    ToggleCommand::default().program
}

pub(crate) fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}
