use crate::config::{default_config_dir, default_interface_dir};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where tunnels are discovered and probed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TunnelsConfig {
    /// Directory holding `*.conf` tunnel definitions.
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,

    /// Directory listing kernel network interfaces.
    #[serde(default = "default_interface_dir")]
    pub interface_dir: PathBuf,
}

impl Default for TunnelsConfig {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            interface_dir: default_interface_dir(),
        }
    }
}
