use crate::config::{default_elevate, default_program};

use serde::{Deserialize, Serialize};
use wiretray_core::ToggleCommand;

/// External tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandConfig {
    /// Privilege escalation prefix (e.g. `["sudo"]`, `["pkexec"]`, or empty).
    #[serde(default = "default_elevate")]
    pub elevate: Vec<String>,

    /// Tunnel management tool.
    #[serde(default = "default_program")]
    pub program: String,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            elevate: default_elevate(),
            program: default_program(),
        }
    }
}

impl CommandConfig {
    /// Command line template for the core toggler.
    pub fn toggle_command(&self) -> ToggleCommand {
        ToggleCommand {
            elevate: self.elevate.clone(),
            program: self.program.clone(),
        }
    }
}
