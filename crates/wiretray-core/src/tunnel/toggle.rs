//! Bringing tunnels up and down through `wg-quick`.
//!
//! The command is run synchronously: the caller blocks until the tool exits.
//! There is no timeout, so the tool's own prompts (e.g. a `sudo` password
//! request without a TTY) are expected to fail fast rather than hang.

use crate::{CoreResult, TunnelError};

use std::{fmt, panic::Location, process::Command, sync::Arc};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

/// Maximum Linux interface name length (`IFNAMSIZ - 1`).
const MAX_INTERFACE_NAME_LEN: usize = 15;

/// Direction of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    /// Bring the tunnel up.
    Up,
    /// Tear the tunnel down.
    Down,
}

impl ToggleAction {
    /// The action that flips a tunnel from its current state.
    pub fn flip(active: bool) -> Self {
        if active {
            ToggleAction::Down
        } else {
            ToggleAction::Up
        }
    }

    /// Argument passed to `wg-quick`.
    pub fn as_arg(self) -> &'static str {
        match self {
            ToggleAction::Up => "up",
            ToggleAction::Down => "down",
        }
    }
}

impl fmt::Display for ToggleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

/// Command line template: `<elevate..> <program> (up|down) <name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleCommand {
    /// Privilege escalation prefix, e.g. `["sudo"]`. May be empty.
    pub elevate: Vec<String>,
    /// Tunnel management tool.
    pub program: String,
}

impl Default for ToggleCommand {
    fn default() -> Self {
        Self {
            elevate: vec!["sudo".to_string()],
            program: "wg-quick".to_string(),
        }
    }
}

impl ToggleCommand {
    /// Full argument vector, program first.
    pub fn argv(&self, action: ToggleAction, tunnel: &str) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.elevate.len() + 3);
        argv.extend(self.elevate.iter().cloned());
        argv.push(self.program.clone());
        argv.push(action.as_arg().to_string());
        argv.push(tunnel.to_string());
        argv
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Executes a command line and waits for it to exit.
pub trait CommandRunner: Send + Sync {
    /// Run `argv[0]` with the remaining arguments.
    fn run(&self, argv: &[String]) -> std::io::Result<CommandOutput>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, argv: &[String]) -> std::io::Result<CommandOutput> {
        let (program, args) = argv.split_first().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command line")
        })?;

        let output = Command::new(program).args(args).output()?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Outcome of a successful toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleReport {
    /// Tunnel that was toggled.
    pub tunnel: String,
    /// Direction that was applied.
    pub action: ToggleAction,
}

/// Reject names that would not reach `wg-quick` as a plain interface name.
#[track_caller]
pub fn validate_tunnel_name(name: &str) -> CoreResult<()> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name.len() > MAX_INTERFACE_NAME_LEN {
        Some("name is longer than 15 bytes")
    } else if name.starts_with('-') {
        Some("name starts with '-'")
    } else if name == "." || name == ".." {
        Some("name is a relative path component")
    } else if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '=' | '+' | '.' | '-'))
    {
        Some("name contains characters outside [a-zA-Z0-9_=+.-]")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(TunnelError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }),
        None => Ok(()),
    }
}

/// Invokes the toggle command through a [`CommandRunner`].
#[derive(Clone)]
pub struct TunnelToggler {
    command: ToggleCommand,
    runner: Arc<dyn CommandRunner>,
}

impl fmt::Debug for TunnelToggler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TunnelToggler")
            .field("command", &self.command)
            .finish_non_exhaustive()
    }
}

impl TunnelToggler {
    /// Toggler that spawns real processes.
    pub fn new(command: ToggleCommand) -> Self {
        Self::with_runner(command, Arc::new(SystemRunner))
    }

    /// Toggler using a custom runner.
    pub fn with_runner(command: ToggleCommand, runner: Arc<dyn CommandRunner>) -> Self {
        Self { command, runner }
    }

    /// Apply `action` to `tunnel`, blocking until the tool exits.
    ///
    /// A non-zero exit becomes [`TunnelError::CommandFailed`] with the tool's
    /// stderr passed through verbatim.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn run(&self, action: ToggleAction, tunnel: &str) -> CoreResult<ToggleReport> {
        validate_tunnel_name(tunnel)?;

        let argv = self.command.argv(action, tunnel);
        debug!(?argv, "Running toggle command");

        let output = self
            .runner
            .run(&argv)
            .map_err(|source| TunnelError::SpawnFailed {
                program: argv.first().cloned().unwrap_or_default(),
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        if !output.success() {
            warn!(
                tunnel,
                %action,
                code = ?output.code,
                stderr = %output.stderr.trim_end(),
                "Toggle command failed"
            );
            return Err(TunnelError::CommandFailed {
                tunnel: tunnel.to_string(),
                code: output.code,
                stderr: output.stderr,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        info!(tunnel, %action, "Tunnel toggled");

        Ok(ToggleReport {
            tunnel: tunnel.to_string(),
            action,
        })
    }
}
