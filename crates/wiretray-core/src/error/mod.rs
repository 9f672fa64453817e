use error_location::ErrorLocation;
use thiserror::Error;

/// Tunnel management errors with source location tracking.
#[derive(Error, Debug)]
pub enum TunnelError {
    /// Tunnel is not part of the most recent scan.
    #[error("Unknown tunnel: {name} {location}")]
    UnknownTunnel {
        /// Name that was requested.
        name: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Tunnel name cannot be passed safely to the external tool.
    #[error("Invalid tunnel name {name:?}: {reason} {location}")]
    InvalidName {
        /// Offending name.
        name: String,
        /// Why the name was rejected.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The external command could not be started.
    #[error("Failed to run {program}: {source} {location}")]
    SpawnFailed {
        /// First element of the command line.
        program: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The external command ran and exited with a non-zero status.
    #[error("Command for {tunnel} exited with status {code:?}: {stderr} {location}")]
    CommandFailed {
        /// Tunnel the command acted on.
        tunnel: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Captured standard error, unmodified.
        stderr: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`TunnelError`].
pub type Result<T> = std::result::Result<T, TunnelError>;
