//! Desktop notifications for failed tunnel actions.

use crate::{AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;
use notify_rust::{Notification, Timeout};
use tracing::{debug, instrument};
use wiretray_core::TunnelError;

const APP_NAME: &str = "WireTray";
const ERROR_SUMMARY: &str = "WireTray Error";
const ERROR_ICON: &str = "network-error";

/// Delivers user-facing error messages.
pub trait ErrorNotifier: Send + Sync {
    /// Show an error with `body` as its text.
    fn error(&self, body: &str) -> AppResult<()>;
}

/// Shows error popups through the desktop notification service.
#[derive(Debug, Clone, Copy, Default)]
pub struct Notifier;

impl ErrorNotifier for Notifier {
    #[track_caller]
    #[instrument(skip(self))]
    fn error(&self, body: &str) -> AppResult<()> {
        Notification::new()
            .appname(APP_NAME)
            .summary(ERROR_SUMMARY)
            .body(body)
            .icon(ERROR_ICON)
            .timeout(Timeout::Default)
            .show()
            .map_err(|e| AppError::NotificationFailed {
                reason: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!("Error notification shown");

        Ok(())
    }
}

/// User-facing text for a failed toggle of `tunnel`.
///
/// For a tool failure the captured stderr is included verbatim.
pub fn toggle_failure_message(tunnel: &str, error: &AppError) -> String {
    match error {
        AppError::Tunnel { source, .. } => match source {
            TunnelError::CommandFailed { stderr, .. } => {
                format!("Failed to toggle {tunnel}:\n{stderr}")
            }
            TunnelError::SpawnFailed {
                program, source, ..
            } => format!("Failed to toggle {tunnel}: could not run {program}: {source}"),
            TunnelError::UnknownTunnel { .. } => {
                format!("{tunnel} is no longer configured. Use Refresh to reload the list.")
            }
            TunnelError::InvalidName { reason, .. } => {
                format!("Cannot toggle {tunnel}: {reason}")
            }
        },
        other => format!("Failed to toggle {tunnel}: {other}"),
    }
}
