use crate::{
    AppCommand, AppError, AppResult, MenuAction, Notifier, TrayCommand,
    notifier::{ErrorNotifier, toggle_failure_message},
};

use std::{panic::Location, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use tokio::{
    sync::mpsc,
    time::{MissedTickBehavior, interval},
};
use tracing::{debug, error, info, instrument, warn};
use tray_icon::menu::MenuEvent;
use uuid::Uuid;
use wiretray_core::{ToggleReport, TunnelManager};

/// Main application state.
///
/// Runs on the async runtime thread. Communicates tray updates back to the
/// main thread via `tray_tx` because `TrayIcon` is `!Send` and must remain on
/// the UI thread.
pub struct App {
    pub(crate) manager: TunnelManager,
    pub(crate) notifier: Arc<dyn ErrorNotifier>,
    pub(crate) tray_tx: std::sync::mpsc::Sender<TrayCommand>,
    pub(crate) poll_interval: Duration,
    pub(crate) command_tx: mpsc::Sender<AppCommand>,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
}

impl App {
    /// Create the application around a tunnel manager.
    pub(crate) fn new(
        manager: TunnelManager,
        tray_tx: std::sync::mpsc::Sender<TrayCommand>,
        poll_interval: Duration,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::channel(32);
        Self {
            manager,
            notifier: Arc::new(Notifier),
            tray_tx,
            poll_interval,
            command_tx,
            command_rx,
        }
    }

    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("WireTray starting");

        // Tray event forwarding via single persistent blocking task.
        //
        // MenuEvent::receiver() returns a crossbeam_channel::Receiver which
        // HAS blocking recv(), so one thread serves every click.
        //
        // Shutdown: when command_rx is dropped (main loop breaks),
        // blocking_send() fails, breaking the blocking loop.
        let forward_tx = self.command_tx.clone();
        let tray_handle = tokio::task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                let Some(action) = MenuAction::from_id(&event.id) else {
                    debug!(id = ?event.id, "Ignoring unknown menu id");
                    continue;
                };
                if forward_tx.blocking_send(AppCommand::from(action)).is_err() {
                    break;
                }
            }
        });

        self.refresh();

        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.publish_status();
                }

                Some(cmd) = self.command_rx.recv() => {
                    if !self.handle_command(cmd).await {
                        break;
                    }
                }
            }
        }

        drop(self);

        match tokio::time::timeout(Duration::from_secs(1), tray_handle).await {
            Ok(Ok(())) => info!("Tray event forwarder stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Tray event forwarder task panicked"),
            Err(_) => info!(
                "Tray event forwarder did not stop within timeout, \
                     will be cleaned up on exit"
            ),
        }

        info!("WireTray shut down successfully");

        Ok(())
    }

    /// Handle one command. Returns `false` once the app should stop.
    #[instrument(skip(self))]
    pub(crate) async fn handle_command(&mut self, cmd: AppCommand) -> bool {
        match cmd {
            AppCommand::Toggle { tunnel, request_id } => {
                self.toggle_and_report(&tunnel, request_id).await;
                true
            }
            AppCommand::Refresh => {
                self.refresh();
                true
            }
            AppCommand::OpenConfigDir => {
                let dir = self.manager.config_dir();
                match open::that(dir) {
                    Ok(()) => info!(dir = ?dir, "Opened configuration directory"),
                    Err(e) => error!(dir = ?dir, error = ?e, "Failed to open configuration directory"),
                }
                true
            }
            AppCommand::Shutdown => {
                info!("Shutdown requested");
                if let Err(e) = self.send_tray(TrayCommand::Shutdown) {
                    error!(error = ?e, "Failed to send shutdown to tray");
                }
                false
            }
        }
    }

    /// Rescan the configuration directory and push the new menu and status.
    #[instrument(skip(self))]
    pub(crate) fn refresh(&mut self) {
        let outcome = self.manager.rescan();
        let cmd = TrayCommand::SetTunnels {
            tunnels: outcome.tunnels().to_vec(),
            notices: outcome.notices(),
        };

        if let Err(e) = self.send_tray(cmd) {
            error!(error = ?e, "Failed to push tunnel list to tray");
        }

        self.publish_status();
    }

    /// Poll every tunnel and push the result to the tray.
    pub(crate) fn publish_status(&self) {
        let snapshot = self.manager.poll();
        if let Err(e) = self.send_tray(TrayCommand::SetStatus(snapshot)) {
            error!(error = ?e, "Failed to push status to tray");
        }
    }

    /// Toggle `tunnel` on the blocking pool and wait for the tool to exit.
    pub(crate) async fn toggle(&self, tunnel: &str) -> AppResult<ToggleReport> {
        let manager = self.manager.clone();
        let name = tunnel.to_string();

        let report = tokio::task::spawn_blocking(move || manager.toggle(&name))
            .await
            .map_err(|e| AppError::TaskFailed {
                reason: format!("Toggle task failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })??;

        Ok(report)
    }

    async fn toggle_and_report(&self, tunnel: &str, request_id: Uuid) {
        match self.toggle(tunnel).await {
            Ok(report) => {
                info!(
                    request_id = %request_id,
                    tunnel = %report.tunnel,
                    action = %report.action,
                    "Toggle complete"
                );
            }
            Err(e) => {
                error!(request_id = %request_id, tunnel, error = ?e, "Toggle failed");

                let body = toggle_failure_message(tunnel, &e);
                let notifier = Arc::clone(&self.notifier);
                // Notification delivery talks to D-Bus synchronously.
                let delivered = tokio::task::spawn_blocking(move || notifier.error(&body)).await;
                match delivered {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => warn!(error = ?e, "Failed to show error notification"),
                    Err(e) => warn!(error = ?e, "Notification task panicked"),
                }
            }
        }

        // Reflect the new state right away instead of waiting for the next tick.
        self.publish_status();
    }

    #[track_caller]
    fn send_tray(&self, cmd: TrayCommand) -> AppResult<()> {
        self.tray_tx
            .send(cmd)
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to send tray command: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}
