//! WireTray: system tray toggles for WireGuard tunnels managed by `wg-quick`.

mod app;
mod app_command;
mod config;
mod error;
mod menu_action;
mod notifier;
mod status_icon;
mod tray_command;
mod tray_icon_state;
mod tray_manager;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    menu_action::MenuAction,
    notifier::Notifier,
    tray_command::TrayCommand,
    tray_icon_state::TrayIconState,
    tray_manager::TrayManager,
};

use crate::config::Config;

use tao::{
    event::{Event, StartCause},
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("wiretray=debug,wiretray_core=debug")),
        )
        .init();

    let event_loop = EventLoopBuilder::<TrayCommand>::with_user_event().build();
    let tray_proxy = event_loop.create_proxy();

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let mut tray_manager = match TrayManager::new() {
        Ok(tm) => tm,
        Err(e) => {
            error!("Failed to create TrayManager: {:?}", e);
            std::process::exit(1);
        }
    };

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(cmd) => match cmd {
                TrayCommand::SetTunnels { tunnels, notices } => {
                    if let Err(e) = tray_manager.set_tunnels(&tunnels, &notices) {
                        error!(error = ?e, "Failed to rebuild tray menu");
                    }
                }
                TrayCommand::SetStatus(snapshot) => {
                    if let Err(e) = tray_manager.update_status(&snapshot) {
                        error!(error = ?e, "Failed to update tray status");
                    }
                }
                TrayCommand::Shutdown => {
                    *control_flow = ControlFlow::ExitWithCode(0);
                }
            },
            Event::NewEvents(StartCause::Init) => {
                let config = match Config::load() {
                    Ok(c) => c,
                    Err(e) => {
                        error!("Failed to load config: {:?}", e);
                        std::process::exit(1);
                    }
                };

                if let Err(e) = config.validate() {
                    error!("Config validation failed: {:?}", e);
                    std::process::exit(1);
                }

                info!(
                    config_dir = ?config.tunnels.config_dir,
                    interface_dir = ?config.tunnels.interface_dir,
                    interval_ms = config.poll.interval_ms,
                    "Configuration ready"
                );

                // The app loop talks to a plain channel; this thread hands
                // each command to the event loop, waking it up.
                let (tray_tx, tray_rx) = std::sync::mpsc::channel::<TrayCommand>();
                let tray_proxy = tray_proxy.clone();
                std::thread::spawn(move || {
                    while let Ok(cmd) = tray_rx.recv() {
                        if tray_proxy.send_event(cmd).is_err() {
                            break;
                        }
                    }
                });

                let app = App::new(config.tunnel_manager(), tray_tx, config.poll.interval());

                // Spawn tokio runtime on separate thread.
                // TrayManager stays on the main thread.
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Runtime::new() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    rt.block_on(async {
                        if let Err(e) = app.run().await {
                            error!(error = ?e, "App error");
                        }
                    });
                });
            }
            _ => {}
        }
    });
}
