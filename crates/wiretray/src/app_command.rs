use crate::MenuAction;

use uuid::Uuid;

/// Commands sent from the tray menu forwarder to the main application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Bring a tunnel up if it is down, or down if it is up.
    Toggle {
        /// Tunnel name.
        tunnel: String,
        /// Unique ID for log correlation.
        request_id: Uuid,
    },
    /// Rescan the configuration directory.
    Refresh,
    /// Open the configuration directory in the file manager.
    OpenConfigDir,
    /// Request application shutdown.
    Shutdown,
}

impl From<MenuAction> for AppCommand {
    fn from(action: MenuAction) -> Self {
        match action {
            MenuAction::Toggle(tunnel) => AppCommand::Toggle {
                tunnel,
                request_id: Uuid::new_v4(),
            },
            MenuAction::Refresh => AppCommand::Refresh,
            MenuAction::OpenConfigDir => AppCommand::OpenConfigDir,
            MenuAction::Quit => AppCommand::Shutdown,
        }
    }
}
