use wiretray_core::StatusSnapshot;

/// Commands sent from the async runtime to the main UI thread.
///
/// The main thread owns `TrayManager` (because `TrayIcon` is `!Send`),
/// so all tray mutations and process lifecycle events flow through this enum.
#[derive(Debug, Clone)]
pub enum TrayCommand {
    /// Rebuild the menu after a rescan.
    SetTunnels {
        /// Sorted tunnel names.
        tunnels: Vec<String>,
        /// Inline messages shown when the scan failed.
        notices: Vec<String>,
    },
    /// Refresh labels, check marks, icon and tooltip.
    SetStatus(StatusSnapshot),
    /// Shut down the application. The main thread will exit the event loop.
    Shutdown,
}
