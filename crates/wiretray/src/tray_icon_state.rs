/// Tray icon states, one per status dot colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayIconState {
    /// At least one tunnel is up.
    Connected,
    /// No tunnel is up.
    Disconnected,
}

impl TrayIconState {
    /// State for the given aggregate status.
    pub fn from_any_active(any_active: bool) -> Self {
        if any_active {
            TrayIconState::Connected
        } else {
            TrayIconState::Disconnected
        }
    }
}
