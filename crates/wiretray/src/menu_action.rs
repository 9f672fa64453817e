//! Stable tray menu ids and labels.
//!
//! Menu events arrive on the runtime thread carrying only a `MenuId`, so ids
//! encode everything needed to act on a click.

use tray_icon::menu::MenuId;

const TUNNEL_ID_PREFIX: &str = "tunnel:";
const REFRESH_ID: &str = "refresh";
const OPEN_CONFIG_DIR_ID: &str = "open-config-dir";
const QUIT_ID: &str = "quit";

/// Suffix appended to the label of an active tunnel.
pub(crate) const ACTIVE_MARKER: &str = "  [Active]";

/// Something the user picked from the tray menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Bring a tunnel up or down.
    Toggle(String),
    /// Rescan the configuration directory.
    Refresh,
    /// Open the configuration directory in the file manager.
    OpenConfigDir,
    /// Exit the application.
    Quit,
}

impl MenuAction {
    /// Menu id for this action.
    pub fn id(&self) -> MenuId {
        match self {
            MenuAction::Toggle(name) => MenuId::new(format!("{TUNNEL_ID_PREFIX}{name}")),
            MenuAction::Refresh => MenuId::new(REFRESH_ID),
            MenuAction::OpenConfigDir => MenuId::new(OPEN_CONFIG_DIR_ID),
            MenuAction::Quit => MenuId::new(QUIT_ID),
        }
    }

    /// Decode a clicked menu id. Ids not produced by [`id`](Self::id) yield `None`.
    pub fn from_id(id: &MenuId) -> Option<Self> {
        let id = id.0.as_str();
        match id {
            REFRESH_ID => Some(MenuAction::Refresh),
            OPEN_CONFIG_DIR_ID => Some(MenuAction::OpenConfigDir),
            QUIT_ID => Some(MenuAction::Quit),
            _ => id
                .strip_prefix(TUNNEL_ID_PREFIX)
                .filter(|name| !name.is_empty())
                .map(|name| MenuAction::Toggle(name.to_string())),
        }
    }

    /// Label of a fixed menu entry.
    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Toggle(_) => "Toggle",
            MenuAction::Refresh => "Refresh",
            MenuAction::OpenConfigDir => "Open Config Directory",
            MenuAction::Quit => "Quit",
        }
    }
}

/// Label of a tunnel entry: the name, plus a marker when it is up.
pub fn tunnel_label(name: &str, active: bool) -> String {
    if active {
        format!("{name}{ACTIVE_MARKER}")
    } else {
        name.to_string()
    }
}

/// Tooltip summarising how many tunnels are up.
pub fn tooltip_text(active_count: usize) -> String {
    match active_count {
        0 => "WireTray - No active tunnels".to_string(),
        1 => "WireTray - 1 active tunnel".to_string(),
        n => format!("WireTray - {n} active tunnels"),
    }
}
