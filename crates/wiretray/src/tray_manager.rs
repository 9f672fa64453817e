//! System tray icon and menu.
//!
//! One check item per tunnel, inline scan notices, and the fixed
//! Refresh / Open Config Directory / Quit entries. The icon dot is green while
//! any tunnel is up.

use crate::{AppError, AppResult, MenuAction, TrayIconState, menu_action, status_icon};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};
use tray_icon::menu::{CheckMenuItem, Menu, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};
use wiretray_core::StatusSnapshot;

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
    tunnel_items: Vec<(String, CheckMenuItem)>,
    state: TrayIconState,
}

impl TrayManager {
    /// Create the tray icon with an empty tunnel list.
    #[track_caller]
    #[instrument]
    pub fn new() -> AppResult<Self> {
        let state = TrayIconState::Disconnected;
        let (menu, tunnel_items) = Self::build_menu(&[], &[])?;
        let icon = Self::load_icon(state)?;

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(menu_action::tooltip_text(0))
            .with_menu(Box::new(menu))
            .with_icon(icon)
            .build()
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("System tray icon initialized");

        Ok(Self {
            tray_icon,
            tunnel_items,
            state,
        })
    }

    /// Replace the menu after a rescan.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn set_tunnels(&mut self, tunnels: &[String], notices: &[String]) -> AppResult<()> {
        let (menu, tunnel_items) = Self::build_menu(tunnels, notices)?;
        self.tray_icon.set_menu(Some(Box::new(menu)));
        self.tunnel_items = tunnel_items;

        debug!(count = self.tunnel_items.len(), "Tray menu rebuilt");

        Ok(())
    }

    /// Apply a poll result to labels, check marks, icon and tooltip.
    #[track_caller]
    pub fn update_status(&mut self, snapshot: &StatusSnapshot) -> AppResult<()> {
        for (name, item) in &self.tunnel_items {
            let active = snapshot
                .status_of(name)
                .is_some_and(|status| status.is_active());
            item.set_text(menu_action::tunnel_label(name, active));
            item.set_checked(active);
        }

        let state = TrayIconState::from_any_active(snapshot.any_active());
        if state != self.state {
            self.tray_icon
                .set_icon(Some(Self::load_icon(state)?))
                .map_err(|e| AppError::TrayError {
                    reason: format!("Failed to update icon: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
            self.state = state;
            info!(?state, "Tray icon state changed");
        }

        self.tray_icon
            .set_tooltip(Some(menu_action::tooltip_text(snapshot.active_count())))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(())
    }

    #[track_caller]
    fn build_menu(
        tunnels: &[String],
        notices: &[String],
    ) -> AppResult<(Menu, Vec<(String, CheckMenuItem)>)> {
        let menu = Menu::new();
        let mut tunnel_items = Vec::with_capacity(tunnels.len());

        for name in tunnels {
            let item = CheckMenuItem::with_id(
                MenuAction::Toggle(name.clone()).id(),
                menu_action::tunnel_label(name, false),
                true,
                false,
                None,
            );
            Self::append(&menu, &item, name)?;
            tunnel_items.push((name.clone(), item));
        }

        for notice in notices {
            let item = MenuItem::new(notice, false, None);
            Self::append(&menu, &item, notice)?;
        }

        Self::append(&menu, &PredefinedMenuItem::separator(), "separator")?;

        for action in [MenuAction::Refresh, MenuAction::OpenConfigDir, MenuAction::Quit] {
            let item = MenuItem::with_id(action.id(), action.label(), true, None);
            Self::append(&menu, &item, action.label())?;
        }

        Ok((menu, tunnel_items))
    }

    #[track_caller]
    fn append(menu: &Menu, item: &dyn tray_icon::menu::IsMenuItem, what: &str) -> AppResult<()> {
        menu.append(item).map_err(|e| AppError::TrayError {
            reason: format!("Failed to add {} menu item: {}", what, e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Render the icon for `state` in memory.
    #[track_caller]
    fn load_icon(state: TrayIconState) -> AppResult<Icon> {
        let rgba = status_icon::render(state);
        let (width, height) = (rgba.width(), rgba.height());

        Icon::from_rgba(rgba.into_raw(), width, height).map_err(|e| AppError::TrayError {
            reason: format!("Failed to create icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
