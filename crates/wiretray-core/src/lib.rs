//! WireTray Core Library
//!
//! Toolkit-independent WireGuard tunnel discovery, status probing, and
//! `wg-quick` invocation.
//!
//! # Example
//!
//! ```no_run
//! use wiretray_core::{CoreResult, ToggleCommand, TunnelManager};
//!
//! fn main() -> CoreResult<()> {
//!     let mut manager = TunnelManager::new("/etc/wireguard", "/sys/class/net", ToggleCommand::default());
//!
//!     manager.rescan();
//!     for entry in manager.poll().entries() {
//!         println!("{} active={}", entry.name, entry.status.is_active());
//!     }
//!
//!     let report = manager.toggle("wg0")?;
//!     println!("Brought {} {}", report.tunnel, report.action);
//!     Ok(())
//! }
//! ```

mod error;
mod tunnel;

pub use {
    error::Result as CoreResult,
    error::TunnelError,
    tunnel::{
        CommandOutput, CommandRunner, ConfigScanner, InterfaceProbe, ScanOutcome, StatusEntry,
        StatusSnapshot, SystemRunner, ToggleAction, ToggleCommand, ToggleReport, TunnelManager,
        TunnelStatus, TunnelToggler, validate_tunnel_name,
    },
};

/// File suffix identifying a WireGuard tunnel definition.
pub const CONFIG_SUFFIX: &str = ".conf";

/// Default directory scanned for tunnel definitions.
pub const DEFAULT_CONFIG_DIR: &str = "/etc/wireguard";

/// Default directory where the kernel exposes network interfaces.
pub const DEFAULT_INTERFACE_DIR: &str = "/sys/class/net";
