use std::path::{Path, PathBuf};

use tracing::{instrument, trace};

/// Interface state derived from the kernel's network interface listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TunnelStatus {
    /// An interface with the tunnel's name exists.
    Active,
    /// No interface with the tunnel's name exists.
    Inactive,
}

impl TunnelStatus {
    /// Whether the interface is up.
    pub fn is_active(self) -> bool {
        matches!(self, TunnelStatus::Active)
    }
}

/// Status of a single tunnel at poll time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Tunnel name.
    pub name: String,
    /// Status observed during the poll.
    pub status: TunnelStatus,
}

/// Result of one poll over every known tunnel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    entries: Vec<StatusEntry>,
}

impl StatusSnapshot {
    /// Per-tunnel statuses, in scan order.
    pub fn entries(&self) -> &[StatusEntry] {
        &self.entries
    }

    /// Whether at least one tunnel is active.
    pub fn any_active(&self) -> bool {
        self.entries.iter().any(|e| e.status.is_active())
    }

    /// Number of active tunnels.
    pub fn active_count(&self) -> usize {
        self.entries.iter().filter(|e| e.status.is_active()).count()
    }

    /// Status recorded for `name`, if it was polled.
    pub fn status_of(&self, name: &str) -> Option<TunnelStatus> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.status)
    }
}

/// Checks for `<interface_dir>/<name>`, `/sys/class/net` on Linux.
#[derive(Debug, Clone)]
pub struct InterfaceProbe {
    interface_dir: PathBuf,
}

impl InterfaceProbe {
    /// Create a probe rooted at `interface_dir`.
    pub fn new<P: AsRef<Path>>(interface_dir: P) -> Self {
        Self {
            interface_dir: interface_dir.as_ref().to_path_buf(),
        }
    }

    /// Check a single tunnel. Recomputed on every call.
    pub fn status(&self, name: &str) -> TunnelStatus {
        let path = self.interface_dir.join(name);
        let status = if path.exists() {
            TunnelStatus::Active
        } else {
            TunnelStatus::Inactive
        };
        trace!(tunnel = name, ?status, "Interface probed");
        status
    }

    /// Check every tunnel in `names`.
    #[instrument(skip_all, fields(count = names.len()))]
    pub fn snapshot(&self, names: &[String]) -> StatusSnapshot {
        let entries = names
            .iter()
            .map(|name| StatusEntry {
                name: name.clone(),
                status: self.status(name),
            })
            .collect();

        StatusSnapshot { entries }
    }
}
