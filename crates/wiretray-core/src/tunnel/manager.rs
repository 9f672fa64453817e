use crate::{
    CoreResult, TunnelError,
    tunnel::{
        ConfigScanner, InterfaceProbe, ScanOutcome, StatusSnapshot, ToggleAction, ToggleCommand,
        ToggleReport, TunnelToggler,
    },
};

use std::{panic::Location, path::Path};

use error_location::ErrorLocation;
use tracing::{info, instrument};

/// Scans, polls, and toggles the configured tunnels.
///
/// Holds the tunnel list from the last [`rescan`](Self::rescan); the list is
/// replaced wholesale on every rescan and statuses are never cached.
#[derive(Debug, Clone)]
pub struct TunnelManager {
    scanner: ConfigScanner,
    probe: InterfaceProbe,
    toggler: TunnelToggler,
    last_scan: ScanOutcome,
}

impl TunnelManager {
    /// Create a manager that spawns real processes.
    ///
    /// No scan is performed until [`rescan`](Self::rescan) is called.
    pub fn new<C: AsRef<Path>, I: AsRef<Path>>(
        config_dir: C,
        interface_dir: I,
        command: ToggleCommand,
    ) -> Self {
        Self::from_parts(
            ConfigScanner::new(config_dir),
            InterfaceProbe::new(interface_dir),
            TunnelToggler::new(command),
        )
    }

    /// Assemble a manager from its components.
    pub fn from_parts(
        scanner: ConfigScanner,
        probe: InterfaceProbe,
        toggler: TunnelToggler,
    ) -> Self {
        Self {
            scanner,
            probe,
            toggler,
            last_scan: ScanOutcome::Tunnels(Vec::new()),
        }
    }

    /// Directory scanned for tunnel definitions.
    pub fn config_dir(&self) -> &Path {
        self.scanner.dir()
    }

    /// Re-read the configuration directory, replacing the cached list.
    #[instrument(skip(self))]
    pub fn rescan(&mut self) -> &ScanOutcome {
        self.last_scan = self.scanner.scan();
        info!(
            count = self.last_scan.tunnels().len(),
            ok = self.last_scan.is_ok(),
            "Tunnel list refreshed"
        );
        &self.last_scan
    }

    /// Outcome of the most recent scan.
    pub fn last_scan(&self) -> &ScanOutcome {
        &self.last_scan
    }

    /// Tunnel names from the most recent scan.
    pub fn tunnels(&self) -> &[String] {
        self.last_scan.tunnels()
    }

    /// Probe every known tunnel.
    pub fn poll(&self) -> StatusSnapshot {
        self.probe.snapshot(self.tunnels())
    }

    /// Bring `name` down if it is up, otherwise up. Blocks on the subprocess.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn toggle(&self, name: &str) -> CoreResult<ToggleReport> {
        if !self.tunnels().iter().any(|t| t == name) {
            return Err(TunnelError::UnknownTunnel {
                name: name.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let action = ToggleAction::flip(self.probe.status(name).is_active());
        self.toggler.run(action, name)
    }
}
