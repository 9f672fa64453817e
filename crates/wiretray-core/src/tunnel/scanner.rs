//! Discovery of tunnel definitions in the WireGuard configuration directory.

use crate::{CONFIG_SUFFIX, validate_tunnel_name};

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};

/// Result of scanning the configuration directory.
///
/// Failures are values rather than errors: the caller shows them inline and
/// carries on with an empty tunnel list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Directory was read. Names are sorted and carry no `.conf` suffix.
    Tunnels(Vec<String>),
    /// Directory does not exist.
    DirectoryMissing(PathBuf),
    /// Directory exists but the current user may not list it.
    PermissionDenied(PathBuf),
    /// Any other read failure.
    Unreadable {
        /// Directory that was scanned.
        path: PathBuf,
        /// Description of the IO failure.
        reason: String,
    },
}

impl ScanOutcome {
    /// Tunnel names found by the scan; empty when the scan failed.
    pub fn tunnels(&self) -> &[String] {
        match self {
            ScanOutcome::Tunnels(names) => names,
            _ => &[],
        }
    }

    /// Whether the directory could be read.
    pub fn is_ok(&self) -> bool {
        matches!(self, ScanOutcome::Tunnels(_))
    }

    /// Lines to show the user in place of the tunnel list.
    pub fn notices(&self) -> Vec<String> {
        match self {
            ScanOutcome::Tunnels(_) => Vec::new(),
            ScanOutcome::DirectoryMissing(path) => {
                vec![format!("Error: {} not found", path.display())]
            }
            ScanOutcome::PermissionDenied(path) => vec![
                format!("Permission Denied: {}", path.display()),
                format!("Run: sudo chmod o+rx {}", path.display()),
            ],
            ScanOutcome::Unreadable { path, reason } => {
                vec![format!("Error reading {}: {}", path.display(), reason)]
            }
        }
    }
}

/// Lists `*.conf` files in a fixed directory.
#[derive(Debug, Clone)]
pub struct ConfigScanner {
    dir: PathBuf,
}

impl ConfigScanner {
    /// Create a scanner for `dir`.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Directory this scanner reads.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Scan the directory for tunnel definitions.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn scan(&self) -> ScanOutcome {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => return self.failure(e),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => return self.failure(e),
            };

            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                debug!(file_name = ?entry.file_name(), "Skipping non UTF-8 entry");
                continue;
            };

            match tunnel_name_from_file(file_name) {
                Some(name) => names.push(name.to_string()),
                None if file_name.ends_with(CONFIG_SUFFIX) => {
                    debug!(file_name, "Skipping config with unusable tunnel name");
                }
                None => {}
            }
        }

        names.sort();

        debug!(count = names.len(), "Tunnel configurations scanned");

        ScanOutcome::Tunnels(names)
    }

    fn failure(&self, e: std::io::Error) -> ScanOutcome {
        let path = self.dir.clone();
        match e.kind() {
            ErrorKind::NotFound => {
                warn!(dir = %path.display(), "Configuration directory not found");
                ScanOutcome::DirectoryMissing(path)
            }
            ErrorKind::PermissionDenied => {
                warn!(dir = %path.display(), "Permission denied reading configuration directory");
                ScanOutcome::PermissionDenied(path)
            }
            _ => {
                warn!(dir = %path.display(), error = %e, "Failed to read configuration directory");
                ScanOutcome::Unreadable {
                    path,
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Strip the `.conf` suffix, keeping only stems usable as interface names.
pub(crate) fn tunnel_name_from_file(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(CONFIG_SUFFIX)
        .filter(|stem| validate_tunnel_name(stem).is_ok())
}
