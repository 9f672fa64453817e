use super::FakeRunner;
use crate::{
    ConfigScanner, InterfaceProbe, ScanOutcome, ToggleAction, ToggleCommand, TunnelError,
    TunnelManager, TunnelToggler,
};

use std::{fs, path::Path, sync::Arc};

use tempfile::TempDir;

#[allow(clippy::unwrap_used)]
fn fixture(configs: &[&str], up: &[&str]) -> (TempDir, TempDir) {
    let config_dir = tempfile::tempdir().unwrap();
    let net_dir = tempfile::tempdir().unwrap();
    for name in configs {
        fs::write(config_dir.path().join(format!("{name}.conf")), "").unwrap();
    }
    for name in up {
        fs::create_dir(net_dir.path().join(name)).unwrap();
    }
    (config_dir, net_dir)
}

fn manager_with(config_dir: &Path, net_dir: &Path, runner: Arc<FakeRunner>) -> TunnelManager {
    TunnelManager::from_parts(
        ConfigScanner::new(config_dir),
        InterfaceProbe::new(net_dir),
        TunnelToggler::with_runner(ToggleCommand::default(), runner),
    )
}

/// WHAT: No tunnels are known before the first scan
/// WHY: Construction must not touch the filesystem
#[test]
fn given_new_manager_when_not_scanned_then_no_tunnels() {
    let manager = TunnelManager::new("/nonexistent", "/nonexistent", ToggleCommand::default());

    assert!(manager.tunnels().is_empty());
    assert!(manager.poll().entries().is_empty());
}

/// WHAT: Active tunnel is brought down
/// WHY: Toggle must flip based on the live interface state
#[test]
#[allow(clippy::unwrap_used)]
fn given_active_tunnel_when_toggling_then_down_invoked() {
    // Given: wg0 is configured and up
    let (config_dir, net_dir) = fixture(&["wg0", "wg1"], &["wg0"]);
    let runner = Arc::new(FakeRunner::exiting(0, ""));
    let mut manager = manager_with(config_dir.path(), net_dir.path(), runner.clone());
    manager.rescan();

    // When: Toggling wg0
    let report = manager.toggle("wg0").unwrap();

    // Then: `down` was issued
    assert_eq!(report.action, ToggleAction::Down);
    assert_eq!(runner.calls(), vec![vec!["sudo", "wg-quick", "down", "wg0"]]);
}

/// WHAT: Inactive tunnel is brought up
/// WHY: Toggle must flip based on the live interface state
#[test]
#[allow(clippy::unwrap_used)]
fn given_inactive_tunnel_when_toggling_then_up_invoked() {
    let (config_dir, net_dir) = fixture(&["wg0", "wg1"], &["wg0"]);
    let runner = Arc::new(FakeRunner::exiting(0, ""));
    let mut manager = manager_with(config_dir.path(), net_dir.path(), runner.clone());
    manager.rescan();

    let report = manager.toggle("wg1").unwrap();

    assert_eq!(report.action, ToggleAction::Up);
    assert_eq!(runner.calls(), vec![vec!["sudo", "wg-quick", "up", "wg1"]]);
}

/// WHAT: Names outside the scanned list are refused
/// WHY: Only configured tunnels may be toggled
#[test]
fn given_unknown_tunnel_when_toggling_then_refused_without_spawning() {
    let (config_dir, net_dir) = fixture(&["wg0"], &[]);
    let runner = Arc::new(FakeRunner::exiting(0, ""));
    let mut manager = manager_with(config_dir.path(), net_dir.path(), runner.clone());
    manager.rescan();

    let result = manager.toggle("wg9");

    assert!(matches!(result, Err(TunnelError::UnknownTunnel { .. })));
    assert!(runner.calls().is_empty());
}

/// WHAT: Rescan replaces the tunnel list wholesale
/// WHY: Deleted configs must disappear from the menu
#[test]
#[allow(clippy::unwrap_used)]
fn given_config_removed_when_rescanning_then_list_replaced() {
    // Given: Two configs scanned
    let (config_dir, net_dir) = fixture(&["wg0", "wg1"], &[]);
    let mut manager = manager_with(
        config_dir.path(),
        net_dir.path(),
        Arc::new(FakeRunner::exiting(0, "")),
    );
    assert_eq!(manager.rescan().tunnels(), ["wg0", "wg1"]);

    // When: One is deleted and another added
    fs::remove_file(config_dir.path().join("wg0.conf")).unwrap();
    fs::write(config_dir.path().join("alpha.conf"), "").unwrap();
    manager.rescan();

    // Then: New list only
    assert_eq!(manager.tunnels(), ["alpha", "wg1"]);
}

/// WHAT: Poll reports live status of scanned tunnels
/// WHY: Drives menu labels and the tray icon
#[test]
fn given_scanned_tunnels_when_polling_then_status_per_tunnel() {
    let (config_dir, net_dir) = fixture(&["wg0", "wg1"], &["wg1"]);
    let mut manager = manager_with(
        config_dir.path(),
        net_dir.path(),
        Arc::new(FakeRunner::exiting(0, "")),
    );
    manager.rescan();

    let snapshot = manager.poll();

    assert_eq!(snapshot.active_count(), 1);
    assert_eq!(
        snapshot.status_of("wg1").map(|s| s.is_active()),
        Some(true)
    );
}

/// WHAT: A failed scan leaves an empty list and keeps the outcome
/// WHY: The UI shows the notice and nothing is toggleable
#[test]
#[allow(clippy::unwrap_used)]
fn given_missing_config_dir_when_rescanning_then_empty_and_reported() {
    let net_dir = tempfile::tempdir().unwrap();
    let missing = net_dir.path().join("wireguard");
    let mut manager = manager_with(&missing, net_dir.path(), Arc::new(FakeRunner::exiting(0, "")));

    manager.rescan();

    assert_eq!(manager.last_scan(), &ScanOutcome::DirectoryMissing(missing));
    assert!(manager.tunnels().is_empty());
    assert!(matches!(
        manager.toggle("wg0"),
        Err(TunnelError::UnknownTunnel { .. })
    ));
}
