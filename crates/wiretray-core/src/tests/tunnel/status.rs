use crate::{InterfaceProbe, TunnelStatus};

use std::fs;

/// WHAT: Existing interface path means Active, missing means Inactive
/// WHY: Interface presence is the only status signal
#[test]
#[allow(clippy::unwrap_used)]
fn given_interface_dir_when_probing_then_presence_decides_status() {
    // Given: An interface directory containing only `wg0`
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("wg0")).unwrap();
    let probe = InterfaceProbe::new(dir.path());

    // When/Then: wg0 is active, wg1 is not
    assert_eq!(probe.status("wg0"), TunnelStatus::Active);
    assert_eq!(probe.status("wg1"), TunnelStatus::Inactive);
}

/// WHAT: Status is recomputed on every probe
/// WHY: Interfaces come and go outside the app's control
#[test]
#[allow(clippy::unwrap_used)]
fn given_interface_removed_when_probing_again_then_inactive() {
    // Given: wg0 is present
    let dir = tempfile::tempdir().unwrap();
    let iface = dir.path().join("wg0");
    fs::create_dir(&iface).unwrap();
    let probe = InterfaceProbe::new(dir.path());
    assert!(probe.status("wg0").is_active());

    // When: The interface disappears
    fs::remove_dir(&iface).unwrap();

    // Then: Next probe reports Inactive
    assert_eq!(probe.status("wg0"), TunnelStatus::Inactive);
}

/// WHAT: Snapshot keeps order and aggregates active tunnels
/// WHY: The tray icon colour depends on any_active
#[test]
#[allow(clippy::unwrap_used)]
fn given_tunnel_names_when_taking_snapshot_then_entries_and_aggregate_match() {
    // Given: Two of three tunnels active
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("home")).unwrap();
    fs::create_dir(dir.path().join("wg1")).unwrap();
    let probe = InterfaceProbe::new(dir.path());
    let names = vec!["home".to_string(), "office".to_string(), "wg1".to_string()];

    // When: Taking a snapshot
    let snapshot = probe.snapshot(&names);

    // Then: Order preserved and counts correct
    let polled: Vec<&str> = snapshot.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(polled, vec!["home", "office", "wg1"]);
    assert_eq!(snapshot.status_of("office"), Some(TunnelStatus::Inactive));
    assert_eq!(snapshot.status_of("missing"), None);
    assert!(snapshot.any_active());
    assert_eq!(snapshot.active_count(), 2);
}

/// WHAT: An empty tunnel list has nothing active
/// WHY: Drives the red tray icon when no configs exist
#[test]
fn given_no_tunnels_when_taking_snapshot_then_nothing_active() {
    let probe = InterfaceProbe::new("/nonexistent/net");

    let snapshot = probe.snapshot(&[]);

    assert!(snapshot.entries().is_empty());
    assert!(!snapshot.any_active());
}
