use super::FakeRunner;
use crate::{
    SystemRunner, ToggleAction, ToggleCommand, TunnelError, TunnelToggler, validate_tunnel_name,
};

use std::sync::Arc;

/// WHAT: Default command line is `sudo wg-quick <action> <name>`
/// WHY: Matches the privileged tool invocation users expect
#[test]
fn given_default_command_when_building_argv_then_sudo_wg_quick_template() {
    let command = ToggleCommand::default();

    assert_eq!(
        command.argv(ToggleAction::Up, "wg0"),
        vec!["sudo", "wg-quick", "up", "wg0"]
    );
    assert_eq!(
        command.argv(ToggleAction::Down, "wg0"),
        vec!["sudo", "wg-quick", "down", "wg0"]
    );
}

/// WHAT: An empty elevation prefix runs the program directly
/// WHY: Setups with polkit or setcap do not need sudo
#[test]
fn given_no_elevation_when_building_argv_then_program_first() {
    let command = ToggleCommand {
        elevate: Vec::new(),
        program: "wg-quick".to_string(),
    };

    assert_eq!(
        command.argv(ToggleAction::Up, "home"),
        vec!["wg-quick", "up", "home"]
    );
}

/// WHAT: Active tunnels are brought down, inactive ones up
/// WHY: Toggle semantics
#[test]
fn given_current_state_when_flipping_then_opposite_action() {
    assert_eq!(ToggleAction::flip(true), ToggleAction::Down);
    assert_eq!(ToggleAction::flip(false), ToggleAction::Up);
    assert_eq!(ToggleAction::Down.to_string(), "down");
}

/// WHAT: Zero exit status is a success with no error
/// WHY: Nothing should be surfaced to the user
#[test]
#[allow(clippy::unwrap_used)]
fn given_zero_exit_when_toggling_then_report_returned() {
    // Given: Runner that exits 0
    let runner = Arc::new(FakeRunner::exiting(0, ""));
    let toggler = TunnelToggler::with_runner(ToggleCommand::default(), runner.clone());

    // When: Bringing wg0 up
    let report = toggler.run(ToggleAction::Up, "wg0").unwrap();

    // Then: Report matches and the command line was issued once
    assert_eq!(report.tunnel, "wg0");
    assert_eq!(report.action, ToggleAction::Up);
    assert_eq!(runner.calls(), vec![vec!["sudo", "wg-quick", "up", "wg0"]]);
}

/// WHAT: Non-zero exit surfaces stderr unchanged
/// WHY: The tool's own message is the most useful diagnostic
#[test]
#[allow(clippy::panic)]
fn given_nonzero_exit_when_toggling_then_stderr_passed_through_verbatim() {
    // Given: Runner that fails with multi-line stderr
    let stderr = "wg-quick: `wg0' already exists\n  trailing detail\n";
    let runner = Arc::new(FakeRunner::exiting(1, stderr));
    let toggler = TunnelToggler::with_runner(ToggleCommand::default(), runner);

    // When: Toggling
    let result = toggler.run(ToggleAction::Up, "wg0");

    // Then: CommandFailed with exact stderr and code
    match result {
        Err(TunnelError::CommandFailed {
            tunnel,
            code,
            stderr: captured,
            ..
        }) => {
            assert_eq!(tunnel, "wg0");
            assert_eq!(code, Some(1));
            assert_eq!(captured, stderr);
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
}

/// WHAT: Unsafe names never reach the runner
/// WHY: A name like `-h` or `../x` would change the tool's behaviour
#[test]
fn given_invalid_name_when_toggling_then_runner_not_called() {
    let runner = Arc::new(FakeRunner::exiting(0, ""));
    let toggler = TunnelToggler::with_runner(ToggleCommand::default(), runner.clone());

    for name in ["", "-h", "..", "a/b", "name with space", "abcdefghijklmnop"] {
        let result = toggler.run(ToggleAction::Up, name);
        assert!(
            matches!(result, Err(TunnelError::InvalidName { .. })),
            "{name:?} should be rejected"
        );
    }
    assert!(runner.calls().is_empty());
}

/// WHAT: Typical wg-quick names are accepted
/// WHY: Validation must not reject real configs
#[test]
fn given_valid_names_when_validating_then_accepted() {
    for name in ["wg0", "home-vpn", "mullvad_se1", "a.b", "x=y+z"] {
        assert!(validate_tunnel_name(name).is_ok(), "{name:?} should be valid");
    }
}

/// WHAT: Missing program is a spawn failure, not a command failure
/// WHY: Lets the user tell a broken install from a tool error
#[test]
fn given_missing_program_when_toggling_with_system_runner_then_spawn_failed() {
    let command = ToggleCommand {
        elevate: Vec::new(),
        program: "/nonexistent/wg-quick".to_string(),
    };
    let toggler = TunnelToggler::with_runner(command, Arc::new(SystemRunner));

    let result = toggler.run(ToggleAction::Up, "wg0");

    assert!(matches!(result, Err(TunnelError::SpawnFailed { .. })));
}

/// WHAT: Real process exit codes are interpreted
/// WHY: Exercises SystemRunner end to end
#[cfg(unix)]
#[test]
fn given_real_processes_when_toggling_then_exit_status_decides() {
    let ok = TunnelToggler::new(ToggleCommand {
        elevate: Vec::new(),
        program: "true".to_string(),
    });
    let failing = TunnelToggler::new(ToggleCommand {
        elevate: Vec::new(),
        program: "false".to_string(),
    });

    assert!(ok.run(ToggleAction::Up, "wg0").is_ok());
    assert!(matches!(
        failing.run(ToggleAction::Down, "wg0"),
        Err(TunnelError::CommandFailed { code: Some(1), .. })
    ));
}
