mod manager;
mod scanner;
mod status;
mod toggle;

#[cfg(test)]
pub(crate) use scanner::tunnel_name_from_file;

pub use {
    manager::TunnelManager,
    scanner::{ConfigScanner, ScanOutcome},
    status::{InterfaceProbe, StatusEntry, StatusSnapshot, TunnelStatus},
    toggle::{
        CommandOutput, CommandRunner, SystemRunner, ToggleAction, ToggleCommand, ToggleReport,
        TunnelToggler, validate_tunnel_name,
    },
};
