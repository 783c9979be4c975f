//! CLI command implementations
//!
//! Commands return process exit codes:
//! - 0: success
//! - 2: configuration error
//! - 3: provisioning error
//! - 4: connection or bind error
//! - 5: fatal error
//! - 130: interrupted by a shutdown signal before serving

pub mod init;
pub mod provision;
pub mod serve;
pub mod validate;

use crate::domain::{StartupError, SummitError};

/// Exit code when a shutdown signal arrives before the server is up
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Exit code for an error that aborted startup
pub fn exit_code_for(error: &SummitError) -> i32 {
    match error {
        SummitError::Configuration(_) => 2,
        SummitError::StartupFailed { failures } => startup_exit_code(failures),
        SummitError::Startup(failure) => startup_exit_code(std::slice::from_ref(failure)),
        SummitError::Server(_) => 4,
        _ => 5,
    }
}

fn startup_exit_code(failures: &[StartupError]) -> i32 {
    if !failures.is_empty()
        && failures
            .iter()
            .all(|f| matches!(f, StartupError::ConfigMissing { .. }))
    {
        2
    } else if failures
        .iter()
        .any(|f| matches!(f, StartupError::NetworkUnreachable { .. }))
    {
        4
    } else {
        3
    }
}
