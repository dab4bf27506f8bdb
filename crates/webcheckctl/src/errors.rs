//! Exit codes for webcheckctl

/// Exit code for success (every page clean)
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code when at least one page has validation errors
pub const EXIT_VALIDATION_ERRORS: i32 = 1;

/// Exit code for usage errors (nothing to validate)
pub const EXIT_USAGE: i32 = 2;

/// Exit code for general client failures
pub const EXIT_GENERAL_ERROR: i32 = 3;

/// Exit code when the daemon returns a body that cannot be read
pub const EXIT_INVALID_RESPONSE: i32 = 65;

/// Exit code when webcheckd is unavailable/unreachable
pub const EXIT_DAEMON_UNAVAILABLE: i32 = 70;

/// Map a client failure to an exit code
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<reqwest::Error>() {
        Some(e) if e.is_connect() || e.is_timeout() => EXIT_DAEMON_UNAVAILABLE,
        Some(e) if e.is_decode() => EXIT_INVALID_RESPONSE,
        _ if err.downcast_ref::<serde_json::Error>().is_some() => EXIT_INVALID_RESPONSE,
        _ => EXIT_GENERAL_ERROR,
    }
}
