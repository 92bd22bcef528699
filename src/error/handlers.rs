//! Error handlers
//!
//! Reports fatal errors and maps them to process exit codes.

use crate::error::types::RelayError;
use log::error;

/// Guidance shown whenever the drive session cannot be established.
pub const REAUTH_HINT: &str =
    "Could not complete login. Check the network or log in with the drive client manually, then retry.";

/// Log a fatal pipeline error and return the exit code for it.
pub fn handle_error(err: &RelayError) -> i32 {
    error!("{}", err);
    if let RelayError::Auth(_) = err {
        error!("{}", REAUTH_HINT);
    }
    err.exit_code()
}
