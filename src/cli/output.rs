//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, VerifyError};

/// Every file matched and nothing was missing or additional
pub const EXIT_SUCCESS: i32 = 0;
/// The run completed but found problems
pub const EXIT_FAILURE: i32 = 1;
/// The run could not complete
pub const EXIT_FATAL: i32 = 2;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Manifest(err) => format!("Cannot use checksum file: {}", err),
        ApiError::Verify(VerifyError::Worker(msg)) => format!("Verification aborted: {}", msg),
        ApiError::Verify(err) => format!("Cannot verify directory: {}", err),
        other => other.to_string(),
    }
}

pub fn exit_code(success: bool) -> i32 {
    if success {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    }
}
