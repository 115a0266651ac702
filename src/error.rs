//! Error types for manifest parsing, hashing, and verification.

use std::path::PathBuf;
use thiserror::Error;

/// Manifest loading errors. All of them are fatal for the manifest in question.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read checksum file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Checksum file {path:?} is not valid {encoding} text")]
    Decode { path: PathBuf, encoding: &'static str },

    #[error("Checksum file {path:?} ends inside its header: expected {expected} header lines, found {found}")]
    TruncatedHeader {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("Malformed line {line} in checksum file {path:?}: {reason}")]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Invalid manifest entry {key:?}: {reason}")]
    InvalidEntry { key: String, reason: String },
}

/// Failure to hash a single file
#[derive(Debug, Error)]
pub enum HashError {
    #[error("Failed to open {path:?} for hashing: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path:?} while hashing: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Verification run errors. Raised before `Started` is emitted, or when the worker dies.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Directory {path:?} is not accessible: {source}")]
    RootUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path:?} is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("Failed to enumerate files under {path:?}: {source}")]
    DirectoryEnumeration {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Verification engine has already run")]
    AlreadyStarted,

    #[error("Verification worker failed: {0}")]
    Worker(String),
}

/// Top-level error for callers of the library and the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Verify(#[from] VerifyError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
