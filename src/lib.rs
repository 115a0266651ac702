//! Veepiaci: Checksum Manifest Verification
//!
//! Verifies that the files under a directory match a previously recorded
//! checksum file, reporting which files are correct, which changed, which
//! are missing, and which were never recorded.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod progress;
pub mod report;
pub mod runner;
pub mod tree;
pub mod types;
pub mod verify;

pub use error::{ApiError, HashError, ManifestError, VerifyError};
pub use manifest::{parse_manifest, Manifest, ManifestFormat};
pub use progress::ProgressEvent;
pub use runner::{AsyncRunner, VerificationRun};
pub use types::{FileDigestSet, HashAlgorithm};
pub use verify::{verify, verify_with_observer, VerificationObserver, VerificationResult};
