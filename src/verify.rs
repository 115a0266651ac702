//! Verification of a directory tree against a checksum manifest
//!
//! [`verify`] is the plain synchronous form; [`verify_with_observer`] also
//! reports `Started`, one `FileChecked` per hashed file, then `Finished`.
//! For a non-blocking run see [`crate::runner::AsyncRunner`].

mod engine;
mod observer;
mod result;

pub use engine::{EngineState, VerificationEngine};
pub use observer::{dispatch, NoopObserver, ObserverFn, SharedObserver, VerificationObserver};
pub use result::VerificationResult;

use crate::error::VerifyError;
use crate::manifest::Manifest;
use std::path::Path;

/// Verify `root_directory` against `manifest` without progress reporting
pub fn verify(manifest: Manifest, root_directory: &Path) -> Result<VerificationResult, VerifyError> {
    verify_with_observer(manifest, root_directory, &mut NoopObserver)
}

/// Verify `root_directory` against `manifest`, reporting each step to `observer`
pub fn verify_with_observer<O>(
    manifest: Manifest,
    root_directory: &Path,
    observer: &mut O,
) -> Result<VerificationResult, VerifyError>
where
    O: VerificationObserver + ?Sized,
{
    VerificationEngine::new(manifest, root_directory).run(observer)
}
