//! Event schema for verification progress.

use crate::types::FileDigestSet;
use crate::verify::VerificationResult;
use serde::Serialize;
use std::path::PathBuf;

/// One step of a verification run.
///
/// A run emits exactly one `Started`, then one `FileChecked` per file that
/// is both in the manifest and on disk, then exactly one `Finished`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    Started {
        root_directory: PathBuf,
    },
    FileChecked {
        relative_path: String,
        digests: FileDigestSet,
        all_digests_matched: bool,
    },
    Finished {
        result: VerificationResult,
    },
}

impl ProgressEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            ProgressEvent::Started { .. } => "started",
            ProgressEvent::FileChecked { .. } => "file_checked",
            ProgressEvent::Finished { .. } => "finished",
        }
    }
}
