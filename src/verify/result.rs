//! Outcome of one verification run

use serde::Serialize;

/// Classification of every path that did not verify cleanly.
///
/// A path is in at most one list. `success` holds exactly when all three are empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    mismatches: Vec<String>,
    missing_files: Vec<String>,
    additional_files: Vec<String>,
    success: bool,
}

impl VerificationResult {
    pub fn new(
        mismatches: Vec<String>,
        missing_files: Vec<String>,
        additional_files: Vec<String>,
    ) -> Self {
        let success =
            mismatches.is_empty() && missing_files.is_empty() && additional_files.is_empty();
        Self {
            mismatches,
            missing_files,
            additional_files,
            success,
        }
    }

    /// Files present on both sides whose content could not be confirmed
    pub fn mismatches(&self) -> &[String] {
        &self.mismatches
    }

    /// Manifest entries with no file on disk
    pub fn missing_files(&self) -> &[String] {
        &self.missing_files
    }

    /// Files on disk the manifest does not mention
    pub fn additional_files(&self) -> &[String] {
        &self.additional_files
    }

    pub fn success(&self) -> bool {
        self.success
    }

    /// Number of paths that failed in any way
    pub fn problem_count(&self) -> usize {
        self.mismatches.len() + self.missing_files.len() + self.additional_files.len()
    }
}
