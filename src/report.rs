//! Human-readable verification report
//!
//! Collects timestamped lines while a run progresses and renders them as the
//! text written to the user's result file.

use crate::error::ApiError;
use crate::types::FileDigestSet;
use crate::verify::{VerificationObserver, VerificationResult};
use chrono::{DateTime, Local};
use std::path::Path;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const PASS_MARK: &str = "\u{2705}";
pub const FAIL_MARK: &str = "\u{274c}";

#[derive(Debug, Clone)]
pub struct ReportLine {
    pub timestamp: DateTime<Local>,
    pub text: String,
}

/// Observer that builds the report line by line
#[derive(Debug, Default, Clone)]
pub struct VerificationReport {
    lines: Vec<ReportLine>,
    result: Option<VerificationResult>,
}

impl VerificationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[ReportLine] {
        &self.lines
    }

    /// The final result, once the run has finished
    pub fn result(&self) -> Option<&VerificationResult> {
        self.result.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    fn push(&mut self, text: impl Into<String>) {
        self.lines.push(ReportLine {
            timestamp: Local::now(),
            text: text.into(),
        });
    }

    fn push_section(&mut self, heading: &str, paths: &[String]) {
        if paths.is_empty() {
            return;
        }
        self.push("");
        self.push(heading);
        for path in paths {
            self.push(path.clone());
        }
    }

    /// Render every line prefixed by its timestamp
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.timestamp.format(TIMESTAMP_FORMAT).to_string());
            out.push(' ');
            out.push_str(&line.text);
            out.push('\n');
        }
        out
    }

    pub fn write_to(&self, path: &Path) -> Result<(), ApiError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.render_text())?;
        Ok(())
    }
}

impl VerificationObserver for VerificationReport {
    fn on_started(&mut self, root_directory: &Path) {
        self.push(format!(
            "Starting verification in {}\u{2026}",
            root_directory.display()
        ));
    }

    fn on_file_checked(&mut self, relative_path: &str, _digests: &FileDigestSet, all_matched: bool) {
        let mark = if all_matched { PASS_MARK } else { FAIL_MARK };
        self.push(format!("{} {}", mark, relative_path));
    }

    fn on_finished(&mut self, result: &VerificationResult) {
        let overall = if result.success() {
            format!("{} success", PASS_MARK)
        } else {
            format!("{} failure", FAIL_MARK)
        };
        self.push("");
        self.push(format!(
            "Verification finished. The overall result is: {}",
            overall
        ));
        self.push_section(
            "The following files had incorrect checksums:",
            result.mismatches(),
        );
        self.push_section("The following files are missing:", result.missing_files());
        self.push_section(
            "The following files did not have checksums:",
            result.additional_files(),
        );
        self.result = Some(result.clone());
    }
}
