//! CLI presentation: live progress lines and final summaries.

use crate::manifest::Manifest;
use crate::report::{FAIL_MARK, PASS_MARK};
use crate::types::{FileDigestSet, HashAlgorithm};
use crate::verify::{VerificationObserver, VerificationResult};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use std::io::Write;
use std::path::Path;

/// Prints one line per event to stdout while a run progresses
pub struct ConsoleProgress<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        // Console output is best effort; a closed pipe must not abort the run.
        let _ = writeln!(self.out, "{}", text);
    }
}

impl<W: Write> VerificationObserver for ConsoleProgress<W> {
    fn on_started(&mut self, root_directory: &Path) {
        let text = format!("Starting verification in {}\u{2026}", root_directory.display());
        self.line(&text);
    }

    fn on_file_checked(&mut self, relative_path: &str, _digests: &FileDigestSet, all_matched: bool) {
        let text = match (all_matched, self.color) {
            (true, true) => format!("{} {}", PASS_MARK, relative_path.green()),
            (false, true) => format!("{} {}", FAIL_MARK, relative_path.red()),
            (true, false) => format!("{} {}", PASS_MARK, relative_path),
            (false, false) => format!("{} {}", FAIL_MARK, relative_path),
        };
        self.line(&text);
    }
}

/// Final text summary of a run
pub fn format_summary_text(result: &VerificationResult) -> String {
    let mut lines = Vec::new();
    let overall = if result.success() {
        format!("{} success", PASS_MARK)
    } else {
        format!("{} failure", FAIL_MARK)
    };
    lines.push(String::new());
    lines.push(format!("Verification finished. The overall result is: {}", overall));

    let sections = [
        ("The following files had incorrect checksums:", result.mismatches()),
        ("The following files are missing:", result.missing_files()),
        ("The following files did not have checksums:", result.additional_files()),
    ];
    for (heading, paths) in sections {
        if paths.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(heading.to_string());
        lines.extend(paths.iter().cloned());
    }

    lines.join("\n")
}

pub fn format_summary_json(result: &VerificationResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

pub fn format_manifest_text(path: &Path, manifest: &Manifest) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Path", HashAlgorithm::Md5.as_str()]);

    for (key, digests) in manifest.entries() {
        let digest = digests
            .get(&HashAlgorithm::Md5)
            .map(String::as_str)
            .unwrap_or("-");
        table.add_row(vec![key.as_str(), digest]);
    }

    format!(
        "Checksum file: {}\nFormat: {}\nEntries: {}\n{}",
        path.display(),
        manifest.format(),
        manifest.len(),
        table
    )
}

pub fn format_manifest_json(path: &Path, manifest: &Manifest) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "path": path,
        "format": manifest.format(),
        "entries": manifest.entries(),
    }))
}
