//! Manifest format detection
//!
//! Detection is an ordered table of `(signature, format, encoding)` rules. The
//! first rule whose signature appears on line 1 wins; no match falls back to
//! [`GENERIC_RULE`].

use encoding_rs::{Encoding, UTF_8_INIT, WINDOWS_1252, WINDOWS_1252_INIT};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Known checksum file layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestFormat {
    /// UTF-8 `<digest> <path>` lines after a three line header
    Generic,
    /// Files written by UltraISO: same layout, Western code page text
    UltraIso,
}

impl ManifestFormat {
    pub fn display_name(&self) -> &'static str {
        match self {
            ManifestFormat::Generic => "Generic",
            ManifestFormat::UltraIso => "UltraISO",
        }
    }

    /// Lines reserved for header metadata before the first entry
    pub fn header_lines(&self) -> usize {
        match self {
            ManifestFormat::Generic | ManifestFormat::UltraIso => 3,
        }
    }

    /// Text encoding the whole file is decoded with, as recorded in its rule
    pub fn encoding(&self) -> &'static Encoding {
        FORMAT_RULES
            .iter()
            .chain(std::iter::once(&GENERIC_RULE))
            .find(|rule| rule.format == *self)
            .map(|rule| rule.encoding)
            .unwrap_or(GENERIC_RULE.encoding)
    }
}

impl fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A first-line signature selecting a format and its text encoding
#[derive(Debug, Clone, Copy)]
pub struct FormatRule {
    pub signature: &'static str,
    pub format: ManifestFormat,
    pub encoding: &'static Encoding,
}

/// Detection rules, evaluated in order
pub static FORMAT_RULES: &[FormatRule] = &[FormatRule {
    signature: "UltraISO",
    format: ManifestFormat::UltraIso,
    encoding: &WINDOWS_1252_INIT,
}];

/// Used when no rule matches
pub static GENERIC_RULE: FormatRule = FormatRule {
    signature: "",
    format: ManifestFormat::Generic,
    encoding: &UTF_8_INIT,
};

/// Encoding used to sniff line 1. Every byte value decodes, so sniffing never fails.
pub fn sniff_encoding() -> &'static Encoding {
    WINDOWS_1252
}

/// Pick the rule for a manifest from the raw bytes of its first line
pub fn detect_rule(first_line: &[u8]) -> &'static FormatRule {
    let (line, _) = sniff_encoding().decode_without_bom_handling(first_line);
    FORMAT_RULES
        .iter()
        .find(|rule| line.contains(rule.signature))
        .unwrap_or(&GENERIC_RULE)
}

pub fn detect_format(first_line: &[u8]) -> ManifestFormat {
    detect_rule(first_line).format
}
