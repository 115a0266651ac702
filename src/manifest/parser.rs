//! Manifest file parsing
//!
//! Two passes over the bytes: line 1 is sniffed with a decoding that accepts
//! any byte to pick the format, then the whole file is decoded with that
//! format's encoding and parsed line by line.

use crate::error::ManifestError;
use crate::manifest::format::{detect_rule, ManifestFormat};
use crate::manifest::Manifest;
use crate::tree::path::normalize_key;
use crate::types::{FileDigestSet, HashAlgorithm};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Algorithm recorded by the supported line grammar
const LINE_ALGORITHM: HashAlgorithm = HashAlgorithm::Md5;

/// Read and parse the checksum file at `path`
pub fn parse_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let bytes = std::fs::read(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let manifest = parse_manifest_bytes(&bytes, path)?;
    info!(
        path = %path.display(),
        format = %manifest.format(),
        entries = manifest.len(),
        "Checksum file loaded"
    );
    Ok(manifest)
}

/// Parse manifest content already in memory. `source` is only used in errors.
pub fn parse_manifest_bytes(bytes: &[u8], source: &Path) -> Result<Manifest, ManifestError> {
    let first_line = match bytes.iter().position(|b| *b == b'\n') {
        Some(end) => &bytes[..end],
        None => bytes,
    };
    let rule = detect_rule(first_line);
    let (format, encoding) = (rule.format, rule.encoding);
    debug!(format = %format, encoding = encoding.name(), "Detected checksum file format");

    let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
    if had_errors {
        return Err(ManifestError::Decode {
            path: source.to_path_buf(),
            encoding: encoding.name(),
        });
    }

    let entries = parse_lines(&text, format, source)?;
    Ok(Manifest::from_parts(format, entries))
}

fn parse_lines(
    text: &str,
    format: ManifestFormat,
    source: &Path,
) -> Result<BTreeMap<String, FileDigestSet>, ManifestError> {
    let mut lines = text.lines().enumerate();

    let expected = format.header_lines();
    for found in 0..expected {
        if lines.next().is_none() {
            return Err(ManifestError::TruncatedHeader {
                path: source.to_path_buf(),
                expected,
                found,
            });
        }
    }

    let mut entries = BTreeMap::new();
    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let (key, digest) = parse_entry(line).map_err(|reason| ManifestError::Parse {
            path: source.to_path_buf(),
            line: index + 1,
            reason,
        })?;

        let mut digests = FileDigestSet::new();
        digests.insert(LINE_ALGORITHM, digest);
        // Later lines for the same path replace earlier ones.
        entries.insert(key, digests);
    }

    Ok(entries)
}

/// Split `<digest> <path>` on the first space.
///
/// Paths are trimmed and lose one leading `*` (binary-mode marker). A digest
/// token with embedded spaces cannot be represented in this grammar.
fn parse_entry(line: &str) -> Result<(String, String), String> {
    let (digest, path) = line
        .split_once(' ')
        .ok_or_else(|| "expected '<digest> <path>'".to_string())?;

    let digest = digest.trim().to_ascii_lowercase();
    if !LINE_ALGORITHM.is_valid_digest(&digest) {
        return Err(format!(
            "'{}' is not a {} digest ({} hex characters)",
            digest,
            LINE_ALGORITHM,
            LINE_ALGORITHM.hex_len()
        ));
    }

    let path = path.trim();
    let path = path.strip_prefix('*').unwrap_or(path);
    if path.is_empty() {
        return Err("missing file path".to_string());
    }

    Ok((normalize_key(path), digest))
}
