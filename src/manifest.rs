//! Checksum manifests
//!
//! A [`Manifest`] is the parsed record of expected per-file digests,
//! independent of the text format it was read from. It is built once and
//! never mutated afterwards.

pub mod format;
pub mod parser;

use crate::error::ManifestError;
use crate::tree::path::normalize_key;
use crate::types::{FileDigestSet, HashAlgorithm};
use serde::Serialize;
use std::collections::BTreeMap;

pub use format::{detect_format, detect_rule, FormatRule, ManifestFormat, FORMAT_RULES, GENERIC_RULE};
pub use parser::{parse_manifest, parse_manifest_bytes};

/// Expected digests keyed by root-relative, NFC-normalized path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    format: ManifestFormat,
    entries: BTreeMap<String, FileDigestSet>,
}

impl Manifest {
    /// Build a manifest from in-memory entries.
    ///
    /// Keys are normalized to NFC and digests lower-cased; later duplicates win.
    /// Every entry needs at least one digest, each valid hex of its algorithm's length.
    pub fn new<I, K>(format: ManifestFormat, entries: I) -> Result<Self, ManifestError>
    where
        I: IntoIterator<Item = (K, FileDigestSet)>,
        K: AsRef<str>,
    {
        let mut checked = BTreeMap::new();
        for (key, digests) in entries {
            let key = key.as_ref();
            if digests.is_empty() {
                return Err(ManifestError::InvalidEntry {
                    key: key.to_string(),
                    reason: "no digest recorded".to_string(),
                });
            }
            let mut lowered = FileDigestSet::new();
            for (algorithm, digest) in digests {
                let digest = digest.to_ascii_lowercase();
                if !algorithm.is_valid_digest(&digest) {
                    return Err(ManifestError::InvalidEntry {
                        key: key.to_string(),
                        reason: format!(
                            "'{}' is not a {} digest ({} hex characters)",
                            digest,
                            algorithm,
                            algorithm.hex_len()
                        ),
                    });
                }
                lowered.insert(algorithm, digest);
            }
            checked.insert(normalize_key(key), lowered);
        }
        Ok(Self {
            format,
            entries: checked,
        })
    }

    /// Build a manifest that records only MD5 digests
    pub fn from_md5<I, K, V>(format: ManifestFormat, entries: I) -> Result<Self, ManifestError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self::new(
            format,
            entries.into_iter().map(|(key, digest)| {
                let mut digests = FileDigestSet::new();
                digests.insert(HashAlgorithm::Md5, digest.into());
                (key, digests)
            }),
        )
    }

    /// Parser entry point: keys and digests are already normalized.
    pub(crate) fn from_parts(
        format: ManifestFormat,
        entries: BTreeMap<String, FileDigestSet>,
    ) -> Self {
        Self { format, entries }
    }

    pub fn format(&self) -> ManifestFormat {
        self.format
    }

    pub fn entries(&self) -> &BTreeMap<String, FileDigestSet> {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&FileDigestSet> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Paths in key order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
