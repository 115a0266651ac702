//! Core value types shared across the manifest, hashing, and verification layers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Content hash algorithms a manifest can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Md5,
}

impl HashAlgorithm {
    /// Every algorithm the hasher knows how to compute.
    pub const ALL: &'static [HashAlgorithm] = &[HashAlgorithm::Md5];

    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
        }
    }

    /// Digest length in bytes
    pub fn digest_len(&self) -> usize {
        match self {
            HashAlgorithm::Md5 => 16,
        }
    }

    /// Digest length in hex characters
    pub fn hex_len(&self) -> usize {
        self.digest_len() * 2
    }

    /// Check that `digest` is lower-case hex of the right length for this algorithm.
    pub fn is_valid_digest(&self, digest: &str) -> bool {
        digest.len() == self.hex_len()
            && digest
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(HashAlgorithm::Md5),
            other => Err(format!("Unsupported hash algorithm: {}", other)),
        }
    }
}

/// Hex digests of one file, keyed by algorithm.
pub type FileDigestSet = BTreeMap<HashAlgorithm, String>;
