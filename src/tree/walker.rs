//! Filesystem walker collecting the files under a verification root
//!
//! Symlinks to files are always entries, hashed through the link.
//! `follow_symlinks` only decides whether symlinked directories are descended.

use crate::error::VerifyError;
use crate::tree::path::{normalize_key, relative_name};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// A file found under the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Root-relative key: `/`-separated, NFC-normalized
    pub key: String,
    /// Root-relative name as stored on disk (`/`-separated, not normalized)
    pub name: String,
    /// Path on disk, as the filesystem reported it
    pub path: PathBuf,
}

/// Filesystem walker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false)
    #[serde(default)]
    pub follow_symlinks: bool,
    /// Sort entries by key so runs are reproducible across platforms (default: true)
    #[serde(default = "default_true")]
    pub sort_entries: bool,
}

fn default_true() -> bool {
    true
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            sort_entries: true,
        }
    }
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: impl Into<PathBuf>, config: WalkerConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree and collect every file
    ///
    /// Directories are never entries, so empty directories are invisible.
    /// A symlink is an entry unless it resolves to a directory; a dangling
    /// link is kept and fails later when hashed. Any walk error is fatal.
    pub fn walk(&self) -> Result<Vec<FileEntry>, VerifyError> {
        let metadata = std::fs::metadata(&self.root).map_err(|source| VerifyError::RootUnavailable {
            path: self.root.clone(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(VerifyError::NotADirectory {
                path: self.root.clone(),
            });
        }

        let mut entries = Vec::new();
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(self.config.follow_symlinks);

        for entry in walker {
            let entry = entry.map_err(|source| VerifyError::DirectoryEnumeration {
                path: self.root.clone(),
                source,
            })?;

            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }
            if file_type.is_symlink() && links_to_directory(entry.path()) {
                debug!(path = %entry.path().display(), "Not descending into symlinked directory");
                continue;
            }

            let Some(name) = relative_name(&self.root, entry.path()) else {
                continue;
            };
            entries.push(FileEntry {
                key: normalize_key(&name),
                name,
                path: entry.into_path(),
            });
        }

        if self.config.sort_entries {
            entries.sort_by(|a, b| a.key.cmp(&b.key));
        }

        debug!(root = %self.root.display(), files = entries.len(), "Directory walk complete");
        Ok(entries)
    }
}

fn links_to_directory(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}
