//! Directory diff and content verification
//!
//! One engine performs one run: walk the root, split manifest keys and
//! on-disk keys into missing / additional / intersection, then hash the
//! intersection sequentially in walk order, reporting each file as it goes.

use crate::error::VerifyError;
use crate::manifest::Manifest;
use crate::tree::hasher::{ContentHasher, FileHasher};
use crate::tree::walker::{FileEntry, Walker, WalkerConfig};
use crate::types::FileDigestSet;
use crate::verify::{VerificationObserver, VerificationResult};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Lifecycle of an engine. `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Running,
    Finished,
}

pub struct VerificationEngine<H = FileHasher> {
    manifest: Manifest,
    root: PathBuf,
    walker_config: WalkerConfig,
    hasher: H,
    state: EngineState,
}

impl VerificationEngine<FileHasher> {
    pub fn new(manifest: Manifest, root: impl Into<PathBuf>) -> Self {
        Self {
            manifest,
            root: root.into(),
            walker_config: WalkerConfig::default(),
            hasher: FileHasher::default(),
            state: EngineState::Idle,
        }
    }
}

impl<H: ContentHasher> VerificationEngine<H> {
    pub fn with_walker_config(mut self, walker_config: WalkerConfig) -> Self {
        self.walker_config = walker_config;
        self
    }

    /// Replace the content hasher used for intersected files
    pub fn with_hasher<H2: ContentHasher>(self, hasher: H2) -> VerificationEngine<H2> {
        VerificationEngine {
            manifest: self.manifest,
            root: self.root,
            walker_config: self.walker_config,
            hasher,
            state: self.state,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Run the verification, reporting progress to `observer`.
    ///
    /// Enumeration failures are returned before `on_started` is called. A file
    /// that cannot be hashed is classified as a mismatch and the run continues.
    /// Calling `run` a second time fails with [`VerifyError::AlreadyStarted`].
    pub fn run<O>(&mut self, observer: &mut O) -> Result<VerificationResult, VerifyError>
    where
        O: VerificationObserver + ?Sized,
    {
        if self.state != EngineState::Idle {
            return Err(VerifyError::AlreadyStarted);
        }
        self.state = EngineState::Running;
        let outcome = self.execute(observer);
        self.state = EngineState::Finished;
        outcome
    }

    fn execute<O>(&self, observer: &mut O) -> Result<VerificationResult, VerifyError>
    where
        O: VerificationObserver + ?Sized,
    {
        let entries = Walker::with_config(&self.root, self.walker_config.clone()).walk()?;
        let shadowed = shadowed_entries(&entries);

        let existing: HashSet<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        let missing_files: Vec<String> = self
            .manifest
            .keys()
            .filter(|key| !existing.contains(key))
            .map(str::to_string)
            .collect();

        let mut additional_files = Vec::new();
        let mut candidates = Vec::new();
        for (index, entry) in entries.iter().enumerate() {
            if shadowed.contains(&index) {
                additional_files.push(entry.name.clone());
                continue;
            }
            match self.manifest.get(&entry.key) {
                Some(expected) => candidates.push((entry, expected)),
                None => additional_files.push(entry.key.clone()),
            }
        }

        info!(
            root = %self.root.display(),
            manifest_entries = self.manifest.len(),
            files_on_disk = entries.len(),
            to_hash = candidates.len(),
            "Starting verification"
        );
        observer.on_started(&self.root);

        let mut mismatches = Vec::new();
        for (entry, expected) in candidates {
            let (digests, all_matched) = match self.hasher.hash_file(&entry.path) {
                Ok(digests) => {
                    let matched = digests_match(expected, &digests);
                    (digests, matched)
                }
                Err(e) => {
                    warn!(path = %entry.key, error = %e, "Could not hash file, counting it as a mismatch");
                    (FileDigestSet::new(), false)
                }
            };

            if !all_matched {
                mismatches.push(entry.key.clone());
            }
            debug!(path = %entry.key, matched = all_matched, "File checked");
            observer.on_file_checked(&entry.key, &digests, all_matched);
        }

        let result = VerificationResult::new(mismatches, missing_files, additional_files);
        info!(
            success = result.success(),
            mismatches = result.mismatches().len(),
            missing = result.missing_files().len(),
            additional = result.additional_files().len(),
            "Verification finished"
        );
        observer.on_finished(&result);
        Ok(result)
    }
}

/// Every recorded algorithm must be present in `computed` with an equal digest
fn digests_match(expected: &FileDigestSet, computed: &FileDigestSet) -> bool {
    expected
        .iter()
        .all(|(algorithm, digest)| computed.get(algorithm) == Some(digest))
}

/// Two on-disk names can normalize to the same key (one composed, one
/// decomposed). One of them stands for the key: the file whose name already
/// is the key, otherwise the bytewise smallest name. The indices of the others
/// are returned; they are reported as additional under their on-disk names.
fn shadowed_entries(entries: &[FileEntry]) -> HashSet<usize> {
    let mut chosen: HashMap<&str, usize> = HashMap::new();
    for (index, entry) in entries.iter().enumerate() {
        match chosen.entry(entry.key.as_str()) {
            Entry::Vacant(slot) => {
                slot.insert(index);
            }
            Entry::Occupied(mut slot) => {
                if collision_rank(entry) < collision_rank(&entries[*slot.get()]) {
                    slot.insert(index);
                }
            }
        }
    }

    let chosen: HashSet<usize> = chosen.into_values().collect();
    (0..entries.len())
        .filter(|index| !chosen.contains(index))
        .inspect(|index| {
            let entry = &entries[*index];
            warn!(
                path = %entry.path.display(),
                key = %entry.key,
                "File name normalizes to the same key as another file; reporting it as additional"
            );
        })
        .collect()
}

fn collision_rank(entry: &FileEntry) -> (bool, &str) {
    (entry.name != entry.key, entry.name.as_str())
}
