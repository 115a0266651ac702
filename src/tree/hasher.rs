//! Streaming content hashing for on-disk files

use crate::error::HashError;
use crate::types::{FileDigestSet, HashAlgorithm};
use md5::{Digest, Md5};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Default read buffer size
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Anything that can produce the digests of a file on disk.
///
/// The verification engine only talks to this trait, so a run can be driven
/// by a hasher other than [`FileHasher`].
pub trait ContentHasher {
    fn hash_file(&self, path: &Path) -> Result<FileDigestSet, HashError>;
}

/// Running state for one algorithm
enum AlgorithmState {
    Md5(Md5),
}

impl AlgorithmState {
    fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Md5 => AlgorithmState::Md5(Md5::new()),
        }
    }

    fn update(&mut self, bytes: &[u8]) {
        match self {
            AlgorithmState::Md5(hasher) => hasher.update(bytes),
        }
    }

    fn finalize_hex(self) -> String {
        match self {
            AlgorithmState::Md5(hasher) => hex::encode(hasher.finalize()),
        }
    }
}

/// Hashes files in fixed-size chunks so memory stays bounded regardless of file size.
#[derive(Debug, Clone)]
pub struct FileHasher {
    algorithms: Vec<HashAlgorithm>,
    chunk_size: usize,
}

impl Default for FileHasher {
    fn default() -> Self {
        Self {
            algorithms: HashAlgorithm::ALL.to_vec(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl FileHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different read buffer size. Zero is bumped to one byte.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Restrict the set of algorithms computed per file
    pub fn with_algorithms(mut self, algorithms: &[HashAlgorithm]) -> Self {
        self.algorithms = algorithms.to_vec();
        self
    }

    pub fn algorithms(&self) -> &[HashAlgorithm] {
        &self.algorithms
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Hash everything `reader` yields, computing all configured algorithms in one pass.
    pub fn hash_reader<R: Read>(&self, mut reader: R) -> std::io::Result<FileDigestSet> {
        let mut states: Vec<(HashAlgorithm, AlgorithmState)> = self
            .algorithms
            .iter()
            .map(|algorithm| (*algorithm, AlgorithmState::new(*algorithm)))
            .collect();
        let mut buffer = vec![0u8; self.chunk_size];

        loop {
            let read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            for (_, state) in states.iter_mut() {
                state.update(&buffer[..read]);
            }
        }

        Ok(states
            .into_iter()
            .map(|(algorithm, state)| (algorithm, state.finalize_hex()))
            .collect())
    }
}

impl ContentHasher for FileHasher {
    fn hash_file(&self, path: &Path) -> Result<FileDigestSet, HashError> {
        let file = File::open(path).map_err(|source| HashError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.hash_reader(file).map_err(|source| HashError::Read {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Hash a file with the default algorithms and chunk size
pub fn hash_file(path: &Path) -> Result<FileDigestSet, HashError> {
    FileHasher::default().hash_file(path)
}
