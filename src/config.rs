//! Configuration System
//!
//! Layered configuration: built-in defaults, then the user's global config
//! file, then `veepiaci.toml` in the working directory, then `VEEPIACI__*`
//! environment variables. Later layers win.

use crate::logging::LoggingConfig;
use crate::tree::hasher::DEFAULT_CHUNK_SIZE;
use crate::tree::walker::WalkerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod loader;
mod merge;
mod sources;

pub use loader::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VeepiaciConfig {
    /// Remembered inputs of a verification run
    #[serde(default)]
    pub settings: VerifySettings,

    /// Directory scan and hashing settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The paths a verification run needs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifySettings {
    /// Checksum file to verify against
    #[serde(default)]
    pub checksum_file: Option<PathBuf>,

    /// Directory whose files are checked
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Where to store the verification report
    #[serde(default)]
    pub result_file: Option<PathBuf>,
}

impl VerifySettings {
    /// A run can start once both the checksum file and the directory are set
    pub fn is_complete(&self) -> bool {
        self.checksum_file.is_some() && self.directory.is_some()
    }

    /// Overlay explicitly given values on top of these settings
    pub fn overridden_by(
        &self,
        checksum_file: Option<PathBuf>,
        directory: Option<PathBuf>,
        result_file: Option<PathBuf>,
    ) -> Self {
        Self {
            checksum_file: checksum_file.or_else(|| self.checksum_file.clone()),
            directory: directory.or_else(|| self.directory.clone()),
            result_file: result_file.or_else(|| self.result_file.clone()),
        }
    }

    fn validate(&self) -> Result<(), String> {
        let fields = [
            ("checksum_file", &self.checksum_file),
            ("directory", &self.directory),
            ("result_file", &self.result_file),
        ];
        for (name, value) in fields {
            if value.as_deref().is_some_and(|p: &Path| p.as_os_str().is_empty()) {
                return Err(format!("{} cannot be an empty path", name));
            }
        }
        Ok(())
    }
}

/// Scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Read buffer size used while hashing, in bytes
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Follow symbolic links while walking the directory
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Check files in sorted path order instead of filesystem order
    #[serde(default = "default_true")]
    pub sort_entries: bool,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_true() -> bool {
    true
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            follow_symlinks: false,
            sort_entries: default_true(),
        }
    }
}

impl ScanConfig {
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            follow_symlinks: self.follow_symlinks,
            sort_entries: self.sort_entries,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Settings(String),
    Scan(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Settings(msg) => write!(f, "Settings: {}", msg),
            ValidationError::Scan(msg) => write!(f, "Scan: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl VeepiaciConfig {
    /// Validate the entire configuration, collecting every problem
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.settings.validate() {
            errors.push(ValidationError::Settings(e));
        }
        if let Err(e) = self.scan.validate() {
            errors.push(ValidationError::Scan(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
