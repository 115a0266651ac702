//! Configuration loading facade.

use crate::config::merge::merge_policy;
use crate::config::sources::{global_file, local_file};
use crate::config::VeepiaciConfig;
use config::{ConfigBuilder, ConfigError, Environment, File};
use std::path::{Path, PathBuf};

/// Prefix of environment overrides, e.g. `VEEPIACI__SCAN__CHUNK_SIZE=65536`
pub const ENV_PREFIX: &str = "VEEPIACI";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a run started in `working_dir`.
    ///
    /// Precedence (lowest to highest): defaults, global file, `veepiaci.toml`
    /// in `working_dir`, environment.
    pub fn load(working_dir: &Path) -> Result<VeepiaciConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = local_file::add_to_builder(builder, working_dir)?;
        Self::finish(builder)
    }

    /// Load configuration from one explicit file; only the environment overrides it.
    pub fn load_from_file(path: &Path) -> Result<VeepiaciConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?.add_source(File::from(path).required(true));
        Self::finish(builder)
    }

    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    fn finish(
        builder: ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<VeepiaciConfig, ConfigError> {
        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
