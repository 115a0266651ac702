//! Working-directory config file source: ./veepiaci.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_FILE: &str = "veepiaci.toml";

pub fn local_config_path(working_dir: &Path) -> PathBuf {
    working_dir.join(LOCAL_CONFIG_FILE)
}

/// Add the working-directory config file to builder if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    working_dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = local_config_path(working_dir);
    if !path.exists() {
        return Ok(builder);
    }
    Ok(builder.add_source(File::from(path.as_path()).required(false)))
}
