//! Layered configuration: files and environment

use std::sync::Mutex;
use tempfile::TempDir;
use veepiaci::config::ConfigLoader;

/// Serializes tests that touch `VEEPIACI__*` variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    for (key, value) in vars {
        std::env::set_var(key, value);
    }
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));
    for (key, _) in vars {
        std::env::remove_var(key);
    }
    if let Err(panic) = outcome {
        std::panic::resume_unwind(panic);
    }
}

#[test]
fn test_environment_overrides_local_file() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("veepiaci.toml"),
        "[scan]\nchunk_size = 8192\nfollow_symlinks = true\n",
    )
    .unwrap();

    with_env(&[("VEEPIACI__SCAN__CHUNK_SIZE", "65536")], || {
        let config = ConfigLoader::load(temp_dir.path()).unwrap();
        assert_eq!(config.scan.chunk_size, 65536);
        assert!(config.scan.follow_symlinks);
    });
}

#[test]
fn test_environment_sets_verify_settings() {
    let temp_dir = TempDir::new().unwrap();
    with_env(
        &[
            ("VEEPIACI__SETTINGS__CHECKSUM_FILE", "/isos/disc.md5"),
            ("VEEPIACI__SETTINGS__DIRECTORY", "/isos/disc"),
        ],
        || {
            let config = ConfigLoader::load(temp_dir.path()).unwrap();
            assert!(config.settings.is_complete());
        },
    );
}

#[test]
fn test_explicit_file_must_exist() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let temp_dir = TempDir::new().unwrap();
    assert!(ConfigLoader::load_from_file(&temp_dir.path().join("missing.toml")).is_err());
}

#[test]
fn test_defaults_without_any_file() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let temp_dir = TempDir::new().unwrap();
    let config = ConfigLoader::load(temp_dir.path()).unwrap();
    assert_eq!(config.scan.chunk_size, 4096);
    assert_eq!(config.logging.level, "warn");
}
