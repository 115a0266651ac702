//! Relative path keys and Unicode normalization

use std::path::{Component, Path};
use unicode_normalization::{is_nfc, UnicodeNormalization};

/// Normalize a path key to NFC (Canonical Composition)
///
/// Manifests and filesystems disagree on whether accented characters are
/// stored composed or decomposed; every key is compared and displayed in NFC.
pub fn normalize_key(key: &str) -> String {
    if is_nfc(key) {
        key.to_string()
    } else {
        key.nfc().collect()
    }
}

/// The on-disk name of `path` relative to `root`, before normalization
///
/// Components are joined with `/` regardless of the host separator. Returns
/// `None` when `path` is not under `root` or is `root` itself.
pub fn relative_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(name) => parts.push(name.to_string_lossy()),
            Component::CurDir => {}
            _ => return None,
        }
    }

    if parts.is_empty() {
        return None;
    }

    Some(parts.join("/"))
}

/// Build the manifest key for `path` relative to `root`: [`relative_name`] in NFC
pub fn relative_key(root: &Path, path: &Path) -> Option<String> {
    relative_name(root, path).map(|name| normalize_key(&name))
}
