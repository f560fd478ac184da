//! String-level path name helpers.

use std::path::{MAIN_SEPARATOR_STR, Path};

/// Last element of `path`, ignoring trailing separators.
///
/// `""` becomes `"."`; a path made only of separators becomes the separator.
pub fn basename(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    match Path::new(path).file_name() {
        Some(name) => name.to_string_lossy().to_string(),
        None if path.chars().all(std::path::is_separator) => MAIN_SEPARATOR_STR.to_string(),
        None => path.to_string(),
    }
}

/// Everything but the last element of `path`.
///
/// A bare name yields `"."`; the root stays the root.
pub fn dirname(path: &str) -> String {
    match Path::new(path).parent() {
        Some(parent) if parent.as_os_str().is_empty() => ".".to_string(),
        Some(parent) => parent.to_string_lossy().to_string(),
        None if path.is_empty() => ".".to_string(),
        None => path.to_string(),
    }
}

/// Extension of the last element including the dot, or `""`.
pub fn extname(path: &str) -> String {
    Path::new(path)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
