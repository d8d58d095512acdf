use crate::result::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve the project root to an absolute, canonical path.
///
/// A missing or unreadable root surfaces the underlying filesystem error.
pub fn resolve_root(path: Option<&Path>) -> Result<PathBuf> {
    let base = match path {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir()?,
    };

    Ok(fs::canonicalize(base)?)
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the current platform identifier as a string
pub fn platform_string() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "linux") {
        "linux"
    } else {
        "unknown"
    }
}
