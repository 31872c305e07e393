//! Discovery and creation of the `.idealab/` directory.

use std::path::{Path, PathBuf};

use crate::config::ConfigError;

/// The name of the idealab metadata directory.
pub const LAB_DIR_NAME: &str = ".idealab";

/// The environment variable that can override the lab directory.
pub const LAB_DIR_ENV: &str = "IDEALAB_DIR";

/// Find the `.idealab/` directory for `start`.
///
/// `IDEALAB_DIR` wins when it names an existing directory; otherwise the
/// tree is walked up from `start` until a `.idealab/` directory is found or
/// the filesystem root is reached.
pub fn find_lab_dir(start: &Path) -> Option<PathBuf> {
    if let Ok(env_dir) = std::env::var(LAB_DIR_ENV) {
        let env_path = PathBuf::from(env_dir);
        if env_path.is_dir() {
            return Some(env_path);
        }
    }
    find_lab_dir_from(start)
}

/// Walk up from `start` only, ignoring `IDEALAB_DIR`.
pub fn find_lab_dir_from(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().ok()?;
    start
        .ancestors()
        .map(|dir| dir.join(LAB_DIR_NAME))
        .find(|candidate| candidate.is_dir())
}

/// Like [`find_lab_dir`], but a missing directory is an error.
pub fn find_lab_dir_or_error(start: &Path) -> Result<PathBuf, ConfigError> {
    find_lab_dir(start).ok_or(ConfigError::LabDirNotFound)
}

/// Ensure a `.idealab/` directory exists at (or under) `path`.
///
/// Returns the path to the `.idealab/` directory.
pub fn ensure_lab_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let lab_dir = if path.ends_with(LAB_DIR_NAME) {
        path.to_path_buf()
    } else {
        path.join(LAB_DIR_NAME)
    };

    std::fs::create_dir_all(&lab_dir)?;
    Ok(lab_dir)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
