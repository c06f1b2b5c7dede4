//! Status file path resolution.
//!
//! The status record lives beside the executable unless a path is injected
//! through the command line, the environment or a config file.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::{Config, STATUS_FILE_NAME};

/// Normalize a path where the target file may not exist yet.
///
/// Canonicalizes the parent directory and appends the filename.
///
/// # Example
/// ```ignore
/// let out_path = normalize_nonexistent("/existing/dir/status.json").unwrap();
/// ```
pub fn normalize_nonexistent(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let filename = path.file_name().context("Path has no filename")?;

    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            let canonical_parent = parent.canonicalize().with_context(|| {
                format!("Failed to resolve parent directory: {}", parent.display())
            })?;
            Ok(canonical_parent.join(filename))
        }
        // Bare filename, relative to the current directory
        _ => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            Ok(cwd.join(filename))
        }
    }
}

/// Default status path: `status.json` in the directory holding the running executable.
pub fn default_status_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate current executable")?;
    let dir = exe
        .parent()
        .context("Executable path has no parent directory")?;
    Ok(dir.join(STATUS_FILE_NAME))
}

/// Pick the status path by precedence and make it absolute.
///
/// `override_path` (the `--output` flag) wins over `config.output.status_path`,
/// which already carries any `SENTINEL_STATUS_PATH` override; otherwise the
/// executable-relative default is used.
pub fn resolve_status_path(override_path: Option<&Path>, config: &Config) -> Result<PathBuf> {
    let chosen = match override_path.or(config.output.status_path.as_deref()) {
        Some(path) => path.to_path_buf(),
        None => default_status_path()?,
    };
    normalize_nonexistent(&chosen)
}
