use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ScanError {
    /// Path of the status file involved in the failure.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ScanError::Io { path, .. } | ScanError::Json { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
