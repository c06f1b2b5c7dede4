use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use sentinel_config::log_status_debug;

use crate::error::{Result, ScanError};
use crate::matcher::TokenId;

/// The single persisted record of the most recent scan.
///
/// Field order is the on-disk order: `tokenId`, `matchFound`, `lastScanned`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStatus {
    pub token_id: TokenId,
    pub match_found: bool,
    /// Unix seconds, UTC
    pub last_scanned: i64,
}

impl ScanStatus {
    /// Build a record stamped with the current wall-clock time.
    pub fn now(token_id: TokenId, match_found: bool) -> Self {
        Self {
            token_id,
            match_found,
            last_scanned: Utc::now().timestamp(),
        }
    }

    /// `last_scanned` as a UTC datetime, if it is in chrono's range.
    pub fn scanned_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.last_scanned, 0).single()
    }
}

/// Writes the status record to one injected path, replacing it every time.
#[derive(Debug, Clone)]
pub struct StatusWriter {
    path: PathBuf,
}

impl StatusWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record `match_found` for `token_id`, stamped now, overwriting the file.
    pub fn write(&self, token_id: TokenId, match_found: bool) -> Result<ScanStatus> {
        let status = ScanStatus::now(token_id, match_found);
        self.save(&status)?;

        let written = self
            .path
            .canonicalize()
            .unwrap_or_else(|_| self.path.clone());
        log_status_debug!(
            "status.json updated",
            path = tracing::field::display(written.display()),
        );
        Ok(status)
    }

    /// Serialize `status` as 2-space indented JSON, truncating any previous content.
    ///
    /// Not atomic: a crash mid-write can leave a truncated file.
    pub fn save(&self, status: &ScanStatus) -> Result<()> {
        let file = File::create(&self.path).map_err(|source| self.io_error(source))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, status)
            .map_err(|source| self.json_error(source))?;
        writer.flush().map_err(|source| self.io_error(source))?;
        log_status_debug!(
            "Status record saved",
            token_id = status.token_id,
            match_found = status.match_found,
            last_scanned = status.last_scanned,
        );
        Ok(())
    }

    /// Load the current record.
    pub fn read(&self) -> Result<ScanStatus> {
        let file = File::open(&self.path).map_err(|source| self.io_error(source))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|source| self.json_error(source))
    }

    fn io_error(&self, source: std::io::Error) -> ScanError {
        ScanError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn json_error(&self, source: serde_json::Error) -> ScanError {
        ScanError::Json {
            path: self.path.clone(),
            source,
        }
    }
}
