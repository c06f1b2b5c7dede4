//! # sentinel-scan
//!
//! Checks a minted token for derivatives and records the outcome in a single
//! JSON status file.
//!
//! A run is one call to [`scan`] followed by one [`StatusWriter::write`]. The
//! matcher is pluggable; [`SentinelMatcher`] is a stub that flags one fixed id.

mod error;
mod matcher;
mod status;

pub use error::{Result, ScanError};
pub use matcher::{scan, Matcher, SentinelMatcher, TokenId};
pub use status::{ScanStatus, StatusWriter};

/// Run the matcher against `token_id` and overwrite the status file with the result.
pub fn run_scan(
    matcher: &dyn Matcher,
    writer: &StatusWriter,
    token_id: TokenId,
) -> Result<ScanStatus> {
    let found = scan(matcher, token_id);
    writer.write(token_id, found)
}
