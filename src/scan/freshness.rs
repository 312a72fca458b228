//! The freshness gate: skip re-extraction of unmodified files
//!
//! This is the sole optimization preventing redundant work on repeated runs
//! over an unchanged tree.

use crate::error::Result;
use crate::utils::modified_time;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Decide whether a file needs (re-)extraction.
///
/// Returns `false` iff a stored timestamp exists and is at or after the
/// file's current modification time; returns `true` when there is no record
/// yet or the file changed since it was last processed.
pub fn should_process<P: AsRef<Path>>(path: P, stored: Option<DateTime<Utc>>) -> Result<bool> {
    let stored = match stored {
        Some(timestamp) => timestamp,
        None => return Ok(true),
    };

    let mtime = modified_time(path)?;
    Ok(stored < mtime)
}
