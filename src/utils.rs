//! Utility functions for pdfmeta-rs
//!
//! This module provides common utility functions used throughout the project.

use crate::error::Result;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Check whether a path names a PDF file. The match is case-sensitive:
/// only a literal `.pdf` suffix qualifies, mirroring a `*.pdf` glob.
pub fn is_pdf_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.ends_with(".pdf"))
        .unwrap_or(false)
}

/// Get a file's modification time as a UTC timestamp
pub fn modified_time<P: AsRef<Path>>(path: P) -> Result<DateTime<Utc>> {
    let metadata = std::fs::metadata(path.as_ref())?;
    let modified = metadata.modified()?;
    Ok(DateTime::<Utc>::from(modified))
}

/// Get a file's byte length from the filesystem
pub fn file_size<P: AsRef<Path>>(path: P) -> Result<u64> {
    Ok(std::fs::metadata(path.as_ref())?.len())
}

/// Format file size in human readable format
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
