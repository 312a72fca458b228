//! Storage functionality for pdfmeta-rs
//!
//! This module provides database operations using embedded SQLite.

pub mod database;
pub mod schema;

// Re-export main types
pub use database::Database;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One stored metadata row, keyed by file path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfRecord {
    /// Row id, assigned by the database; `None` before first persistence
    pub id: Option<i64>,

    /// Sanitized author, `"N/A"` when the PDF carries none
    pub author: String,

    /// Sanitized title, `"N/A"` when the PDF carries none
    pub title: String,

    /// Page count; 0 is valid for degenerate PDFs
    pub pages: u32,

    /// File byte length at extraction time, read from the filesystem
    pub size_bytes: u64,

    /// Bytes per page, ceiling-integer division; 0 when pages is 0
    pub ratio: u64,

    /// Unique identity of the record
    pub file_path: String,

    /// Timestamp of the most recent successful extraction
    pub last_processed: DateTime<Utc>,
}
