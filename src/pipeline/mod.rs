//! The end-to-end scan pipeline for pdfmeta-rs
//!
//! Composes discovery, the freshness gate, extraction, sanitization and
//! persistence across a bounded worker pool.

pub mod csv;
pub mod scanner;

// Re-export main types
pub use csv::CsvSink;
pub use scanner::Scanner;

/// Summary of one scan run
#[derive(Debug, Clone)]
pub struct ScanStats {
    /// Total number of discovered PDF files
    pub total_files: usize,

    /// Files successfully extracted and persisted
    pub processed: usize,

    /// Files skipped by the freshness gate
    pub skipped: usize,

    /// Files that failed extraction or persistence
    pub failed: usize,

    /// Total wall-clock time in seconds
    pub elapsed: f64,
}
