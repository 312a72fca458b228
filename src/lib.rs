//! # pdfmeta-rs
//!
//! A parallel PDF metadata inventory: walks a directory tree, extracts
//! per-file metadata (page count, byte size, title, author), derives a
//! size-per-page ratio, and persists everything to an embedded SQLite store
//! with an incremental freshness check and ranked read queries.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdfmeta_rs::{Database, QueryTool, ScanConfig, Scanner};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Scan a tree into the store; unchanged files are skipped
//!     let scanner = Scanner::new(ScanConfig::default(), "pdf_metadata.db");
//!     let stats = scanner.run("~/papers")?;
//!     println!("Indexed {} of {} files", stats.processed, stats.total_files);
//!
//!     // Ranked retrieval
//!     let db = Database::new("pdf_metadata.db")?;
//!     for record in db.top_by_size(10)? {
//!         println!("{} ({} bytes)", record.file_path, record.size_bytes);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Core modules
pub mod config;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod query;
pub mod scan;
pub mod storage;
pub mod utils;

// Re-export main API types
pub use config::{BackendKind, Config, ScanConfig};
pub use error::{PdfMetaError, Result};
pub use extract::{ExtractBackend, RawMetadata};
pub use pipeline::{CsvSink, ScanStats, Scanner};
pub use query::QueryTool;
pub use storage::{Database, PdfRecord};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_imports() {
        // Ensure all major types can be imported
        let _config = Config::default();
    }
}
