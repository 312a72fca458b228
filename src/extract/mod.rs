//! Metadata extraction for pdfmeta-rs
//!
//! This module converts a file path into structured PDF metadata or a typed
//! failure. Two interchangeable backends exist behind one trait: in-process
//! parsing via lopdf, and invocation of the external `pdfinfo` tool.

pub mod library;
pub mod pdfinfo;
pub mod sanitize;

// Re-export main types
pub use library::LibraryBackend;
pub use pdfinfo::PdfinfoBackend;

use crate::config::BackendKind;
use crate::error::Result;
use std::path::Path;

/// Raw metadata as reported by an extraction backend, before sanitization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMetadata {
    /// Page count; 0 is valid for degenerate PDFs
    pub pages: u32,
    /// File byte length, always read from the filesystem
    pub size_bytes: u64,
    /// Embedded title, if any
    pub title: Option<String>,
    /// Embedded author, if any
    pub author: Option<String>,
}

/// Extraction backend interface.
///
/// Implementations never panic past this boundary; every failure (unreadable
/// file, invalid PDF structure, missing external tool) is returned as an
/// `Extract` error carrying the path and a cause.
pub trait ExtractBackend: Send + Sync {
    /// Extract raw metadata for a single file
    fn extract(&self, path: &Path) -> Result<RawMetadata>;
}

/// Instantiate the configured backend
pub fn create_backend(kind: BackendKind) -> Box<dyn ExtractBackend> {
    match kind {
        BackendKind::Library => Box::new(LibraryBackend),
        BackendKind::Pdfinfo => Box::new(PdfinfoBackend::new()),
    }
}
