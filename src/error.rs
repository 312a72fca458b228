//! Error types for pdfmeta-rs
//!
//! This module provides comprehensive error handling for all pdfmeta operations,
//! including directory discovery, metadata extraction, and storage.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pdfmeta operations
#[derive(Error, Debug)]
pub enum PdfMetaError {
    /// Directory walk errors
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// Metadata extraction errors, carrying the offending path
    #[error("Extraction failed for {}: {}", .path.display(), .cause)]
    Extract { path: PathBuf, cause: String },

    /// Database/storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Worker pool errors
    #[error("Worker pool error: {0}")]
    Pool(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// SQLite database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Generic errors
    #[error("Generic error: {0}")]
    Generic(String),
}

impl PdfMetaError {
    /// Build an extraction error for a path from any displayable cause
    pub fn extract<P: Into<PathBuf>, E: std::fmt::Display>(path: P, cause: E) -> Self {
        PdfMetaError::Extract {
            path: path.into(),
            cause: cause.to_string(),
        }
    }
}

/// Result type alias for pdfmeta operations
pub type Result<T> = std::result::Result<T, PdfMetaError>;

// Implement From traits for external error types
impl From<walkdir::Error> for PdfMetaError {
    fn from(err: walkdir::Error) -> Self {
        PdfMetaError::Discovery(err.to_string())
    }
}

impl From<anyhow::Error> for PdfMetaError {
    fn from(err: anyhow::Error) -> Self {
        PdfMetaError::Generic(err.to_string())
    }
}
