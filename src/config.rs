//! Configuration for pdfmeta-rs
//!
//! Serde-backed configuration with sensible defaults. A config file is
//! optional; the CLI overrides individual fields on top of whatever was
//! loaded.

use crate::error::{PdfMetaError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which extraction backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-process parsing via lopdf
    Library,
    /// External `pdfinfo` tool invocation
    Pdfinfo,
}

/// Scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Worker pool size; 0 means one worker per logical CPU
    pub workers: usize,
    /// Whether to follow directory symlinks during discovery
    pub follow_symlinks: bool,
    /// Extraction backend
    pub backend: BackendKind,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            follow_symlinks: false,
            backend: BackendKind::Library,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Scan settings
    #[serde(default)]
    pub scan: ScanConfig,
    /// Database file path; `None` means the CLI default
    #[serde(default)]
    pub database: Option<String>,
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PdfMetaError::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }
}
