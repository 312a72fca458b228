//! External-tool extraction backend
//!
//! Shells out to `pdfinfo` (poppler-utils) and parses its line-oriented
//! output for the `Pages:`, `Title:` and `Author:` fields. The byte size is
//! read from the filesystem per the extraction contract, so the tool's
//! `File size:` line is ignored.

use crate::error::{PdfMetaError, Result};
use crate::extract::{ExtractBackend, RawMetadata};
use crate::utils::file_size;
use std::path::Path;
use std::process::Command;

/// Extraction backend invoking an external metadata tool
pub struct PdfinfoBackend {
    command: String,
}

impl PdfinfoBackend {
    /// Backend using the standard `pdfinfo` tool from PATH
    pub fn new() -> Self {
        Self::with_command("pdfinfo")
    }

    /// Backend using a custom command name (for testing or wrappers)
    pub fn with_command<S: Into<String>>(command: S) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Default for PdfinfoBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractBackend for PdfinfoBackend {
    fn extract(&self, path: &Path) -> Result<RawMetadata> {
        let size_bytes = file_size(path).map_err(|e| PdfMetaError::extract(path, e))?;

        let output = Command::new(&self.command).arg(path).output().map_err(|e| {
            PdfMetaError::extract(path, format!("failed to run {}: {}", self.command, e))
        })?;

        if !output.status.success() {
            return Err(PdfMetaError::extract(
                path,
                format!("{} exited with {}", self.command, output.status),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let fields = parse_output(&stdout);

        let pages = fields.pages.ok_or_else(|| {
            PdfMetaError::extract(path, format!("no Pages field in {} output", self.command))
        })?;

        Ok(RawMetadata {
            pages,
            size_bytes,
            title: fields.title,
            author: fields.author,
        })
    }
}

#[derive(Debug, Default)]
struct ToolFields {
    pages: Option<u32>,
    title: Option<String>,
    author: Option<String>,
}

/// Parse pdfinfo-style output: label, colon, value
fn parse_output(output: &str) -> ToolFields {
    let mut fields = ToolFields::default();

    for line in output.lines() {
        if let Some(value) = line.strip_prefix("Pages:") {
            fields.pages = value.trim().parse().ok();
        } else if let Some(value) = line.strip_prefix("Title:") {
            fields.title = non_empty(value);
        } else if let Some(value) = line.strip_prefix("Author:") {
            fields.author = non_empty(value);
        }
    }

    fields
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE_OUTPUT: &str = "\
Title:          Annual Report
Author:         Doe, Jane
Creator:        Writer
Producer:       LibreOffice 7.4
Tagged:         no
Pages:          42
Encrypted:      no
Page size:      595.2 x 841.8 pts (A4)
File size:      123456 bytes
PDF version:    1.7
";

    #[test]
    fn test_parse_full_output() {
        let fields = parse_output(SAMPLE_OUTPUT);
        assert_eq!(fields.pages, Some(42));
        assert_eq!(fields.title.as_deref(), Some("Annual Report"));
        assert_eq!(fields.author.as_deref(), Some("Doe, Jane"));
    }

    #[test]
    fn test_parse_missing_metadata() {
        let fields = parse_output("Pages:          7\nEncrypted:      no\n");
        assert_eq!(fields.pages, Some(7));
        assert!(fields.title.is_none());
        assert!(fields.author.is_none());
    }

    #[test]
    fn test_parse_blank_title() {
        let fields = parse_output("Title:\nPages:          1\n");
        assert!(fields.title.is_none());
    }

    #[test]
    fn test_parse_garbage_output() {
        let fields = parse_output("not a pdfinfo output at all");
        assert!(fields.pages.is_none());
    }

    #[test]
    fn test_missing_tool_is_extract_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "dummy").unwrap();

        let backend = PdfinfoBackend::with_command("pdfmeta-no-such-tool");
        let err = backend.extract(file.path()).unwrap_err();
        assert!(matches!(err, PdfMetaError::Extract { .. }));
    }

    #[test]
    fn test_missing_file_is_extract_error() {
        let backend = PdfinfoBackend::new();
        let err = backend.extract(Path::new("/nonexistent/file.pdf")).unwrap_err();
        assert!(matches!(err, PdfMetaError::Extract { .. }));
    }
}
