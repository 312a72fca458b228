//! In-process extraction backend using lopdf
//!
//! Opens the PDF structure directly: page count comes from the page tree,
//! title/author from the trailer Info dictionary. The byte size always comes
//! from the filesystem, not from anything inside the document.

use crate::error::{PdfMetaError, Result};
use crate::extract::{ExtractBackend, RawMetadata};
use crate::utils::file_size;
use lopdf::{Dictionary, Document, Object};
use std::path::Path;

/// Extraction backend backed by the lopdf parser
pub struct LibraryBackend;

impl ExtractBackend for LibraryBackend {
    fn extract(&self, path: &Path) -> Result<RawMetadata> {
        let size_bytes = file_size(path).map_err(|e| PdfMetaError::extract(path, e))?;

        let doc = Document::load(path).map_err(|e| PdfMetaError::extract(path, e))?;
        let pages = doc.get_pages().len() as u32;

        let (title, author) = match info_dict(&doc) {
            Some(info) => (
                metadata_string(info, b"Title"),
                metadata_string(info, b"Author"),
            ),
            None => (None, None),
        };

        Ok(RawMetadata {
            pages,
            size_bytes,
            title,
            author,
        })
    }
}

/// Resolve the trailer's Info entry to a dictionary, if present
fn info_dict(doc: &Document) -> Option<&Dictionary> {
    match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_object(*id).ok()?.as_dict().ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

/// Read a string entry from an Info dictionary
fn metadata_string(info: &Dictionary, key: &[u8]) -> Option<String> {
    match info.get(key) {
        Ok(Object::String(bytes, _)) => {
            let decoded = decode_pdf_string(bytes);
            let trimmed = decoded.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        _ => None,
    }
}

/// Decode a PDF text string: UTF-16BE when the BOM is present, otherwise
/// treated as byte text (PDFDocEncoding overlaps ASCII for the common range)
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&utf16)
    } else {
        String::from_utf8_lossy(bytes).to_string()
    }
}
