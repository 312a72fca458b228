//! Recursive discovery of PDF files under a directory tree
//!
//! The walk is fully materialized before fan-out so the total count is known
//! for progress reporting. Unreadable subtrees are skipped with a warning and
//! never abort the walk. Symlinks are not followed unless asked; when they
//! are, walkdir's ancestor check turns cycles into errors, which are skipped
//! like any other unreadable entry.

use crate::utils::is_pdf_file;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Walk `root` and collect every regular file matching `*.pdf`
/// (case-sensitive). Order is filesystem-traversal order.
pub fn discover<P: AsRef<Path>>(root: P, follow_symlinks: bool) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root.as_ref()).follow_links(follow_symlinks) {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && is_pdf_file(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            Err(err) => {
                log::warn!("Skipping unreadable entry: {}", err);
            }
        }
    }

    files
}
