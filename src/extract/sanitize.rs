//! Normalization of extracted author/title strings
//!
//! Pure functions, no side effects. Missing values become a literal
//! placeholder, stray punctuation is stripped, and "Last, First" author
//! forms are reordered to "First Last".

/// Placeholder for absent metadata values
pub const MISSING: &str = "N/A";

/// Sanitize an author/title pair
pub fn sanitize(author: Option<&str>, title: Option<&str>) -> (String, String) {
    let author = reorder_author(clean_field(author));
    let title = clean_field(title);
    (author, title)
}

/// Trim and keep only alphanumerics, spaces, periods, commas and hyphens.
/// Missing or blank input becomes the placeholder.
fn clean_field(value: Option<&str>) -> String {
    let value = match value {
        Some(v) if !v.trim().is_empty() => v.trim(),
        _ => return MISSING.to_string(),
    };

    value
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '.' | ',' | '-'))
        .collect()
}

/// Reorder "Last, First" to "First Last". Only an exact two-part comma
/// split is reordered; anything else is left untouched.
fn reorder_author(author: String) -> String {
    if !author.contains(',') {
        return author;
    }

    let parts: Vec<&str> = author.split(',').collect();
    if parts.len() == 2 {
        format!("{} {}", parts[1].trim(), parts[0].trim())
    } else {
        author
    }
}

/// Bytes per page as ceiling-integer division; 0 when the page count is 0.
/// The degenerate zero-page case deliberately maps to 0 to avoid division
/// by zero, not to claim the ratio is meaningful there.
pub fn size_per_page_ratio(size_bytes: u64, pages: u32) -> u64 {
    if pages == 0 {
        0
    } else {
        size_bytes.div_ceil(pages as u64)
    }
}
