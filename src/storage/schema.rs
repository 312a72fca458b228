//! Database schema definitions

/// Database schema version
pub const SCHEMA_VERSION: u32 = 1;

/// SQL for creating the pdf_metadata table
pub const CREATE_PDF_METADATA_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS pdf_metadata (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    author TEXT,
    title TEXT,
    pages INTEGER NOT NULL,
    size_bytes INTEGER NOT NULL,
    ratio INTEGER NOT NULL,
    file_path TEXT NOT NULL UNIQUE,
    last_processed TEXT NOT NULL
);
"#;

/// SQL for creating the metadata table
pub const CREATE_METADATA_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// SQL for the unique file_path index backing upsert-by-path
pub const CREATE_FILE_PATH_INDEX: &str = r#"
CREATE UNIQUE INDEX IF NOT EXISTS idx_file_path ON pdf_metadata(file_path);
"#;
