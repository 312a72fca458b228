//! SQLite database operations for pdfmeta-rs
//!
//! This module provides the persistent store of PDF metadata records with
//! upsert-by-path semantics and ranked read queries. Each worker thread opens
//! its own connection; single-row upsert atomicity comes from SQLite itself.

use crate::error::{PdfMetaError, Result};
use crate::storage::schema::*;
use crate::storage::PdfRecord;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

/// Database connection and operations
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create a new database connection
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| PdfMetaError::Storage(format!("Failed to open database: {}", e)))?;

        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create an in-memory database (for testing)
    pub fn memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            PdfMetaError::Storage(format!("Failed to create in-memory database: {}", e))
        })?;

        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize database schema
    fn initialize(&self) -> Result<()> {
        // Enable WAL mode for better concurrency across worker connections
        let _: String = self
            .conn
            .query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))
            .map_err(|e| PdfMetaError::Storage(format!("Failed to enable WAL mode: {}", e)))?;

        self.conn
            .pragma_update(None, "busy_timeout", 5000)
            .map_err(|e| PdfMetaError::Storage(format!("Failed to set busy timeout: {}", e)))?;

        self.conn
            .execute(CREATE_PDF_METADATA_TABLE, [])
            .map_err(|e| PdfMetaError::Storage(format!("Failed to create table: {}", e)))?;

        self.conn
            .execute(CREATE_METADATA_TABLE, [])
            .map_err(|e| PdfMetaError::Storage(format!("Failed to create metadata table: {}", e)))?;

        self.conn
            .execute(CREATE_FILE_PATH_INDEX, [])
            .map_err(|e| PdfMetaError::Storage(format!("Failed to create index: {}", e)))?;

        self.conn
            .execute(
                "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)",
                params![SCHEMA_VERSION.to_string()],
            )
            .map_err(|e| PdfMetaError::Storage(format!("Failed to set schema version: {}", e)))?;

        log::debug!("Database initialized with schema version {}", SCHEMA_VERSION);
        Ok(())
    }

    /// Insert or wholesale-replace the record for its file path.
    /// A single INSERT OR REPLACE statement, so concurrent readers never
    /// observe a partially updated row.
    pub fn upsert(&self, record: &PdfRecord) -> Result<()> {
        self.conn
            .execute(
                r#"
                INSERT OR REPLACE INTO pdf_metadata
                (author, title, pages, size_bytes, ratio, file_path, last_processed)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
                params![
                    record.author,
                    record.title,
                    record.pages as i64,
                    record.size_bytes as i64,
                    record.ratio as i64,
                    record.file_path,
                    record.last_processed.to_rfc3339(),
                ],
            )
            .map_err(|e| {
                PdfMetaError::Storage(format!("Failed to upsert {}: {}", record.file_path, e))
            })?;

        Ok(())
    }

    /// Point lookup of the last-processed timestamp for a path
    pub fn last_processed(&self, file_path: &str) -> Result<Option<DateTime<Utc>>> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT last_processed FROM pdf_metadata WHERE file_path = ?",
                params![file_path],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| PdfMetaError::Storage(format!("Failed to query timestamp: {}", e)))?;

        match stored {
            Some(text) => {
                let parsed = DateTime::parse_from_rfc3339(&text).map_err(|e| {
                    PdfMetaError::Storage(format!("Invalid stored timestamp '{}': {}", text, e))
                })?;
                Ok(Some(parsed.with_timezone(&Utc)))
            }
            None => Ok(None),
        }
    }

    /// Largest files first, truncated to `limit`
    pub fn top_by_size(&self, limit: usize) -> Result<Vec<PdfRecord>> {
        self.query_records(
            "SELECT id, author, title, pages, size_bytes, ratio, file_path, last_processed
             FROM pdf_metadata ORDER BY size_bytes DESC LIMIT ?",
            limit,
        )
    }

    /// Worst size-per-page ratio first, truncated to `limit`
    pub fn top_by_ratio(&self, limit: usize) -> Result<Vec<PdfRecord>> {
        self.query_records(
            "SELECT id, author, title, pages, size_bytes, ratio, file_path, last_processed
             FROM pdf_metadata ORDER BY ratio DESC LIMIT ?",
            limit,
        )
    }

    /// Full unordered scan
    pub fn list_all(&self) -> Result<Vec<PdfRecord>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, author, title, pages, size_bytes, ratio, file_path, last_processed
                 FROM pdf_metadata",
            )
            .map_err(|e| PdfMetaError::Storage(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map([], row_to_record)
            .map_err(|e| PdfMetaError::Storage(format!("Failed to list records: {}", e)))?;

        collect_records(rows)
    }

    /// Total record count
    pub fn record_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pdf_metadata", [], |row| row.get(0))
            .map_err(|e| PdfMetaError::Storage(format!("Failed to count records: {}", e)))?;

        Ok(count as usize)
    }

    /// Point lookup of a full record by path
    pub fn get_by_path(&self, file_path: &str) -> Result<Option<PdfRecord>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, author, title, pages, size_bytes, ratio, file_path, last_processed
                 FROM pdf_metadata WHERE file_path = ?",
            )
            .map_err(|e| PdfMetaError::Storage(format!("Failed to prepare query: {}", e)))?;

        let record = stmt
            .query_row(params![file_path], row_to_record)
            .optional()
            .map_err(|e| PdfMetaError::Storage(format!("Failed to query record: {}", e)))?;

        Ok(record)
    }

    fn query_records(&self, sql: &str, limit: usize) -> Result<Vec<PdfRecord>> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| PdfMetaError::Storage(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map(params![limit as i64], row_to_record)
            .map_err(|e| PdfMetaError::Storage(format!("Failed to query records: {}", e)))?;

        collect_records(rows)
    }
}

/// Helper function to convert a database row to a PdfRecord
fn row_to_record(row: &Row) -> rusqlite::Result<PdfRecord> {
    let timestamp: String = row.get(7)?;
    let last_processed = DateTime::parse_from_rfc3339(&timestamp)
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
        })?
        .with_timezone(&Utc);

    Ok(PdfRecord {
        id: Some(row.get::<_, i64>(0)?),
        author: row.get(1)?,
        title: row.get(2)?,
        pages: row.get::<_, i64>(3)? as u32,
        size_bytes: row.get::<_, i64>(4)? as u64,
        ratio: row.get::<_, i64>(5)? as u64,
        file_path: row.get(6)?,
        last_processed,
    })
}

fn collect_records(
    rows: impl Iterator<Item = rusqlite::Result<PdfRecord>>,
) -> Result<Vec<PdfRecord>> {
    let mut result = Vec::new();
    for row in rows {
        result
            .push(row.map_err(|e| PdfMetaError::Storage(format!("Failed to read row: {}", e)))?);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, pages: u32, size_bytes: u64, ratio: u64) -> PdfRecord {
        PdfRecord {
            id: None,
            author: "N/A".to_string(),
            title: "N/A".to_string(),
            pages,
            size_bytes,
            ratio,
            file_path: path.to_string(),
            last_processed: Utc::now(),
        }
    }

    #[test]
    fn test_upsert_and_lookup() {
        let db = Database::memory().unwrap();
        db.upsert(&record("/docs/a.pdf", 10, 1000, 100)).unwrap();

        let found = db.get_by_path("/docs/a.pdf").unwrap().unwrap();
        assert_eq!(found.pages, 10);
        assert_eq!(found.size_bytes, 1000);
        assert!(found.id.is_some());

        assert!(db.get_by_path("/docs/missing.pdf").unwrap().is_none());
    }

    #[test]
    fn test_upsert_replaces_all_fields() {
        let db = Database::memory().unwrap();

        let mut gen1 = record("/docs/a.pdf", 10, 1000, 100);
        gen1.author = "Jane Doe".to_string();
        gen1.title = "First Edition".to_string();
        db.upsert(&gen1).unwrap();

        // Second generation with entirely different values
        let gen2 = record("/docs/a.pdf", 20, 4000, 200);
        db.upsert(&gen2).unwrap();

        assert_eq!(db.record_count().unwrap(), 1);
        let found = db.get_by_path("/docs/a.pdf").unwrap().unwrap();
        assert_eq!(found.pages, 20);
        assert_eq!(found.size_bytes, 4000);
        assert_eq!(found.ratio, 200);
        // Generation 1 values are gone, not merged
        assert_eq!(found.author, "N/A");
        assert_eq!(found.title, "N/A");
    }

    #[test]
    fn test_last_processed_roundtrip() {
        let db = Database::memory().unwrap();
        assert!(db.last_processed("/docs/a.pdf").unwrap().is_none());

        let rec = record("/docs/a.pdf", 1, 100, 100);
        db.upsert(&rec).unwrap();

        let stored = db.last_processed("/docs/a.pdf").unwrap().unwrap();
        assert_eq!(stored, rec.last_processed);
    }

    #[test]
    fn test_top_by_size_ordering_and_truncation() {
        let db = Database::memory().unwrap();
        db.upsert(&record("/docs/small.pdf", 1, 100, 100)).unwrap();
        db.upsert(&record("/docs/large.pdf", 1, 9000, 9000)).unwrap();
        db.upsert(&record("/docs/medium.pdf", 1, 5000, 5000)).unwrap();

        let top = db.top_by_size(2).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].file_path, "/docs/large.pdf");
        assert_eq!(top[1].file_path, "/docs/medium.pdf");
        assert!(top[0].size_bytes >= top[1].size_bytes);
    }

    #[test]
    fn test_top_by_ratio_ordering() {
        let db = Database::memory().unwrap();
        db.upsert(&record("/docs/lean.pdf", 100, 1000, 10)).unwrap();
        db.upsert(&record("/docs/bloated.pdf", 2, 9000, 4500)).unwrap();

        let top = db.top_by_ratio(10).unwrap();
        assert_eq!(top[0].file_path, "/docs/bloated.pdf");
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn test_list_all() {
        let db = Database::memory().unwrap();
        assert!(db.list_all().unwrap().is_empty());

        db.upsert(&record("/docs/a.pdf", 1, 100, 100)).unwrap();
        db.upsert(&record("/docs/b.pdf", 2, 200, 100)).unwrap();

        let all = db.list_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(db.record_count().unwrap(), 2);
    }
}
