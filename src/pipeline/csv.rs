//! CSV export sink
//!
//! An optional output target alongside the database: one header row, then
//! one row per successfully processed file in completion order. Workers on
//! the pool share the sink, so writes go through a mutex.

use crate::error::{PdfMetaError, Result};
use crate::storage::PdfRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

/// CSV header row
const HEADER: &str = "Author, Title, Pages, Size (bytes), Ratio, File Path";

/// Thread-safe CSV writer for scan results
pub struct CsvSink {
    writer: Mutex<BufWriter<File>>,
}

impl CsvSink {
    /// Create the output file and write the header row
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| {
            PdfMetaError::Storage(format!("Failed to create CSV {}: {}", path.display(), e))
        })?;

        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", HEADER)?;

        Ok(Self {
            writer: Mutex::new(writer),
        })
    }

    /// Append one record row
    pub fn write_record(&self, record: &PdfRecord) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| PdfMetaError::Storage("CSV writer lock poisoned".to_string()))?;

        writeln!(
            writer,
            "{}, {}, {}, {}, {}, {}",
            record.author,
            record.title,
            record.pages,
            record.size_bytes,
            record.ratio,
            record.file_path
        )?;

        Ok(())
    }

    /// Flush buffered rows to disk
    pub fn flush(&self) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| PdfMetaError::Storage("CSV writer lock poisoned".to_string()))?;
        writer.flush()?;
        Ok(())
    }
}
