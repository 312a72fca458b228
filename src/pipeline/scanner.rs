//! Scan orchestrator
//!
//! Drives the full pipeline: initialize the store, materialize discovery,
//! then fan each file out to a bounded rayon pool where a worker runs the
//! freshness gate, extraction, sanitization and the upsert. Every worker
//! holds its own database connection; sharing one connection across threads
//! is not safe. One file's failure never aborts the batch.

use crate::config::ScanConfig;
use crate::error::{PdfMetaError, Result};
use crate::extract::sanitize::{sanitize, size_per_page_ratio};
use crate::extract::{create_backend, ExtractBackend};
use crate::pipeline::{CsvSink, ScanStats};
use crate::scan::{discover, should_process};
use crate::storage::{Database, PdfRecord};
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Outcome of one unit of work
enum Outcome {
    Processed(PdfRecord),
    Skipped,
}

/// End-to-end scan driver
pub struct Scanner {
    config: ScanConfig,
    db_path: PathBuf,
    csv: Option<CsvSink>,
}

impl Scanner {
    /// Create a scanner writing to the given database file
    pub fn new<P: AsRef<Path>>(config: ScanConfig, db_path: P) -> Self {
        Self {
            config,
            db_path: db_path.as_ref().to_path_buf(),
            csv: None,
        }
    }

    /// Additionally stream successful records to a CSV sink
    pub fn with_csv(mut self, sink: CsvSink) -> Self {
        self.csv = Some(sink);
        self
    }

    /// Run the pipeline over a directory tree.
    ///
    /// Returns `Ok` once every unit has completed, whether or not all
    /// succeeded individually; per-file failures are logged and counted.
    pub fn run<P: AsRef<Path>>(&self, root: P) -> Result<ScanStats> {
        let start = std::time::Instant::now();

        // Idempotent schema creation before any worker connects
        Database::new(&self.db_path)?;

        let files = discover(root.as_ref(), self.config.follow_symlinks);
        let total = files.len();
        log::info!(
            "Found {} PDF files under {}",
            total,
            root.as_ref().display()
        );

        let progress = ProgressBar::new(total as u64);
        progress.set_style(
            ProgressStyle::with_template("[{bar:40}] {pos}/{len}")
                .map_err(|e| PdfMetaError::Generic(format!("Invalid progress template: {}", e)))?
                .progress_chars("#-"),
        );

        let backend = create_backend(self.config.backend);

        let processed = AtomicUsize::new(0);
        let skipped = AtomicUsize::new(0);
        let failed = AtomicUsize::new(0);

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .build()
            .map_err(|e| PdfMetaError::Pool(e.to_string()))?;

        pool.install(|| {
            files.par_iter().for_each_init(
                // One connection per worker; for_each_init recreates it per
                // rayon split, which stays bounded by the pool size
                || Database::new(&self.db_path),
                |db, path| {
                    match db {
                        Ok(db) => match self.process_one(db, backend.as_ref(), path) {
                            Ok(Outcome::Processed(record)) => {
                                processed.fetch_add(1, Ordering::Relaxed);
                                self.export(&record);
                            }
                            Ok(Outcome::Skipped) => {
                                skipped.fetch_add(1, Ordering::Relaxed);
                            }
                            Err(e) => {
                                log::error!("{}", e);
                                failed.fetch_add(1, Ordering::Relaxed);
                            }
                        },
                        Err(e) => {
                            log::error!("Worker connection failed: {}", e);
                            failed.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                    progress.inc(1);
                },
            );
        });

        progress.finish();

        if let Some(csv) = &self.csv {
            csv.flush()?;
        }

        let stats = ScanStats {
            total_files: total,
            processed: processed.into_inner(),
            skipped: skipped.into_inner(),
            failed: failed.into_inner(),
            elapsed: start.elapsed().as_secs_f64(),
        };

        log::info!(
            "Scan complete: {} processed, {} skipped, {} failed of {} in {:.2}s",
            stats.processed,
            stats.skipped,
            stats.failed,
            stats.total_files,
            stats.elapsed
        );

        Ok(stats)
    }

    /// One unit of work: freshness gate, extraction, sanitization, upsert
    fn process_one(
        &self,
        db: &Database,
        backend: &dyn ExtractBackend,
        path: &Path,
    ) -> Result<Outcome> {
        let file_path = path.to_string_lossy().to_string();

        let stored = db.last_processed(&file_path)?;
        if !should_process(path, stored)? {
            log::debug!("Skipping unchanged file: {}", file_path);
            return Ok(Outcome::Skipped);
        }

        let raw = backend.extract(path)?;
        let (author, title) = sanitize(raw.author.as_deref(), raw.title.as_deref());
        let ratio = size_per_page_ratio(raw.size_bytes, raw.pages);

        let record = PdfRecord {
            id: None,
            author,
            title,
            pages: raw.pages,
            size_bytes: raw.size_bytes,
            ratio,
            file_path,
            last_processed: Utc::now(),
        };

        db.upsert(&record)?;
        Ok(Outcome::Processed(record))
    }

    /// Best-effort CSV row; export failure never fails the unit
    fn export(&self, record: &PdfRecord) {
        if let Some(csv) = &self.csv {
            if let Err(e) = csv.write_record(record) {
                log::error!("CSV export failed for {}: {}", record.file_path, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendKind;

    #[test]
    fn test_scanner_on_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("meta.db");

        let scanner = Scanner::new(ScanConfig::default(), &db_path);
        let stats = scanner.run(dir.path()).unwrap();

        assert_eq!(stats.total_files, 0);
        assert_eq!(stats.processed, 0);
        assert_eq!(stats.failed, 0);
        // Schema was still created
        assert!(db_path.exists());
    }

    #[test]
    fn test_scanner_counts_corrupt_file_as_failed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.pdf"), b"not a pdf").unwrap();
        let db_path = dir.path().join("meta.db");

        let config = ScanConfig {
            workers: 1,
            follow_symlinks: false,
            backend: BackendKind::Library,
        };
        let stats = Scanner::new(config, &db_path).run(dir.path()).unwrap();

        assert_eq!(stats.total_files, 1);
        assert_eq!(stats.processed, 0);
        assert_eq!(stats.failed, 1);

        let db = Database::new(&db_path).unwrap();
        assert_eq!(db.record_count().unwrap(), 0);
    }
}
