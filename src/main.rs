//! pdfmeta-rs CLI application
//!
//! Command-line interface for the pdfmeta-rs library.

use clap::{Parser, Subcommand, ValueEnum};
use pdfmeta_rs::{BackendKind, Config, CsvSink, Database, QueryTool, Scanner};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfmeta-rs")]
#[command(about = "Inventory PDF metadata into a queryable SQLite store")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendArg {
    /// Parse PDFs in-process
    Library,
    /// Invoke the external pdfinfo tool
    Pdfinfo,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Library => BackendKind::Library,
            BackendArg::Pdfinfo => BackendKind::Pdfinfo,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a directory tree and index PDF metadata
    Scan {
        /// Directory to scan for PDF files
        #[arg(short = 'd', long, default_value = ".")]
        directory: PathBuf,

        /// SQLite database file
        #[arg(long)]
        database: Option<PathBuf>,

        /// Also export successfully processed files to a CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Worker threads (0 = one per logical CPU)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Extraction backend
        #[arg(long, value_enum)]
        backend: Option<BackendArg>,

        /// Follow directory symlinks during discovery
        #[arg(long)]
        follow_symlinks: bool,

        /// JSON configuration file; CLI flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Interactively query an existing metadata database
    Query {
        /// SQLite database file
        #[arg(long, default_value = "pdf_metadata.db")]
        database: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            directory,
            database,
            output,
            jobs,
            backend,
            follow_symlinks,
            config,
        } => {
            scan_command(
                directory,
                database,
                output,
                jobs,
                backend,
                follow_symlinks,
                config,
            )?;
        }
        Commands::Query { database } => {
            query_command(database)?;
        }
    }

    Ok(())
}

fn scan_command(
    directory: PathBuf,
    database: Option<PathBuf>,
    output: Option<PathBuf>,
    jobs: Option<usize>,
    backend: Option<BackendArg>,
    follow_symlinks: bool,
    config_file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match config_file {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    // CLI flags win over the config file
    if let Some(jobs) = jobs {
        config.scan.workers = jobs;
    }
    if let Some(backend) = backend {
        config.scan.backend = backend.into();
    }
    if follow_symlinks {
        config.scan.follow_symlinks = true;
    }

    let db_path = database
        .or_else(|| config.database.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("pdf_metadata.db"));

    println!("🔍 Scanning {} ...", directory.display());

    let mut scanner = Scanner::new(config.scan, &db_path);
    if let Some(csv_path) = &output {
        scanner = scanner.with_csv(CsvSink::create(csv_path)?);
    }

    let stats = scanner.run(&directory)?;

    println!("✅ Scan complete!");
    println!("   📄 Files found: {}", stats.total_files);
    println!("   📊 Processed:   {}", stats.processed);
    println!("   ⏭️  Skipped:     {}", stats.skipped);
    println!("   ❌ Failed:      {}", stats.failed);
    println!("   ⏱️  Time:        {:.2}s", stats.elapsed);
    println!("   📋 Database:    {}", db_path.display());
    if let Some(csv_path) = &output {
        println!("   📈 CSV:         {}", csv_path.display());
    }

    // Per-file failures are already logged; the run itself succeeded
    Ok(())
}

fn query_command(database: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    if !database.exists() {
        eprintln!("❌ Database not found: {}", database.display());
        return Ok(());
    }

    let db = Database::new(&database)?;
    QueryTool::new(db).run()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        // Test that CLI parsing works
        let cli = Cli::try_parse_from(["pdfmeta-rs", "scan", "-d", "/tmp"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_backend_flag() {
        let cli = Cli::try_parse_from(["pdfmeta-rs", "scan", "--backend", "pdfinfo"]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["pdfmeta-rs", "scan", "--backend", "bogus"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_query_defaults() {
        let cli = Cli::try_parse_from(["pdfmeta-rs", "query"]).unwrap();
        match cli.command {
            Commands::Query { database } => {
                assert_eq!(database, PathBuf::from("pdf_metadata.db"));
            }
            _ => panic!("Expected query command"),
        }
    }
}
