//! Interactive query tool over the metadata store
//!
//! Read-only client exposing three views: best size-per-page ratio,
//! largest files, and a full listing. Invalid menu input is reported and
//! the menu re-prompts; nothing here mutates the store.

use crate::error::Result;
use crate::storage::{Database, PdfRecord};
use crate::utils::format_file_size;
use std::io::{BufRead, Write};

/// Menu selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    BestRatio,
    Largest,
    ListAll,
    Exit,
}

fn parse_choice(input: &str) -> Option<MenuChoice> {
    match input.trim() {
        "1" => Some(MenuChoice::BestRatio),
        "2" => Some(MenuChoice::Largest),
        "3" => Some(MenuChoice::ListAll),
        "4" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// Render one record in the fixed row layout
fn render_record(record: &PdfRecord) -> String {
    format!(
        "ID: {}, Pages: {}, Size (bytes): {}, Ratio: {}, File Path: {}, Last Processed: {}",
        record.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
        record.pages,
        record.size_bytes,
        record.ratio,
        record.file_path,
        record.last_processed.format("%Y-%m-%d %H:%M:%S"),
    )
}

/// Interactive read-only client over a metadata database
pub struct QueryTool {
    db: Database,
}

impl QueryTool {
    /// Create a query tool over an open database
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Run the interactive menu until the user exits or input ends
    pub fn run(&self) -> Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.run_with(&mut stdin.lock(), &mut stdout.lock())
    }

    /// Menu loop over arbitrary input/output streams
    pub fn run_with<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<()> {
        loop {
            writeln!(output)?;
            writeln!(output, "PDF Metadata Query Tool")?;
            writeln!(output, "1. Get Best Ratio Files")?;
            writeln!(output, "2. Get Largest Files")?;
            writeln!(output, "3. List All Entries")?;
            writeln!(output, "4. Exit")?;
            write!(output, "Select an option: ")?;
            output.flush()?;

            let line = match read_line(input)? {
                Some(line) => line,
                None => break, // end of input
            };

            match parse_choice(&line) {
                Some(MenuChoice::BestRatio) => {
                    let limit = match self.prompt_limit(input, output, "best ratio")? {
                        Some(limit) => limit,
                        None => break,
                    };
                    self.print_records(output, &self.db.top_by_ratio(limit)?)?;
                }
                Some(MenuChoice::Largest) => {
                    let limit = match self.prompt_limit(input, output, "largest")? {
                        Some(limit) => limit,
                        None => break,
                    };
                    self.print_records(output, &self.db.top_by_size(limit)?)?;
                }
                Some(MenuChoice::ListAll) => {
                    let records = self.db.list_all()?;
                    self.print_records(output, &records)?;
                    let total: u64 = records.iter().map(|r| r.size_bytes).sum();
                    writeln!(
                        output,
                        "{} entries, {} total",
                        records.len(),
                        format_file_size(total)
                    )?;
                }
                Some(MenuChoice::Exit) => {
                    writeln!(output, "Exiting...")?;
                    break;
                }
                None => {
                    writeln!(output, "Invalid option. Please try again.")?;
                }
            }
        }

        Ok(())
    }

    /// Ask for a result count, re-prompting on invalid input.
    /// `None` means the input stream ended.
    fn prompt_limit<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
        what: &str,
    ) -> Result<Option<usize>> {
        loop {
            write!(output, "Enter the number of {} files to retrieve: ", what)?;
            output.flush()?;

            let line = match read_line(input)? {
                Some(line) => line,
                None => return Ok(None),
            };

            match line.trim().parse::<usize>() {
                Ok(limit) => return Ok(Some(limit)),
                Err(_) => writeln!(output, "Invalid number. Please try again.")?,
            }
        }
    }

    fn print_records<W: Write>(&self, output: &mut W, records: &[PdfRecord]) -> Result<()> {
        if records.is_empty() {
            writeln!(output, "No entries found.")?;
        }
        for record in records {
            writeln!(output, "{}", render_record(record))?;
        }
        Ok(())
    }
}

/// Read one line, `None` on end of input
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn seeded_db() -> Database {
        let db = Database::memory().unwrap();
        for (path, pages, size_bytes, ratio) in [
            ("/docs/small.pdf", 10u32, 1000u64, 100u64),
            ("/docs/big.pdf", 5, 50000, 10000),
        ] {
            db.upsert(&PdfRecord {
                id: None,
                author: "N/A".to_string(),
                title: "N/A".to_string(),
                pages,
                size_bytes,
                ratio,
                file_path: path.to_string(),
                last_processed: Utc::now(),
            })
            .unwrap();
        }
        db
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("1"), Some(MenuChoice::BestRatio));
        assert_eq!(parse_choice(" 2 "), Some(MenuChoice::Largest));
        assert_eq!(parse_choice("3"), Some(MenuChoice::ListAll));
        assert_eq!(parse_choice("4"), Some(MenuChoice::Exit));
        assert_eq!(parse_choice("5"), None);
        assert_eq!(parse_choice("abc"), None);
        assert_eq!(parse_choice(""), None);
    }

    #[test]
    fn test_render_record_layout() {
        let record = PdfRecord {
            id: Some(7),
            author: "Jane Doe".to_string(),
            title: "Thesis".to_string(),
            pages: 12,
            size_bytes: 2400,
            ratio: 200,
            file_path: "/docs/thesis.pdf".to_string(),
            last_processed: Utc::now(),
        };

        let rendered = render_record(&record);
        assert!(rendered.starts_with("ID: 7, Pages: 12, Size (bytes): 2400, Ratio: 200"));
        assert!(rendered.contains("File Path: /docs/thesis.pdf"));
        assert!(rendered.contains("Last Processed: "));
    }

    #[test]
    fn test_largest_files_menu_flow() {
        let tool = QueryTool::new(seeded_db());
        let mut input = std::io::Cursor::new(b"2\n1\n4\n".to_vec());
        let mut output = Vec::new();

        tool.run_with(&mut input, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("/docs/big.pdf"));
        assert!(!text.contains("/docs/small.pdf"));
        assert!(text.contains("Exiting..."));
    }

    #[test]
    fn test_invalid_option_reprompts() {
        let tool = QueryTool::new(seeded_db());
        let mut input = std::io::Cursor::new(b"9\n4\n".to_vec());
        let mut output = Vec::new();

        tool.run_with(&mut input, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Invalid option. Please try again."));
        assert!(text.contains("Exiting..."));
    }

    #[test]
    fn test_invalid_limit_reprompts() {
        let tool = QueryTool::new(seeded_db());
        let mut input = std::io::Cursor::new(b"2\nxyz\n2\n4\n".to_vec());
        let mut output = Vec::new();

        tool.run_with(&mut input, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Invalid number. Please try again."));
        assert!(text.contains("/docs/big.pdf"));
        assert!(text.contains("/docs/small.pdf"));
    }

    #[test]
    fn test_end_of_input_terminates() {
        let tool = QueryTool::new(seeded_db());
        let mut input = std::io::Cursor::new(Vec::new());
        let mut output = Vec::new();

        tool.run_with(&mut input, &mut output).unwrap();
    }

    #[test]
    fn test_list_all_shows_every_entry() {
        let tool = QueryTool::new(seeded_db());
        let mut input = std::io::Cursor::new(b"3\n4\n".to_vec());
        let mut output = Vec::new();

        tool.run_with(&mut input, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("/docs/big.pdf"));
        assert!(text.contains("/docs/small.pdf"));
        assert!(text.contains("2 entries"));
    }
}
