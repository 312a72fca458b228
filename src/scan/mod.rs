//! Directory discovery and freshness checking for pdfmeta-rs

pub mod discovery;
pub mod freshness;

// Re-export main functions
pub use discovery::discover;
pub use freshness::should_process;
