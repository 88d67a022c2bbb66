pub mod app;
pub mod general;
pub mod ingest;
pub mod report;

// Re-export commonly used items for convenience
pub use app::{RunOptions, RunOutput, run};
pub use general::ReportConfig;
pub use ingest::{ParseError, SourceFormat, parse_file, parse_upload};
