pub mod config;
pub mod dates;

pub use config::ReportConfig;
