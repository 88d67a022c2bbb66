//! Format detection and normalization of uploaded price exports.

pub mod error;
pub mod omie;
pub mod pvpc;
pub mod table;
mod text;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use price_model::{MarketKind, PriceSeries};
use tracing::info;

use crate::general::config::ReportConfig;
use crate::general::dates::madrid_now;

pub use error::ParseError;
pub use table::{DecodeStrategy, RawTable};

/// The export formats an upload can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Omie,
    Pvpc,
}

impl SourceFormat {
    /// Picks the format from the file name: `.csv` is PVPC, anything else OMIE.
    pub fn detect(filename: &str) -> Self {
        let is_csv = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        if is_csv {
            SourceFormat::Pvpc
        } else {
            SourceFormat::Omie
        }
    }

    pub fn kind(&self) -> MarketKind {
        match self {
            SourceFormat::Omie => MarketKind::Omie,
            SourceFormat::Pvpc => MarketKind::Pvpc,
        }
    }

    pub fn parse(&self, bytes: &[u8], config: &ReportConfig) -> Result<PriceSeries, ParseError> {
        match self {
            SourceFormat::Omie => omie::parse(bytes, config, madrid_now()),
            SourceFormat::Pvpc => pvpc::parse(bytes, config),
        }
    }
}

/// Detects the format of an upload and normalizes it into a price series
pub fn parse_upload(
    bytes: &[u8],
    filename: &str,
    config: &ReportConfig,
) -> Result<PriceSeries, ParseError> {
    let format = SourceFormat::detect(filename);
    let series = format.parse(bytes, config)?;
    info!(
        "Parsed {} as {} ({} hours)",
        filename,
        format.kind(),
        series.len()
    );
    Ok(series)
}

/// Reads and parses an export from disk
pub fn parse_file(path: &Path, config: &ReportConfig) -> Result<PriceSeries> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    parse_upload(&bytes, &filename, config)
        .with_context(|| format!("Could not read prices from {}", path.display()))
}
