use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Configuration struct holding every knob of a report run.
///
/// Any field left out of a TOML file keeps its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    // Ingestion
    pub pvpc_region: String,        // geoname kept when a PVPC export has that column
    pub pvpc_forecast_offset: bool, // show PVPC prices as the day after their first timestamp
    pub omie_marker: String,        // first-column text of the OMIE clearing price row
    pub omie_header_lines: usize,   // boilerplate lines ahead of the OMIE text header

    // Chart
    pub chart_width: u32,   // pixels
    pub chart_height: u32,  // pixels
    pub brand_text: String, // mark drawn at the right end of the footer
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            pvpc_region: "Península".to_string(),
            pvpc_forecast_offset: false,
            omie_marker: "Precio marginal".to_string(),
            omie_header_lines: 3,

            chart_width: 794,
            chart_height: 819,
            brand_text: "NoticiasTrabajo".to_string(),
        }
    }
}

impl ReportConfig {
    /// Parses a TOML document on top of the defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("Invalid report configuration")
    }

    /// Loads a TOML configuration file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&source)
    }
}
