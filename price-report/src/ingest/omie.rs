//! OMIE daily market exports.
//!
//! The "xls" files OMIE publishes are usually `;`-separated Latin-1 text with a
//! few lines of boilerplate on top; real workbooks turn up as well. The hourly
//! clearing prices sit on the row labelled "Precio marginal", hours 1 to 24 in
//! columns 2 to 25.

use chrono::{DateTime, FixedOffset};
use price_model::{HOURS_PER_DAY, MarketKind, PriceSeries, parse_decimal_comma};
use tracing::debug;

use crate::general::config::ReportConfig;
use crate::ingest::error::ParseError;
use crate::ingest::table::{DecodeStrategy, decode_with};

/// Decoders tried in order until one yields a table.
pub fn decode_strategies(config: &ReportConfig) -> [DecodeStrategy; 2] {
    [
        DecodeStrategy::DelimitedText {
            skip_lines: config.omie_header_lines,
            delimiter: b';',
        },
        DecodeStrategy::Spreadsheet,
    ]
}

/// Reads an OMIE export. The file carries no usable date, so `now` becomes
/// the reference of the series.
pub fn parse(
    bytes: &[u8],
    config: &ReportConfig,
    now: DateTime<FixedOffset>,
) -> Result<PriceSeries, ParseError> {
    if bytes.is_empty() {
        return Err(ParseError::malformed("the file is empty"));
    }

    let table = decode_with(&decode_strategies(config), bytes)?;

    let row = table
        .find_row(&config.omie_marker)
        .ok_or_else(|| ParseError::RowNotFound {
            marker: config.omie_marker.clone(),
        })?;
    debug!("Found '{}' row: {:?}", config.omie_marker, row.first());

    let prices = (1..=HOURS_PER_DAY)
        .map(|column| {
            let raw = row.get(column).map(String::as_str).unwrap_or_default();
            parse_decimal_comma(raw).ok_or_else(|| ParseError::NumericConversion {
                cell: format!("hour {}", column),
                raw: raw.to_string(),
            })
        })
        .collect::<Result<Vec<f64>, ParseError>>()?;

    Ok(PriceSeries::new(MarketKind::Omie, prices, now))
}
