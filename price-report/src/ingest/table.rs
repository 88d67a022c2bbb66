//! Loosely structured tables and the ordered ways of decoding them.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use thiserror::Error;
use tracing::debug;

use crate::ingest::error::ParseError;
use crate::ingest::text::{decode_latin1, skip_lines};

/// Cells of a decoded sheet as text, header row kept apart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// First data row whose first cell contains `needle`, ignoring case
    pub fn find_row(&self, needle: &str) -> Option<&[String]> {
        let needle = needle.to_lowercase();
        self.rows
            .iter()
            .find(|row| {
                row.first()
                    .is_some_and(|cell| cell.to_lowercase().contains(&needle))
            })
            .map(Vec::as_slice)
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("nothing left after skipping the header lines")]
    Empty,
    #[error("content is binary")]
    Binary,
    #[error("record {record} has {found} fields but the header has {expected}")]
    TooManyFields {
        record: usize,
        found: usize,
        expected: usize,
    },
    #[error("workbook has no worksheets")]
    NoSheets,
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Workbook(#[from] calamine::Error),
}

/// One way of reading an upload into a [`RawTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    /// Latin-1 text split on `delimiter`, after `skip_lines` lines of boilerplate.
    DelimitedText { skip_lines: usize, delimiter: u8 },
    /// Binary workbook (xls, xlsx, xlsb or ods); first worksheet, first row as header.
    Spreadsheet,
}

impl DecodeStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            DecodeStrategy::DelimitedText { .. } => "delimited text",
            DecodeStrategy::Spreadsheet => "spreadsheet",
        }
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<RawTable, DecodeError> {
        match *self {
            DecodeStrategy::DelimitedText {
                skip_lines,
                delimiter,
            } => decode_delimited(bytes, skip_lines, delimiter),
            DecodeStrategy::Spreadsheet => decode_spreadsheet(bytes),
        }
    }
}

/// Tries each strategy in order and keeps the first table that decodes.
pub fn decode_with(strategies: &[DecodeStrategy], bytes: &[u8]) -> Result<RawTable, ParseError> {
    let mut attempts = Vec::with_capacity(strategies.len());

    for strategy in strategies {
        match strategy.decode(bytes) {
            Ok(table) => {
                debug!(
                    "Decoded {} rows as {}",
                    table.rows.len(),
                    strategy.name()
                );
                return Ok(table);
            }
            Err(e) => {
                debug!("Could not decode as {}: {}", strategy.name(), e);
                attempts.push(format!("{}: {}", strategy.name(), e));
            }
        }
    }

    Err(ParseError::UnsupportedFormat { attempts })
}

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = b"\xD0\xCF\x11\xE0";

fn looks_binary(bytes: &[u8]) -> bool {
    bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC) || bytes.contains(&0)
}

/// Number of fields once trailing empty ones are ignored.
/// Exports often close every line with a delimiter.
fn filled_len(record: &csv::StringRecord) -> usize {
    let trailing = record
        .iter()
        .rev()
        .take_while(|field| field.trim().is_empty())
        .count();
    record.len() - trailing
}

fn decode_delimited(bytes: &[u8], skip: usize, delimiter: u8) -> Result<RawTable, DecodeError> {
    if looks_binary(bytes) {
        return Err(DecodeError::Binary);
    }

    let text = decode_latin1(bytes);
    let body = skip_lines(&text, skip);
    if body.trim().is_empty() {
        return Err(DecodeError::Empty);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let header_record = reader.headers()?.clone();
    let expected = filled_len(&header_record).max(1);
    let header = header_record
        .iter()
        .map(|field| field.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let found = filled_len(&record);
        if found > expected {
            return Err(DecodeError::TooManyFields {
                record: index + 1,
                found,
                expected,
            });
        }
        rows.push(record.iter().map(|field| field.trim().to_string()).collect());
    }

    Ok(RawTable { header, rows })
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

fn decode_spreadsheet(bytes: &[u8]) -> Result<RawTable, DecodeError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first = sheet_names.first().ok_or(DecodeError::NoSheets)?;
    let range = workbook.worksheet_range(first)?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());
    let header = rows.next().unwrap_or_default();

    Ok(RawTable {
        header,
        rows: rows.collect(),
    })
}
