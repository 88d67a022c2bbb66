//! PVPC exports from ESIOS: `;`-separated CSV, one row per hour and region.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use indexmap::IndexMap;
use price_model::{HOURS_PER_DAY, MarketKind, PriceSeries, parse_decimal_comma};
use tracing::{debug, warn};

use crate::general::config::ReportConfig;
use crate::general::dates::to_madrid;
use crate::ingest::error::ParseError;
use crate::ingest::text::decode_text;

const DATETIME_COLUMN: &str = "datetime";
const VALUE_COLUMN: &str = "value";
const GEONAME_COLUMN: &str = "geoname";

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];
const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Parses a timestamp as UTC. Values without an offset are taken as UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Reads a PVPC export into a series for the region configured in `config`.
pub fn parse(bytes: &[u8], config: &ReportConfig) -> Result<PriceSeries, ParseError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(ParseError::malformed("the file is empty"));
    }

    let text = decode_text(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ParseError::malformed(format!("could not read the CSV header: {}", e)))?;

    // Lower-cased name -> first column carrying it
    let mut columns: IndexMap<String, usize> = IndexMap::new();
    for (index, name) in headers.iter().enumerate() {
        columns.entry(name.trim().to_lowercase()).or_insert(index);
    }

    let missing: Vec<String> = [DATETIME_COLUMN, VALUE_COLUMN]
        .into_iter()
        .filter(|name| !columns.contains_key(*name))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(ParseError::MissingColumns { missing });
    }

    let datetime_col = columns[DATETIME_COLUMN];
    let value_col = columns[VALUE_COLUMN];
    let geoname_col = columns.get(GEONAME_COLUMN).copied();

    let mut hours: Vec<(DateTime<Utc>, f64)> = Vec::new();
    for (index, record) in reader.records().enumerate() {
        // Line numbers as a spreadsheet shows them, header on line 1
        let line = index + 2;
        let record = record
            .map_err(|e| ParseError::malformed(format!("could not read line {}: {}", line, e)))?;

        if let Some(col) = geoname_col {
            // Exact match, the way ESIOS spells the region
            if record.get(col) != Some(config.pvpc_region.as_str()) {
                continue;
            }
        }

        let raw_datetime = record.get(datetime_col).unwrap_or_default();
        let timestamp = parse_timestamp(raw_datetime).ok_or_else(|| ParseError::InvalidTimestamp {
            row: line,
            raw: raw_datetime.to_string(),
        })?;

        let raw_value = record.get(value_col).unwrap_or_default();
        let value = parse_decimal_comma(raw_value).ok_or_else(|| ParseError::NumericConversion {
            cell: format!("line {}", line),
            raw: raw_value.to_string(),
        })?;

        hours.push((timestamp, value));
    }

    // Exports are not guaranteed to be in order; the sort is stable for equal timestamps
    hours.sort_by_key(|(timestamp, _)| *timestamp);

    let Some(&(first, _)) = hours.first() else {
        return Err(ParseError::malformed(format!(
            "no price rows for region '{}'",
            config.pvpc_region
        )));
    };

    if hours.len() > HOURS_PER_DAY {
        warn!(
            "PVPC export has {} hours, keeping the first {}",
            hours.len(),
            HOURS_PER_DAY
        );
    } else if hours.len() < HOURS_PER_DAY {
        warn!(
            "PVPC export has only {} hours, the day is incomplete",
            hours.len()
        );
    }

    let reference = to_madrid(first);
    debug!("PVPC series starts at {}", reference);

    let prices = hours.into_iter().map(|(_, value)| value).collect();
    Ok(PriceSeries::new(MarketKind::Pvpc, prices, reference))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Timelike};

    fn day_csv(start: DateTime<Utc>, hours: usize) -> String {
        let mut csv = String::from("id;name;geoid;geoname;value;datetime_utc;datetime\n");
        for h in 0..hours {
            let ts = start + chrono::Duration::hours(h as i64);
            csv.push_str(&format!(
                "1001;PVPC;8741;Península;{}.5;{};{}\n",
                100 + h,
                ts.format("%Y-%m-%dT%H:%M:%SZ"),
                ts.format("%Y-%m-%dT%H:%M:%SZ")
            ));
        }
        csv
    }

    fn jan_first_23h() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 23, 0, 0).unwrap()
    }

    #[test]
    fn test_full_day_reference_is_madrid_midnight() {
        let mut csv = String::from("geoname;datetime;value\n");
        csv.push_str("Península;2025-01-01T23:00:00Z;45.67\n");
        for h in 0..23 {
            csv.push_str(&format!(
                "Península;2025-01-02T{:02}:00:00Z;{}\n",
                h,
                50 + h
            ));
        }

        let series = parse(csv.as_bytes(), &ReportConfig::default()).unwrap();

        assert_eq!(series.kind(), MarketKind::Pvpc);
        assert_eq!(series.len(), 24);
        assert_eq!(series.prices()[0], 45.67);
        assert_eq!(
            series.reference_date(),
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
        );
        assert_eq!(series.reference().hour(), 0);
    }

    #[test]
    fn test_rows_are_sorted_by_timestamp() {
        let csv = "datetime;value\n\
                   2025-03-01T02:00:00Z;30\n\
                   2025-03-01T00:00:00Z;10\n\
                   2025-03-01T01:00:00Z;20\n";

        let series = parse(csv.as_bytes(), &ReportConfig::default()).unwrap();
        assert_eq!(series.prices(), &[10.0, 20.0, 30.0]);
        assert_eq!(series.hour_labels()[2], "02:00 a 03:00");
    }

    #[test]
    fn test_other_regions_are_dropped() {
        let csv = "geoname;datetime;value\n\
                   Canarias;2025-03-01T00:00:00Z;99\n\
                   Península;2025-03-01T00:00:00Z;10\n\
                   Baleares;2025-03-01T01:00:00Z;98\n\
                   Ceuta;2025-03-01T01:00:00Z;97\n\
                   Península;2025-03-01T01:00:00Z;11\n";

        let series = parse(csv.as_bytes(), &ReportConfig::default()).unwrap();
        assert_eq!(series.prices(), &[10.0, 11.0]);
    }

    #[test]
    fn test_region_must_match_exactly() {
        let csv = "geoname;datetime;value\n\
                   península;2025-03-01T00:00:00Z;99\n\
                   Península ;2025-03-01T00:00:00Z;98\n\
                   Península;2025-03-01T01:00:00Z;11\n";

        let series = parse(csv.as_bytes(), &ReportConfig::default()).unwrap();
        assert_eq!(series.prices(), &[11.0]);
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let csv = "DateTime;VALUE;GeoName\n2025-03-01T00:00:00Z;12,5;Península\n";
        let series = parse(csv.as_bytes(), &ReportConfig::default()).unwrap();
        assert_eq!(series.prices(), &[12.5]);
    }

    #[test]
    fn test_missing_value_column() {
        let csv = "geoname;datetime\nPenínsula;2025-03-01T00:00:00Z\n";
        let err = parse(csv.as_bytes(), &ReportConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingColumns {
                missing: vec!["value".to_string()]
            }
        );
    }

    #[test]
    fn test_missing_both_columns() {
        let err = parse(b"a;b\n1;2\n", &ReportConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingColumns {
                missing: vec!["datetime".to_string(), "value".to_string()]
            }
        );
    }

    #[test]
    fn test_dst_day_is_truncated() {
        // 25 hours: last Sunday of October 2025 in Madrid
        let start = Utc.with_ymd_and_hms(2025, 10, 25, 22, 0, 0).unwrap();
        let csv = day_csv(start, 25);

        let series = parse(csv.as_bytes(), &ReportConfig::default()).unwrap();

        assert_eq!(series.len(), 24);
        assert_eq!(series.prices()[0], 100.5);
        assert_eq!(series.prices()[23], 123.5);
        assert_eq!(
            series.reference_date(),
            NaiveDate::from_ymd_opt(2025, 10, 26).unwrap()
        );
    }

    #[test]
    fn test_short_day_is_accepted() {
        let series = parse(day_csv(jan_first_23h(), 23).as_bytes(), &ReportConfig::default()).unwrap();
        assert_eq!(series.len(), 23);
        assert_eq!(series.shortfall(), 1);
        assert_eq!(series.prices()[22], 122.5);
    }

    #[test]
    fn test_latin1_export() {
        let mut bytes = b"geoname;datetime;value\nPen\xEDnsula;2025-03-01T00:00:00Z;7\n".to_vec();
        bytes.extend_from_slice(b"Canarias;2025-03-01T00:00:00Z;8\n");

        let series = parse(&bytes, &ReportConfig::default()).unwrap();
        assert_eq!(series.prices(), &[7.0]);
    }

    #[test]
    fn test_bad_timestamp() {
        let csv = "datetime;value\n2025-03-01T00:00:00Z;1\nmañana;2\n";
        let err = parse(csv.as_bytes(), &ReportConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidTimestamp {
                row: 3,
                raw: "mañana".to_string()
            }
        );
    }

    #[test]
    fn test_bad_value() {
        let csv = "datetime;value\n2025-03-01T00:00:00Z;abc\n";
        let err = parse(csv.as_bytes(), &ReportConfig::default()).unwrap_err();
        assert!(matches!(err, ParseError::NumericConversion { .. }));
    }

    #[test]
    fn test_empty_inputs() {
        let config = ReportConfig::default();
        assert!(matches!(
            parse(b"", &config),
            Err(ParseError::EmptyOrMalformedInput { .. })
        ));
        assert!(matches!(
            parse(b"datetime;value\n", &config),
            Err(ParseError::EmptyOrMalformedInput { .. })
        ));
        assert!(matches!(
            parse(b"geoname;datetime;value\nCanarias;2025-03-01T00:00:00Z;1\n", &config),
            Err(ParseError::EmptyOrMalformedInput { .. })
        ));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 1, 23, 0, 0).unwrap();
        for raw in [
            "2025-01-01T23:00:00Z",
            "2025-01-02T00:00:00+01:00",
            "2025-01-02T00:00:00.000+01:00",
            "2025-01-02 00:00:00+01:00",
            "2025-01-01T23:00:00",
            "2025-01-01 23:00:00",
            "2025-01-01 23:00",
            "01/01/2025 23:00",
        ] {
            assert_eq!(parse_timestamp(raw), Some(expected), "{raw}");
        }
        assert_eq!(
            parse_timestamp("2025-01-01"),
            Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
