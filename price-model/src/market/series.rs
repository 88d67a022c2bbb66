use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;
use ts_rs::TS;
use utoipa::ToSchema;

use crate::general::locale::hour_label;
use crate::market::MarketKind;

/// Number of hourly prices in a regular delivery day.
pub const HOURS_PER_DAY: usize = 24;

/// Hourly prices for one delivery day, normalized from an OMIE or PVPC export.
///
/// Built once per upload and never modified afterwards. Anything derived for
/// display (ranks, tertiles, colors) lives in [`crate::PriceView`].
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema, TS)]
#[ts(export, export_to = "./series.ts")]
pub struct PriceSeries {
    /// The market the prices were published by.
    kind: MarketKind,
    /// Prices in EUR/MWh, one per hour in delivery order. Never more than 24.
    prices: Vec<f64>,
    /// `"HH:00 a HH+1:00"` labels, index-aligned with `prices`.
    hour_labels: Vec<String>,
    /// Reference instant in Madrid local time.
    #[schema(value_type = String)]
    #[ts(type = "string")]
    reference: DateTime<FixedOffset>,
}

impl PriceSeries {
    /// Creates a series, keeping at most the first 24 prices.
    ///
    /// A longer input (the 25-hour day at the end of summer time) loses its
    /// trailing hours. A shorter one is kept as is, and its labels still start
    /// at `00:00` and follow the index.
    pub fn new(kind: MarketKind, mut prices: Vec<f64>, reference: DateTime<FixedOffset>) -> Self {
        prices.truncate(HOURS_PER_DAY);
        let hour_labels = (0..prices.len()).map(hour_label).collect();

        PriceSeries {
            kind,
            prices,
            hour_labels,
            reference,
        }
    }

    pub fn kind(&self) -> MarketKind {
        self.kind
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn hour_labels(&self) -> &[String] {
        &self.hour_labels
    }

    pub fn reference(&self) -> DateTime<FixedOffset> {
        self.reference
    }

    /// Calendar day of the reference instant, in Madrid local time
    pub fn reference_date(&self) -> NaiveDate {
        self.reference.date_naive()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Hours missing from a full 24-hour day.
    pub fn shortfall(&self) -> usize {
        HOURS_PER_DAY.saturating_sub(self.prices.len())
    }

    /// `(label, price)` pairs in hour order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.hour_labels
            .iter()
            .map(String::as_str)
            .zip(self.prices.iter().copied())
    }
}
