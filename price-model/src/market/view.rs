use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::market::MarketKind;

/// Third of the day a price falls into once the hours are ranked.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema, TS,
)]
#[ts(export, export_to = "./view.ts")]
pub enum Tertile {
    /// The cheapest third of the hours.
    Cheap,
    /// The middle third.
    Middle,
    /// The most expensive third.
    Expensive,
}

impl Tertile {
    /// Bucket for a 1-based `rank` among `count` ranked hours.
    pub fn from_rank(rank: usize, count: usize) -> Self {
        if count == 0 {
            return Tertile::Cheap;
        }
        match (rank.saturating_sub(1) * 3) / count {
            0 => Tertile::Cheap,
            1 => Tertile::Middle,
            _ => Tertile::Expensive,
        }
    }

    /// Bar color as a hex string
    pub fn color_hex(&self) -> &'static str {
        match self {
            Tertile::Cheap => "#228000",
            Tertile::Middle => "#f39c12",
            Tertile::Expensive => "#f81203",
        }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Tertile::Cheap => (0x22, 0x80, 0x00),
            Tertile::Middle => (0xf3, 0x9c, 0x12),
            Tertile::Expensive => (0xf8, 0x12, 0x03),
        }
    }

    /// CSS class used by the HTML listing
    pub fn css_class(&self) -> &'static str {
        match self {
            Tertile::Cheap => "cheap",
            Tertile::Middle => "middle",
            Tertile::Expensive => "expensive",
        }
    }
}

/// One display row: an hour with its price and where it ranks within the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export, export_to = "./view.ts")]
pub struct HourlyPrice {
    /// Position of the hour in the day (0-based).
    pub hour: usize,
    /// `"HH:00 a HH+1:00"` label.
    pub label: String,
    /// Price in EUR/MWh.
    pub price: f64,
    /// 1-based rank, cheapest first. Ties go to the earlier hour.
    pub rank: usize,
    pub tertile: Tertile,
}

/// Read-only display view derived from a [`crate::PriceSeries`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export, export_to = "./view.ts")]
pub struct PriceView {
    pub kind: MarketKind,
    pub rows: Vec<HourlyPrice>,
}

impl PriceView {
    pub fn new(kind: MarketKind, rows: Vec<HourlyPrice>) -> Self {
        PriceView { kind, rows }
    }

    pub fn rows(&self) -> &[HourlyPrice] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Highest price of the day, or `None` for an empty view
    pub fn max_price(&self) -> Option<f64> {
        self.rows
            .iter()
            .map(|row| row.price)
            .fold(None, |acc: Option<f64>, p| Some(acc.map_or(p, |a| a.max(p))))
    }
}
