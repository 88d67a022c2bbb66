use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

/// The cheapest or the most expensive hour of a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export, export_to = "./summary.ts")]
pub struct HourExtreme {
    /// Position of the hour in the day (0-based).
    pub hour: usize,
    pub label: String,
    /// Price in EUR/MWh.
    pub price: f64,
}

/// Headline figures for one day of prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export, export_to = "./summary.ts")]
pub struct DailySummary {
    /// Number of hours the figures were computed over.
    pub hours: usize,
    /// Arithmetic mean in EUR/MWh.
    pub average: f64,
    /// First occurrence of the lowest price.
    pub min: HourExtreme,
    /// First occurrence of the highest price.
    pub max: HourExtreme,
}

/// What a comparison is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export, export_to = "./summary.ts")]
pub enum ComparisonBasis {
    /// The previous delivery day.
    DayOverDay,
    /// The same day one year earlier.
    YearOverYear,
}

impl ComparisonBasis {
    /// Spanish phrase naming the baseline
    pub fn phrase(&self) -> &'static str {
        match self {
            ComparisonBasis::DayOverDay => "respecto al día anterior",
            ComparisonBasis::YearOverYear => "respecto al mismo día del año pasado",
        }
    }
}

/// Change in the daily average between two days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export, export_to = "./summary.ts")]
pub struct Comparison {
    pub basis: ComparisonBasis,
    pub current_average: f64,
    pub previous_average: f64,
    /// `current_average - previous_average`, in EUR/MWh.
    pub change: f64,
    /// Relative change in percent. `None` when the baseline average is zero.
    pub change_percent: Option<f64>,
}
