pub mod general;
pub mod market;

pub use general::locale::{format_price, hour_label, parse_decimal_comma};
pub use general::summary::{Comparison, ComparisonBasis, DailySummary, HourExtreme};
pub use market::series::{HOURS_PER_DAY, PriceSeries};
pub use market::view::{HourlyPrice, PriceView, Tertile};
pub use market::MarketKind;
