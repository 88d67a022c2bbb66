use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use chrono_tz::Europe::Madrid;
use price_model::{MarketKind, PriceSeries};

const SPANISH_MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Converts a UTC instant to Madrid local time
pub fn to_madrid(instant: DateTime<Utc>) -> DateTime<FixedOffset> {
    instant.with_timezone(&Madrid).fixed_offset()
}

pub fn madrid_now() -> DateTime<FixedOffset> {
    to_madrid(Utc::now())
}

/// Delivery day the prices are shown for.
///
/// OMIE exports carry no date, so the series holds the upload time and the
/// auction result is always for the following day. PVPC series start at the
/// delivery day itself; `pvpc_forecast_offset` moves them one day forward.
pub fn display_date(series: &PriceSeries, pvpc_forecast_offset: bool) -> NaiveDate {
    let reference = series.reference_date();
    let shift = match series.kind() {
        MarketKind::Omie => true,
        MarketKind::Pvpc => pvpc_forecast_offset,
    };

    if shift {
        reference.succ_opt().unwrap_or(reference)
    } else {
        reference
    }
}

/// Long Spanish date, e.g. "2 de enero de 2025"
pub fn spanish_long_date(date: NaiveDate) -> String {
    format!(
        "{} de {} de {}",
        date.day(),
        SPANISH_MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Chart and listing title, e.g. "Precio de la luz, 2 de enero de 2025 (PVPC)"
pub fn report_title(series: &PriceSeries, pvpc_forecast_offset: bool) -> String {
    format!(
        "Precio de la luz, {}{}",
        spanish_long_date(display_date(series, pvpc_forecast_offset)),
        series.kind().title_suffix()
    )
}
