//! Spanish-locale formatting shared by every renderer.

/// Label for the hour starting at `index`, e.g. `"07:00 a 08:00"`.
/// The last hour of a day reads `"23:00 a 24:00"`.
pub fn hour_label(index: usize) -> String {
    format!("{:02}:00 a {:02}:00", index, index + 1)
}

/// Formats a price with two decimals and a decimal comma (`45.6` -> `"45,60"`).
pub fn format_price(price: f64) -> String {
    format!("{:.2}", price).replace('.', ",")
}

/// Parses a number written with a decimal comma (`"50,25"` -> `50.25`).
/// Surrounding whitespace is ignored; a plain decimal point is accepted too.
pub fn parse_decimal_comma(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
