use chrono::NaiveDate;
use price_model::{Comparison, PriceSeries, format_price};

use crate::general::dates::spanish_long_date;
use crate::report::compare::summarize;

/// Below this absolute change (EUR/MWh) the average is reported as unchanged.
const FLAT_CHANGE: f64 = 0.005;

fn comparison_sentence(comparison: &Comparison) -> String {
    let phrase = comparison.basis.phrase();
    if comparison.change.abs() < FLAT_CHANGE {
        return format!("El precio medio se mantiene {}.", phrase);
    }

    let verb = if comparison.change > 0.0 { "sube" } else { "baja" };
    let amount = format_price(comparison.change.abs());
    match comparison.change_percent {
        Some(percent) => format!(
            "El precio medio {} un {} % {} ({} €/MWh).",
            verb,
            format_price(percent.abs()),
            phrase,
            amount
        ),
        None => format!("El precio medio {} {} €/MWh {}.", verb, amount, phrase),
    }
}

/// Social media caption for a day of prices. `None` for an empty series.
pub fn build_caption(
    series: &PriceSeries,
    display_date: NaiveDate,
    comparisons: &[Comparison],
) -> Option<String> {
    let summary = summarize(series)?;
    let kind = series.kind();

    let mut lines = vec![
        format!(
            "⚡ Precio de la luz para el {}{}",
            spanish_long_date(display_date),
            kind.title_suffix()
        ),
        String::new(),
        format!("Precio medio: {} €/MWh.", format_price(summary.average)),
        format!(
            "La hora más barata es de {} ({} €/MWh).",
            summary.min.label,
            format_price(summary.min.price)
        ),
        format!(
            "La hora más cara es de {} ({} €/MWh).",
            summary.max.label,
            format_price(summary.max.price)
        ),
    ];
    lines.extend(comparisons.iter().map(comparison_sentence));
    lines.push(String::new());
    lines.push(kind.source_label().to_string());

    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::compare::compare;
    use chrono::{FixedOffset, TimeZone};
    use price_model::{ComparisonBasis, MarketKind};

    fn series(kind: MarketKind, prices: Vec<f64>) -> PriceSeries {
        let reference = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2025, 1, 2, 0, 0, 0)
            .unwrap();
        PriceSeries::new(kind, prices, reference)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 3).unwrap()
    }

    #[test]
    fn test_caption_mentions_extremes() {
        let mut prices = vec![60.0; 24];
        prices[4] = 12.5;
        prices[20] = 140.25;
        let caption = build_caption(&series(MarketKind::Omie, prices), date(), &[]).unwrap();

        assert!(caption.starts_with("⚡ Precio de la luz para el 3 de enero de 2025\n"));
        assert!(caption.contains("La hora más barata es de 04:00 a 05:00 (12,50 €/MWh)."));
        assert!(caption.contains("La hora más cara es de 20:00 a 21:00 (140,25 €/MWh)."));
        assert!(caption.ends_with("Fuente: OMIE"));
    }

    #[test]
    fn test_caption_with_comparisons() {
        let today = series(MarketKind::Pvpc, vec![110.0; 24]);
        let yesterday = series(MarketKind::Pvpc, vec![100.0; 24]);
        let last_year = series(MarketKind::Pvpc, vec![110.0; 24]);
        let comparisons = vec![
            compare(&today, &yesterday, ComparisonBasis::DayOverDay).unwrap(),
            compare(&today, &last_year, ComparisonBasis::YearOverYear).unwrap(),
        ];

        let caption = build_caption(&today, date(), &comparisons).unwrap();

        assert!(caption.contains("(PVPC)"));
        assert!(caption.contains(
            "El precio medio sube un 10,00 % respecto al día anterior (10,00 €/MWh)."
        ));
        assert!(caption.contains(
            "El precio medio se mantiene respecto al mismo día del año pasado."
        ));
        assert!(caption.ends_with("Fuente: ESIOS (REE)"));
    }

    #[test]
    fn test_drop_without_percentage() {
        let comparison = Comparison {
            basis: ComparisonBasis::DayOverDay,
            current_average: -3.0,
            previous_average: 0.0,
            change: -3.0,
            change_percent: None,
        };
        assert_eq!(
            comparison_sentence(&comparison),
            "El precio medio baja 3,00 €/MWh respecto al día anterior."
        );
    }

    #[test]
    fn test_empty_series_has_no_caption() {
        assert!(build_caption(&series(MarketKind::Omie, vec![]), date(), &[]).is_none());
    }
}
