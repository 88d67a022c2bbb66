use price_model::{Comparison, ComparisonBasis, DailySummary, HourExtreme, PriceSeries};

/// Average plus cheapest and most expensive hour. `None` for an empty series.
pub fn summarize(series: &PriceSeries) -> Option<DailySummary> {
    let prices = series.prices();
    if prices.is_empty() {
        return None;
    }

    let average = prices.iter().sum::<f64>() / prices.len() as f64;

    // Strict comparisons keep the first hour when prices repeat
    let mut min_hour = 0;
    let mut max_hour = 0;
    for (hour, &price) in prices.iter().enumerate() {
        if price < prices[min_hour] {
            min_hour = hour;
        }
        if price > prices[max_hour] {
            max_hour = hour;
        }
    }

    let extreme = |hour: usize| HourExtreme {
        hour,
        label: series.hour_labels()[hour].clone(),
        price: prices[hour],
    };

    Some(DailySummary {
        hours: prices.len(),
        average,
        min: extreme(min_hour),
        max: extreme(max_hour),
    })
}

/// Change in the daily average from `previous` to `current`.
/// `None` when either series is empty.
pub fn compare(
    current: &PriceSeries,
    previous: &PriceSeries,
    basis: ComparisonBasis,
) -> Option<Comparison> {
    let current_average = summarize(current)?.average;
    let previous_average = summarize(previous)?.average;
    let change = current_average - previous_average;

    let change_percent = if previous_average == 0.0 {
        None
    } else {
        Some(change / previous_average.abs() * 100.0)
    };

    Some(Comparison {
        basis,
        current_average,
        previous_average,
        change,
        change_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use price_model::MarketKind;

    fn series(prices: Vec<f64>) -> PriceSeries {
        let reference = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2025, 1, 2, 0, 0, 0)
            .unwrap();
        PriceSeries::new(MarketKind::Pvpc, prices, reference)
    }

    #[test]
    fn test_summarize() {
        let summary = summarize(&series(vec![40.0, 10.0, 90.0, 10.0, 90.0, 60.0])).unwrap();

        assert_eq!(summary.hours, 6);
        assert!((summary.average - 50.0).abs() < 1e-9);
        assert_eq!(summary.min.hour, 1);
        assert_eq!(summary.min.label, "01:00 a 02:00");
        assert_eq!(summary.min.price, 10.0);
        assert_eq!(summary.max.hour, 2);
        assert_eq!(summary.max.label, "02:00 a 03:00");
    }

    #[test]
    fn test_summarize_empty() {
        assert!(summarize(&series(vec![])).is_none());
    }

    #[test]
    fn test_compare_day_over_day() {
        let today = series(vec![110.0; 24]);
        let yesterday = series(vec![100.0; 24]);

        let comparison = compare(&today, &yesterday, ComparisonBasis::DayOverDay).unwrap();
        assert_eq!(comparison.basis, ComparisonBasis::DayOverDay);
        assert!((comparison.change - 10.0).abs() < 1e-9);
        assert!((comparison.change_percent.unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_compare_year_over_year_drop() {
        let now = series(vec![30.0, 50.0]);
        let last_year = series(vec![80.0, 80.0]);

        let comparison = compare(&now, &last_year, ComparisonBasis::YearOverYear).unwrap();
        assert!((comparison.current_average - 40.0).abs() < 1e-9);
        assert!((comparison.change + 40.0).abs() < 1e-9);
        assert!((comparison.change_percent.unwrap() + 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_compare_zero_baseline() {
        let comparison = compare(
            &series(vec![5.0]),
            &series(vec![0.0]),
            ComparisonBasis::DayOverDay,
        )
        .unwrap();
        assert_eq!(comparison.change_percent, None);
        assert!((comparison.change - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_compare_negative_baseline() {
        let comparison = compare(
            &series(vec![-1.0]),
            &series(vec![-2.0]),
            ComparisonBasis::DayOverDay,
        )
        .unwrap();
        assert!((comparison.change_percent.unwrap() - 50.0).abs() < 1e-9);
    }
}
