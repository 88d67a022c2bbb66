use price_model::{HourlyPrice, PriceSeries, PriceView, Tertile};

/// 1-based rank of every price, cheapest first. Equal prices rank in hour order.
pub fn rank_first(prices: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..prices.len()).collect();
    // sort_by is stable, so ties keep their positional order
    order.sort_by(|&a, &b| prices[a].total_cmp(&prices[b]));

    let mut ranks = vec![0; prices.len()];
    for (position, &index) in order.iter().enumerate() {
        ranks[index] = position + 1;
    }
    ranks
}

/// Builds the display rows for a series: label, price, rank and tertile per hour.
pub fn build_view(series: &PriceSeries) -> PriceView {
    let ranks = rank_first(series.prices());
    let count = series.len();

    let rows = series
        .iter()
        .zip(ranks)
        .enumerate()
        .map(|(hour, ((label, price), rank))| HourlyPrice {
            hour,
            label: label.to_string(),
            price,
            rank,
            tertile: Tertile::from_rank(rank, count),
        })
        .collect();

    PriceView::new(series.kind(), rows)
}
