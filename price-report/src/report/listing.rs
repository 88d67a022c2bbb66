//! Copy-and-paste listings of the hourly prices.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use askama::Template;
use price_model::{PriceView, format_price};
use tracing::info;

#[derive(Debug)]
struct ListingRow {
    label: String,
    price: String,
    class: &'static str,
    color: &'static str,
}

#[derive(Debug, Template)]
#[template(path = "listing.html")]
struct ListingTemplate<'a> {
    title: &'a str,
    source: &'a str,
    rows: Vec<ListingRow>,
}

/// One line per hour: `"07:00 a 08:00: 45,67 euros/MWh"`
pub fn render_text(view: &PriceView) -> String {
    view.rows()
        .iter()
        .map(|row| format!("{}: {} euros/MWh\n", row.label, format_price(row.price)))
        .collect()
}

pub fn render_html(view: &PriceView, title: &str) -> Result<String> {
    let template = ListingTemplate {
        title,
        source: view.kind.source_label(),
        rows: view
            .rows()
            .iter()
            .map(|row| ListingRow {
                label: row.label.clone(),
                price: format_price(row.price),
                class: row.tertile.css_class(),
                color: row.tertile.color_hex(),
            })
            .collect(),
    };
    template.render().context("Failed to render HTML listing")
}

pub fn write_html(view: &PriceView, title: &str, path: &Path) -> Result<()> {
    let html = render_html(view, title)?;
    fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("HTML listing saved as {}", path.display());
    Ok(())
}
