use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result, bail};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use plotters_backend::text_anchor::{HPos, Pos, VPos};
use price_model::PriceView;
use tracing::info;

use crate::general::ReportConfig;

const FOOTER_RULE: RGBColor = RGBColor(0x61, 0x95, 0xb7);
const TEXT_COLOR: RGBColor = RGBColor(0x33, 0x33, 0x33);
const UNIT_LABEL: &str = "Precio (EUR/MWh)";
/// Room to the right of the longest bar for its value label
const X_HEADROOM: f64 = 1.35;
const BAR_HALF_HEIGHT: f64 = 0.4;
const FOOTER_HEIGHT: u32 = 70;
const SIDE_MARGIN: i32 = 20;

/// Geometry and brand mark of the bar chart. Text uses the system sans-serif.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub brand_text: String,
}

impl ChartStyle {
    pub fn from_config(config: &ReportConfig) -> Self {
        ChartStyle {
            width: config.chart_width,
            height: config.chart_height,
            brand_text: config.brand_text.clone(),
        }
    }
}

fn font(size: f64, style: FontStyle) -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, size, style)
}

/// Horizontal extent of the plot. Negative prices extend it to the left.
fn x_range(view: &PriceView) -> Range<f64> {
    let max = view.max_price().unwrap_or(0.0);
    let min = view.rows().iter().map(|row| row.price).fold(0.0, f64::min);
    let end = if max > 0.0 { max * X_HEADROOM } else { 1.0 };
    (min * X_HEADROOM)..end
}

/// Hour 0 sits at the top of the chart
fn bar_row(hour: usize, count: usize) -> f64 {
    (count - 1 - hour) as f64
}

/// Axis label for a y coordinate. Only whole rows get a label.
fn row_label(view: &PriceView, y: f64) -> String {
    let count = view.len();
    if y.fract() != 0.0 || y < 0.0 || y >= count as f64 {
        return String::new();
    }
    let hour = count - 1 - y as usize;
    view.rows()
        .get(hour)
        .map(|row| row.label.clone())
        .unwrap_or_default()
}

fn check_extension(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png" | "jpg" | "jpeg") => Ok(()),
        _ => bail!(
            "Unsupported chart format for {}, expected .png or .jpg",
            path.display()
        ),
    }
}

/// Renders the bar chart to `path`. The image format follows the extension.
pub fn render_chart(view: &PriceView, title: &str, style: &ChartStyle, path: &Path) -> Result<()> {
    check_extension(path)?;
    if view.is_empty() {
        bail!("No prices to chart");
    }

    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    draw_chart(&root, view, title, style)
        .with_context(|| format!("Failed to draw chart {}", path.display()))?;
    info!("Chart saved as {}", path.display());
    Ok(())
}

fn draw_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    view: &PriceView,
    title: &str,
    style: &ChartStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let (upper, footer) = root.split_vertically(style.height.saturating_sub(FOOTER_HEIGHT));

    let count = view.len();
    let mut chart = ChartBuilder::on(&upper)
        .caption(title, font(26.0, FontStyle::Bold).color(&TEXT_COLOR))
        .margin(SIDE_MARGIN)
        .x_label_area_size(45)
        .y_label_area_size(110)
        .build_cartesian_2d(x_range(view), -0.5..(count as f64 - 0.5))?;

    let label_for = |y: &f64| row_label(view, *y);
    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(count)
        .y_label_formatter(&label_for)
        .x_desc(UNIT_LABEL)
        .label_style(font(14.0, FontStyle::Normal).color(&TEXT_COLOR))
        .axis_desc_style(font(15.0, FontStyle::Normal).color(&TEXT_COLOR))
        .draw()?;

    chart.draw_series(view.rows().iter().map(|row| {
        let y = bar_row(row.hour, count);
        let (r, g, b) = row.tertile.rgb();
        Rectangle::new(
            [(0.0, y - BAR_HALF_HEIGHT), (row.price, y + BAR_HALF_HEIGHT)],
            RGBColor(r, g, b).filled(),
        )
    }))?;

    let pad = x_range(view).end * 0.01;
    let value_style = font(13.0, FontStyle::Bold)
        .color(&TEXT_COLOR)
        .pos(Pos::new(HPos::Left, VPos::Center));
    chart.draw_series(view.rows().iter().map(|row| {
        Text::new(
            format!("{:.2}€/MWh", row.price),
            (row.price.max(0.0) + pad, bar_row(row.hour, count)),
            value_style.clone(),
        )
    }))?;

    draw_footer(&footer, view, style)?;
    root.present()?;
    Ok(())
}

fn draw_footer<DB>(footer: &DrawingArea<DB, Shift>, view: &PriceView, style: &ChartStyle) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let right = style.width as i32 - SIDE_MARGIN;
    footer.draw(&PathElement::new(
        vec![(SIDE_MARGIN, 10), (right, 10)],
        FOOTER_RULE.stroke_width(3),
    ))?;

    footer.draw(&Text::new(
        view.kind.source_label(),
        (SIDE_MARGIN, 35),
        font(14.0, FontStyle::Normal)
            .color(&TEXT_COLOR)
            .pos(Pos::new(HPos::Left, VPos::Center)),
    ))?;
    footer.draw(&Text::new(
        style.brand_text.as_str(),
        (right, 35),
        font(20.0, FontStyle::Bold)
            .color(&FOOTER_RULE)
            .pos(Pos::new(HPos::Right, VPos::Center)),
    ))?;
    Ok(())
}
