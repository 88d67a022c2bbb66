//! One report run: parse the upload, derive the view and hand it to the
//! renderers that were asked for.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use price_model::{Comparison, ComparisonBasis, PriceSeries};
use tracing::{info, warn};

use crate::general::dates::{display_date, report_title};
use crate::general::ReportConfig;
use crate::ingest::parse_file;
use crate::report::{
    ChartStyle, build_caption, build_view, compare, render_chart, render_text, write_html,
};

/// What to produce for one upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    pub input: PathBuf,
    pub chart: Option<PathBuf>,
    pub html: Option<PathBuf>,
    pub previous_day: Option<PathBuf>,
    pub previous_year: Option<PathBuf>,
    pub caption: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    pub title: String,
    pub listing: String,
    pub caption: Option<String>,
    pub comparisons: Vec<Comparison>,
}

fn load_baseline(
    current: &PriceSeries,
    path: &Path,
    basis: ComparisonBasis,
    config: &ReportConfig,
) -> Result<Option<Comparison>> {
    let previous = parse_file(path, config)
        .with_context(|| format!("Failed to load comparison file {}", path.display()))?;
    if previous.kind() != current.kind() {
        warn!(
            "Comparing {} prices against a {} file",
            current.kind(),
            previous.kind()
        );
    }
    Ok(compare(current, &previous, basis))
}

pub fn run(options: &RunOptions, config: &ReportConfig) -> Result<RunOutput> {
    let series = parse_file(&options.input, config)?;

    let view = build_view(&series);
    let title = report_title(&series, config.pvpc_forecast_offset);
    info!("{}", title);

    let mut comparisons = Vec::new();
    let baselines = [
        (&options.previous_day, ComparisonBasis::DayOverDay),
        (&options.previous_year, ComparisonBasis::YearOverYear),
    ];
    for (path, basis) in baselines {
        if let Some(path) = path {
            comparisons.extend(load_baseline(&series, path, basis, config)?);
        }
    }

    if let Some(path) = &options.chart {
        render_chart(&view, &title, &ChartStyle::from_config(config), path)?;
    }
    if let Some(path) = &options.html {
        write_html(&view, &title, path)?;
    }

    let caption = if options.caption {
        build_caption(
            &series,
            display_date(&series, config.pvpc_forecast_offset),
            &comparisons,
        )
    } else {
        None
    };

    Ok(RunOutput {
        title,
        listing: render_text(&view),
        caption,
        comparisons,
    })
}
