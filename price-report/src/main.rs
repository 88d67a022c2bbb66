use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use price_report::{ReportConfig, RunOptions, run};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "price-report")]
#[command(about = "Hourly Spanish electricity prices from OMIE or PVPC exports", long_about = None)]
struct Cli {
    /// OMIE export (.xls/.xlsx/text) or PVPC CSV from ESIOS
    file: PathBuf,

    /// TOML file overriding the default settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the bar chart to this PNG or JPEG file
    #[arg(long)]
    chart: Option<PathBuf>,

    /// Write the HTML listing to this file
    #[arg(long)]
    html: Option<PathBuf>,

    /// Export of the previous day, for the day-over-day comparison
    #[arg(long)]
    previous_day: Option<PathBuf>,

    /// Export of the same day last year, for the year-over-year comparison
    #[arg(long)]
    previous_year: Option<PathBuf>,

    /// Print the social media caption after the listing
    #[arg(long)]
    caption: bool,

    /// Show PVPC prices for the day after the first timestamp
    #[arg(long)]
    forecast_offset: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ReportConfig::from_toml_file(path)?,
        None => ReportConfig::default(),
    };
    if cli.forecast_offset {
        config.pvpc_forecast_offset = true;
    }

    let options = RunOptions {
        input: cli.file,
        chart: cli.chart,
        html: cli.html,
        previous_day: cli.previous_day,
        previous_year: cli.previous_year,
        caption: cli.caption,
    };
    let output = run(&options, &config)?;

    print!("{}", output.listing);
    if let Some(caption) = output.caption {
        println!();
        println!("{}", caption);
    }
    Ok(())
}
