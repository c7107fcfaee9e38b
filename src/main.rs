//! CLI entry point for the bikeshare statistics tool.
//!
//! With `--city` the report is printed once for the given filter; without it the tool asks for
//! city and filter interactively.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use bikeshare_stats::ingestion::{load_and_derive, City, LoadOptions, LoadSeverity, TracingObserver};
use bikeshare_stats::processing::{apply_filter, FilterSelection};
use bikeshare_stats::report::{render, render_window, title, RawDataPager, Summary};
use bikeshare_stats::session::{self, Prompter, SessionOptions, StdinSource};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "bikeshare")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// Directory containing chicago.csv, new_york_city.csv and washington.csv
    #[arg(short, long, env = "BIKESHARE_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// City to report on; omit to answer questions interactively
    #[arg(short, long)]
    city: Option<City>,

    /// Only trips starting in this month (e.g. March)
    #[arg(short, long, requires = "city", conflicts_with = "day")]
    month: Option<String>,

    /// Only trips starting on this weekday (e.g. Monday)
    #[arg(long, requires = "city")]
    day: Option<String>,

    /// Print the summary as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Also print the first N raw records of the filtered set
    #[arg(long, default_value_t = 0)]
    raw: usize,

    /// Invalid answers allowed per question in interactive mode
    #[arg(long, default_value_t = 5)]
    max_attempts: usize,

    /// Records per raw-data page in interactive mode
    #[arg(long, default_value_t = 5)]
    page_size: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let load = LoadOptions {
        data_dir: cli.data_dir.clone(),
        observer: Some(Arc::new(TracingObserver)),
        alert_at_or_above: LoadSeverity::Critical,
    };

    match cli.city {
        Some(city) => report_once(&cli, city, &load),
        None => {
            let options = SessionOptions {
                load,
                max_attempts: cli.max_attempts,
                page_size: cli.page_size,
            };
            let mut prompter = Prompter::new(StdinSource, std::io::stdout(), options.max_attempts);
            session::run(&mut prompter, &options)?;
            Ok(())
        }
    }
}

fn report_once(cli: &Cli, city: City, load: &LoadOptions) -> Result<()> {
    let selection = selection_from_args(cli.month.as_deref(), cli.day.as_deref())?;
    let set = load_and_derive(city, load)
        .with_context(|| format!("loading {}", load.dataset_path(city).display()))?;
    let filtered = apply_filter(&set, &selection);
    info!(%city, filter = %selection, rows = filtered.row_count(), "computing summary");

    let summary = match Summary::compute(&filtered, &selection) {
        Ok(summary) => summary,
        Err(e) if e.is_recoverable() => {
            warn!(error = %e, "nothing to summarize");
            println!("{}", title(city, &selection));
            println!("No data for this filter.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for line in render(&title(city, &selection), &summary) {
            println!("{line}");
        }
    }

    if cli.raw > 0 {
        if let Some(window) = RawDataPager::new(&filtered, cli.raw).next() {
            println!();
            for line in render_window(window, 0, filtered.columns()) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn selection_from_args(month: Option<&str>, day: Option<&str>) -> Result<FilterSelection> {
    match (month, day) {
        (Some(m), _) => FilterSelection::month_named(m)
            .with_context(|| format!("unknown month '{m}'")),
        (None, Some(d)) => FilterSelection::day_named(d)
            .with_context(|| format!("unknown day '{d}'")),
        (None, None) => Ok(FilterSelection::None),
    }
}
