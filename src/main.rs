//! CLI entry point for the Cyclistic ride dashboard.
//!
//! Loads the ride data once, applies the rider-type and day selection, and
//! hands the computed views to the presentation layer as JSON.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use cyclistic_dashboard::{
    FilterCriteria, Pipeline, RiderSelection,
    normalize::{CoordinateBackfill, DEFAULT_ROW_CAP, NormalizeOptions},
    output::{append_record, print_json, print_pretty, write_json},
    stats::SummaryRecord,
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "cyclistic_dashboard")]
#[command(about = "Summaries, charts and map layers for bike-share ride data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Ride data CSV (optionally .gz)
    #[arg(value_name = "FILE", default_value = "dashboard_data.csv")]
    source: PathBuf,

    /// Number of rows read from the top of the file
    #[arg(long, default_value_t = DEFAULT_ROW_CAP)]
    row_cap: usize,

    /// Do not copy latitude/longitude into missing start/end columns
    #[arg(long, default_value_t = false)]
    no_backfill: bool,
}

impl SourceArgs {
    fn options(&self) -> NormalizeOptions {
        NormalizeOptions {
            row_cap: self.row_cap,
            backfill: if self.no_backfill {
                CoordinateBackfill::Disabled
            } else {
                CoordinateBackfill::FromLocation
            },
        }
    }
}

#[derive(Args)]
struct SelectionArgs {
    /// Rider type: all, casual, member or compare-both
    #[arg(short, long, default_value = "all")]
    rider: RiderSelection,

    /// Day of week label to include (repeatable; default: every day)
    #[arg(short, long = "day", value_name = "DAY")]
    days: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the day-of-week labels present in the data
    Days {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Log the summary metrics for a selection
    Summary {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Compute every dashboard view for a selection
    Views {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        selection: SelectionArgs,

        /// JSON file to write the views to (logged when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// CSV file to append a summary snapshot to
        #[arg(long)]
        summary_csv: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/cyclistic_dashboard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("cyclistic_dashboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Days { source } => {
            let pipeline = load(&source)?;
            let days = pipeline.day_options();

            info!(total = days.len(), "Day options");
            for day in &days {
                info!(day = %day, "Day");
            }
        }
        Commands::Summary { source, selection } => {
            let pipeline = select(load(&source)?, selection);
            let views = pipeline.aggregate();
            let summary = &views.summary;

            info!(
                total_rides = summary.total_rides,
                average_ride_length = %summary
                    .average_ride_length
                    .map_or_else(|| "no data".to_string(), |m| format!("{m:.2}")),
                most_active_day = summary.most_active_day.as_deref().unwrap_or("no data"),
                rider = %pipeline.criteria().rider,
                "Summary"
            );
            print_pretty(&views.type_counts);
        }
        Commands::Views {
            source,
            selection,
            output,
            summary_csv,
        } => {
            let source_name = source.source.display().to_string();
            let pipeline = select(load(&source)?, selection);
            let report = pipeline.report(&source_name);

            if report.views.summary.total_rides == 0 {
                warn!("Selection matched no rides");
            }

            match output {
                Some(path) => write_json(&path, &report)?,
                None => print_json(&report)?,
            }

            if let Some(path) = summary_csv {
                let record = SummaryRecord::from_summary(&report.views.summary, &report.criteria)
                    .with_source(&source_name);
                append_record(&path, &record)?;
            }
        }
    }

    Ok(())
}

/// Loads and normalizes the ride data, logging any skipped rows.
#[tracing::instrument(skip_all, fields(source = %args.source.display()))]
fn load(args: &SourceArgs) -> Result<Pipeline> {
    let (pipeline, report) = Pipeline::load(&args.source, &args.options())?;

    if !report.skipped.is_empty() {
        warn!(
            skipped = report.skipped.len(),
            rows_read = report.rows_read,
            "Some rows were malformed and left out"
        );
    }
    info!(rides = pipeline.dataset().len(), "Ride data loaded");

    Ok(pipeline)
}

/// Applies the CLI selection; no `--day` means every day.
fn select(pipeline: Pipeline, selection: SelectionArgs) -> Pipeline {
    let criteria = if selection.days.is_empty() {
        FilterCriteria::all_days(pipeline.dataset(), selection.rider)
    } else {
        FilterCriteria::new(selection.rider, selection.days)
    };
    pipeline.with_criteria(criteria)
}
