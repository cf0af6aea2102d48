//! brinson CLI binary.
//!
//! Provides the command-line interface for the attribution reporting
//! pipeline: sample synthesis, monthly report assembly, and standalone
//! commentary generation.

use brinson::{LargeCapUniverse, SectorEtfUniverse, Universe};
use brinson_commentary::{CommentaryClient, CommentaryConfig};
use brinson_data::sample::{SampleOptions, sector_sample, security_sample};
use brinson_data::series::PriceSeries;
use brinson_data::yahoo::quotes::YahooQuoteProvider;
use brinson_output::export::{
    read_sector_observations_from_path, write_sector_observations_to_path,
    write_security_observations_to_path,
};
use brinson_output::report::ReportBuilder;
use brinson_output::summary::{PeriodSummary, SummaryRecord, summarize_window};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration as StdDuration;

#[derive(Parser)]
#[command(name = "brinson")]
#[command(about = "Brinson attribution reporting pipeline", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the sector and security sample tables from market data
    Sample {
        /// Start date, inclusive
        #[arg(long, default_value = "2023-01-01")]
        start: NaiveDate,

        /// End date, exclusive
        #[arg(long, default_value = "2024-01-01")]
        end: NaiveDate,

        /// Directory the sample CSVs are written to
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },

    /// Build the monthly attribution report with AI commentary
    Report {
        /// Sector observation CSV produced by `sample`
        #[arg(long, default_value = "data/sector_attribution_sample.csv")]
        data: PathBuf,

        /// Output path for the Markdown report
        #[arg(long, default_value = "outputs/monthly_report.md")]
        output: PathBuf,

        /// Reporting window length in days, ending at the dataset's last date
        #[arg(long, default_value_t = 30)]
        days: i64,

        /// Model identifier for the commentary request
        #[arg(long)]
        model: Option<String>,
    },

    /// Request commentary for the full date range of an observation table
    Commentary {
        /// Sector observation CSV produced by `sample`
        #[arg(long, default_value = "data/sector_attribution_sample.csv")]
        data: PathBuf,

        /// Output path for the commentary text
        #[arg(long, default_value = "outputs/sector_commentary.txt")]
        output: PathBuf,

        /// Model identifier for the commentary request
        #[arg(long)]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Populate the environment from a .env file if one is present.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sample {
            start,
            end,
            data_dir,
        } => generate_samples(start, end, &data_dir).await,
        Commands::Report {
            data,
            output,
            days,
            model,
        } => build_report(&data, &output, days, model).await,
        Commands::Commentary {
            data,
            output,
            model,
        } => run_commentary(&data, &output, model).await,
    }
}

fn to_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn fetch_spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(StdDuration::from_millis(100));
    pb.set_message(message);
    pb
}

async fn generate_samples(
    start: NaiveDate,
    end: NaiveDate,
    data_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let start_dt = to_utc(start);
    let end_dt = to_utc(end);

    let provider = YahooQuoteProvider::new();
    fs::create_dir_all(data_dir)?;

    // Sector-level sample from the SPDR sector ETF proxies.
    let sector_universe = SectorEtfUniverse::new();
    let pb = fetch_spinner("Fetching sector ETF data...");
    let (etf_series, skipped) = provider
        .fetch_universe(&sector_universe.symbols(), start_dt, end_dt)
        .await?;
    pb.finish_with_message(format!("Fetched {} sector ETFs", etf_series.len()));
    if !skipped.is_empty() {
        println!("Skipped sector ETFs: {}", skipped.join(", "));
    }

    let sector_rows = sector_sample(&etf_series, &sector_universe, SampleOptions::sector())?;
    let sector_path = data_dir.join("sector_attribution_sample.csv");
    write_sector_observations_to_path(&sector_path, &sector_rows)?;
    println!("Saved sector-level sample to: {}", sector_path.display());

    // Security-level sample from the large-cap holdings against SPY.
    let largecap = LargeCapUniverse::new();
    let pb = fetch_spinner("Fetching security data...");
    let (holding_series, skipped) = provider
        .fetch_universe(&largecap.symbols(), start_dt, end_dt)
        .await?;
    let benchmark_frame = provider
        .fetch_quotes(largecap.benchmark(), start_dt, end_dt)
        .await?;
    let benchmark_series = PriceSeries::from_quote_frame(largecap.benchmark(), &benchmark_frame)?;
    pb.finish_with_message(format!("Fetched {} securities", holding_series.len()));
    if !skipped.is_empty() {
        println!("Skipped securities: {}", skipped.join(", "));
    }

    let security_rows = security_sample(&holding_series, &benchmark_series, SampleOptions::security())?;
    let security_path = data_dir.join("security_attribution_sample.csv");
    write_security_observations_to_path(&security_path, &security_rows)?;
    println!("Saved security-level sample to: {}", security_path.display());

    Ok(())
}

async fn build_report(
    data: &Path,
    output: &Path,
    days: i64,
    model: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading sector data from: {}", data.display());
    let rows = read_sector_observations_from_path(data)?;

    // Reporting window: the last `days` days present in the dataset.
    let end = rows
        .iter()
        .map(|r| r.date)
        .max()
        .ok_or("No observations in input file")?;
    let start = end - Duration::days(days);

    let summary = summarize_window(rows.iter().map(SummaryRecord::from), start, end)?;

    println!("\nSector summary for period:");
    print!("{}", summary.to_text_table());

    let commentary = request_commentary(&summary, model).await?;

    let report = ReportBuilder::new()
        .summary(summary)
        .commentary(commentary)
        .window_days(days)
        .build()?;

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    report.write_to(output)?;
    println!("\nMonthly report saved to: {}", output.display());

    Ok(())
}

async fn run_commentary(
    data: &Path,
    output: &Path,
    model: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Loading sector data from: {}", data.display());
    let rows = read_sector_observations_from_path(data)?;

    let start = rows
        .iter()
        .map(|r| r.date)
        .min()
        .ok_or("No observations in input file")?;
    let end = rows
        .iter()
        .map(|r| r.date)
        .max()
        .ok_or("No observations in input file")?;

    let summary = summarize_window(rows.iter().map(SummaryRecord::from), start, end)?;
    let commentary = request_commentary(&summary, model).await?;

    println!("\n=== AI Commentary ===\n");
    println!("{}", commentary);

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, &commentary)?;
    println!("\nCommentary saved to: {}", output.display());

    Ok(())
}

async fn request_commentary(
    summary: &PeriodSummary,
    model: Option<String>,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut config = CommentaryConfig::from_env();
    if let Some(model) = model {
        config = config.with_model(model);
    }
    let client = CommentaryClient::new(config);

    println!("\nRequesting AI commentary...");
    Ok(client.generate(&summary.to_text_table()).await?)
}
