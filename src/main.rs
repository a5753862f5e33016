mod dataset;
mod engine;
mod models;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::dataset::{Dataset, FilterOptions};
use crate::engine::{Dashboard, Histogram, KpiDisplay, ViewModel, DEFAULT_BINS, DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TIMEOUT};
use crate::models::{Choice, DateRange, FilterSelection, TransactionRecord};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "fraud-dashboard", version, about = "Filter a transaction dataset and report KPIs, trends and breakdowns")]
struct Cli {
    /// Transaction CSV to load
    input: PathBuf,

    /// First day to include, YYYY-MM-DD (default: earliest day in the data)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day to include, YYYY-MM-DD (default: latest day in the data)
    #[arg(long)]
    to: Option<NaiveDate>,

    #[arg(long, default_value = "all")]
    country: Choice,

    #[arg(long, default_value = "all")]
    channel: Choice,

    /// Merchant category
    #[arg(long, default_value = "all")]
    category: Choice,

    /// Only keep fraudulent transactions
    #[arg(long)]
    fraud_only: bool,

    /// Bucket count of the distribution histograms
    #[arg(long, default_value_t = DEFAULT_BINS)]
    bins: usize,

    /// Number of filtered rows to print
    #[arg(long, default_value_t = 0)]
    rows: usize,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Maximum number of filter selections whose views stay cached
    #[arg(long, default_value_t = DEFAULT_CACHE_CAPACITY)]
    cache_capacity: u64,

    /// Seconds an unused cached view is kept
    #[arg(long, default_value_t = DEFAULT_CACHE_TIMEOUT.as_secs())]
    cache_idle_secs: u64,

    /// Print the available filter values and the date bounds, then exit
    #[arg(long)]
    options: bool,

    #[arg(long, value_enum, default_value_t = LogLevel::Error)]
    log_level: LogLevel
}

#[derive(Serialize)]
struct OptionsReport<'a> {
    #[serde(flatten)]
    options: &'a FilterOptions,
    date_bounds: Option<DateRange>
}

#[derive(Serialize)]
struct ViewReport<'a> {
    kpi_display: KpiDisplay,
    #[serde(flatten)]
    view: &'a ViewModel,
    rows: Vec<&'a TransactionRecord>
}

#[derive(Serialize)]
struct RowOut<'a> {
    transaction_time: String,
    amount: String,
    country: &'a str,
    channel: &'a str,
    merchant_category: &'a str,
    total_transactions_user: String,
    account_age_days: String,
    is_fraud: u8
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.log_level.into());

    let timer = Instant::now();
    let dashboard = Dashboard::open(&cli.input).await?
        .with_cache_capacity(cli.cache_capacity)
        .with_cache_timeout(Duration::from_secs(cli.cache_idle_secs))
        .with_bins(cli.bins);

    info!("Loaded dataset in: {:?}", timer.elapsed());

    if dashboard.dataset().is_empty() {
        warn!("Dataset {} contains no transactions", cli.input.display());
    }

    let mut output = BufWriter::new(stdout().lock());

    if cli.options {
        write_options(&mut output, dashboard.dataset(), cli.format)?;
        output.flush()?;
        return Ok(());
    }

    let selection = build_selection(&cli, &dashboard);

    let timer = Instant::now();
    let view = dashboard.view(&selection).await;

    info!("Computed view in: {:?}", timer.elapsed());
    debug!("Views cached: {}", dashboard.cached_views().await);

    let mut rows = dashboard.table(&selection);
    rows.truncate(cli.rows);

    match cli.format {
        OutputFormat::Text => write_text(&mut output, &view, &rows)?,
        OutputFormat::Json => {
            let report = ViewReport { kpi_display: view.kpis.display(), view: &view, rows };
            serde_json::to_writer_pretty(&mut output, &report)?;
            writeln!(output)?;
        }
    }

    output.flush()?;

    Ok(())
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the report, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn build_selection(cli: &Cli, dashboard: &Dashboard) -> FilterSelection {
    let defaults = dashboard.default_selection();
    let date_range = DateRange::new(
        cli.from.unwrap_or(defaults.date_range.start),
        cli.to.unwrap_or(defaults.date_range.end)
    );

    defaults
        .with_date_range(date_range)
        .with_country(cli.country.clone())
        .with_channel(cli.channel.clone())
        .with_category(cli.category.clone())
        .with_fraud_only(cli.fraud_only)
}

fn write_options<W: Write>(output: &mut W, dataset: &Dataset, format: OutputFormat) -> Result<()> {
    let options = dataset.options();

    match format {
        OutputFormat::Text => {
            writeln!(output, "countries: {}", options.countries.join(","))?;
            writeln!(output, "channels: {}", options.channels.join(","))?;
            writeln!(output, "categories: {}", options.categories.join(","))?;

            match dataset.bounds() {
                Some(bounds) => writeln!(output, "dates: {}..{}", bounds.start, bounds.end)?,
                None => writeln!(output, "dates: none")?
            }
        }
        OutputFormat::Json => {
            let report = OptionsReport { options, date_bounds: dataset.bounds() };
            serde_json::to_writer_pretty(&mut *output, &report)?;
            writeln!(output)?;
        }
    }

    Ok(())
}

fn write_text<W: Write>(output: &mut W, view: &ViewModel, rows: &[&TransactionRecord]) -> Result<()> {
    let kpis = view.kpis.display();

    writeln!(output, "== KPIs")?;
    writeln!(output, "Transactions: {}", kpis.transaction_count)?;
    writeln!(output, "Total amount: {}", kpis.total_amount)?;
    writeln!(output, "Average amount: {}", kpis.avg_amount)?;
    writeln!(output, "Fraud rate: {}", kpis.fraud_rate)?;

    writeln!(output, "\n== Daily transactions")?;
    writeln!(output, "date,count")?;
    for day in &view.daily_transactions {
        writeln!(output, "{},{}", day.date, day.count)?;
    }

    writeln!(output, "\n== Daily fraud")?;
    writeln!(output, "date,count")?;
    for day in &view.daily_fraud {
        writeln!(output, "{},{}", day.date, day.count)?;
    }

    writeln!(output, "\n== Amount by category")?;
    writeln!(output, "category,total_amount")?;
    for row in &view.amount_by_category {
        writeln!(output, "{},{}", row.category, row.total_amount)?;
    }

    writeln!(output, "\n== Fraud rate by country")?;
    writeln!(output, "country,transactions,fraud_transactions,fraud_rate")?;
    for row in &view.fraud_rate_by_country {
        writeln!(output, "{},{},{},{:.4}", row.country, row.transactions, row.fraud_transactions, row.fraud_rate)?;
    }

    write_histogram(output, "Account age distribution", &view.account_age)?;
    write_histogram(output, "Transactions per user distribution", &view.transactions_per_user)?;

    if !rows.is_empty() {
        writeln!(output, "\n== Rows")?;
        write_rows(output, rows)?;
    }

    Ok(())
}

fn write_histogram<W: Write>(output: &mut W, title: &str, histogram: &Histogram) -> Result<()> {
    writeln!(output, "\n== {title} ({} values)", histogram.total())?;

    if histogram.is_empty() {
        return Ok(());
    }

    writeln!(output, "lower,upper,count")?;

    for bin in &histogram.bins {
        writeln!(output, "{:.2},{:.2},{}", bin.lower, bin.upper, bin.count)?;
    }

    Ok(())
}

fn write_rows<W: Write>(output: &mut W, rows: &[&TransactionRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().from_writer(output);

    for record in rows {
        writer.serialize(RowOut {
            transaction_time: record.transaction_time(),
            amount: record.amount.map(|amount| amount.to_string()).unwrap_or_default(),
            country: &record.country,
            channel: &record.channel,
            merchant_category: &record.merchant_category,
            total_transactions_user: record.total_transactions_user.map(|value| value.to_string()).unwrap_or_default(),
            account_age_days: record.account_age_days.map(|value| value.to_string()).unwrap_or_default(),
            is_fraud: u8::from(record.is_fraud)
        })?;
    }

    writer.flush()?;

    Ok(())
}
