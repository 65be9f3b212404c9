use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "tickhist",
    version,
    about = "Historical market data and time-series statistics"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scrape the historical price table for a coin.
    CoinHistory(CoinHistoryArgs),
    /// Download historical quotes for one or more tickers.
    Quotes(QuotesArgs),
    /// Partitioned mean and standard deviation of a series.
    Summary(SummaryArgs),
    /// Augmented Dickey-Fuller stationarity test.
    Stationarity(StationarityArgs),
    /// Skewness and kurtosis of a series.
    Moments(MomentsArgs),
    /// Jarque-Bera normality test.
    Normality(NormalityArgs),
}

#[derive(Debug, Args)]
pub struct CoinHistoryArgs {
    /// Coin name, e.g. "bitcoin" or "Bitcoin Cash".
    pub coin: String,

    /// Window start, DD/MM/YYYY.
    #[arg(long)]
    pub start: String,

    /// Window end, DD/MM/YYYY.
    #[arg(long)]
    pub end: String,

    /// Zero-based index of the price table on the page.
    #[arg(long)]
    pub table_index: Option<usize>,
}

#[derive(Debug, Args)]
pub struct QuotesArgs {
    /// Ticker symbols, fetched in the given order.
    #[arg(required = true)]
    pub tickers: Vec<String>,

    /// Window start, DD/MM/YYYY. Defaults to the Unix epoch.
    #[arg(long)]
    pub start: Option<String>,

    /// Window end, DD/MM/YYYY. Defaults to now.
    #[arg(long)]
    pub end: Option<String>,

    /// Sampling frequency: daily, weekly or monthly.
    #[arg(long, default_value = "daily")]
    pub frequency: String,
}

/// Where a statistics subcommand reads its series from.
#[derive(Debug, Args)]
pub struct SeriesArgs {
    /// CSV file holding the series.
    pub file: PathBuf,

    /// Column to read; defaults to the last column.
    #[arg(long)]
    pub column: Option<String>,
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// Number of round-robin partitions.
    #[arg(long, default_value_t = 4)]
    pub partitions: usize,
}

#[derive(Debug, Args)]
pub struct StationarityArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// Fixed lag order for the test regression; selected by AIC when omitted.
    #[arg(long)]
    pub lags: Option<usize>,

    /// Decide on the p-value at this threshold instead of the 5% critical
    /// value.
    #[arg(long)]
    pub p_threshold: Option<f64>,
}

#[derive(Debug, Args)]
pub struct MomentsArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// Degrees-of-freedom flag for the standard deviation: 0 (population)
    /// or 1 (Bessel-corrected).
    #[arg(long, default_value_t = 0)]
    pub ddof: i64,
}

#[derive(Debug, Args)]
pub struct NormalityArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// Critical level for the normality verdict.
    #[arg(long, default_value_t = tickhist_stats::DEFAULT_CRITICAL_LEVEL)]
    pub critical_level: f64,
}
