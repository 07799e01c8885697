//! Print an indicator report for a CSV price history.
//!
//! Usage:
//!     fin_report <csv> [--ticker T] [--config file.json] [--format json|text]
//!                      [--header-rows N] [--start YYYY-MM-DD] [--end YYYY-MM-DD]

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use fin_analyst::{init_logging, run_report, LogConfig, ReportConfig};
use fin_core::CsvOptions;
use fin_insight::{CsvFileSource, MarketDataRequest, Ticker};
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Debug, Parser)]
#[command(name = "fin_report", version, about = "Indicator report for a CSV price history")]
struct Cli {
    /// CSV file with Date, Open, High, Low, Close and Volume columns
    csv: PathBuf,

    /// Symbol shown in the report
    #[arg(long, short, default_value = "DATA")]
    ticker: String,

    /// JSON config file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Header rows in the CSV (2 for multi-level downloader exports)
    #[arg(long, default_value_t = 1)]
    header_rows: usize,

    /// First date included
    #[arg(long)]
    start: Option<NaiveDate>,

    /// First date excluded
    #[arg(long)]
    end: Option<NaiveDate>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match ReportConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => ReportConfig::default(),
    };

    if let Err(e) = init_logging(&LogConfig::from_env().with_default_level(config.log_level.clone())) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(&cli, &config) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            error!(%message, "report failed");
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &ReportConfig) -> Result<String, String> {
    let ticker = Ticker::parse(&cli.ticker).map_err(|e| e.to_string())?;
    let mut request = MarketDataRequest::new(ticker);
    request.start = cli.start;
    request.end = cli.end;

    let source = CsvFileSource::new(cli.csv.clone(), CsvOptions::new(cli.header_rows));
    let report = run_report(&source, &request, config).map_err(|e| e.to_string())?;

    match cli.format {
        OutputFormat::Json => serde_json::to_string_pretty(&report).map_err(|e| e.to_string()),
        OutputFormat::Text => Ok(report.render_text()),
    }
}
