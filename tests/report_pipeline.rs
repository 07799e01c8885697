//! End-to-end report tests: CSV on disk through to the rendered report.

mod common;

use approx::assert_relative_eq;
use chrono::NaiveDate;
use fin_analyst::{run_report, ReportConfig};
use fin_core::{CsvOptions, RawTable};
use fin_insight::{CsvFileSource, InsightError, MarketDataRequest, Ticker};

use common::*;

fn request(symbol: &str) -> MarketDataRequest {
    MarketDataRequest::new(Ticker::parse(symbol).unwrap())
}

#[test]
fn multi_header_download_produces_every_indicator() {
    let closes = generate_random_walk(180.0, 2.5, 60, 7);
    let path = write_temp("multi.csv", &multi_header_csv("AAPL", &closes));
    let source = CsvFileSource::new(path, CsvOptions::new(2));

    let report = run_report(&source, &request(" aapl "), &ReportConfig::default()).unwrap();

    assert_eq!(report.ticker, "AAPL");
    assert_eq!(report.indicators.rows, 60);
    assert_eq!(report.indicators.ready_count(), 7);
    assert_relative_eq!(report.metrics.last_close, closes[59], epsilon = 1e-9);
    assert_relative_eq!(
        report.metrics.daily_change,
        closes[59] - closes[58],
        epsilon = 1e-9
    );
    assert_eq!(report.snapshot.recent.lines().count(), 11);
}

#[test]
fn thirty_rows_leave_long_average_unavailable() {
    let closes = generate_linear(50.0, 0.5, 30);
    let path = write_temp("flat30.csv", &flat_csv(&closes));
    let source = CsvFileSource::new(path, CsvOptions::default());

    let report = run_report(&source, &request("xyz"), &ReportConfig::default()).unwrap();
    assert!(report.indicators.short_ma.is_ready());
    assert!(report.indicators.bollinger.is_ready());
    assert_eq!(
        report.indicators.long_ma.message(),
        Some("Insufficient samples: need 50 rows, got 30")
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["indicators"]["long_ma"]["status"], "unavailable");
    assert_eq!(json["indicators"]["rsi"]["status"], "ready");
    assert_eq!(json["ticker"], "XYZ");
}

#[test]
fn config_overrides_reach_the_engine() {
    let closes = generate_random_walk(20.0, 0.4, 30, 3);
    let source = FixedSource(
        RawTable::from_csv_reader(flat_csv(&closes).as_bytes(), &CsvOptions::default()).unwrap(),
    );
    let config = ReportConfig::from_json(
        r#"{ "engine": { "rsi": { "window": 21 } }, "snapshot": { "recent_rows": 3 } }"#,
    )
    .unwrap();

    let report = run_report(&source, &request("abc"), &config).unwrap();
    assert_eq!(report.indicators.rsi.value().unwrap().len(), 10);
    assert_eq!(report.snapshot.recent.lines().count(), 4);
}

#[test]
fn single_usable_row_is_refused() {
    let csv = "Date,Open,High,Low,Close,Volume\n\
               2024-01-02,10,11,9,10,100\n\
               2024-01-03,10,11,9,-4,100\n\
               2024-01-04,10,11,9,,100\n";
    let source = FixedSource(RawTable::from_csv_reader(csv.as_bytes(), &CsvOptions::default()).unwrap());

    let err = run_report(&source, &request("abc"), &ReportConfig::default()).unwrap_err();
    assert_eq!(err, InsightError::TooFewRows { actual: 1 });
    assert_eq!(
        err.to_string(),
        "Not enough data points. Please select a longer date range."
    );
}

#[test]
fn header_only_file_is_no_match() {
    let path = write_temp("empty.csv", "Date,Open,High,Low,Close,Volume\n");
    let source = CsvFileSource::new(path, CsvOptions::default());

    let err = run_report(&source, &request("nope"), &ReportConfig::default()).unwrap_err();
    assert_eq!(err.to_string(), "No data found for ticker 'NOPE'");
}

#[test]
fn missing_file_is_a_source_error() {
    let source = CsvFileSource::new("/nonexistent/prices.csv", CsvOptions::default());
    let err = run_report(&source, &request("abc"), &ReportConfig::default()).unwrap_err();
    assert!(matches!(err, InsightError::Source(_)));
}

#[test]
fn date_range_limits_the_rows() {
    let closes = generate_linear(10.0, 1.0, 40);
    let source = FixedSource(
        RawTable::from_csv_reader(flat_csv(&closes).as_bytes(), &CsvOptions::default()).unwrap(),
    );
    let start = start_date();
    let req = request("abc").with_range(start, NaiveDate::from_ymd_opt(2024, 1, 12).unwrap());

    let report = run_report(&source, &req, &ReportConfig::default()).unwrap();
    assert_eq!(report.indicators.rows, 10);
    assert_eq!(
        report.span,
        Some((start, NaiveDate::from_ymd_opt(2024, 1, 11).unwrap()))
    );
}

#[test]
fn text_rendering_lists_every_indicator() {
    let closes = generate_random_walk(100.0, 1.0, 25, 11);
    let source = FixedSource(
        RawTable::from_csv_reader(flat_csv(&closes).as_bytes(), &CsvOptions::default()).unwrap(),
    );
    let text = run_report(&source, &request("msft"), &ReportConfig::default())
        .unwrap()
        .render_text();

    assert!(text.starts_with("Market summary: MSFT"));
    for name in [
        "short_ma",
        "long_ma",
        "bollinger",
        "rsi",
        "correlation",
        "distribution",
        "forecast",
        "Current price",
        "52-week high",
    ] {
        assert!(text.contains(name), "missing {name}");
    }
    assert!(text.contains("Insufficient samples: need 50 rows, got 25"));
}
