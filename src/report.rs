//! The end-to-end report: load, analyse, summarise.

use core::fmt::Write as _;

use chrono::NaiveDate;
use fin_core::{date_span, DatedSeries, DropCounts, Normalizer};
use fin_indicators::{AnalysisReport, IndicatorEngine};
use fin_insight::{
    describe, load_market_data, DataSnapshot, HeadlineMetrics, InsightError, MarketData,
    MarketDataRequest, MarketDataSource, Summary,
};
use serde::Serialize;
use tracing::info;

use crate::config::ReportConfig;

/// Everything known about one ticker's history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Normalised symbol.
    pub ticker: String,
    /// First and last date analysed.
    pub span: Option<(NaiveDate, NaiveDate)>,
    /// Rows the normalizer discarded.
    pub dropped: DropCounts,
    /// Headline figures.
    pub metrics: HeadlineMetrics<f64>,
    /// Per-field statistics.
    pub summary: Summary<f64>,
    /// Indicator outcomes.
    pub indicators: AnalysisReport<f64>,
    /// Prompt-ready text of the data.
    pub snapshot: DataSnapshot,
}

impl Report {
    /// Analyse an already loaded history.
    pub fn build(data: &MarketData<f64>, config: &ReportConfig) -> Result<Self, InsightError> {
        let table = &data.table;
        let metrics = HeadlineMetrics::from_table(table)?;
        let indicators = IndicatorEngine::new(config.engine.clone()).run(table);

        Ok(Self {
            ticker: data.ticker.to_string(),
            span: date_span(table),
            dropped: data.dropped,
            metrics,
            summary: describe(table),
            indicators,
            snapshot: DataSnapshot::capture(table, &config.snapshot),
        })
    }

    /// A plain-text summary for terminals.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let m = &self.metrics;

        let _ = writeln!(out, "Market summary: {}", self.ticker);
        if let Some((first, last)) = self.span {
            let _ = writeln!(out, "Period: {first} to {last} ({} rows)", self.indicators.rows);
        }
        if self.dropped.total() > 0 {
            let _ = writeln!(out, "Dropped rows: {}", self.dropped.total());
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Current price   ${:.2}", m.last_close);
        let _ = writeln!(
            out,
            "Daily change    ${:.2} ({:.2}%)",
            m.daily_change, m.daily_change_pct
        );
        let _ = writeln!(out, "Average volume  {:.0}", m.average_volume);
        let _ = writeln!(out, "52-week high    ${:.2}", m.high_52w);
        let _ = writeln!(out, "Period range    ${:.2} - ${:.2}", m.period_low, m.period_high);
        let _ = writeln!(out);

        let _ = writeln!(out, "Indicators");
        for (name, status, message) in self.indicators.summary() {
            match message {
                Some(msg) => {
                    let _ = writeln!(out, "  {name:<13} {status:<11} {msg}");
                }
                None => {
                    let _ = writeln!(out, "  {name:<13} {status:<11} {}", self.reading(name));
                }
            }
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.summary);
        out
    }

    /// The latest value of a ready indicator, formatted for the text report.
    fn reading(&self, name: &str) -> String {
        let ind = &self.indicators;
        let latest = |s: Option<&DatedSeries<f64>>| {
            s.and_then(|s| s.dropna().latest())
                .map_or_else(String::new, |(d, v)| format!("{v:.2} on {d}"))
        };
        match name {
            "short_ma" => latest(ind.short_ma.value()),
            "long_ma" => latest(ind.long_ma.value()),
            "rsi" => latest(ind.rsi.value()),
            "bollinger" => ind
                .bollinger
                .value()
                .filter(|b| !b.is_empty())
                .map_or_else(String::new, |b| {
                    let i = b.len() - 1;
                    format!("{:.2} / {:.2} / {:.2}", b.lower[i], b.middle[i], b.upper[i])
                }),
            "correlation" => ind
                .correlation
                .value()
                .map_or_else(String::new, |c| format!("{0}x{0} matrix", c.size())),
            "distribution" => ind
                .distribution
                .value()
                .map_or_else(String::new, |h| format!("{} bins", h.bins())),
            "forecast" => ind
                .forecast
                .value()
                .map_or_else(String::new, |f| format!("{:.2} for {}", f.predicted, f.next_date)),
            _ => String::new(),
        }
    }
}

/// Load a history from `source` and analyse it.
pub fn run_report<S>(
    source: &S,
    request: &MarketDataRequest,
    config: &ReportConfig,
) -> Result<Report, InsightError>
where
    S: MarketDataSource + ?Sized,
{
    let normalizer = Normalizer::new(config.normalizer.clone());
    let data = load_market_data::<f64, S>(source, request, &normalizer)?;
    let report = Report::build(&data, config)?;
    info!(
        ticker = %report.ticker,
        ready = report.indicators.ready_count(),
        "report built"
    );
    Ok(report)
}
