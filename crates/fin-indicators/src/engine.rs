//! Runs every indicator over one canonical table.
//!
//! Each indicator is evaluated on its own. Its result is wrapped in an
//! [`IndicatorOutcome`], so a refusal or a fault in one never stops the
//! others.

use fin_core::{
    error::Result,
    num::FinFloat,
    ohlcv::CanonicalTable,
    series::DatedSeries,
    traits::Indicator,
};
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::forecast::{LinearTrend, LinearTrendConfig, TrendForecast};
use crate::momentum::{Rsi, RsiConfig};
use crate::stats::{
    Correlation, CorrelationConfig, CorrelationMatrix, Histogram, PriceDistribution,
    PriceDistributionConfig,
};
use crate::trend::{MovingAverage, MovingAverageConfig};
use crate::volatility::{BollingerBands, BollingerConfig, BollingerSeries};

/// Settings for every indicator the engine runs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Short moving average.
    pub short_ma: MovingAverageConfig,
    /// Long moving average.
    pub long_ma: MovingAverageConfig,
    /// Bollinger Bands.
    pub bollinger: BollingerConfig,
    /// RSI.
    pub rsi: RsiConfig,
    /// Correlation matrix.
    pub correlation: CorrelationConfig,
    /// Price distribution.
    pub distribution: PriceDistributionConfig,
    /// Linear-trend forecast.
    pub forecast: LinearTrendConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            short_ma: MovingAverageConfig::short(),
            long_ma: MovingAverageConfig::long(),
            bollinger: BollingerConfig::default(),
            rsi: RsiConfig::default(),
            correlation: CorrelationConfig::default(),
            distribution: PriceDistributionConfig::default(),
            forecast: LinearTrendConfig::default(),
        }
    }
}

/// Tagged result of one indicator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "status", content = "value", rename_all = "snake_case")
)]
pub enum IndicatorOutcome<V> {
    /// Computed.
    Ready(V),
    /// Not enough data; `reason` is fit for display.
    Unavailable {
        /// Human-readable reason.
        reason: String,
    },
    /// The computation failed.
    Fault {
        /// What went wrong.
        detail: String,
    },
}

impl<V> IndicatorOutcome<V> {
    /// Classify an indicator result.
    pub fn from_result(result: Result<V>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) if err.is_insufficient() => Self::Unavailable {
                reason: err.to_string(),
            },
            Err(err) => Self::Fault {
                detail: err.to_string(),
            },
        }
    }

    /// `true` for [`IndicatorOutcome::Ready`].
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The value, if computed.
    pub fn value(&self) -> Option<&V> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Short status label.
    pub fn status(&self) -> &'static str {
        match self {
            Self::Ready(_) => "ready",
            Self::Unavailable { .. } => "unavailable",
            Self::Fault { .. } => "fault",
        }
    }

    /// Unavailable reason or fault detail.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Ready(_) => None,
            Self::Unavailable { reason } => Some(reason),
            Self::Fault { detail } => Some(detail),
        }
    }
}

/// Every indicator outcome for one table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: FinFloat"))]
pub struct AnalysisReport<T: FinFloat> {
    /// Rows in the analysed table.
    pub rows: usize,
    /// Short moving average.
    pub short_ma: IndicatorOutcome<DatedSeries<T>>,
    /// Long moving average.
    pub long_ma: IndicatorOutcome<DatedSeries<T>>,
    /// Bollinger Bands.
    pub bollinger: IndicatorOutcome<BollingerSeries<T>>,
    /// RSI.
    pub rsi: IndicatorOutcome<DatedSeries<T>>,
    /// Correlation matrix.
    pub correlation: IndicatorOutcome<CorrelationMatrix<T>>,
    /// Price distribution.
    pub distribution: IndicatorOutcome<Histogram<T>>,
    /// Linear-trend forecast.
    pub forecast: IndicatorOutcome<TrendForecast<T>>,
}

impl<T: FinFloat> AnalysisReport<T> {
    /// `(name, status, message)` for each indicator, in report order.
    pub fn summary(&self) -> Vec<(&'static str, &'static str, Option<&str>)> {
        vec![
            ("short_ma", self.short_ma.status(), self.short_ma.message()),
            ("long_ma", self.long_ma.status(), self.long_ma.message()),
            ("bollinger", self.bollinger.status(), self.bollinger.message()),
            ("rsi", self.rsi.status(), self.rsi.message()),
            ("correlation", self.correlation.status(), self.correlation.message()),
            ("distribution", self.distribution.status(), self.distribution.message()),
            ("forecast", self.forecast.status(), self.forecast.message()),
        ]
    }

    /// Number of indicators that produced a value.
    pub fn ready_count(&self) -> usize {
        self.summary()
            .iter()
            .filter(|(_, status, _)| *status == "ready")
            .count()
    }
}

/// Evaluates the full indicator set.
///
/// # Example
///
/// ```rust
/// use fin_indicators::prelude::*;
/// use fin_core::prelude::*;
/// # use chrono::{Days, NaiveDate};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let bars = (0..5u64).map(|i| {
///     let c = 10.0 + i as f64;
///     Bar::new(start + Days::new(i), c, c, c, c, 100.0)
/// });
/// let table = CanonicalTable::from_bars(bars).unwrap();
///
/// let report = IndicatorEngine::<f64>::new(EngineConfig::default()).run(&table);
/// assert!(report.short_ma.is_ready());
/// assert!(!report.rsi.is_ready());
/// ```
#[derive(Debug, Clone)]
pub struct IndicatorEngine<T: FinFloat> {
    config: EngineConfig,
    short_ma: MovingAverage<T>,
    long_ma: MovingAverage<T>,
    bollinger: BollingerBands<T>,
    rsi: Rsi<T>,
    correlation: Correlation<T>,
    distribution: PriceDistribution<T>,
    forecast: LinearTrend<T>,
}

impl<T: FinFloat> Default for IndicatorEngine<T> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<T: FinFloat> IndicatorEngine<T> {
    /// Create an engine.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            short_ma: MovingAverage::new(config.short_ma.clone()),
            long_ma: MovingAverage::new(config.long_ma.clone()),
            bollinger: BollingerBands::new(config.bollinger.clone()),
            rsi: Rsi::new(config.rsi.clone()),
            correlation: Correlation::new(config.correlation.clone()),
            distribution: PriceDistribution::new(config.distribution.clone()),
            forecast: LinearTrend::new(config.forecast.clone()),
            config,
        }
    }

    /// The settings in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate every indicator, one after another.
    pub fn run(&self, table: &CanonicalTable<T>) -> AnalysisReport<T> {
        let report = AnalysisReport {
            rows: table.len(),
            short_ma: evaluate(&self.short_ma, table),
            long_ma: evaluate(&self.long_ma, table),
            bollinger: evaluate(&self.bollinger, table),
            rsi: evaluate(&self.rsi, table),
            correlation: evaluate(&self.correlation, table),
            distribution: evaluate(&self.distribution, table),
            forecast: evaluate(&self.forecast, table),
        };
        log_report(&report);
        report
    }

    /// Evaluate every indicator on the rayon thread pool.
    ///
    /// All indicators read the same table; the report equals [`run`](Self::run).
    #[cfg(feature = "parallel")]
    pub fn run_parallel(&self, table: &CanonicalTable<T>) -> AnalysisReport<T> {
        let ((short_ma, long_ma), ((bollinger, rsi), (correlation, (distribution, forecast)))) =
            rayon::join(
                || {
                    rayon::join(
                        || evaluate(&self.short_ma, table),
                        || evaluate(&self.long_ma, table),
                    )
                },
                || {
                    rayon::join(
                        || {
                            rayon::join(
                                || evaluate(&self.bollinger, table),
                                || evaluate(&self.rsi, table),
                            )
                        },
                        || {
                            rayon::join(
                                || evaluate(&self.correlation, table),
                                || {
                                    rayon::join(
                                        || evaluate(&self.distribution, table),
                                        || evaluate(&self.forecast, table),
                                    )
                                },
                            )
                        },
                    )
                },
            );

        let report = AnalysisReport {
            rows: table.len(),
            short_ma,
            long_ma,
            bollinger,
            rsi,
            correlation,
            distribution,
            forecast,
        };
        log_report(&report);
        report
    }
}

fn evaluate<T, I>(indicator: &I, table: &CanonicalTable<T>) -> IndicatorOutcome<I::Output>
where
    T: FinFloat,
    I: Indicator<T>,
{
    let outcome = IndicatorOutcome::from_result(indicator.calculate(table));
    match &outcome {
        IndicatorOutcome::Ready(_) => debug!(indicator = indicator.name(), "Indicator ready"),
        IndicatorOutcome::Unavailable { reason } => {
            debug!(indicator = indicator.name(), %reason, "Indicator unavailable");
        }
        IndicatorOutcome::Fault { detail } => {
            warn!(indicator = indicator.name(), %detail, "Indicator fault");
        }
    }
    outcome
}

fn log_report<T: FinFloat>(report: &AnalysisReport<T>) {
    info!(
        rows = report.rows,
        ready = report.ready_count(),
        total = report.summary().len(),
        "Indicator pass complete"
    );
}
