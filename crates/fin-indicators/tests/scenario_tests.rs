//! Fixed-input scenarios for the indicator set and the engine.

use approx::assert_relative_eq;
use chrono::{Days, NaiveDate};
use fin_core::{
    normalize, Bar, CanonicalTable, DataFrame, Indicator, NormalizeError, RawCell, RawTable,
};
use fin_indicators::prelude::*;

fn table_from_closes(closes: &[f64]) -> CanonicalTable<f64> {
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let bars = closes.iter().enumerate().map(|(i, &c)| {
        Bar::new(start + Days::new(i as u64), c * 0.99, c * 1.02, c * 0.97, c, 5_000.0 + i as f64)
    });
    CanonicalTable::from_bars(bars).unwrap()
}

fn zigzag(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 50.0 + if i % 2 == 0 { 1.0 } else { -1.0 } * (i % 5) as f64)
        .collect()
}

#[test]
fn normalize_refuses_each_missing_field() {
    let all = ["Date", "Open", "High", "Low", "Close", "Volume"];
    for skip in 1..all.len() {
        let headers: Vec<&str> = all
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != skip)
            .map(|(_, h)| *h)
            .collect();
        let row: Vec<RawCell> = headers
            .iter()
            .map(|h| {
                if *h == "Date" {
                    RawCell::from("2024-01-02")
                } else {
                    RawCell::from(1.0)
                }
            })
            .collect();
        let raw = RawTable::from_rows(&headers, vec![row]).unwrap();

        assert_eq!(
            normalize::<f64>(&raw),
            Err(NormalizeError::MissingColumn(all[skip].to_string()))
        );
    }
}

#[test]
fn bollinger_nineteen_rows_unavailable_twenty_rows_one_point() {
    let bb = BollingerBands::<f64>::new(BollingerConfig::default());

    assert!(bb
        .calculate(&table_from_closes(&zigzag(19)))
        .unwrap_err()
        .is_insufficient());

    let bands = bb.calculate(&table_from_closes(&zigzag(20))).unwrap();
    assert!(bands.len() <= 1);
    assert_eq!(bands.len(), 1);
}

#[test]
fn rsi_thirteen_rows_unavailable_fourteen_rows_defined() {
    let rsi = Rsi::<f64>::new(RsiConfig::default());

    assert!(rsi
        .calculate(&table_from_closes(&zigzag(13)))
        .unwrap_err()
        .is_insufficient());

    let values = rsi.calculate(&table_from_closes(&zigzag(14))).unwrap();
    assert_eq!(values.len(), 1);
    let v = values.values()[0];
    assert!((0.0..=100.0).contains(&v));
}

#[test]
fn rsi_no_losses_stays_below_hundred() {
    let closes: Vec<f64> = (0..20).map(|i| 10.0 + i as f64 * 0.5).collect();
    let rsi = Rsi::<f64>::new(RsiConfig::default());
    let values = rsi.calculate(&table_from_closes(&closes)).unwrap();

    for v in values.values().iter() {
        assert!(v.is_finite());
        assert!(*v < 100.0);
    }
}

#[test]
fn forecast_on_even_line_is_twenty() {
    let trend = LinearTrend::<f64>::new(LinearTrendConfig::default());
    let forecast = trend
        .calculate(&table_from_closes(&[10.0, 12.0, 14.0, 16.0, 18.0]))
        .unwrap();

    assert_relative_eq!(forecast.predicted, 20.0, epsilon = 1e-9);
}

#[test]
fn short_moving_average_shrinks_on_five_rows() {
    let ma = MovingAverage::<f64>::new(MovingAverageConfig::short());
    let result = ma
        .calculate(&table_from_closes(&[1.0, 2.0, 3.0, 4.0, 5.0]))
        .unwrap();

    assert_eq!(result.defined_count(), 1);
    assert_relative_eq!(result.latest().unwrap().1, 3.0);
}

#[test]
fn correlation_without_volume_is_four_by_four() {
    let table = table_from_closes(&zigzag(30));
    let mut frame = DataFrame::from_table(&table);
    frame.drop_column("Volume").unwrap();

    let corr = Correlation::<f64>::new(CorrelationConfig::default());
    let matrix = corr.calculate_frame(&frame).unwrap();

    assert_eq!(matrix.size(), 4);
    assert_eq!(matrix.values.len(), 4);
    assert!(matrix.values.iter().all(|row| row.len() == 4));
}

#[test]
fn distribution_on_one_row_does_not_divide_by_zero() {
    let dist = PriceDistribution::<f64>::new(PriceDistributionConfig::default());
    let hist = dist.calculate(&table_from_closes(&[99.0])).unwrap();

    assert_eq!(hist.bins(), 10);
    assert_eq!(hist.total(), 1);
    assert!(hist.edges.iter().all(|e| e.is_finite()));
}

#[test]
fn engine_between_twenty_and_fifty_rows() {
    let report = IndicatorEngine::<f64>::default().run(&table_from_closes(&zigzag(35)));

    assert!(report.short_ma.is_ready());
    assert!(report.bollinger.is_ready());
    assert_eq!(
        report.long_ma.message(),
        Some("Insufficient samples: need 50 rows, got 35")
    );
}

#[test]
fn engine_does_not_mutate_table() {
    let table = table_from_closes(&zigzag(60));
    let before = table.clone();
    let _ = IndicatorEngine::<f64>::default().run(&table);
    assert_eq!(table, before);
}

#[test]
fn engine_runs_on_f32() {
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let bars = (0..25u64).map(|i| {
        let c = 20.0f32 + (i % 4) as f32;
        Bar::new(start + Days::new(i), c, c, c, c, 10.0)
    });
    let table = CanonicalTable::<f32>::from_bars(bars).unwrap();

    let report = IndicatorEngine::<f32>::default().run(&table);
    assert_eq!(report.ready_count(), 6);
}
