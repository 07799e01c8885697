//! Property-based tests for the normalizer.
//!
//! Whatever the raw rows look like, a successful normalization must yield a
//! table whose invariants hold.

use chrono::{Duration, NaiveDate};
use fin_core::{normalize, CanonicalTable, Normalizer, RawCell, RawTable};
use proptest::prelude::*;

// ============================================================================
// Proptest Strategies
// ============================================================================

/// A close that may be missing, zero, negative or fine.
fn any_close() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        1 => Just(None),
        1 => Just(Some(0.0)),
        1 => (-1000.0f64..0.0).prop_map(Some),
        5 => (0.01f64..10_000.0).prop_map(Some),
    ]
}

/// A volume that may be missing, negative or fine.
fn any_volume() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        1 => Just(None),
        1 => (-1000.0f64..-0.001).prop_map(Some),
        5 => (0.0f64..1_000_000.0).prop_map(Some),
    ]
}

/// Raw rows with day offsets in arbitrary order.
fn raw_rows(max_len: usize) -> impl Strategy<Value = Vec<(i64, Option<f64>, Option<f64>)>> {
    prop::collection::vec((0i64..400, any_close(), any_volume()), 1..=max_len)
}

fn build_raw(rows: &[(i64, Option<f64>, Option<f64>)]) -> RawTable {
    let base = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let data = rows
        .iter()
        .map(|&(offset, close, volume)| {
            let date = base + Duration::days(offset);
            vec![
                RawCell::Text(date.format("%Y-%m-%d").to_string()),
                RawCell::from(close),
                RawCell::from(close),
                RawCell::from(close),
                RawCell::from(close),
                RawCell::from(volume),
            ]
        })
        .collect();
    RawTable::from_rows(&["Date", "Open", "High", "Low", "Close", "Volume"], data).unwrap()
}

fn is_kept(close: Option<f64>, volume: Option<f64>) -> bool {
    matches!(close, Some(c) if c > 0.0) && matches!(volume, Some(v) if v >= 0.0)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_normalized_rows_satisfy_invariants(rows in raw_rows(60)) {
        let table: CanonicalTable<f64> = normalize(&build_raw(&rows)).unwrap();

        for bar in table.iter() {
            prop_assert!(bar.close.is_finite() && bar.close > 0.0);
            prop_assert!(bar.volume >= 0.0);
        }
        for pair in table.dates().windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn prop_row_count_matches_filters(rows in raw_rows(60)) {
        let expected = rows.iter().filter(|(_, c, v)| is_kept(*c, *v)).count();
        let (table, counts) = Normalizer::default()
            .normalize_with_counts::<f64>(&build_raw(&rows))
            .unwrap();

        prop_assert_eq!(table.len(), expected);
        prop_assert_eq!(table.len() + counts.total(), rows.len());
    }

    #[test]
    fn prop_normalize_is_idempotent_on_clean_tables(rows in raw_rows(40)) {
        let first: CanonicalTable<f64> = normalize(&build_raw(&rows)).unwrap();

        let clean: Vec<_> = first
            .iter()
            .map(|bar| {
                let offset = (bar.date - NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()).num_days();
                (offset, Some(bar.close), Some(bar.volume))
            })
            .collect();

        if clean.is_empty() {
            return Ok(());
        }
        let second: CanonicalTable<f64> = normalize(&build_raw(&clean)).unwrap();
        prop_assert_eq!(second.close().as_slice(), first.close().as_slice());
        prop_assert_eq!(second.dates(), first.dates());
    }
}
