//! Pearson correlation between OHLCV fields.

use fin_core::{
    dataframe::DataFrame,
    error::{IndicatorError, Result},
    num::FinFloat,
    ohlcv::{CanonicalTable, Field},
    traits::Indicator,
    utils::pearson,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use core::marker::PhantomData;

/// Configuration for the correlation matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CorrelationConfig {
    /// Fields to correlate, in matrix order (default: all five).
    pub fields: Vec<Field>,
    /// Fewest fields for a matrix (default: 2).
    pub min_fields: usize,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            fields: Field::ALL.to_vec(),
            min_fields: 2,
        }
    }
}

impl CorrelationConfig {
    /// Restrict the matrix to the given fields.
    pub fn with_fields(mut self, fields: impl Into<Vec<Field>>) -> Self {
        self.fields = fields.into();
        self
    }
}

/// Symmetric matrix of pairwise Pearson coefficients.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: FinFloat"))]
pub struct CorrelationMatrix<T: FinFloat> {
    /// Row and column labels.
    pub labels: Vec<String>,
    /// Row-major coefficients; NaN where a column is constant.
    pub values: Vec<Vec<T>>,
}

impl<T: FinFloat> CorrelationMatrix<T> {
    /// Matrix dimension.
    pub fn size(&self) -> usize {
        self.labels.len()
    }

    /// Coefficient between two labelled columns.
    pub fn get(&self, row: &str, col: &str) -> Option<T> {
        let i = self.labels.iter().position(|l| l == row)?;
        let j = self.labels.iter().position(|l| l == col)?;
        Some(self.values[i][j])
    }
}

/// Correlation matrix over whichever numeric fields are present.
///
/// On a canonical table all five fields are present; [`Correlation::calculate_frame`]
/// works on any subset.
#[derive(Debug, Clone)]
pub struct Correlation<T: FinFloat> {
    config: CorrelationConfig,
    _marker: PhantomData<T>,
}

impl<T: FinFloat> Correlation<T> {
    /// Correlate every column of a frame.
    ///
    /// # Errors
    ///
    /// Returns [`IndicatorError::InsufficientFields`] when the frame has fewer
    /// than `min_fields` columns.
    pub fn calculate_frame(&self, frame: &DataFrame<T>) -> Result<CorrelationMatrix<T>> {
        let required = self.config.min_fields.max(2);
        if frame.column_count() < required {
            return Err(IndicatorError::InsufficientFields {
                required,
                actual: frame.column_count(),
            });
        }

        let columns: Vec<(&str, &[T])> = frame
            .iter()
            .map(|(name, series)| (name, series.as_slice()))
            .collect();

        let size = columns.len();
        let mut values = vec![vec![T::NAN; size]; size];
        for i in 0..size {
            for j in i..size {
                let r = pearson(columns[i].1, columns[j].1);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(CorrelationMatrix {
            labels: columns.iter().map(|(name, _)| (*name).to_string()).collect(),
            values,
        })
    }
}

impl<T: FinFloat> Indicator<T> for Correlation<T> {
    type Output = CorrelationMatrix<T>;
    type Config = CorrelationConfig;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            _marker: PhantomData,
        }
    }

    fn name(&self) -> &'static str {
        "correlation"
    }

    fn min_periods(&self) -> usize {
        0
    }

    fn calculate(&self, data: &CanonicalTable<T>) -> Result<Self::Output> {
        let mut fields: Vec<Field> = Vec::with_capacity(self.config.fields.len());
        for &field in &self.config.fields {
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        self.calculate_frame(&DataFrame::from_fields(data, &fields))
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }
}
