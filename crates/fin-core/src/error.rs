//! Error types for normalization and indicator computation.
//!
//! Every failure is a structured `thiserror` enum; nothing in this crate
//! aborts the host process.

use thiserror::Error;

/// Result type alias for indicator operations that may fail.
pub type Result<T> = core::result::Result<T, IndicatorError>;

/// Result type alias for normalization.
pub type NormalizeResult<T> = core::result::Result<T, NormalizeError>;

/// Reasons a raw table could not be turned into a canonical table.
///
/// A table that normalizes to zero rows is *not* an error: it is returned as
/// an empty [`CanonicalTable`](crate::CanonicalTable).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// The raw input was absent or had no rows.
    #[error("No data: the raw table is empty")]
    NoData,

    /// A required OHLCV field is absent after header flattening.
    #[error("Missing required column: '{0}'")]
    MissingColumn(String),

    /// Neither a date column nor a row index was available.
    #[error("Missing date: no date column and no row index")]
    MissingDate,

    /// A bar violates the canonical table invariants.
    #[error("Invalid row {row}: {reason}")]
    InvalidRow {
        /// Zero-based row position.
        row: usize,
        /// Which invariant failed.
        reason: &'static str,
    },

    /// A raw column or row does not match the table's shape.
    #[error("Ragged raw table: expected {expected} cells, got {actual}")]
    Ragged {
        /// Cells expected.
        expected: usize,
        /// Cells given.
        actual: usize,
    },

    /// Reading the CSV source failed.
    #[error("CSV read failed: {context}")]
    Csv {
        /// What was being read.
        context: String,
        /// Underlying reader message.
        source_message: String,
    },
}

impl NormalizeError {
    /// Create a CSV error with context.
    #[must_use]
    pub fn csv(context: impl Into<String>, source: impl core::fmt::Display) -> Self {
        Self::Csv {
            context: context.into(),
            source_message: source.to_string(),
        }
    }
}

/// Errors that can occur during indicator computation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IndicatorError {
    /// The table has fewer rows than the indicator's floor.
    #[error("Insufficient samples: need {required} rows, got {actual}")]
    InsufficientSamples {
        /// Minimum number of rows.
        required: usize,
        /// Rows available.
        actual: usize,
    },

    /// Fewer numeric fields than the computation needs.
    #[error("Insufficient fields: need {required}, got {actual}")]
    InsufficientFields {
        /// Minimum number of fields.
        required: usize,
        /// Fields available.
        actual: usize,
    },

    /// Invalid window size parameter.
    #[error("Invalid window size: {0}")]
    InvalidWindow(usize),

    /// Invalid parameter value.
    #[error("Invalid parameter '{name}': {value} (expected {expected})")]
    InvalidParameter {
        /// Name of the parameter.
        name: &'static str,
        /// Provided value as string.
        value: String,
        /// Description of expected value.
        expected: &'static str,
    },

    /// Series length mismatch in computation.
    #[error("Series length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// A field the indicator reads is not present.
    #[error("Missing column: '{0}'")]
    MissingColumn(String),

    /// Unexpected numeric failure.
    #[error("Computation fault: {0}")]
    ComputationFault(String),
}

impl IndicatorError {
    /// `true` for the non-fatal "not enough data" conditions.
    #[must_use]
    pub fn is_insufficient(&self) -> bool {
        matches!(
            self,
            Self::InsufficientSamples { .. } | Self::InsufficientFields { .. }
        )
    }
}
