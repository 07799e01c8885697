//! Error types for the insight layer.

use thiserror::Error;

/// Result type alias for insight operations.
pub type Result<T> = core::result::Result<T, InsightError>;

/// Failures of the loading flow and of external collaborators.
///
/// The three loading failures carry the messages shown to end users, so a
/// caller can display `err.to_string()` directly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InsightError {
    /// The symbol was empty after trimming.
    #[error("Invalid ticker symbol: '{0}'")]
    InvalidTicker(String),

    /// The market-data source returned nothing for the symbol.
    #[error("No data found for ticker '{ticker}'")]
    NoTickerMatch {
        /// Normalised symbol.
        ticker: String,
    },

    /// The source returned data that normalised to nothing usable.
    #[error("Invalid data for ticker '{ticker}'")]
    InvalidData {
        /// Normalised symbol.
        ticker: String,
        /// Underlying cause, for logs.
        detail: String,
    },

    /// Fewer than two rows survived normalisation.
    #[error("Not enough data points. Please select a longer date range.")]
    TooFewRows {
        /// Rows available.
        actual: usize,
    },

    /// The market-data source itself failed.
    #[error("Market data source failed: {0}")]
    Source(String),

    /// A language model failed to answer.
    #[error("Model '{model}' failed: {message}")]
    Model {
        /// Model name.
        model: String,
        /// Failure description.
        message: String,
    },

    /// A news provider failed.
    #[error("News provider '{provider}' failed: {message}")]
    Search {
        /// Provider name.
        provider: String,
        /// Failure description.
        message: String,
    },

    /// The embedding model failed or returned malformed vectors.
    #[error("Embedding failed: {0}")]
    Embedding(String),
}

impl InsightError {
    /// Create a model error.
    #[must_use]
    pub fn model(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Model {
            model: model.into(),
            message: message.into(),
        }
    }

    /// Create a news provider error.
    #[must_use]
    pub fn search(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Search {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Whether this is one of the loading-flow refusals.
    #[must_use]
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidTicker(_)
                | Self::NoTickerMatch { .. }
                | Self::InvalidData { .. }
                | Self::TooFewRows { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        let err = InsightError::NoTickerMatch {
            ticker: "ZZZZ".to_string(),
        };
        assert_eq!(err.to_string(), "No data found for ticker 'ZZZZ'");

        let err = InsightError::InvalidData {
            ticker: "ABC".to_string(),
            detail: "Missing required column: 'Close'".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid data for ticker 'ABC'");

        let err = InsightError::TooFewRows { actual: 1 };
        assert_eq!(
            err.to_string(),
            "Not enough data points. Please select a longer date range."
        );
    }

    #[test]
    fn test_is_load_failure() {
        assert!(InsightError::TooFewRows { actual: 0 }.is_load_failure());
        assert!(!InsightError::Embedding("x".into()).is_load_failure());
        assert!(!InsightError::model("m", "down").is_load_failure());
    }
}
