//! Statistical summaries.
//!
//! - Correlation matrix over OHLCV fields
//! - Price distribution (histogram of close)

mod correlation;
mod distribution;

pub use correlation::{Correlation, CorrelationConfig, CorrelationMatrix};
pub use distribution::{Histogram, PriceDistribution, PriceDistributionConfig};
