//! Momentum indicators.
//!
//! - RSI (Relative Strength Index, simple trailing means)

mod rsi;

pub use rsi::{Rsi, RsiConfig};
