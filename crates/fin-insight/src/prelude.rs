//! Prelude module for convenient imports.

pub use crate::analyst::{HybridAnalyst, LanguageModel, ModelAnswer};
pub use crate::describe::{describe, FieldSummary, Summary};
pub use crate::error::InsightError;
pub use crate::market::{
    load_market_data, CsvFileSource, MarketData, MarketDataRequest, MarketDataSource, Ticker,
};
pub use crate::metrics::HeadlineMetrics;
pub use crate::news::{financial_news_query, FallbackNewsSearch, NewsItem, NewsSearch};
pub use crate::prompt::AnalysisPrompt;
pub use crate::similarity::{row_documents, Embedder, SimilarityRanker};
pub use crate::snapshot::{DataSnapshot, SnapshotConfig};
