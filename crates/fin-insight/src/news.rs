//! Company news lookup across several search providers.

use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Results kept per search.
pub const MAX_RESULTS: usize = 5;

/// Snippet length, in characters, before truncation.
pub const SNIPPET_CHARS: usize = 200;

/// One search hit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NewsItem {
    /// Headline.
    pub title: String,
    /// Link to the article.
    pub url: String,
    /// Excerpt, at most [`SNIPPET_CHARS`] characters plus `...`.
    pub snippet: String,
}

impl NewsItem {
    /// Create an item, truncating the snippet.
    pub fn new(title: impl Into<String>, url: impl Into<String>, snippet: &str) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: truncate_snippet(snippet),
        }
    }
}

/// Cut `text` to [`SNIPPET_CHARS`] characters, appending `...` when cut.
pub fn truncate_snippet(text: &str) -> String {
    match text.char_indices().nth(SNIPPET_CHARS) {
        Some((byte, _)) => format!("{}...", &text[..byte]),
        None => text.to_string(),
    }
}

/// The query sent for a company.
pub fn financial_news_query(company: &str) -> String {
    format!("{} financial news", company.trim())
}

/// A web or news search provider.
pub trait NewsSearch: Send + Sync {
    /// Provider name for logs.
    fn name(&self) -> &str;

    /// Run `query`.
    fn search(&self, query: &str) -> Result<Vec<NewsItem>>;
}

/// Tries providers in order until one returns results.
///
/// A provider that errors or returns nothing hands over to the next one.
/// When all are exhausted the search yields an empty list.
pub struct FallbackNewsSearch {
    providers: Vec<Box<dyn NewsSearch>>,
}

impl FallbackNewsSearch {
    /// Create a chain over `providers`, tried first to last.
    pub fn new(providers: Vec<Box<dyn NewsSearch>>) -> Self {
        Self { providers }
    }

    /// Search news about `company`, returning at most [`MAX_RESULTS`] items.
    pub fn company_news(&self, company: &str) -> Vec<NewsItem> {
        self.run(&financial_news_query(company))
    }

    /// Run `query` down the chain.
    pub fn run(&self, query: &str) -> Vec<NewsItem> {
        for provider in &self.providers {
            match provider.search(query) {
                Ok(items) if !items.is_empty() => {
                    info!(provider = provider.name(), hits = items.len(), "news search answered");
                    return items
                        .into_iter()
                        .take(MAX_RESULTS)
                        .map(|item| NewsItem {
                            snippet: truncate_snippet(&item.snippet),
                            ..item
                        })
                        .collect();
                }
                Ok(_) => debug!(provider = provider.name(), "no news results, falling back"),
                Err(err) => warn!(provider = provider.name(), error = %err, "news search failed, falling back"),
            }
        }
        warn!(query, "every news provider came back empty");
        Vec::new()
    }
}

impl NewsSearch for FallbackNewsSearch {
    fn name(&self) -> &str {
        "fallback"
    }

    fn search(&self, query: &str) -> Result<Vec<NewsItem>> {
        Ok(self.run(query))
    }
}
