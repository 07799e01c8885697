//! Ranking texts by embedding similarity to a query.

use fin_core::{num::FinFloat, ohlcv::CanonicalTable};
use tracing::debug;

use crate::error::{InsightError, Result};

/// Default number of matches returned.
pub const DEFAULT_TOP_K: usize = 5;

/// A sentence-embedding model.
pub trait Embedder: Send + Sync {
    /// Embed each text; the output has one vector per input, all the same length.
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Cosine similarity of two vectors, 0 when either has zero length.
#[must_use]
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let (mut dot, mut na, mut nb) = (0.0f32, 0.0f32, 0.0f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    if na == 0.0 || nb == 0.0 {
        return 0.0;
    }
    dot / (na.sqrt() * nb.sqrt())
}

/// Ranks candidate texts against a query with an [`Embedder`].
pub struct SimilarityRanker<E: Embedder> {
    embedder: E,
}

impl<E: Embedder> SimilarityRanker<E> {
    /// Wrap an embedder.
    pub fn new(embedder: E) -> Self {
        Self { embedder }
    }

    /// The `top_k` texts most similar to `query`, best first.
    ///
    /// Scores are clamped to `[0, 1]`; a non-finite similarity scores 0.
    /// Ties keep input order.
    pub fn rank(&self, query: &str, texts: &[String], top_k: usize) -> Result<Vec<(String, f32)>> {
        if texts.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }

        let query_vec = self
            .embedder
            .embed(&[query.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| InsightError::Embedding("no vector for the query".to_string()))?;
        let text_vecs = self.embedder.embed(texts)?;

        if text_vecs.len() != texts.len() {
            return Err(InsightError::Embedding(format!(
                "expected {} vectors, got {}",
                texts.len(),
                text_vecs.len()
            )));
        }
        if let Some(bad) = text_vecs.iter().find(|v| v.len() != query_vec.len()) {
            return Err(InsightError::Embedding(format!(
                "dimension mismatch: query has {}, text has {}",
                query_vec.len(),
                bad.len()
            )));
        }

        let mut scored: Vec<(usize, f32)> = text_vecs
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let s = cosine(&query_vec, v);
                (i, if s.is_finite() { s.clamp(0.0, 1.0) } else { 0.0 })
            })
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(top_k);

        debug!(candidates = texts.len(), kept = scored.len(), "ranked texts");
        Ok(scored.into_iter().map(|(i, s)| (texts[i].clone(), s)).collect())
    }
}

/// One line of text per row, for embedding.
pub fn row_documents<T: FinFloat>(table: &CanonicalTable<T>) -> Vec<String> {
    table
        .iter()
        .map(|bar| {
            format!(
                "Date: {}, Open: {}, High: {}, Low: {}, Close: {}, Volume: {}",
                bar.date.format("%Y-%m-%d"),
                bar.open.to_f64_lossy(),
                bar.high.to_f64_lossy(),
                bar.low.to_f64_lossy(),
                bar.close.to_f64_lossy(),
                bar.volume.to_f64_lossy(),
            )
        })
        .collect()
}
