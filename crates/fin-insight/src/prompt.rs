//! The analyst prompt sent to language models.

use core::fmt;

use crate::snapshot::DataSnapshot;

/// A question about a data snapshot, rendered into the analyst template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisPrompt<'a> {
    snapshot: &'a DataSnapshot,
    question: &'a str,
}

impl<'a> AnalysisPrompt<'a> {
    /// Pair a snapshot with the user's question.
    pub fn new(snapshot: &'a DataSnapshot, question: &'a str) -> Self {
        Self { snapshot, question }
    }

    /// The question as given.
    pub fn question(&self) -> &str {
        self.question
    }

    /// Render the full prompt text.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AnalysisPrompt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You are a financial analyst. Based on this data:\n{}\n\nAnd these stats:\n{}\n\nAnswer the user: {}",
            self.snapshot.recent, self.snapshot.stats, self.question
        )
    }
}
