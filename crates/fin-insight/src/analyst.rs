//! Asking one or more language models about a data snapshot.
//!
//! Models are opaque collaborators behind [`LanguageModel`]; the transport
//! (local server, hosted API) lives outside this crate.

use tracing::{debug, warn};

use crate::error::Result;
use crate::prompt::AnalysisPrompt;

/// A text-completion model.
pub trait LanguageModel: Send + Sync {
    /// Identifier used in results and logs.
    fn name(&self) -> &str;

    /// Complete `prompt`, returning the model's answer.
    fn complete(&self, prompt: &str) -> Result<String>;
}

/// One model's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAnswer {
    /// Model name.
    pub model: String,
    /// The answer, or the failure.
    pub answer: Result<String>,
}

/// Fans one prompt out to several models.
///
/// Every model is asked even if an earlier one fails, and empty answers
/// count as no answer.
pub struct HybridAnalyst {
    models: Vec<Box<dyn LanguageModel>>,
}

impl HybridAnalyst {
    /// Create an analyst over `models`, asked in order.
    pub fn new(models: Vec<Box<dyn LanguageModel>>) -> Self {
        Self { models }
    }

    /// Number of models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// True when there are no models.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Ask every model.
    pub fn ask(&self, prompt: &AnalysisPrompt<'_>) -> Vec<ModelAnswer> {
        let text = prompt.render();
        self.models
            .iter()
            .map(|model| {
                let answer = model.complete(&text);
                match &answer {
                    Ok(reply) => debug!(model = model.name(), chars = reply.len(), "model answered"),
                    Err(err) => warn!(model = model.name(), error = %err, "model failed"),
                }
                ModelAnswer {
                    model: model.name().to_string(),
                    answer,
                }
            })
            .collect()
    }

    /// Ask every model and keep only the non-empty answers.
    pub fn answers(&self, prompt: &AnalysisPrompt<'_>) -> Vec<(String, String)> {
        self.ask(prompt)
            .into_iter()
            .filter_map(|a| match a.answer {
                Ok(reply) if !reply.trim().is_empty() => Some((a.model, reply)),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InsightError;
    use crate::snapshot::DataSnapshot;

    struct Echo;

    impl LanguageModel for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn complete(&self, prompt: &str) -> Result<String> {
            Ok(prompt.rsplit("Answer the user: ").next().unwrap_or_default().to_string())
        }
    }

    struct Down;

    impl LanguageModel for Down {
        fn name(&self) -> &str {
            "down"
        }

        fn complete(&self, _prompt: &str) -> Result<String> {
            Err(InsightError::model("down", "connection refused"))
        }
    }

    struct Silent;

    impl LanguageModel for Silent {
        fn name(&self) -> &str {
            "silent"
        }

        fn complete(&self, _prompt: &str) -> Result<String> {
            Ok("  ".to_string())
        }
    }

    fn snapshot() -> DataSnapshot {
        DataSnapshot {
            recent: "rows".to_string(),
            stats: "stats".to_string(),
        }
    }

    #[test]
    fn test_failure_does_not_stop_others() {
        let analyst = HybridAnalyst::new(vec![Box::new(Down), Box::new(Echo)]);
        let snap = snapshot();
        let answers = analyst.ask(&AnalysisPrompt::new(&snap, "why?"));

        assert_eq!(answers.len(), 2);
        assert!(answers[0].answer.is_err());
        assert_eq!(answers[1].answer.as_deref(), Ok("why?"));
    }

    #[test]
    fn test_answers_skips_failed_and_blank() {
        let analyst = HybridAnalyst::new(vec![Box::new(Down), Box::new(Silent), Box::new(Echo)]);
        let snap = snapshot();
        let answers = analyst.answers(&AnalysisPrompt::new(&snap, "trend?"));

        assert_eq!(answers, vec![("echo".to_string(), "trend?".to_string())]);
    }

    #[test]
    fn test_no_models() {
        let analyst = HybridAnalyst::new(Vec::new());
        let snap = snapshot();
        assert!(analyst.is_empty());
        assert!(analyst.ask(&AnalysisPrompt::new(&snap, "q")).is_empty());
    }
}
