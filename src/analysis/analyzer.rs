//! TextAnalyzer — the two analysis operations the intake flow needs

use super::traits::{AnalysisError, AnalysisResult, Classifier, SummaryParams, Summarizer};
use crate::complaint::Category;
use std::sync::Arc;

/// Summarizes and categorizes complaint text.
///
/// Built once at startup from injected backends and shared by `Arc`;
/// the backends themselves may be expensive to initialize.
pub struct TextAnalyzer {
    summarizer: Arc<dyn Summarizer>,
    classifier: Arc<dyn Classifier>,
    params: SummaryParams,
}

impl TextAnalyzer {
    pub fn new(summarizer: Arc<dyn Summarizer>, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            summarizer,
            classifier,
            params: SummaryParams::default(),
        }
    }

    pub fn params(&self) -> &SummaryParams {
        &self.params
    }

    /// The single best summary of `text`, at most `max_length` tokens.
    pub async fn summarize(&self, text: &str) -> AnalysisResult<String> {
        let raw = self.summarizer.summarize(text, &self.params).await?;
        let summary = truncate_tokens(raw.trim(), self.params.max_length);
        if summary.is_empty() {
            return Err(AnalysisError::EmptyResult("summary"));
        }
        if summary.split_whitespace().count() < self.params.min_length {
            tracing::debug!(
                min_length = self.params.min_length,
                "summary shorter than requested minimum"
            );
        }
        Ok(summary)
    }

    /// The top-ranked category for `text`.
    pub async fn categorize(&self, text: &str) -> AnalysisResult<Category> {
        let ranking = self.classifier.classify(text, &Category::ALL).await?;
        ranking
            .first()
            .map(|top| top.category)
            .ok_or(AnalysisError::EmptyResult("category ranking"))
    }
}

/// Keep at most `max` whitespace-delimited tokens of `text`.
///
/// Text already within bounds is returned unchanged.
fn truncate_tokens(text: &str, max: usize) -> String {
    if text.split_whitespace().count() <= max {
        return text.to_string();
    }
    text.split_whitespace().take(max).collect::<Vec<_>>().join(" ")
}
