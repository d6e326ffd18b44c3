//! Analysis capability traits and shared types

use crate::complaint::Category;
use crate::llm_orc::LlmOrcError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from summarization or classification
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("llm-orc backend error: {0}")]
    Backend(#[from] LlmOrcError),

    #[error("embedding error: {0}")]
    Embedding(String),

    #[error("invalid model response: {0}")]
    InvalidResponse(String),

    #[error("model returned no {0}")]
    EmptyResult(&'static str),
}

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Length bounds and decoding mode for summarization.
///
/// Lengths are in tokens; the default is 10..=50 with sampling disabled
/// so repeated runs over the same text agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryParams {
    pub max_length: usize,
    pub min_length: usize,
    pub do_sample: bool,
}

impl Default for SummaryParams {
    fn default() -> Self {
        Self {
            max_length: 50,
            min_length: 10,
            do_sample: false,
        }
    }
}

/// One entry of a classifier's ranking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedLabel {
    pub category: Category,
    /// Model confidence, when the backend reports one
    pub score: Option<f32>,
}

impl RankedLabel {
    pub fn new(category: Category, score: Option<f32>) -> Self {
        Self { category, score }
    }
}

/// External summarization capability
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `text` within the given bounds.
    async fn summarize(&self, text: &str, params: &SummaryParams) -> AnalysisResult<String>;
}

/// External zero-shot classification capability
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Rank `labels` for `text`, best first. The result never contains a
    /// label outside `labels`.
    async fn classify(&self, text: &str, labels: &[Category]) -> AnalysisResult<Vec<RankedLabel>>;
}
