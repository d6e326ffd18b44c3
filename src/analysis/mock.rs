//! Deterministic analysis backends for tests and offline runs

use super::traits::{AnalysisError, AnalysisResult, Classifier, RankedLabel, SummaryParams, Summarizer};
use crate::complaint::Category;
use crate::llm_orc::LlmOrcError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Always returns the same summary.
pub struct FixedSummarizer {
    summary: String,
    calls: AtomicUsize,
    last_params: Mutex<Option<SummaryParams>>,
}

impl FixedSummarizer {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            calls: AtomicUsize::new(0),
            last_params: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_params(&self) -> Option<SummaryParams> {
        self.last_params.lock().ok().and_then(|p| *p)
    }
}

#[async_trait]
impl Summarizer for FixedSummarizer {
    async fn summarize(&self, _text: &str, params: &SummaryParams) -> AnalysisResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_params.lock() {
            *last = Some(*params);
        }
        Ok(self.summary.clone())
    }
}

/// Always ranks the same category first, followed by the remaining
/// candidates in order.
pub struct FixedClassifier {
    top: Option<Category>,
    calls: AtomicUsize,
}

impl FixedClassifier {
    pub fn new(top: Category) -> Self {
        Self {
            top: Some(top),
            calls: AtomicUsize::new(0),
        }
    }

    /// A classifier that ranks nothing.
    pub fn empty() -> Self {
        Self {
            top: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Classifier for FixedClassifier {
    async fn classify(&self, _text: &str, labels: &[Category]) -> AnalysisResult<Vec<RankedLabel>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let Some(top) = self.top.filter(|t| labels.contains(t)) else {
            return Ok(Vec::new());
        };
        let mut ranking = vec![RankedLabel::new(top, Some(1.0))];
        ranking.extend(
            labels
                .iter()
                .filter(|c| **c != top)
                .map(|c| RankedLabel::new(*c, Some(0.0))),
        );
        Ok(ranking)
    }
}

/// Fails every call, as an unreachable model would.
pub struct FailingAnalysis {
    reason: String,
    calls: AtomicUsize,
}

impl FailingAnalysis {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> AnalysisResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AnalysisError::Backend(LlmOrcError::Unavailable(self.reason.clone())))
    }
}

#[async_trait]
impl Summarizer for FailingAnalysis {
    async fn summarize(&self, _text: &str, _params: &SummaryParams) -> AnalysisResult<String> {
        self.fail()
    }
}

#[async_trait]
impl Classifier for FailingAnalysis {
    async fn classify(&self, _text: &str, _labels: &[Category]) -> AnalysisResult<Vec<RankedLabel>> {
        self.fail()
    }
}
