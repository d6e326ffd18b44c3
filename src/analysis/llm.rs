//! llm-orc backed summarizer and classifier
//!
//! Each call serializes a JSON payload, invokes a named ensemble and parses
//! the primary agent response. Models wrap JSON in prose or code fences
//! often enough that parsing is lenient (see `extract_json`).

use super::traits::{AnalysisError, AnalysisResult, Classifier, RankedLabel, SummaryParams, Summarizer};
use crate::complaint::Category;
use crate::llm_orc::LlmOrcClient;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

/// Default ensemble for summarization
pub const DEFAULT_SUMMARIZE_ENSEMBLE: &str = "complaint-summarize";

/// Default ensemble for zero-shot classification
pub const DEFAULT_CLASSIFY_ENSEMBLE: &str = "complaint-classify";

/// Extract a JSON value from LLM response text.
///
/// Tries, in order:
/// 1. Direct parse (response is pure JSON)
/// 2. Extract from ```json ... ``` or ``` ... ``` fenced block
/// 3. Find the first `{` to last `}` span and parse that
fn extract_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();

    if let Ok(v) = serde_json::from_str::<Value>(trimmed) {
        if v.is_object() || v.is_array() {
            return Some(v);
        }
    }

    let fenced = if let Some(start) = trimmed.find("```json") {
        let after = &trimmed[start + 7..];
        after.find("```").map(|end| &after[..end])
    } else if let Some(start) = trimmed.find("```\n") {
        let after = &trimmed[start + 4..];
        after.find("```").map(|end| &after[..end])
    } else {
        None
    };

    if let Some(block) = fenced {
        if let Ok(v) = serde_json::from_str::<Value>(block.trim()) {
            if v.is_object() || v.is_array() {
                return Some(v);
            }
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            if let Ok(v) = serde_json::from_str::<Value>(&trimmed[start..=end]) {
                if v.is_object() {
                    return Some(v);
                }
            }
        }
    }

    None
}

/// Pull the summary string out of a summarizer response.
///
/// Accepts the pipeline shape `[{"summary_text": ...}]`, an object with
/// `summary_text` or `summary`, or plain prose. JSON of any other shape is
/// rejected rather than stored as the summary.
fn parse_summary(response: &str) -> AnalysisResult<String> {
    let from_object = |v: &Value| {
        v.get("summary_text")
            .or_else(|| v.get("summary"))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    let Some(v) = extract_json(response) else {
        return Ok(response.trim().to_string());
    };
    let summary = match &v {
        Value::Array(items) => items.first().and_then(from_object),
        Value::Object(_) => from_object(&v),
        _ => None,
    }
    .ok_or_else(|| {
        AnalysisError::InvalidResponse(format!(
            "expected 'summary_text' or 'summary', got {}",
            v
        ))
    })?;

    Ok(summary.trim().to_string())
}

/// Turn a classifier response into a ranking over `allowed`.
///
/// Accepts `{"labels": [...], "scores": [...]}`, `{"label": ..., "score": ...}`
/// or a bare label. Labels outside `allowed` are dropped; when scores are
/// present the ranking is re-sorted by score, highest first.
fn parse_ranking(response: &str, allowed: &[Category]) -> AnalysisResult<Vec<RankedLabel>> {
    let candidates: Vec<(String, Option<f32>)> = match extract_json(response) {
        Some(v) if v.get("labels").is_some() => {
            let labels = v["labels"].as_array().ok_or_else(|| {
                AnalysisError::InvalidResponse("'labels' is not an array".to_string())
            })?;
            let scores = v.get("scores").and_then(Value::as_array);
            labels
                .iter()
                .enumerate()
                .filter_map(|(i, label)| {
                    let score = scores
                        .and_then(|s| s.get(i))
                        .and_then(Value::as_f64)
                        .map(|s| s as f32);
                    label.as_str().map(|l| (l.to_string(), score))
                })
                .collect()
        }
        Some(v) if v.get("label").is_some() => {
            let label = v["label"].as_str().ok_or_else(|| {
                AnalysisError::InvalidResponse("'label' is not a string".to_string())
            })?;
            let score = v.get("score").and_then(Value::as_f64).map(|s| s as f32);
            vec![(label.to_string(), score)]
        }
        Some(other) => {
            return Err(AnalysisError::InvalidResponse(format!(
                "expected 'labels' or 'label', got {}",
                other
            )))
        }
        None => vec![(response.trim().to_string(), None)],
    };

    let mut ranking = Vec::new();
    for (label, score) in candidates {
        match label.parse::<Category>() {
            Ok(category) if allowed.contains(&category) => {
                if !ranking.iter().any(|r: &RankedLabel| r.category == category) {
                    ranking.push(RankedLabel::new(category, score));
                }
            }
            _ => tracing::warn!(label = %label, "dropping label outside candidate set"),
        }
    }

    if ranking.is_empty() {
        return Err(AnalysisError::InvalidResponse(
            "no candidate label in classifier response".to_string(),
        ));
    }

    if ranking.iter().all(|r| r.score.is_some()) {
        ranking.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    Ok(ranking)
}

/// Summarizer backed by an llm-orc ensemble
pub struct LlmOrcSummarizer {
    client: Arc<dyn LlmOrcClient>,
    ensemble_name: String,
}

impl LlmOrcSummarizer {
    pub fn new(client: Arc<dyn LlmOrcClient>, ensemble_name: impl Into<String>) -> Self {
        Self {
            client,
            ensemble_name: ensemble_name.into(),
        }
    }
}

#[async_trait]
impl Summarizer for LlmOrcSummarizer {
    async fn summarize(&self, text: &str, params: &SummaryParams) -> AnalysisResult<String> {
        let payload = json!({
            "text": text,
            "max_length": params.max_length,
            "min_length": params.min_length,
            "do_sample": params.do_sample,
        });
        let response = self
            .client
            .invoke(&self.ensemble_name, &payload.to_string())
            .await?;
        parse_summary(response.primary_response()?)
    }
}

/// Zero-shot classifier backed by an llm-orc ensemble
pub struct LlmOrcClassifier {
    client: Arc<dyn LlmOrcClient>,
    ensemble_name: String,
}

impl LlmOrcClassifier {
    pub fn new(client: Arc<dyn LlmOrcClient>, ensemble_name: impl Into<String>) -> Self {
        Self {
            client,
            ensemble_name: ensemble_name.into(),
        }
    }
}

#[async_trait]
impl Classifier for LlmOrcClassifier {
    async fn classify(&self, text: &str, labels: &[Category]) -> AnalysisResult<Vec<RankedLabel>> {
        let candidate_labels: Vec<&str> = labels.iter().map(Category::label).collect();
        let payload = json!({
            "text": text,
            "candidate_labels": candidate_labels,
        });
        let response = self
            .client
            .invoke(&self.ensemble_name, &payload.to_string())
            .await?;
        parse_ranking(response.primary_response()?, labels)
    }
}
