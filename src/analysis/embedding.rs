//! EmbeddingClassifier — local zero-shot classification by embedding similarity
//!
//! Embeds the complaint together with one hypothesis sentence per candidate
//! label ("This complaint is about {label}.") and ranks labels by cosine
//! similarity to the complaint.
//!
//! Uses a trait-based embedding backend (`Embedder`) so production code can use
//! fastembed-rs while tests use deterministic mock embedders.

use super::traits::{AnalysisError, AnalysisResult, Classifier, RankedLabel};
use crate::complaint::Category;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Hypothesis template; `{label}` is replaced by the candidate label.
pub const DEFAULT_HYPOTHESIS_TEMPLATE: &str = "This complaint is about {label}.";

/// Error type for embedding operations.
#[derive(Debug)]
pub enum EmbeddingError {
    /// The embedding model returned no results
    EmptyResult,
    /// Model loading or inference failed
    ModelError(String),
}

impl fmt::Display for EmbeddingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingError::EmptyResult => write!(f, "embedding returned no results"),
            EmbeddingError::ModelError(msg) => write!(f, "embedding model error: {}", msg),
        }
    }
}

impl From<EmbeddingError> for AnalysisError {
    fn from(err: EmbeddingError) -> Self {
        AnalysisError::Embedding(err.to_string())
    }
}

/// Trait for embedding text into vectors.
///
/// Implementations handle model loading and inference.
/// fastembed-rs for production, mock for tests.
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts, returning one vector per text.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

// ---------------------------------------------------------------------------
// FastEmbedEmbedder — production embedder behind `embeddings` feature
// ---------------------------------------------------------------------------

#[cfg(feature = "embeddings")]
mod fastembed_impl {
    use super::{Embedder, EmbeddingError};
    use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
    use std::sync::Mutex;

    /// Production embedder backed by fastembed (ONNX Runtime).
    ///
    /// Wraps `fastembed::TextEmbedding` in a `Mutex` because its `embed`
    /// method requires `&mut self`, while the `Embedder` trait uses `&self`.
    pub struct FastEmbedEmbedder {
        model: Mutex<TextEmbedding>,
    }

    impl FastEmbedEmbedder {
        /// Load `model`, downloading it on first use.
        pub fn new(model: EmbeddingModel) -> Result<Self, EmbeddingError> {
            let options = InitOptions::new(model).with_show_download_progress(false);
            let embedding = TextEmbedding::try_new(options)
                .map_err(|e| EmbeddingError::ModelError(e.to_string()))?;
            Ok(Self {
                model: Mutex::new(embedding),
            })
        }

        /// Small general-purpose English model (all-MiniLM-L6-v2).
        pub fn default_model() -> Result<Self, EmbeddingError> {
            Self::new(EmbeddingModel::AllMiniLML6V2)
        }
    }

    impl Embedder for FastEmbedEmbedder {
        fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            if texts.is_empty() {
                return Ok(Vec::new());
            }
            let mut model = self
                .model
                .lock()
                .map_err(|_| EmbeddingError::ModelError("embedding model lock poisoned".to_string()))?;
            let embeddings = model
                .embed(texts.to_vec(), None)
                .map_err(|e| EmbeddingError::ModelError(e.to_string()))?;
            if embeddings.is_empty() {
                return Err(EmbeddingError::EmptyResult);
            }
            Ok(embeddings)
        }
    }
}

#[cfg(feature = "embeddings")]
pub use fastembed_impl::FastEmbedEmbedder;

/// Cosine similarity between two vectors.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Zero-shot classifier over a local embedding model
pub struct EmbeddingClassifier {
    embedder: Arc<dyn Embedder>,
    template: String,
}

impl EmbeddingClassifier {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            template: DEFAULT_HYPOTHESIS_TEMPLATE.to_string(),
        }
    }

    /// Override the hypothesis template (must contain `{label}`).
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    fn hypothesis(&self, category: Category) -> String {
        self.template.replace("{label}", category.label())
    }
}

#[async_trait]
impl Classifier for EmbeddingClassifier {
    async fn classify(&self, text: &str, labels: &[Category]) -> AnalysisResult<Vec<RankedLabel>> {
        if labels.is_empty() {
            return Ok(Vec::new());
        }

        let hypotheses: Vec<String> = labels.iter().map(|c| self.hypothesis(*c)).collect();
        let mut inputs: Vec<&str> = Vec::with_capacity(labels.len() + 1);
        inputs.push(text);
        inputs.extend(hypotheses.iter().map(String::as_str));

        let vectors = self.embedder.embed_batch(&inputs)?;
        if vectors.len() != inputs.len() {
            return Err(AnalysisError::Embedding(format!(
                "expected {} vectors, got {}",
                inputs.len(),
                vectors.len()
            )));
        }

        let query = &vectors[0];
        let mut ranking: Vec<RankedLabel> = labels
            .iter()
            .zip(vectors[1..].iter())
            .map(|(category, v)| RankedLabel::new(*category, Some(cosine_similarity(query, v))))
            .collect();
        // Stable: ties keep candidate order
        ranking.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(ranking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Embeds text as keyword hits: one dimension per category keyword.
    struct KeywordEmbedder;

    const KEYWORDS: [&str; 5] = ["billing", "delivery", "quality", "support", "technical"];

    impl Embedder for KeywordEmbedder {
        fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            Ok(texts
                .iter()
                .map(|t| {
                    let lower = t.to_lowercase();
                    KEYWORDS
                        .iter()
                        .map(|k| if lower.contains(k) { 1.0 } else { 0.0 })
                        .collect()
                })
                .collect())
        }
    }

    struct BrokenEmbedder;

    impl Embedder for BrokenEmbedder {
        fn embed_batch(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            Err(EmbeddingError::ModelError("onnx runtime missing".to_string()))
        }
    }

    #[test]
    fn cosine_similarity_basics() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn hypothesis_uses_template() {
        let classifier = EmbeddingClassifier::new(Arc::new(KeywordEmbedder))
            .with_template("Topic: {label}");
        assert_eq!(classifier.hypothesis(Category::BillingIssue), "Topic: Billing Issue");
    }

    #[tokio::test]
    async fn ranks_most_similar_label_first() {
        let classifier = EmbeddingClassifier::new(Arc::new(KeywordEmbedder));
        let ranking = classifier
            .classify("The delivery was three weeks late", &Category::ALL)
            .await
            .unwrap();

        assert_eq!(ranking.len(), Category::ALL.len());
        assert_eq!(ranking[0].category, Category::DeliveryDelay);
        assert!(ranking.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[tokio::test]
    async fn embedder_failure_propagates() {
        let classifier = EmbeddingClassifier::new(Arc::new(BrokenEmbedder));
        let err = classifier.classify("anything", &Category::ALL).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Embedding(ref m) if m.contains("onnx runtime missing")));
    }
}
