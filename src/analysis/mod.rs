//! Text analysis: summarization and zero-shot classification
//!
//! Both capabilities are external models reached through the `Summarizer`
//! and `Classifier` traits:
//!
//! - llm-orc ensembles (`LlmOrcSummarizer`, `LlmOrcClassifier`)
//! - a local embedding model for classification (`EmbeddingClassifier`,
//!   with the fastembed backend behind the `embeddings` feature)
//! - fixed and failing doubles in `mock`
//!
//! `TextAnalyzer` composes one of each and is what the intake flow calls.

mod analyzer;
mod embedding;
mod llm;
pub mod mock;
mod traits;

pub use analyzer::TextAnalyzer;
pub use embedding::{Embedder, EmbeddingClassifier, EmbeddingError, DEFAULT_HYPOTHESIS_TEMPLATE};
#[cfg(feature = "embeddings")]
pub use embedding::FastEmbedEmbedder;
pub use llm::{LlmOrcClassifier, LlmOrcSummarizer, DEFAULT_CLASSIFY_ENSEMBLE, DEFAULT_SUMMARIZE_ENSEMBLE};
pub use traits::{AnalysisError, AnalysisResult, Classifier, RankedLabel, SummaryParams, Summarizer};
