//! Runtime configuration
//!
//! Read from an optional YAML file; command-line flags override individual
//! fields afterwards. Every field has a default, so an empty file (or no
//! file) is a complete configuration.

use crate::analysis::{
    Classifier, EmbeddingClassifier, LlmOrcClassifier, LlmOrcSummarizer, TextAnalyzer,
    DEFAULT_CLASSIFY_ENSEMBLE, DEFAULT_SUMMARIZE_ENSEMBLE,
};
use crate::llm_orc::{LlmOrcClient, SubprocessClient};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Errors from loading or applying configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("unknown classifier backend '{0}' (expected 'llm-orc' or 'embedding')")]
    UnknownClassifier(String),

    #[error("classifier backend '{0}' requires building with the '{1}' feature")]
    FeatureDisabled(&'static str, &'static str),

    #[error("failed to initialize analysis backend: {0}")]
    Backend(String),
}

/// Which capability ranks complaint categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassifierBackend {
    /// Zero-shot classification through an llm-orc ensemble
    #[default]
    LlmOrc,
    /// Local embedding similarity (fastembed)
    Embedding,
}

impl std::str::FromStr for ClassifierBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "llm-orc" | "llm_orc" | "llmorc" => Ok(ClassifierBackend::LlmOrc),
            "embedding" | "embeddings" => Ok(ClassifierBackend::Embedding),
            other => Err(ConfigError::UnknownClassifier(other.to_string())),
        }
    }
}

/// How to reach llm-orc
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmOrcConfig {
    pub binary: PathBuf,
    pub project_dir: Option<PathBuf>,
    pub summarize_ensemble: String,
    pub classify_ensemble: String,
}

impl Default for LlmOrcConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("llm-orc"),
            project_dir: None,
            summarize_ensemble: DEFAULT_SUMMARIZE_ENSEMBLE.to_string(),
            classify_ensemble: DEFAULT_CLASSIFY_ENSEMBLE.to_string(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    /// SQLite database file; `None` means the per-user default
    pub database: Option<PathBuf>,
    pub classifier: ClassifierBackend,
    pub llm_orc: LlmOrcConfig,
}

impl DeskConfig {
    /// Parse YAML configuration text.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loaded config file");
        Self::from_yaml_str(&text)
    }

    /// Database path, falling back to `<data_dir>/complaintdesk/complaints.db`.
    pub fn database_path(&self) -> PathBuf {
        self.database.clone().unwrap_or_else(default_db_path)
    }

    /// Construct the analysis capabilities once, for the life of the process.
    pub fn build_analyzer(&self) -> Result<TextAnalyzer, ConfigError> {
        let mut client = SubprocessClient::new().with_binary(&self.llm_orc.binary);
        if let Some(dir) = &self.llm_orc.project_dir {
            client = client.with_project_dir(dir);
        }
        let client: Arc<dyn LlmOrcClient> = Arc::new(client);

        let summarizer = Arc::new(LlmOrcSummarizer::new(
            client.clone(),
            &self.llm_orc.summarize_ensemble,
        ));
        let classifier: Arc<dyn Classifier> = match self.classifier {
            ClassifierBackend::LlmOrc => Arc::new(LlmOrcClassifier::new(
                client,
                &self.llm_orc.classify_ensemble,
            )),
            ClassifierBackend::Embedding => Arc::new(embedding_classifier()?),
        };

        tracing::info!(classifier = ?self.classifier, "analysis backends ready");
        Ok(TextAnalyzer::new(summarizer, classifier))
    }
}

#[cfg(feature = "embeddings")]
fn embedding_classifier() -> Result<EmbeddingClassifier, ConfigError> {
    let embedder = crate::analysis::FastEmbedEmbedder::default_model()
        .map_err(|e| ConfigError::Backend(e.to_string()))?;
    Ok(EmbeddingClassifier::new(Arc::new(embedder)))
}

#[cfg(not(feature = "embeddings"))]
fn embedding_classifier() -> Result<EmbeddingClassifier, ConfigError> {
    Err(ConfigError::FeatureDisabled("embedding", "embeddings"))
}

/// Get the default database path (~/.local/share/complaintdesk/complaints.db)
pub fn default_db_path() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"));
    data_dir.join("complaintdesk").join("complaints.db")
}
