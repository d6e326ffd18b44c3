//! Complaint intake: validate, analyze, persist
//!
//! `IntakeService` is the only place the storage and analysis layers meet.
//! A submission runs strictly in order (summarize, categorize, save) and
//! stops at the first failure, so nothing is stored or reported as
//! submitted unless every step succeeded.

use crate::analysis::{AnalysisError, TextAnalyzer};
use crate::complaint::{Category, ComplaintId, ComplaintRecord, NewComplaint};
use crate::storage::{ComplaintStore, StorageError};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Rejected input, reported to the user and never propagated further
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Complaint text cannot be empty!")]
    EmptyComplaint,
}

/// Errors from an intake interaction
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),

    #[error("analysis failure: {0}")]
    Analysis(#[from] AnalysisError),
}

/// Result type for intake operations
pub type IntakeResult<T> = Result<T, IntakeError>;

/// Outcome of a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub id: ComplaintId,
    pub summary: String,
    pub category: Category,
}

/// Orchestrates complaint submission and history retrieval.
pub struct IntakeService {
    store: Arc<dyn ComplaintStore>,
    analyzer: Arc<TextAnalyzer>,
}

impl IntakeService {
    pub fn new(store: Arc<dyn ComplaintStore>, analyzer: Arc<TextAnalyzer>) -> Self {
        Self { store, analyzer }
    }

    /// Submit a complaint.
    ///
    /// Whitespace-only text is a `ValidationError` and touches neither the
    /// models nor storage. Otherwise the text is stored verbatim alongside
    /// its summary and category.
    pub async fn submit(&self, text: &str) -> IntakeResult<Submission> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyComplaint.into());
        }

        let summary = self.analyzer.summarize(text).await?;
        let category = self.analyzer.categorize(text).await?;
        let id = self
            .store
            .save(&NewComplaint::new(text, summary.clone(), category))?;

        tracing::info!(%id, %category, "complaint submitted");
        Ok(Submission {
            id,
            summary,
            category,
        })
    }

    /// All stored complaints, most recent first.
    pub fn history(&self) -> IntakeResult<Vec<ComplaintRecord>> {
        let records = self.store.list_all()?;
        tracing::info!(count = records.len(), "complaint history fetched");
        Ok(records)
    }

    /// Number of stored complaints
    pub fn count(&self) -> IntakeResult<usize> {
        Ok(self.store.count()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::mock::{FailingAnalysis, FixedClassifier, FixedSummarizer};
    use crate::storage::{OpenStore, SqliteStore, StorageResult};

    /// Writes always fail; reads see an empty table.
    struct ReadOnlyStore;

    impl ComplaintStore for ReadOnlyStore {
        fn save(&self, _complaint: &NewComplaint) -> StorageResult<ComplaintId> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "attempt to write a readonly database",
            )))
        }

        fn list_all(&self) -> StorageResult<Vec<ComplaintRecord>> {
            Ok(Vec::new())
        }

        fn count(&self) -> StorageResult<usize> {
            Ok(0)
        }
    }

    struct Fixture {
        service: IntakeService,
        store: Arc<SqliteStore>,
        summarizer: Arc<FixedSummarizer>,
        classifier: Arc<FixedClassifier>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let summarizer = Arc::new(FixedSummarizer::new("Package broken; support unhelpful."));
        let classifier = Arc::new(FixedClassifier::new(Category::ProductQuality));
        let analyzer = Arc::new(TextAnalyzer::new(summarizer.clone(), classifier.clone()));
        Fixture {
            service: IntakeService::new(store.clone(), analyzer),
            store,
            summarizer,
            classifier,
        }
    }

    #[tokio::test]
    async fn submit_stores_one_record_with_derived_fields() {
        let f = fixture();
        let text = "My package arrived broken and support was unhelpful.";

        let submission = f.service.submit(text).await.unwrap();
        assert_eq!(submission.summary, "Package broken; support unhelpful.");
        assert_eq!(submission.category, Category::ProductQuality);

        let all = f.store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, submission.id);
        assert_eq!(all[0].complaint, text);
        assert!(Category::ALL.contains(&all[0].category));
    }

    #[tokio::test]
    async fn empty_and_whitespace_input_is_rejected_before_analysis() {
        let f = fixture();
        for text in ["", "   ", "\n\t  \n"] {
            let err = f.service.submit(text).await.unwrap_err();
            assert!(matches!(err, IntakeError::Validation(ValidationError::EmptyComplaint)));
            assert_eq!(err.to_string(), "Complaint text cannot be empty!");
        }
        assert_eq!(f.store.count().unwrap(), 0);
        assert_eq!(f.summarizer.calls(), 0);
        assert_eq!(f.classifier.calls(), 0);
    }

    #[tokio::test]
    async fn summarize_runs_before_categorize() {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let classifier = Arc::new(FixedClassifier::new(Category::BillingIssue));
        let analyzer = Arc::new(TextAnalyzer::new(
            Arc::new(FailingAnalysis::new("summarizer offline")),
            classifier.clone(),
        ));
        let service = IntakeService::new(store.clone(), analyzer);

        let err = service.submit("Charged twice").await.unwrap_err();
        assert!(matches!(err, IntakeError::Analysis(_)));
        assert_eq!(classifier.calls(), 0);
        assert_eq!(store.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn classification_failure_stores_nothing() {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let analyzer = Arc::new(TextAnalyzer::new(
            Arc::new(FixedSummarizer::new("ok summary")),
            Arc::new(FailingAnalysis::new("classifier offline")),
        ));
        let service = IntakeService::new(store.clone(), analyzer);

        assert!(matches!(
            service.submit("Charged twice").await,
            Err(IntakeError::Analysis(_))
        ));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn storage_failure_aborts_submission() {
        let analyzer = Arc::new(TextAnalyzer::new(
            Arc::new(FixedSummarizer::new("ok summary")),
            Arc::new(FixedClassifier::new(Category::BillingIssue)),
        ));
        let service = IntakeService::new(Arc::new(ReadOnlyStore), analyzer);

        let err = service.submit("Charged twice").await.unwrap_err();
        assert!(matches!(err, IntakeError::Storage(_)));
    }

    #[tokio::test]
    async fn history_is_most_recent_first() {
        let f = fixture();
        let a = f.service.submit("first complaint").await.unwrap();
        let b = f.service.submit("second complaint").await.unwrap();
        assert!(b.id > a.id);

        let history = f.service.history().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, b.id);
        assert_eq!(history[1].id, a.id);
        assert_eq!(f.service.count().unwrap(), 2);
    }

    #[tokio::test]
    async fn history_of_empty_store_is_empty() {
        let f = fixture();
        assert!(f.service.history().unwrap().is_empty());
    }
}
