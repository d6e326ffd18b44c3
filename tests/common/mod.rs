//! Shared fixtures for complaint desk integration tests
//!
//! Builds an `IntakeService` over a temporary on-disk database and
//! deterministic analysis backends, so tests exercise the real SQLite
//! schema without reaching any model.

#![allow(dead_code)]

use complaintdesk::analysis::mock::{FixedClassifier, FixedSummarizer};
use complaintdesk::{Category, IntakeService, OpenStore, SqliteStore, TextAnalyzer};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub const SAMPLE_COMPLAINT: &str = "My package arrived broken and support was unhelpful.";

/// A service plus the handles tests inspect afterwards.
pub struct Desk {
    pub intake: Arc<IntakeService>,
    pub store: Arc<SqliteStore>,
    pub summarizer: Arc<FixedSummarizer>,
    pub classifier: Arc<FixedClassifier>,
    pub db_path: PathBuf,
    // Dropped last: removes the database directory
    _dir: TempDir,
}

/// Desk whose analysis always yields `summary` and `category`.
pub fn desk_with(summary: &str, category: Category) -> Desk {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db_path = dir.path().join("complaints.db");
    let store = Arc::new(SqliteStore::open(&db_path).expect("open store"));
    let summarizer = Arc::new(FixedSummarizer::new(summary));
    let classifier = Arc::new(FixedClassifier::new(category));
    let analyzer = Arc::new(TextAnalyzer::new(summarizer.clone(), classifier.clone()));
    Desk {
        intake: Arc::new(IntakeService::new(store.clone(), analyzer)),
        store,
        summarizer,
        classifier,
        db_path,
        _dir: dir,
    }
}

pub fn desk() -> Desk {
    desk_with("Package broken; support unhelpful.", Category::ProductQuality)
}
