//! complaintdesk: Complaint Intake Desk
//!
//! Collects free-text customer complaints, summarizes and categorizes them
//! with pretrained models, and keeps a history in SQLite.
//!
//! # Core Concepts
//!
//! - **Complaint records**: submitted text plus its derived summary and
//!   category, identified by a monotonically increasing id
//! - **Analysis**: external summarization and zero-shot classification
//!   behind the `Summarizer` and `Classifier` traits
//! - **Intake**: the validate → summarize → categorize → save flow
//!
//! # Example
//!
//! ```
//! use complaintdesk::analysis::mock::{FixedClassifier, FixedSummarizer};
//! use complaintdesk::{Category, IntakeService, OpenStore, SqliteStore, TextAnalyzer};
//! use std::sync::Arc;
//!
//! let store = Arc::new(SqliteStore::open_in_memory().unwrap());
//! let analyzer = Arc::new(TextAnalyzer::new(
//!     Arc::new(FixedSummarizer::new("Parcel arrived damaged.")),
//!     Arc::new(FixedClassifier::new(Category::ProductQuality)),
//! ));
//! let intake = IntakeService::new(store, analyzer);
//! assert!(intake.history().unwrap().is_empty());
//! ```

pub mod analysis;
mod complaint;
pub mod config;
mod intake;
pub mod llm_orc;
pub mod storage;
pub mod ui;

pub use analysis::{AnalysisError, Classifier, Summarizer, SummaryParams, TextAnalyzer};
pub use complaint::{
    preview, Category, ComplaintId, ComplaintRecord, NewComplaint, UnknownCategory, PREVIEW_CHARS,
    PREVIEW_ELLIPSIS,
};
pub use config::{ClassifierBackend, ConfigError, DeskConfig};
pub use intake::{IntakeError, IntakeResult, IntakeService, Submission, ValidationError};
pub use storage::{ComplaintStore, OpenStore, SqliteStore, StorageError, StorageResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
