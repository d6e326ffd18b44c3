//! Storage trait definitions

use crate::complaint::{ComplaintId, ComplaintRecord, NewComplaint};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored complaint {id} has unknown category: {label}")]
    InvalidCategory { id: i64, label: String },

    #[error("Storage connection lock poisoned")]
    LockPoisoned,
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for complaint storage backends
///
/// Implementations must be thread-safe (Send + Sync) so a single store
/// can be shared by the intake service and the presentation layer.
pub trait ComplaintStore: Send + Sync {
    /// Insert one complaint, returning its newly assigned identifier.
    ///
    /// No uniqueness is enforced beyond the identifier.
    fn save(&self, complaint: &NewComplaint) -> StorageResult<ComplaintId>;

    /// All complaints, most recent (highest identifier) first.
    ///
    /// An empty table yields an empty vector.
    fn list_all(&self) -> StorageResult<Vec<ComplaintRecord>>;

    /// Number of stored complaints
    fn count(&self) -> StorageResult<usize>;
}

/// Extension trait for opening stores from paths
pub trait OpenStore: ComplaintStore + Sized {
    /// Open or create a store at the given path
    fn open(path: impl AsRef<Path>) -> StorageResult<Self>;

    /// Create an in-memory store (useful for testing)
    fn open_in_memory() -> StorageResult<Self>;
}
