//! Storage backends for complaint records
//!
//! Backends implement the `ComplaintStore` trait. The only implementation
//! is `SqliteStore`, a single-file SQLite database.

mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{ComplaintStore, OpenStore, StorageError, StorageResult};
