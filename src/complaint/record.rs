//! Complaint records as stored and listed

use super::category::Category;
use serde::{Deserialize, Serialize};

/// Number of characters of complaint text shown in a history header
pub const PREVIEW_CHARS: usize = 100;

/// Marker appended to every preview
pub const PREVIEW_ELLIPSIS: &str = "...";

/// Identifier assigned by storage on insert.
///
/// Monotonically increasing; never reused or changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComplaintId(i64);

impl ComplaintId {
    pub fn from_raw(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A complaint whose derived fields have been computed but which has
/// not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComplaint {
    pub complaint: String,
    pub summary: String,
    pub category: Category,
}

impl NewComplaint {
    pub fn new(complaint: impl Into<String>, summary: impl Into<String>, category: Category) -> Self {
        Self {
            complaint: complaint.into(),
            summary: summary.into(),
            category,
        }
    }
}

/// A stored complaint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintRecord {
    pub id: ComplaintId,
    /// Complaint text exactly as submitted
    pub complaint: String,
    pub summary: String,
    pub category: Category,
}

impl ComplaintRecord {
    /// Header text for the history list: the first 100 characters of the
    /// complaint followed by `...`.
    ///
    /// Counts `char`s so multi-byte text is never split mid-character.
    pub fn preview(&self) -> String {
        preview(&self.complaint)
    }
}

/// Truncate `text` to [`PREVIEW_CHARS`] characters and append the ellipsis.
pub fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(PREVIEW_CHARS).collect();
    out.push_str(PREVIEW_ELLIPSIS);
    out
}
