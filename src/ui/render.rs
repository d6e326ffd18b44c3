//! Plain-text rendering of pages and messages.
//!
//! Every function returns a `String` so the session and the one-shot CLI
//! commands share exactly the same output.

use super::{Page, APP_TITLE};
use crate::complaint::ComplaintRecord;
use crate::intake::{Submission, ValidationError};
use std::fmt::Write;

pub const SUBMIT_SUCCESS: &str = "Complaint submitted successfully!";
pub const NO_COMPLAINTS: &str = "No past complaints found.";
pub const COMPLAINT_PROMPT: &str = "Enter your complaint (finish with a line containing only '.'):";
/// Line that ends complaint entry in the interactive session
pub const END_OF_COMPLAINT: &str = ".";
pub const EXPAND_PROMPT: &str = "Expand entry (number, Enter to go back): ";
pub const MENU_PROMPT: &str = "Go to: ";

const COLLAPSED: &str = "▸";
const EXPANDED: &str = "▾";

/// Page heading with an underline
pub fn heading(title: &str) -> String {
    format!("{}\n{}\n", title, "=".repeat(title.chars().count()))
}

pub fn menu() -> String {
    let mut out = heading(APP_TITLE);
    out.push_str("Navigation\n");
    for page in Page::ALL {
        let _ = writeln!(out, "  [{}] {}", page.key(), page.menu_label());
    }
    out.push_str("  [q] Quit\n");
    out
}

pub fn submission(submission: &Submission) -> String {
    format!(
        "{}\n\nSummary:\n  {}\n\nSuggested Category:\n  {}\n",
        SUBMIT_SUCCESS, submission.summary, submission.category
    )
}

pub fn validation_error(err: &ValidationError) -> String {
    format!("{}\n", err)
}

/// Collapsed history list: one numbered header per record.
pub fn history_headers(records: &[ComplaintRecord]) -> String {
    if records.is_empty() {
        return format!("{}\n", NO_COMPLAINTS);
    }
    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        let _ = writeln!(out, "[{}] {} {}", i + 1, COLLAPSED, record.preview());
    }
    out
}

/// Footer under the history list
pub fn status_line(count: usize) -> String {
    match count {
        1 => "1 complaint on file.\n".to_string(),
        n => format!("{} complaints on file.\n", n),
    }
}

/// One history entry with its body shown.
pub fn expanded_entry(index: usize, record: &ComplaintRecord) -> String {
    format!(
        "[{}] {} {}\n    Summary: {}\n    Category: {}\n",
        index,
        EXPANDED,
        record.preview(),
        record.summary,
        record.category
    )
}

/// Every history entry expanded.
pub fn history_expanded(records: &[ComplaintRecord]) -> String {
    if records.is_empty() {
        return format!("{}\n", NO_COMPLAINTS);
    }
    records
        .iter()
        .enumerate()
        .map(|(i, record)| expanded_entry(i + 1, record))
        .collect()
}

pub fn error(err: &dyn std::error::Error) -> String {
    format!("Error: {}\n", err)
}
