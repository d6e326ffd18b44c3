//! Core complaint data structures

mod category;
mod record;

#[cfg(test)]
mod tests;

pub use category::{Category, UnknownCategory};
pub use record::{preview, ComplaintId, ComplaintRecord, NewComplaint, PREVIEW_CHARS, PREVIEW_ELLIPSIS};
