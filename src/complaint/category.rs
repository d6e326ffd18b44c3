//! The closed set of complaint categories

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Category assigned to a complaint by zero-shot classification.
///
/// The label set is fixed; classifiers rank these and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Billing Issue")]
    BillingIssue,
    #[serde(rename = "Delivery Delay")]
    DeliveryDelay,
    #[serde(rename = "Product Quality")]
    ProductQuality,
    #[serde(rename = "Customer Support")]
    CustomerSupport,
    #[serde(rename = "Technical Issue")]
    TechnicalIssue,
}

impl Category {
    /// Every category, in candidate-label order.
    pub const ALL: [Category; 5] = [
        Category::BillingIssue,
        Category::DeliveryDelay,
        Category::ProductQuality,
        Category::CustomerSupport,
        Category::TechnicalIssue,
    ];

    /// Human-readable label, as stored and as sent to classifiers.
    pub fn label(&self) -> &'static str {
        match self {
            Category::BillingIssue => "Billing Issue",
            Category::DeliveryDelay => "Delivery Delay",
            Category::ProductQuality => "Product Quality",
            Category::CustomerSupport => "Customer Support",
            Category::TechnicalIssue => "Technical Issue",
        }
    }

    /// Candidate labels as plain strings.
    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(Category::label).collect()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for a label outside the closed category set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category label: {0:?}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Case-insensitive match on the label; surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
