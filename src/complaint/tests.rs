//! Category parsing and record preview tests

use super::*;
use serde_json::json;

fn record(text: &str) -> ComplaintRecord {
    ComplaintRecord {
        id: ComplaintId::from_raw(1),
        complaint: text.to_string(),
        summary: "summary".to_string(),
        category: Category::ProductQuality,
    }
}

#[test]
fn test_category_labels_in_candidate_order() {
    assert_eq!(
        Category::labels(),
        vec![
            "Billing Issue",
            "Delivery Delay",
            "Product Quality",
            "Customer Support",
            "Technical Issue"
        ]
    );
}

#[test]
fn test_category_parses_case_insensitively() {
    assert_eq!("billing issue".parse::<Category>(), Ok(Category::BillingIssue));
    assert_eq!("  TECHNICAL ISSUE\n".parse::<Category>(), Ok(Category::TechnicalIssue));
    for category in Category::ALL {
        assert_eq!(category.label().parse::<Category>(), Ok(category));
    }
}

#[test]
fn test_category_rejects_labels_outside_set() {
    let err = "Refund Request".parse::<Category>().unwrap_err();
    assert_eq!(err, UnknownCategory("Refund Request".to_string()));
    assert!("".parse::<Category>().is_err());
}

#[test]
fn test_category_serializes_as_label() {
    assert_eq!(serde_json::to_value(Category::DeliveryDelay).unwrap(), json!("Delivery Delay"));
    let parsed: Category = serde_json::from_value(json!("Customer Support")).unwrap();
    assert_eq!(parsed, Category::CustomerSupport);
}

#[test]
fn test_preview_of_short_text_still_gets_ellipsis() {
    assert_eq!(record("Late again").preview(), "Late again...");
    assert_eq!(record("").preview(), "...");
}

#[test]
fn test_preview_truncates_to_first_hundred_chars() {
    let text = "x".repeat(250);
    let preview = record(&text).preview();
    assert_eq!(preview, format!("{}...", "x".repeat(100)));
}

#[test]
fn test_preview_counts_chars_not_bytes() {
    let text = "é".repeat(120);
    let preview = record(&text).preview();
    assert_eq!(preview.chars().count(), PREVIEW_CHARS + PREVIEW_ELLIPSIS.len());
    assert!(preview.starts_with(&"é".repeat(100)));
}

#[test]
fn test_complaint_ids_order_numerically() {
    assert!(ComplaintId::from_raw(2) > ComplaintId::from_raw(1));
    assert_eq!(ComplaintId::from_raw(7).to_string(), "#7");
}
