//! Live llm-orc integration: real SubprocessClient → llm-orc → model
//!
//! Requires `llm-orc` on PATH with `complaint-summarize` and
//! `complaint-classify` ensembles configured in the current project.
//!
//! Run with: `cargo test --test live_llm_orc --features real_llm -- --nocapture`

use complaintdesk::analysis::{LlmOrcClassifier, LlmOrcSummarizer};
use complaintdesk::llm_orc::{LlmOrcClient, SubprocessClient};
use complaintdesk::{Category, TextAnalyzer};
use std::sync::Arc;

const COMPLAINT: &str = "My package arrived broken and support was unhelpful.";

fn analyzer(client: Arc<dyn LlmOrcClient>) -> TextAnalyzer {
    TextAnalyzer::new(
        Arc::new(LlmOrcSummarizer::new(client.clone(), "complaint-summarize")),
        Arc::new(LlmOrcClassifier::new(client, "complaint-classify")),
    )
}

#[tokio::test]
#[cfg_attr(not(feature = "real_llm"), ignore = "requires real_llm feature")]
async fn live_summary_respects_bounds() {
    let client: Arc<dyn LlmOrcClient> = Arc::new(SubprocessClient::new());
    assert!(client.is_available().await, "llm-orc must be on PATH");

    let summary = analyzer(client).summarize(COMPLAINT).await.unwrap();
    eprintln!("summary: {}", summary);
    assert!(!summary.is_empty());
    assert!(summary.split_whitespace().count() <= 50);
}

#[tokio::test]
#[cfg_attr(not(feature = "real_llm"), ignore = "requires real_llm feature")]
async fn live_category_is_stable_across_runs() {
    let client: Arc<dyn LlmOrcClient> = Arc::new(SubprocessClient::new());
    let analyzer = analyzer(client);

    let first = analyzer.categorize(COMPLAINT).await.unwrap();
    let second = analyzer.categorize(COMPLAINT).await.unwrap();
    eprintln!("category: {}", first);
    assert!(Category::ALL.contains(&first));
    assert_eq!(first, second);
}
