use crate::aggregator::Tally;
use pulse_core::{AggregateResult, Analysis, ClassifiedPost, ModelSummary};
use tracing::info;

/// Merges the heuristic tally with the model summary into the caller-facing result.
///
/// `sentiment_score` and `confidence` from the model are not part of the
/// result. With no posts the canonical empty result is returned regardless of
/// the other inputs.
pub fn assemble(posts: &[ClassifiedPost], tally: Tally, summary: ModelSummary) -> AggregateResult {
    if posts.is_empty() {
        info!("No relevant posts; returning the empty result");
        return AggregateResult::empty();
    }

    AggregateResult {
        main_sentiment: tally.main_sentiment,
        posts: posts.iter().map(ClassifiedPost::to_view).collect(),
        sentiment_count: tally.counts,
        analysis: Analysis {
            key_topics: summary.key_topics,
            summary: summary.summary,
        },
    }
}
