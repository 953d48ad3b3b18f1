use pulse_core::{ClassifiedPost, SentimentCounts, SentimentLabel};
use tracing::debug;

/// Per-label counts plus the headline label derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub counts: SentimentCounts,
    pub main_sentiment: SentimentLabel,
}

/// Strict majority wins; anything else (including no posts) is neutral.
pub fn dominant_label(positive: usize, negative: usize) -> SentimentLabel {
    if positive > negative {
        SentimentLabel::Positive
    } else if negative > positive {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

pub fn aggregate(posts: &[ClassifiedPost]) -> Tally {
    let total = posts.len();
    let positive = posts
        .iter()
        .filter(|p| p.sentiment == SentimentLabel::Positive)
        .count();
    let negative = posts
        .iter()
        .filter(|p| p.sentiment == SentimentLabel::Negative)
        .count();

    // Whatever was labelled neither way is neutral.
    let counts = SentimentCounts {
        positive,
        negative,
        neutral: total - (positive + negative),
    };
    let main_sentiment = dominant_label(positive, negative);

    debug!(
        "Tallied {} posts: {} positive, {} negative, {} neutral -> {}",
        total, counts.positive, counts.negative, counts.neutral, main_sentiment
    );

    Tally {
        counts,
        main_sentiment,
    }
}
