use pulse_core::{ClassifiedPost, RawPost, SentimentLabel};

pub trait SentimentClassifier: Send + Sync {
    fn classify(&self, post: &RawPost) -> SentimentLabel;
}

/// Labels a post by the sign of its vote score.
///
/// A score of exactly zero is negative: only `score > 0` counts as positive.
/// This never produces [`SentimentLabel::Neutral`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreHeuristic;

impl ScoreHeuristic {
    pub fn label_for_score(score: i64) -> SentimentLabel {
        if score > 0 {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Negative
        }
    }
}

impl SentimentClassifier for ScoreHeuristic {
    fn classify(&self, post: &RawPost) -> SentimentLabel {
        Self::label_for_score(post.score)
    }
}

pub fn classify_all<C>(classifier: &C, posts: Vec<RawPost>) -> Vec<ClassifiedPost>
where
    C: SentimentClassifier + ?Sized,
{
    posts
        .into_iter()
        .map(|post| {
            let sentiment = classifier.classify(&post);
            ClassifiedPost { post, sentiment }
        })
        .collect()
}
