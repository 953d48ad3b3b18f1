use pulse_core::{RawPost, Subject};
use regex::{Regex, RegexBuilder};
use tracing::{debug, info, warn};

/// Keeps only posts whose title or body literally mention the subject.
///
/// The upstream search matches stems and partial tokens, so its results are
/// re-checked here with a case-insensitive match on the escaped subject.
#[derive(Debug, Clone)]
pub struct RelevanceFilter {
    needle: String,
    pattern: Option<Regex>,
}

impl RelevanceFilter {
    pub fn new(subject: &Subject) -> Self {
        let pattern = RegexBuilder::new(&regex::escape(subject.as_str()))
            .case_insensitive(true)
            .build()
            .map_err(|e| warn!("Falling back to substring matching for {}: {}", subject, e))
            .ok();

        Self {
            needle: subject.as_str().to_lowercase(),
            pattern,
        }
    }

    fn mentions(&self, text: &str) -> bool {
        match &self.pattern {
            Some(pattern) => pattern.is_match(text),
            None => text.to_lowercase().contains(&self.needle),
        }
    }

    pub fn is_relevant(&self, post: &RawPost) -> bool {
        post.has_content() && (self.mentions(&post.title) || self.mentions(&post.body))
    }

    pub fn filter(&self, posts: Vec<RawPost>) -> Vec<RawPost> {
        let received = posts.len();
        let retained: Vec<RawPost> = posts
            .into_iter()
            .filter(|post| {
                let keep = self.is_relevant(post);
                if !keep {
                    debug!("Discarding post {} (no literal mention)", post.id);
                }
                keep
            })
            .collect();

        info!(
            "Relevance filter kept {} of {} posts",
            retained.len(),
            received
        );
        retained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::raw_post;

    fn filter_for(subject: &str) -> RelevanceFilter {
        RelevanceFilter::new(&Subject::parse(subject).unwrap())
    }

    #[test]
    fn test_case_insensitive_title_or_body() {
        let filter = filter_for("TSLA");
        assert!(filter.is_relevant(&raw_post("1", "tsla to the moon", "", 1)));
        assert!(filter.is_relevant(&raw_post("2", "Weekly thread", "Loaded up on Tsla", 1)));
        assert!(!filter.is_relevant(&raw_post("3", "Tesla deliveries", "EV stocks", 1)));
    }

    #[test]
    fn test_empty_post_never_retained() {
        let filter = filter_for("AMD");
        assert!(!filter.is_relevant(&raw_post("1", "", "", 10)));
    }

    #[test]
    fn test_subject_is_matched_literally() {
        let filter = filter_for("BRK.B");
        assert!(filter.is_relevant(&raw_post("1", "Buying BRK.B today", "", 1)));
        assert!(!filter.is_relevant(&raw_post("2", "BRKXB is not a ticker", "", 1)));

        let filter = filter_for("C++");
        assert!(filter.is_relevant(&raw_post("3", "Hiring c++ devs", "", 1)));
    }

    #[test]
    fn test_non_ascii_subject_matches_its_own_spelling() {
        let filter = filter_for("straße");
        let posts = vec![
            raw_post("1", "straße project update", "", 4),
            raw_post("2", "Strasse project update", "", 4),
        ];
        let kept = filter.filter(posts);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "1");
    }

    #[test]
    fn test_filter_preserves_order_and_is_idempotent() {
        let filter = filter_for("nvda");
        let posts = vec![
            raw_post("1", "NVDA earnings", "", 5),
            raw_post("2", "Unrelated", "Something else", 2),
            raw_post("3", "", "I sold my nvda", -1),
            raw_post("4", "", "", 0),
        ];

        let once = filter.filter(posts);
        let ids: Vec<&str> = once.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        let twice = filter.filter(once.clone());
        assert_eq!(twice, once);
    }

    #[test]
    fn test_no_retained_post_fails_the_match() {
        let filter = filter_for("ko");
        let posts = vec![
            raw_post("1", "KO dividend", "", 1),
            raw_post("2", "Pepsi", "Soda wars", 1),
            raw_post("3", "Knockout", "", 1),
        ];

        for post in filter.filter(posts) {
            let title = post.title.to_lowercase();
            let body = post.body.to_lowercase();
            assert!(title.contains("ko") || body.contains("ko"));
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(filter_for("SPY").filter(Vec::new()).is_empty());
    }
}
