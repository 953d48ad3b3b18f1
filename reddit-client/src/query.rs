//! Search query construction for the post index.

/// Communities the search is restricted to.
pub const BUSINESS_SUBREDDITS: [&str; 16] = [
    "business",
    "smallbusiness",
    "entrepreneur",
    "startups",
    "BusinessHub",
    "marketing",
    "CustomerService",
    "BusinessIntelligence",
    "consulting",
    "Finance",
    "investing",
    "stocks",
    "wallstreetbets",
    "Economics",
    "BusinessStrategy",
    "BusinessNews",
];

pub const SEARCH_SORT: &str = "relevance";
pub const SEARCH_TIME_WINDOW: &str = "week";
pub const SEARCH_LIMIT: u32 = 10;

/// `(title:"S" OR selftext:"S") AND (subreddit:a OR subreddit:b ...)`
pub fn build_search_query(subject: &str) -> String {
    let subject = subject.replace('"', "");
    let subreddits = BUSINESS_SUBREDDITS
        .iter()
        .map(|sub| format!("subreddit:{}", sub))
        .collect::<Vec<_>>()
        .join(" OR ");

    format!(
        "(title:\"{s}\" OR selftext:\"{s}\") AND ({subreddits})",
        s = subject
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_shape() {
        let query = build_search_query("TSLA");
        assert!(query.starts_with("(title:\"TSLA\" OR selftext:\"TSLA\") AND ("));
        assert!(query.contains("subreddit:wallstreetbets"));
        assert!(query.ends_with("subreddit:BusinessNews)"));
        assert_eq!(query.matches(" OR subreddit:").count(), 15);
    }

    #[test]
    fn test_quotes_cannot_break_out_of_phrase() {
        let query = build_search_query("A\"B");
        assert!(query.starts_with("(title:\"AB\" OR selftext:\"AB\")"));
    }
}
