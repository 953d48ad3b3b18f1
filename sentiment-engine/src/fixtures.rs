use chrono::{TimeZone, Utc};
use pulse_core::{ClassifiedPost, RawPost, SentimentLabel};

pub fn raw_post(id: &str, title: &str, body: &str, score: i64) -> RawPost {
    RawPost {
        id: id.to_string(),
        title: title.to_string(),
        body: body.to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        score,
        num_comments: 3,
        permalink: format!("https://reddit.com/r/stocks/comments/{}/", id),
        subreddit: "stocks".to_string(),
    }
}

pub fn classified(id: &str, sentiment: SentimentLabel) -> ClassifiedPost {
    ClassifiedPost {
        post: raw_post(id, &format!("post {}", id), "", 1),
        sentiment,
    }
}
