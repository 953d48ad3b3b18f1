use crate::error::CoreError;
use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Summary text of the canonical empty result.
pub const NO_DISCUSSIONS_SUMMARY: &str = "No recent discussions found";

/// Summary text used when the model output could not be parsed.
pub const PARSE_FALLBACK_SUMMARY: &str = "Unable to analyze sentiment due to parsing error";

/// Ticker or topic keyword being analyzed. Always trimmed and non-empty.
///
/// Only ASCII letters are upper-cased, so the text stays a literal of what the
/// caller typed (`straße` keeps its `ß`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subject(String);

impl Subject {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidInput {
                message: "subject must not be empty".to_string(),
            });
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Short-lived OAuth bearer token for the post index.
#[derive(Clone, PartialEq)]
pub struct BearerToken {
    access_token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl BearerToken {
    pub fn new(access_token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            access_token,
            expires_at,
        }
    }

    pub fn secret(&self) -> &str {
        &self.access_token
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("access_token", &"[redacted]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// A discussion post as returned by the search index.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPost {
    pub id: String,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub score: i64,
    pub num_comments: u64,
    pub permalink: String,
    pub subreddit: String,
}

impl RawPost {
    pub fn has_content(&self) -> bool {
        !self.title.is_empty() || !self.body.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedPost {
    pub post: RawPost,
    pub sentiment: SentimentLabel,
}

impl ClassifiedPost {
    pub fn to_view(&self) -> PostView {
        PostView {
            title: self.post.title.clone(),
            content: self.post.body.clone(),
            sentiment: self.sentiment,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentCounts {
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// Headline stance reported by the summarization model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OverallSentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl<'de> Deserialize<'de> for OverallSentiment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "bullish" => Ok(OverallSentiment::Bullish),
            "bearish" => Ok(OverallSentiment::Bearish),
            "neutral" => Ok(OverallSentiment::Neutral),
            _ => Err(de::Error::unknown_variant(
                &raw,
                &["Bullish", "Bearish", "Neutral"],
            )),
        }
    }
}

/// Structured summary produced by the external model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary {
    pub overall_sentiment: OverallSentiment,
    #[serde(deserialize_with = "deserialize_score")]
    pub sentiment_score: u8,
    pub key_topics: Vec<String>,
    #[serde(deserialize_with = "deserialize_confidence")]
    pub confidence: String,
    pub summary: String,
}

impl ModelSummary {
    /// Substituted wholesale whenever the model output cannot be parsed.
    pub fn fallback() -> Self {
        Self {
            overall_sentiment: OverallSentiment::Neutral,
            sentiment_score: 50,
            key_topics: Vec::new(),
            confidence: "low".to_string(),
            summary: PARSE_FALLBACK_SUMMARY.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
}

fn deserialize_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom(format!("sentimentScore {} is not finite", n)))?,
        NumberOrText::Text(text) => text
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("sentimentScore '{}' is not numeric", text)))?,
    };

    if !(0.0..=100.0).contains(&value) {
        return Err(de::Error::custom(format!(
            "sentimentScore {} is outside 0-100",
            value
        )));
    }
    Ok(value.round() as u8)
}

fn deserialize_confidence<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => n.to_string(),
        NumberOrText::Text(text) => text,
    })
}

/// Display projection of a retained post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView {
    pub title: String,
    pub content: String,
    pub sentiment: SentimentLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub key_topics: Vec<String>,
    pub summary: String,
}

/// The only value handed back to callers of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub main_sentiment: SentimentLabel,
    pub posts: Vec<PostView>,
    pub sentiment_count: SentimentCounts,
    pub analysis: Analysis,
}

impl AggregateResult {
    /// Returned when no relevant posts exist or any stage of the pipeline fails.
    pub fn empty() -> Self {
        Self {
            main_sentiment: SentimentLabel::Neutral,
            posts: Vec::new(),
            sentiment_count: SentimentCounts::default(),
            analysis: Analysis {
                key_topics: Vec::new(),
                summary: NO_DISCUSSIONS_SUMMARY.to_string(),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
