use crate::TextGenerator;
use pulse_core::{ClassifiedPost, CoreError, ErrorReporter, ModelSummary, Subject, SummaryError};
use tracing::{info, warn};

const RESPONSE_SHAPE: &str = r#"{
  "overallSentiment": "Bullish/Bearish/Neutral",
  "sentimentScore": "percentage of positive sentiment (0-100)",
  "keyTopics": ["list of main topics discussed"],
  "confidence": "confidence level in the analysis",
  "summary": "brief summary of community sentiment"
}"#;

pub fn build_prompt(subject: &Subject, posts: &[ClassifiedPost]) -> String {
    let mut prompt = format!(
        "Analyze the sentiment of these Reddit posts about {}:\n\n",
        subject
    );

    let blocks: Vec<String> = posts
        .iter()
        .map(|classified| {
            let post = &classified.post;
            format!(
                "Post: \"{}\"\nContent: \"{}\"\nScore: {}\nComments: {}\nURL: {}",
                post.title, post.body, post.score, post.num_comments, post.permalink
            )
        })
        .collect();
    prompt.push_str(&blocks.join("\n\n"));

    prompt.push_str("\n\nPlease provide a detailed sentiment analysis in the following format:\n");
    prompt.push_str(RESPONSE_SHAPE);
    prompt.push_str(
        "\n\nIMPORTANT: Return ONLY the JSON object, no markdown formatting or additional text.",
    );
    prompt
}

/// Strict parse of trimmed model output.
pub fn try_parse_summary(text: &str) -> Result<ModelSummary, SummaryError> {
    serde_json::from_str(text.trim()).map_err(|e| SummaryError::ParseFailed {
        details: e.to_string(),
    })
}

/// Never fails: unparseable output becomes [`ModelSummary::fallback`].
pub fn parse_summary(text: &str) -> ModelSummary {
    match try_parse_summary(text) {
        Ok(summary) => summary,
        Err(e) => {
            ErrorReporter::default().report_warning(&CoreError::from(e));
            warn!("Raw model response: {}", text);
            ModelSummary::fallback()
        }
    }
}

/// Asks a [`TextGenerator`] for a structured summary of the retained posts.
#[derive(Debug, Clone)]
pub struct SentimentSummarizer<G> {
    generator: G,
}

impl<G: TextGenerator> SentimentSummarizer<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Transport failures propagate; malformed output does not.
    ///
    /// With no posts the model is not called and the fallback is returned.
    pub async fn summarize(
        &self,
        subject: &Subject,
        posts: &[ClassifiedPost],
    ) -> Result<ModelSummary, SummaryError> {
        if posts.is_empty() {
            warn!("No posts to summarize for {}", subject);
            return Ok(ModelSummary::fallback());
        }

        let prompt = build_prompt(subject, posts);
        info!(
            "Summarizing {} posts about {} with {}",
            posts.len(),
            subject,
            self.generator.name()
        );
        let text = self.generator.generate(&prompt).await?;
        Ok(parse_summary(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use pulse_core::{OverallSentiment, RawPost, SentimentLabel};
    use std::sync::Mutex;

    struct CannedGenerator {
        reply: Result<String, SummaryError>,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedGenerator {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        fn name(&self) -> &str {
            "canned"
        }

        async fn generate(&self, prompt: &str) -> Result<String, SummaryError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone()
        }
    }

    fn post(title: &str, body: &str, score: i64) -> ClassifiedPost {
        ClassifiedPost {
            post: RawPost {
                id: title.to_lowercase(),
                title: title.to_string(),
                body: body.to_string(),
                created_at: Utc::now(),
                score,
                num_comments: 7,
                permalink: "https://reddit.com/r/stocks/comments/x1/".to_string(),
                subreddit: "stocks".to_string(),
            },
            sentiment: SentimentLabel::Positive,
        }
    }

    fn subject() -> Subject {
        Subject::parse("tsla").unwrap()
    }

    const VALID: &str = r#"
        {
          "overallSentiment": "Bullish",
          "sentimentScore": "68",
          "keyTopics": ["deliveries", "margins"],
          "confidence": "medium",
          "summary": "Cautiously optimistic"
        }
    "#;

    #[test]
    fn test_prompt_lists_every_post() {
        let prompt = build_prompt(
            &subject(),
            &[post("Deliveries beat", "Huge quarter", 42), post("Margins", "", -3)],
        );

        assert!(prompt.starts_with("Analyze the sentiment of these Reddit posts about TSLA:"));
        assert!(prompt.contains("Post: \"Deliveries beat\"\nContent: \"Huge quarter\"\nScore: 42\nComments: 7\nURL: https://reddit.com/r/stocks/comments/x1/"));
        assert!(prompt.contains("Score: -3"));
        assert!(prompt.contains("\"keyTopics\""));
        assert!(prompt.ends_with("no markdown formatting or additional text."));
    }

    #[test]
    fn test_parse_valid_summary() {
        let summary = parse_summary(VALID);
        assert_eq!(summary.overall_sentiment, OverallSentiment::Bullish);
        assert_eq!(summary.sentiment_score, 68);
        assert_eq!(summary.key_topics, vec!["deliveries", "margins"]);
        assert_eq!(summary.summary, "Cautiously optimistic");
    }

    #[test]
    fn test_unparseable_output_yields_exact_fallback() {
        let inputs = [
            "",
            "   ",
            "The community is bullish.",
            "```json\n{\"overallSentiment\":\"Bullish\"}\n```",
            "{\"overallSentiment\": \"Bullish\"",
            "[1, 2, 3]",
            r#"{"overallSentiment":"Sideways","sentimentScore":50,"keyTopics":[],"confidence":"low","summary":"x"}"#,
        ];

        for input in inputs {
            let summary = parse_summary(input);
            assert_eq!(summary, ModelSummary::fallback(), "input: {:?}", input);
            assert_eq!(summary.overall_sentiment, OverallSentiment::Neutral);
            assert_eq!(summary.sentiment_score, 50);
            assert!(summary.key_topics.is_empty());
            assert_eq!(summary.confidence, "low");
            assert_eq!(
                summary.summary,
                "Unable to analyze sentiment due to parsing error"
            );
        }
    }

    #[test]
    fn test_try_parse_reports_details() {
        let result = try_parse_summary("not json");
        assert!(matches!(result, Err(SummaryError::ParseFailed { .. })));
    }

    #[tokio::test]
    async fn test_summarize_sends_prompt_and_parses() {
        let summarizer = SentimentSummarizer::new(CannedGenerator::replying(VALID));
        let summary = summarizer
            .summarize(&subject(), &[post("Deliveries beat", "", 1)])
            .await
            .unwrap();

        assert_eq!(summary.key_topics.len(), 2);
        let prompts = summarizer.generator().prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Deliveries beat"));
    }

    #[tokio::test]
    async fn test_summarize_recovers_from_malformed_output() {
        let summarizer = SentimentSummarizer::new(CannedGenerator::replying("Sure! Here you go:"));
        let summary = summarizer
            .summarize(&subject(), &[post("x", "", 1)])
            .await
            .unwrap();
        assert_eq!(summary, ModelSummary::fallback());
    }

    #[tokio::test]
    async fn test_summarize_blank_reply_falls_back() {
        let summarizer = SentimentSummarizer::new(CannedGenerator::replying("   "));
        let summary = summarizer
            .summarize(&subject(), &[post("x", "", 1)])
            .await
            .unwrap();
        assert_eq!(summary, ModelSummary::fallback());
    }

    #[tokio::test]
    async fn test_summarize_without_posts_skips_model() {
        let summarizer = SentimentSummarizer::new(CannedGenerator::replying(VALID));
        let summary = summarizer.summarize(&subject(), &[]).await.unwrap();

        assert_eq!(summary, ModelSummary::fallback());
        assert!(summarizer.generator().prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_summarize_propagates_transport_failure() {
        let generator = CannedGenerator {
            reply: Err(SummaryError::RequestFailed {
                provider: "canned".to_string(),
                message: "connection reset".to_string(),
            }),
            prompts: Mutex::new(Vec::new()),
        };
        let result = SentimentSummarizer::new(generator)
            .summarize(&subject(), &[post("x", "", 1)])
            .await;
        assert!(matches!(result, Err(SummaryError::RequestFailed { .. })));
    }
}
