//! One sentiment run per subject: authenticate, search, filter, classify,
//! tally, summarize, assemble.
//!
//! [`SentimentPipeline::run`] reports failures as a [`CoreError`];
//! [`SentimentPipeline::analyze`] is the caller-facing entry point and maps
//! every failure to the canonical empty result through [`degrade`].


use llm_interface::{GeminiProvider, SentimentSummarizer, TextGenerator};
use pulse_core::{AggregateResult, AppConfig, CoreError, ErrorReporter, Subject};
use reddit_client::{PostSearch, RedditApiClient, RedditAuthenticator, RedditClient, TokenProvider};
use sentiment_engine::{
    aggregate, assemble, classify_all, RelevanceFilter, ScoreHeuristic, SentimentClassifier,
};
use tracing::{info, warn};

/// Production wiring: Reddit for posts, Gemini for the summary.
pub type DefaultPipeline = SentimentPipeline<RedditAuthenticator, RedditApiClient, GeminiProvider>;

pub struct SentimentPipeline<A, S, G, C = ScoreHeuristic> {
    auth: A,
    search: S,
    summarizer: SentimentSummarizer<G>,
    classifier: C,
}

impl<A, S, G> SentimentPipeline<A, S, G, ScoreHeuristic>
where
    A: TokenProvider,
    S: PostSearch,
    G: TextGenerator,
{
    pub fn new(auth: A, search: S, generator: G) -> Self {
        Self::with_classifier(auth, search, generator, ScoreHeuristic)
    }
}

impl DefaultPipeline {
    /// Builds the clients once; missing credentials surface per run, not here.
    pub fn from_config(config: &AppConfig) -> Result<Self, CoreError> {
        let (auth, search) = RedditClient::new(&config.reddit)?.into_parts();
        let generator = GeminiProvider::from_settings(&config.llm)?;
        Ok(Self::new(auth, search, generator))
    }
}

impl<A, S, G, C> SentimentPipeline<A, S, G, C>
where
    A: TokenProvider,
    S: PostSearch,
    G: TextGenerator,
    C: SentimentClassifier,
{
    pub fn with_classifier(auth: A, search: S, generator: G, classifier: C) -> Self {
        Self {
            auth,
            search,
            summarizer: SentimentSummarizer::new(generator),
            classifier,
        }
    }

    /// Runs every stage in order and reports the first fatal failure.
    pub async fn run(&self, subject: &str) -> Result<AggregateResult, CoreError> {
        let subject = Subject::parse(subject)?;
        info!("Starting sentiment run for {}", subject);

        let token = self.auth.obtain_token().await?;
        let found = self.search.search(&subject, &token).await?;
        let relevant = RelevanceFilter::new(&subject).filter(found);

        if relevant.is_empty() {
            info!("No recent discussions of {}", subject);
            return Ok(AggregateResult::empty());
        }

        let classified = classify_all(&self.classifier, relevant);
        let tally = aggregate(&classified);
        let summary = self.summarizer.summarize(&subject, &classified).await?;

        let result = assemble(&classified, tally, summary);
        info!(
            "Finished {}: {} ({} positive, {} negative, {} neutral)",
            subject,
            result.main_sentiment,
            result.sentiment_count.positive,
            result.sentiment_count.negative,
            result.sentiment_count.neutral
        );
        Ok(result)
    }

    /// Never fails; see [`degrade`].
    pub async fn analyze(&self, subject: &str) -> AggregateResult {
        degrade(self.run(subject).await)
    }
}

/// The only place a pipeline failure turns into the canonical empty result.
pub fn degrade(outcome: Result<AggregateResult, CoreError>) -> AggregateResult {
    match outcome {
        Ok(result) => result,
        Err(error) => {
            ErrorReporter::default().report_error(&error);
            warn!("Sentiment run failed; returning the empty result");
            AggregateResult::empty()
        }
    }
}
