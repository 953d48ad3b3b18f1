use crate::query::{build_search_query, SEARCH_LIMIT, SEARCH_SORT, SEARCH_TIME_WINDOW};
use crate::PostSearch;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pulse_core::{BearerToken, RawPost, SearchError, Subject};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, error, info, warn};

const REDDIT_WEB_BASE: &str = "https://reddit.com";
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListing<T> {
    #[serde(default)]
    pub kind: String,
    pub data: RedditListingData<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingData<T> {
    pub children: Vec<RedditListingChild<T>>,
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub before: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingChild<T> {
    #[serde(default)]
    pub kind: String,
    pub data: T,
}

/// The subset of a listing record the pipeline reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RedditPostData {
    pub id: String,
    pub title: String,
    pub selftext: String,
    pub subreddit: String,
    pub permalink: String,
    pub created_utc: f64,
    pub score: i64,
    pub num_comments: u64,
}

impl From<RedditPostData> for RawPost {
    fn from(post_data: RedditPostData) -> Self {
        let created_at = DateTime::<Utc>::from_timestamp(post_data.created_utc as i64, 0)
            .unwrap_or_default();

        Self {
            id: post_data.id,
            title: post_data.title,
            body: post_data.selftext,
            created_at,
            score: post_data.score,
            num_comments: post_data.num_comments,
            permalink: format!("{}{}", REDDIT_WEB_BASE, post_data.permalink),
            subreddit: post_data.subreddit,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RedditApiClient {
    http_client: Client,
    api_base: String,
}

impl RedditApiClient {
    pub fn new(api_base: String, http_client: Client) -> Self {
        Self {
            http_client,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub async fn make_request(
        &self,
        endpoint: &str,
        access_token: &str,
        query_params: &[(&str, &str)],
    ) -> Result<Response, SearchError> {
        let url = format!("{}{}", self.api_base, endpoint);
        let start_time = Instant::now();

        info!("Making Reddit API request: GET {}", endpoint);
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(access_token)
            .query(query_params)
            .send()
            .await
            .map_err(|e| {
                error!("Network error for GET {}: {}", endpoint, e);
                if e.is_timeout() {
                    SearchError::RequestTimeout
                } else {
                    SearchError::Transport {
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        debug!(
            "GET {} returned {} in {:?}",
            endpoint,
            status,
            start_time.elapsed()
        );

        if status.is_success() {
            return Ok(response);
        }

        error!("Request failed with status: {} for {}", status, endpoint);
        Err(match status.as_u16() {
            401 | 403 => SearchError::Unauthorized {
                status_code: status.as_u16(),
            },
            429 => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.trim().parse::<u64>().ok())
                    .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                warn!("Rate limited, retry after {} seconds", retry_after);
                SearchError::RateLimitExceeded { retry_after }
            }
            code if status.is_server_error() => SearchError::ServerError { status_code: code },
            code => SearchError::UnexpectedStatus { status_code: code },
        })
    }

    /// Relevance-ranked posts from the last week mentioning `subject`, at most ten.
    ///
    /// Records with neither a title nor a body are dropped here.
    pub async fn search_posts(
        &self,
        subject: &Subject,
        token: &BearerToken,
    ) -> Result<Vec<RawPost>, SearchError> {
        let query = build_search_query(subject.as_str());
        let limit = SEARCH_LIMIT.to_string();
        let params = [
            ("q", query.as_str()),
            ("sort", SEARCH_SORT),
            ("t", SEARCH_TIME_WINDOW),
            ("limit", limit.as_str()),
            ("restrict_sr", "true"),
        ];

        let response = self.make_request("/search", token.secret(), &params).await?;

        let listing: RedditListing<RedditPostData> = response.json().await.map_err(|e| {
            error!("Failed to parse search results: {}", e);
            SearchError::InvalidResponse {
                details: format!("Failed to parse search results for {}", subject),
            }
        })?;

        let total = listing.data.children.len();
        let posts: Vec<RawPost> = listing
            .data
            .children
            .into_iter()
            .map(|child| RawPost::from(child.data))
            .filter(RawPost::has_content)
            .collect();

        info!(
            "Retrieved {} posts for {} ({} without content dropped)",
            posts.len(),
            subject,
            total - posts.len()
        );
        Ok(posts)
    }
}

#[async_trait]
impl PostSearch for RedditApiClient {
    async fn search(
        &self,
        subject: &Subject,
        token: &BearerToken,
    ) -> Result<Vec<RawPost>, SearchError> {
        self.search_posts(subject, token).await
    }
}
