pub mod api;
pub mod auth;
pub mod query;


pub use api::RedditApiClient;
pub use auth::RedditAuthenticator;

use async_trait::async_trait;
use pulse_core::{AuthError, BearerToken, ConfigError, RawPost, RedditSettings, SearchError, Subject};
use reqwest::Client;
use std::time::Duration;

/// Exchanges stored client credentials for a bearer token.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn obtain_token(&self) -> Result<BearerToken, AuthError>;
}

/// Looks up recent posts mentioning a subject.
#[async_trait]
pub trait PostSearch: Send + Sync {
    async fn search(
        &self,
        subject: &Subject,
        token: &BearerToken,
    ) -> Result<Vec<RawPost>, SearchError>;
}

/// Token exchange and search share one HTTP client and User-Agent.
#[derive(Debug, Clone)]
pub struct RedditClient {
    authenticator: RedditAuthenticator,
    api: RedditApiClient,
}

impl RedditClient {
    pub fn new(settings: &RedditSettings) -> Result<Self, ConfigError> {
        let http_client = build_http_client(&settings.user_agent, settings.request_timeout())?;

        Ok(Self {
            authenticator: RedditAuthenticator::new(
                settings.client_id.clone(),
                settings.client_secret.clone(),
                settings.token_url.clone(),
                http_client.clone(),
            ),
            api: RedditApiClient::new(settings.api_base.clone(), http_client),
        })
    }

    pub fn authenticator(&self) -> &RedditAuthenticator {
        &self.authenticator
    }

    pub fn api(&self) -> &RedditApiClient {
        &self.api
    }

    pub fn into_parts(self) -> (RedditAuthenticator, RedditApiClient) {
        (self.authenticator, self.api)
    }
}

pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, ConfigError> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(|e| ConfigError::InvalidValue {
            field: "reddit.user_agent".to_string(),
            value: format!("{} ({})", user_agent, e),
        })
}
