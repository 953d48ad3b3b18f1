use crate::TokenProvider;
use async_trait::async_trait;
use chrono::Utc;
use oauth2::basic::{
    BasicErrorResponse, BasicRevocationErrorResponse, BasicTokenIntrospectionResponse,
    BasicTokenType,
};
use oauth2::{
    AccessToken, AuthUrl, ClientId, ClientSecret, HttpRequest, HttpResponse, RefreshToken,
    RequestTokenError, Scope, StandardRevocableToken, TokenResponse, TokenUrl,
};
use pulse_core::{AuthError, BearerToken};
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

// Required by the oauth2 client type; never contacted by the client-credentials grant.
const REDDIT_AUTHORIZE_URL: &str = "https://www.reddit.com/api/v1/authorize";

type RedditOAuthClient = oauth2::Client<
    BasicErrorResponse,
    RedditTokenResponse,
    BasicTokenType,
    BasicTokenIntrospectionResponse,
    StandardRevocableToken,
    BasicRevocationErrorResponse,
>;

/// Token endpoint body. Only `access_token` is required; a missing
/// `token_type` is read as bearer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditTokenResponse {
    access_token: AccessToken,
    #[serde(default = "bearer", deserialize_with = "token_type_or_bearer")]
    token_type: BasicTokenType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_in: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<RefreshToken>,
}

fn bearer() -> BasicTokenType {
    BasicTokenType::Bearer
}

fn token_type_or_bearer<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BasicTokenType, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(match raw.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("bearer") => BasicTokenType::Bearer,
        Some("mac") => BasicTokenType::Mac,
        Some(other) => BasicTokenType::Extension(other.to_string()),
    })
}

impl TokenResponse<BasicTokenType> for RedditTokenResponse {
    fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    fn token_type(&self) -> &BasicTokenType {
        &self.token_type
    }

    fn expires_in(&self) -> Option<Duration> {
        self.expires_in.map(Duration::from_secs)
    }

    fn refresh_token(&self) -> Option<&RefreshToken> {
        self.refresh_token.as_ref()
    }

    fn scopes(&self) -> Option<&Vec<Scope>> {
        None
    }
}

/// Application-only (client-credentials) token exchange.
///
/// One exchange per call. Tokens are not cached here; callers decide whether
/// to reuse a token between subjects.
#[derive(Clone)]
pub struct RedditAuthenticator {
    client_id: Option<String>,
    client_secret: Option<String>,
    token_url: String,
    http_client: Client,
}

impl std::fmt::Debug for RedditAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedditAuthenticator")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "[redacted]"))
            .field("token_url", &self.token_url)
            .finish()
    }
}

impl RedditAuthenticator {
    pub fn new(
        client_id: Option<String>,
        client_secret: Option<String>,
        token_url: String,
        http_client: Client,
    ) -> Self {
        Self {
            client_id,
            client_secret,
            token_url,
            http_client,
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials().is_ok()
    }

    fn credentials(&self) -> Result<(ClientId, ClientSecret), AuthError> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        match (present(&self.client_id), present(&self.client_secret)) {
            (Some(id), Some(secret)) => Ok((ClientId::new(id), ClientSecret::new(secret))),
            _ => Err(AuthError::CredentialsNotConfigured),
        }
    }

    fn oauth_client(
        &self,
        id: ClientId,
        secret: ClientSecret,
    ) -> Result<RedditOAuthClient, AuthError> {
        let token_url =
            TokenUrl::new(self.token_url.clone()).map_err(|_| AuthError::InvalidEndpoint {
                url: self.token_url.clone(),
            })?;
        let auth_url = AuthUrl::new(REDDIT_AUTHORIZE_URL.to_string()).map_err(|_| {
            AuthError::InvalidEndpoint {
                url: REDDIT_AUTHORIZE_URL.to_string(),
            }
        })?;

        Ok(RedditOAuthClient::new(id, Some(secret), auth_url, Some(token_url)))
    }

    pub async fn authenticate(&self) -> Result<BearerToken, AuthError> {
        // Checked before any network I/O.
        let (id, secret) = self.credentials()?;
        let client = self.oauth_client(id, secret)?;

        info!("Requesting client-credentials token from {}", self.token_url);
        let http_client = self.http_client.clone();
        let response = client
            .exchange_client_credentials()
            .request_async(|request| send_token_request(http_client, request))
            .await
            .map_err(|e| {
                let reason = describe_token_error(&e);
                error!("Token exchange failed: {}", reason);
                AuthError::AuthenticationFailed { reason }
            })?;

        let access_token = response.access_token().secret().trim().to_string();
        if access_token.is_empty() {
            error!("Token endpoint returned an empty access_token");
            return Err(AuthError::AuthenticationFailed {
                reason: "empty access_token".to_string(),
            });
        }

        let expires_at = response
            .expires_in()
            .and_then(|ttl| chrono::Duration::from_std(ttl).ok())
            .map(|ttl| Utc::now() + ttl);

        debug!("Obtained bearer token (expires at {:?})", expires_at);
        Ok(BearerToken::new(access_token, expires_at))
    }
}

#[async_trait]
impl TokenProvider for RedditAuthenticator {
    async fn obtain_token(&self) -> Result<BearerToken, AuthError> {
        self.authenticate().await
    }
}

// Routes the oauth2 request through our own client so the User-Agent and timeout apply.
async fn send_token_request(
    http_client: Client,
    request: HttpRequest,
) -> Result<HttpResponse, reqwest::Error> {
    let response = http_client
        .request(request.method, request.url.as_str())
        .headers(request.headers)
        .body(request.body)
        .send()
        .await?;

    let status_code = response.status();
    let headers = response.headers().clone();
    let body = response.bytes().await?.to_vec();

    Ok(HttpResponse {
        status_code,
        headers,
        body,
    })
}

fn describe_token_error(error: &RequestTokenError<reqwest::Error, BasicErrorResponse>) -> String {
    match error {
        RequestTokenError::ServerResponse(response) => {
            format!("token endpoint rejected the request: {}", response)
        }
        RequestTokenError::Request(e) => format!("token request failed: {}", e),
        RequestTokenError::Parse(_, _) => "response contained no usable access_token".to_string(),
        RequestTokenError::Other(message) => message.clone(),
    }
}
