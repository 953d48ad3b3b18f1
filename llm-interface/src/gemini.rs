//! Google Gemini `generateContent` provider.

use crate::TextGenerator;
use async_trait::async_trait;
use pulse_core::{ConfigError, LlmSettings, SummaryError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

const PROVIDER: &str = "gemini";

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Clone)]
pub struct GeminiProvider {
    api_key: Option<String>,
    model: String,
    api_base: String,
    client: Client,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GeminiProvider {
    pub fn new(
        api_key: Option<String>,
        model: String,
        api_base: String,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                field: "llm.request_timeout_secs".to_string(),
                value: format!("{:?} ({})", timeout, e),
            })?;

        Ok(Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model,
            api_base: api_base.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_settings(settings: &LlmSettings) -> Result<Self, ConfigError> {
        Self::new(
            settings.api_key.clone(),
            settings.model.clone(),
            settings.api_base.clone(),
            settings.request_timeout(),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        let model = self.model.trim_start_matches("models/");
        format!("{}/v1beta/models/{}:generateContent", self.api_base, model)
    }
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn generate(&self, prompt: &str) -> Result<String, SummaryError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| SummaryError::MissingApiKey {
                provider: PROVIDER.to_string(),
            })?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let start = Instant::now();
        info!("Requesting summary from {} ({})", PROVIDER, self.model);
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Request to {} failed: {}", PROVIDER, e);
                SummaryError::RequestFailed {
                    provider: PROVIDER.to_string(),
                    message: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("{} returned status {}", PROVIDER, status);
            return Err(SummaryError::UnexpectedStatus {
                provider: PROVIDER.to_string(),
                status_code: status.as_u16(),
                body,
            });
        }

        let result: GenerateContentResponse =
            response.json().await.map_err(|e| SummaryError::RequestFailed {
                provider: PROVIDER.to_string(),
                message: format!("Failed to decode response envelope: {}", e),
            })?;

        if let Some(err) = result.error {
            return Err(SummaryError::RequestFailed {
                provider: PROVIDER.to_string(),
                message: err.message,
            });
        }

        let parts = result
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts)
            .filter(|parts| !parts.is_empty())
            .ok_or_else(|| SummaryError::EmptyResponse {
                provider: PROVIDER.to_string(),
            })?;

        // Blank text is passed on; the summary parser turns it into the fallback.
        let text: String = parts.into_iter().filter_map(|part| part.text).collect();

        debug!(
            "{} answered with {} characters in {:?}",
            PROVIDER,
            text.len(),
            start.elapsed()
        );
        Ok(text)
    }
}
