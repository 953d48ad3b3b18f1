use crate::error::*;
use tracing::{error, info, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::Auth(e) => {
                error!("Authentication error details: {:?}", e);
            }
            CoreError::Search(e) => {
                error!("Search error details: {:?}", e);
            }
            CoreError::Summary(e) => {
                error!("Summary error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        match self {
            CoreError::Auth(e) => {
                e.log_warn();
            }
            CoreError::Search(e) => {
                e.log_warn();
            }
            CoreError::Summary(e) => {
                e.log_warn();
            }
            CoreError::Config(e) => {
                e.log_warn();
            }
            _ => {
                warn!("CoreError (warning): {}", self);
            }
        }
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Auth(e) => e.user_friendly_message(),
            CoreError::Search(e) => e.user_friendly_message(),
            CoreError::Summary(e) => e.user_friendly_message(),
            CoreError::InvalidInput { message } => {
                format!("Invalid input: {}. Please check your input and try again.", message)
            }
            CoreError::Io(_) => "A file could not be read or written.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::Config(e) => e.error_code(),
            CoreError::Auth(e) => e.error_code(),
            CoreError::Search(e) => e.error_code(),
            CoreError::Summary(e) => e.error_code(),
            CoreError::InvalidInput { .. } => "INVALID_INPUT".to_string(),
            CoreError::Io(_) => "IO".to_string(),
        }
    }
}

impl ErrorExt for AuthError {
    fn log_error(&self) -> &Self {
        error!("AuthError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("AuthError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            AuthError::CredentialsNotConfigured => {
                "Reddit API credentials are not configured. Set REDDIT_CLIENT_ID and REDDIT_CLIENT_SECRET."
                    .to_string()
            }
            AuthError::AuthenticationFailed { .. } => {
                "Reddit authentication failed. Please check your credentials.".to_string()
            }
            AuthError::InvalidEndpoint { url } => {
                format!("The Reddit token endpoint '{}' is not a valid URL.", url)
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            AuthError::CredentialsNotConfigured => "AUTH_NOT_CONFIGURED".to_string(),
            AuthError::AuthenticationFailed { .. } => "AUTH_FAILED".to_string(),
            AuthError::InvalidEndpoint { .. } => "AUTH_INVALID_ENDPOINT".to_string(),
        }
    }
}

impl ErrorExt for SearchError {
    fn log_error(&self) -> &Self {
        error!("SearchError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("SearchError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            SearchError::Unauthorized { .. } => {
                "Reddit rejected the search request. The access token may be invalid.".to_string()
            }
            SearchError::RateLimitExceeded { retry_after } => format!(
                "Too many requests. Please wait {} seconds before trying again.",
                retry_after
            ),
            SearchError::RequestTimeout => {
                "Request to Reddit timed out. Please try again.".to_string()
            }
            SearchError::Transport { .. } => {
                "Network connection error. Please check your internet connection.".to_string()
            }
            _ => "Reddit API error occurred. Please try again later.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            SearchError::Unauthorized { .. } => "SEARCH_UNAUTHORIZED".to_string(),
            SearchError::RateLimitExceeded { .. } => "SEARCH_RATE_LIMIT".to_string(),
            SearchError::ServerError { .. } => "SEARCH_SERVER_ERROR".to_string(),
            SearchError::UnexpectedStatus { .. } => "SEARCH_UNEXPECTED_STATUS".to_string(),
            SearchError::RequestTimeout => "SEARCH_TIMEOUT".to_string(),
            SearchError::Transport { .. } => "SEARCH_TRANSPORT".to_string(),
            SearchError::InvalidResponse { .. } => "SEARCH_INVALID_RESPONSE".to_string(),
        }
    }
}

impl ErrorExt for SummaryError {
    fn log_error(&self) -> &Self {
        error!("SummaryError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("SummaryError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            SummaryError::MissingApiKey { provider } => format!(
                "No API key configured for {}. Set GOOGLE_API_KEY to enable summaries.",
                provider
            ),
            SummaryError::RequestFailed { provider, .. }
            | SummaryError::UnexpectedStatus { provider, .. } => format!(
                "{} service is temporarily unavailable. Please try again later.",
                provider
            ),
            SummaryError::EmptyResponse { provider } => {
                format!("{} returned no summary.", provider)
            }
            SummaryError::ParseFailed { .. } => {
                "The AI summary could not be understood.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            SummaryError::MissingApiKey { .. } => "LLM_INVALID_API_KEY".to_string(),
            SummaryError::RequestFailed { .. } => "LLM_REQUEST_FAILED".to_string(),
            SummaryError::UnexpectedStatus { .. } => "LLM_UNEXPECTED_STATUS".to_string(),
            SummaryError::EmptyResponse { .. } => "LLM_EMPTY_RESPONSE".to_string(),
            SummaryError::ParseFailed { .. } => "LLM_INVALID_RESPONSE".to_string(),
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!("ConfigError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ConfigError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::FileNotFound { path } => {
                format!("Configuration file '{}' not found.", path)
            }
            ConfigError::InvalidValue { field, .. } => {
                format!("Invalid value for configuration field '{}'.", field)
            }
            ConfigError::Parse(_) => {
                "Configuration file format is invalid. Please check the settings.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND".to_string(),
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE".to_string(),
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR".to_string(),
        }
    }
}

/// Logs pipeline failures with their code and user-facing message.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorReporter;

impl ErrorReporter {
    pub fn new() -> Self {
        Self
    }

    pub fn report_error(&self, error: &CoreError) {
        error.log_error();
        info!("Error code: {}", error.error_code());
        info!("User message: {}", error.user_friendly_message());
    }

    /// For failures the caller recovers from.
    pub fn report_warning(&self, error: &CoreError) {
        error.log_warn();
        info!("Error code: {}", error.error_code());
    }
}
