use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("Summary error: {0}")]
    Summary(#[from] SummaryError),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    #[error("credentials not configured")]
    CredentialsNotConfigured,

    #[error("authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Invalid token endpoint: {url}")]
    InvalidEndpoint { url: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("Search request unauthorized (status {status_code})")]
    Unauthorized { status_code: u16 },

    #[error("Rate limit exceeded. Retry after {retry_after} seconds")]
    RateLimitExceeded { retry_after: u64 },

    #[error("Server error: {status_code}")]
    ServerError { status_code: u16 },

    #[error("Unexpected status: {status_code}")]
    UnexpectedStatus { status_code: u16 },

    #[error("Request timeout")]
    RequestTimeout,

    #[error("Transport failure: {message}")]
    Transport { message: String },

    #[error("Invalid API response: {details}")]
    InvalidResponse { details: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SummaryError {
    #[error("API key invalid or missing for {provider}")]
    MissingApiKey { provider: String },

    #[error("Request to {provider} failed: {message}")]
    RequestFailed { provider: String, message: String },

    #[error("{provider} returned status {status_code}: {body}")]
    UnexpectedStatus {
        provider: String,
        status_code: u16,
        body: String,
    },

    #[error("Empty response from {provider}")]
    EmptyResponse { provider: String },

    #[error("Model output is not valid summary JSON: {details}")]
    ParseFailed { details: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}
