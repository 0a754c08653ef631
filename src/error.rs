//! Error types for the news fetcher

use thiserror::Error;

/// Result type alias for provider operations
pub type NewsResult<T> = std::result::Result<T, NewsError>;

/// Failures raised while talking to the upstream news provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NewsError {
    /// A request parameter is outside its accepted range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// No usable API key was configured
    #[error("GNEWS_API_KEY environment variable is required but not set. Please configure it in your environment or .env file.")]
    MissingCredential,

    /// The upstream call exceeded its time bound
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Any other transport, status or decoding failure
    #[error("{message}")]
    Upstream {
        message: String,
        status_code: Option<u16>,
        response_body: Option<String>,
    },
}

impl NewsError {
    pub(crate) fn upstream(message: impl Into<String>) -> Self {
        NewsError::Upstream {
            message: message.into(),
            status_code: None,
            response_body: None,
        }
    }
}

impl From<reqwest::Error> for NewsError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            NewsError::Timeout {
                timeout_ms: crate::utils::http::DEFAULT_TIMEOUT_MS,
            }
        } else {
            // The request URL carries the API token
            let status_code = error.status().map(|s| s.as_u16());
            NewsError::Upstream {
                message: error.without_url().to_string(),
                status_code,
                response_body: None,
            }
        }
    }
}

impl From<serde_json::Error> for NewsError {
    fn from(error: serde_json::Error) -> Self {
        NewsError::upstream(format!("JSON parsing failed: {error}"))
    }
}

impl From<url::ParseError> for NewsError {
    fn from(error: url::ParseError) -> Self {
        NewsError::upstream(format!("Invalid URL: {error}"))
    }
}

/// Request-level failures, each tied to one HTTP status
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Caller-correctable parameter problem (422)
    #[error("{0}")]
    InvalidParameter(String),

    /// The provider cannot be used, e.g. no credential (502)
    #[error("{0}")]
    ProviderUnavailable(String),

    /// The upstream provider failed for a non-timeout reason (502)
    #[error("Error fetching news: {0}")]
    UpstreamFailure(String),

    /// The upstream provider did not answer in time (504)
    #[error("Request timeout")]
    RequestTimeout,
}

impl ApiError {
    /// HTTP status code this failure is reported with
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidParameter(_) => 422,
            ApiError::ProviderUnavailable(_) | ApiError::UpstreamFailure(_) => 502,
            ApiError::RequestTimeout => 504,
        }
    }
}

impl From<NewsError> for ApiError {
    fn from(error: NewsError) -> Self {
        match error {
            NewsError::MissingCredential => ApiError::ProviderUnavailable(error.to_string()),
            NewsError::Timeout { .. } => ApiError::RequestTimeout,
            NewsError::InvalidParameter(_) | NewsError::Upstream { .. } => {
                ApiError::UpstreamFailure(error.to_string())
            }
        }
    }
}
