//! Request handling: validation, credential pre-flight and error translation

use crate::{
    error::{ApiError, NewsError},
    types::{NewsProvider, SearchParams, SearchRequest, SearchResult},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const SERVICE_MESSAGE: &str = "GNews Fetcher API is running";

/// Body of the health check endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
    pub api_key_configured: bool,
}

/// Validates requests and drives the provider adapter
#[derive(Debug, Clone)]
pub struct NewsHandler {
    provider: Arc<dyn NewsProvider>,
}

impl NewsHandler {
    pub fn new(provider: Arc<dyn NewsProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &dyn NewsProvider {
        self.provider.as_ref()
    }

    /// Report liveness and whether a credential is configured. Never fails.
    pub fn health_check(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy".to_string(),
            message: SERVICE_MESSAGE.to_string(),
            api_key_configured: self.provider.has_credential(),
        }
    }

    /// Validate raw parameters, then search.
    ///
    /// Validation runs before the credential check, and both run before any
    /// network call.
    pub async fn handle_search(&self, params: &SearchParams) -> Result<SearchResult, ApiError> {
        let request = SearchRequest::parse(params).map_err(|e| match e {
            NewsError::InvalidParameter(message) => ApiError::InvalidParameter(message),
            other => ApiError::InvalidParameter(other.to_string()),
        })?;

        if !self.provider.has_credential() {
            log::warn!("Search rejected: no API key configured");
            return Err(NewsError::MissingCredential.into());
        }

        self.provider.search(&request).await.map_err(|e| {
            log::warn!("Search with provider '{}' failed: {e}", self.provider.name());
            ApiError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NewsResult;
    use crate::types::Article;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // Mock provider for testing
    #[derive(Debug)]
    struct MockProvider {
        credential: bool,
        outcome: NewsResult<Vec<Article>>,
        calls: AtomicUsize,
    }

    impl MockProvider {
        fn ok(articles: Vec<Article>) -> Self {
            Self {
                credential: true,
                outcome: Ok(articles),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(error: NewsError) -> Self {
            Self {
                credential: true,
                outcome: Err(error),
                calls: AtomicUsize::new(0),
            }
        }

        fn without_credential(mut self) -> Self {
            self.credential = false;
            self
        }
    }

    #[async_trait::async_trait]
    impl NewsProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        fn has_credential(&self) -> bool {
            self.credential
        }

        async fn search(&self, request: &SearchRequest) -> NewsResult<SearchResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome
                .clone()
                .map(|articles| SearchResult::new(articles, request.query()))
        }
    }

    fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            url: format!("https://example.com/{title}"),
            description: String::new(),
            source: "Unknown".to_string(),
            published_at: String::new(),
            image_url: String::new(),
        }
    }

    fn build_handler(provider: MockProvider) -> (NewsHandler, Arc<MockProvider>) {
        let provider = Arc::new(provider);
        (NewsHandler::new(provider.clone()), provider)
    }

    #[tokio::test]
    async fn test_search_success_passthrough() {
        let (handler, provider) = build_handler(MockProvider::ok(vec![article("a"), article("b")]));
        let params = SearchParams {
            query: Some("rust".to_string()),
            ..Default::default()
        };

        let result = handler.handle_search(&params).await.unwrap();
        assert_eq!(result.total, 2);
        assert_eq!(result.query, "rust");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_parameters_short_circuit() {
        let (handler, provider) = build_handler(MockProvider::ok(vec![]).without_credential());

        for params in [
            SearchParams { limit: Some("0".to_string()), ..Default::default() },
            SearchParams { limit: Some("21".to_string()), ..Default::default() },
            SearchParams { sort_by: Some("relevance".to_string()), ..Default::default() },
            SearchParams { language: Some("english".to_string()), ..Default::default() },
            SearchParams { query: Some(String::new()), ..Default::default() },
        ] {
            let error = handler.handle_search(&params).await.unwrap_err();
            assert!(matches!(error, ApiError::InvalidParameter(_)), "{params:?}");
            assert_eq!(error.status_code(), 422);
        }
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_credential_is_provider_unavailable() {
        let (handler, provider) = build_handler(MockProvider::ok(vec![]).without_credential());

        let error = handler.handle_search(&SearchParams::default()).await.unwrap_err();
        assert!(matches!(error, ApiError::ProviderUnavailable(ref msg) if msg.contains("GNEWS_API_KEY")));
        assert_eq!(error.status_code(), 502);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_adapter_errors_are_translated() {
        let cases = [
            (NewsError::Timeout { timeout_ms: 10_000 }, 504),
            (NewsError::MissingCredential, 502),
            (NewsError::upstream("connection refused"), 502),
        ];

        for (error, status) in cases {
            let (handler, _) = build_handler(MockProvider::failing(error));
            let api_error = handler.handle_search(&SearchParams::default()).await.unwrap_err();
            assert_eq!(api_error.status_code(), status);
        }

        let (handler, _) = build_handler(MockProvider::failing(NewsError::upstream("connection refused")));
        let api_error = handler.handle_search(&SearchParams::default()).await.unwrap_err();
        assert_eq!(api_error.to_string(), "Error fetching news: connection refused");
    }

    #[test]
    fn test_health_check() {
        let (with_key, _) = build_handler(MockProvider::ok(vec![]));
        let status = with_key.health_check();
        assert_eq!(status.status, "healthy");
        assert_eq!(status.message, SERVICE_MESSAGE);
        assert!(status.api_key_configured);

        let (without_key, _) = build_handler(MockProvider::ok(vec![]).without_credential());
        assert!(!without_key.health_check().api_key_configured);
    }
}
