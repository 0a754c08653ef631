//! GNews.io search API provider

use crate::{
    error::{NewsError, NewsResult},
    types::{ApiKey, Article, NewsProvider, SearchRequest, SearchResult, SortBy},
    utils::http::{build_url, HttpClient},
};
use serde::Deserialize;
use std::collections::HashMap;

pub const DEFAULT_BASE_URL: &str = "https://gnews.io/api/v4/search";

const UNKNOWN_SOURCE: &str = "Unknown";

/// GNews search response. Every field may be missing or null.
#[derive(Debug, Default, Deserialize)]
struct GNewsResponse {
    #[serde(default)]
    articles: Option<Vec<GNewsArticle>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GNewsArticle {
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
    source: Option<GNewsSource>,
    published_at: Option<String>,
    image: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GNewsSource {
    name: Option<String>,
}

impl From<GNewsArticle> for Article {
    fn from(article: GNewsArticle) -> Self {
        Article {
            title: article.title.unwrap_or_default(),
            url: article.url.unwrap_or_default(),
            description: article.description.unwrap_or_default(),
            source: article
                .source
                .and_then(|source| source.name)
                .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
            published_at: article.published_at.unwrap_or_default(),
            image_url: article.image.unwrap_or_default(),
        }
    }
}

/// GNews provider configuration
#[derive(Debug, Clone)]
pub struct GNewsConfig {
    /// API token, `None` when not configured
    pub api_key: Option<ApiKey>,
    /// Search endpoint
    pub base_url: String,
    /// Upstream timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for GNewsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: crate::utils::http::DEFAULT_TIMEOUT_MS,
        }
    }
}

/// GNews.io provider adapter
#[derive(Debug)]
pub struct GNewsProvider {
    config: GNewsConfig,
    http_client: HttpClient,
}

impl GNewsProvider {
    /// Create a provider against the public GNews endpoint
    pub fn new(api_key: Option<ApiKey>) -> NewsResult<Self> {
        Self::with_config(GNewsConfig {
            api_key,
            ..Default::default()
        })
    }

    /// Create a provider with custom configuration
    pub fn with_config(config: GNewsConfig) -> NewsResult<Self> {
        let http_client = HttpClient::with_timeout(config.timeout_ms)?;
        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.config.base_url = base_url.to_string();
        self
    }

    /// Fetch articles for a validated request.
    ///
    /// `sort_by` is never sent upstream: GNews always returns the newest
    /// articles first, so title ordering is applied here after mapping.
    pub async fn fetch_articles(&self, request: &SearchRequest) -> NewsResult<SearchResult> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or(NewsError::MissingCredential)?;

        let params = [
            ("q", request.query().to_string()),
            ("max", request.limit().to_string()),
            ("lang", request.language().to_string()),
            ("token", api_key.expose().to_string()),
        ];

        if log::log_enabled!(log::Level::Debug) {
            let redacted: Vec<(&str, String)> = params
                .iter()
                .map(|(key, value)| match *key {
                    "token" => (*key, "***".to_string()),
                    _ => (*key, value.clone()),
                })
                .collect();
            if let Ok(url) = build_url(&self.config.base_url, &redacted) {
                log::debug!("GNews request: {url}");
            }
        }

        let response: GNewsResponse = self
            .http_client
            .get_json(&self.config.base_url, &params)
            .await?;

        let mut articles: Vec<Article> = response
            .articles
            .unwrap_or_default()
            .into_iter()
            .map(Article::from)
            .collect();

        if request.sort_by() == SortBy::Title {
            articles.sort_by_cached_key(|article| article.title.to_lowercase());
        }

        log::info!(
            "GNews returned {} articles for query \"{}\"",
            articles.len(),
            request.query()
        );

        Ok(SearchResult::new(articles, request.query()))
    }
}

#[async_trait::async_trait]
impl NewsProvider for GNewsProvider {
    fn name(&self) -> &str {
        "gnews"
    }

    fn has_credential(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn search(&self, request: &SearchRequest) -> NewsResult<SearchResult> {
        self.fetch_articles(request).await
    }

    fn config(&self) -> HashMap<String, String> {
        let mut config = HashMap::new();
        let api_key = if self.has_credential() { "***" } else { "<unset>" };
        config.insert("api_key".to_string(), api_key.to_string());
        config.insert("base_url".to_string(), self.config.base_url.clone());
        config.insert("timeout_ms".to_string(), self.config.timeout_ms.to_string());
        config
    }
}
