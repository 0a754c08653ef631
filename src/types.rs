//! Core types and traits for the news fetcher

use crate::error::{NewsError, NewsResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_QUERY: &str = "latest";
pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 20;
pub const DEFAULT_LANGUAGE: &str = "en";

/// A single news article in the local schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub url: String,
    pub description: String,
    /// Publisher name, "Unknown" when the provider omits it
    pub source: String,
    /// ISO-8601 timestamp, or empty
    pub published_at: String,
    #[serde(alias = "urlToImage")]
    pub image_url: String,
}

/// Normalized response for one search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub articles: Vec<Article>,
    pub total: usize,
    pub query: String,
}

impl SearchResult {
    /// Build a result whose `total` always matches the article count
    pub fn new(articles: Vec<Article>, query: impl Into<String>) -> Self {
        Self {
            total: articles.len(),
            articles,
            query: query.into(),
        }
    }
}

/// Result ordering requested by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortBy {
    /// Keep the provider's recency order
    #[default]
    #[serde(rename = "publishedAt")]
    PublishedAt,
    /// Case-insensitive title order
    #[serde(rename = "title")]
    Title,
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortBy::PublishedAt => write!(f, "publishedAt"),
            SortBy::Title => write!(f, "title"),
        }
    }
}

impl FromStr for SortBy {
    type Err = NewsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "publishedAt" => Ok(SortBy::PublishedAt),
            "title" => Ok(SortBy::Title),
            other => Err(NewsError::InvalidParameter(format!(
                "sort_by must be \"publishedAt\" or \"title\", got \"{other}\""
            ))),
        }
    }
}

/// Raw query-string parameters, before validation
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub query: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub language: Option<String>,
}

/// Collect decoded query pairs. A repeated key keeps its last value and
/// unknown keys are ignored.
impl FromIterator<(String, String)> for SearchParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = SearchParams::default();
        for (key, value) in pairs {
            match key.as_str() {
                "query" => params.query = Some(value),
                "limit" => params.limit = Some(value),
                "sort_by" => params.sort_by = Some(value),
                "language" => params.language = Some(value),
                _ => {}
            }
        }
        params
    }
}

/// A validated search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    limit: u32,
    sort_by: SortBy,
    language: String,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            limit: DEFAULT_LIMIT,
            sort_by: SortBy::default(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl SearchRequest {
    /// Validate typed values into a request
    pub fn new(query: &str, limit: u32, sort_by: SortBy, language: &str) -> NewsResult<Self> {
        if query.is_empty() {
            return Err(NewsError::InvalidParameter(
                "query must be at least 1 character".to_string(),
            ));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(NewsError::InvalidParameter(format!(
                "limit must be between 1 and {MAX_LIMIT}, got {limit}"
            )));
        }
        if language.chars().count() != 2 {
            return Err(NewsError::InvalidParameter(format!(
                "language must be exactly 2 characters, got \"{language}\""
            )));
        }

        Ok(Self {
            query: query.to_string(),
            limit,
            sort_by,
            language: language.to_string(),
        })
    }

    /// Validate raw query-string values, filling in defaults for absent ones
    pub fn parse(params: &SearchParams) -> NewsResult<Self> {
        let limit = match params.limit.as_deref() {
            None => DEFAULT_LIMIT,
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
                NewsError::InvalidParameter(format!(
                    "limit must be an integer between 1 and {MAX_LIMIT}, got \"{raw}\""
                ))
            })?,
        };
        let sort_by = match params.sort_by.as_deref() {
            None => SortBy::default(),
            Some(raw) => raw.parse()?,
        };

        Self::new(
            params.query.as_deref().unwrap_or(DEFAULT_QUERY),
            limit,
            sort_by,
            params.language.as_deref().unwrap_or(DEFAULT_LANGUAGE),
        )
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

/// Provider credential, guaranteed non-blank
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Trim the raw value; blank or absent input yields `None`
    pub fn from_raw(raw: Option<&str>) -> Option<Self> {
        raw.map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| ApiKey(key.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Trait that news provider implementations must satisfy
#[async_trait::async_trait]
pub trait NewsProvider: Send + Sync + fmt::Debug {
    /// Name of the news provider
    fn name(&self) -> &str;

    /// Whether a credential is available for this provider
    fn has_credential(&self) -> bool;

    /// Run one search against the provider
    async fn search(&self, request: &SearchRequest) -> NewsResult<SearchResult>;

    /// Get provider configuration (for debugging/logging)
    fn config(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}
