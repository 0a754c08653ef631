//! Runtime settings for the news fetcher service

use crate::{
    error::NewsResult,
    handler::NewsHandler,
    providers::gnews::{GNewsConfig, GNewsProvider, DEFAULT_BASE_URL},
    types::ApiKey,
    utils::http::DEFAULT_TIMEOUT_MS,
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

pub const DEFAULT_PORT: u16 = 8000;

/// Everything needed to build and serve the handler
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: Option<ApiKey>,
    pub base_url: String,
    pub timeout_ms: u64,
    pub host: IpAddr,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl Settings {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Build the GNews-backed handler. The credential is injected once here.
    pub fn build_handler(&self) -> NewsResult<NewsHandler> {
        let provider = GNewsProvider::with_config(GNewsConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            timeout_ms: self.timeout_ms,
        })?;
        Ok(NewsHandler::new(Arc::new(provider)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.bind_addr().to_string(), "0.0.0.0:8000");
        assert_eq!(settings.base_url, "https://gnews.io/api/v4/search");
        assert_eq!(settings.timeout_ms, 10_000);
    }

    #[test]
    fn test_build_handler_reports_credential() {
        let handler = Settings::default().build_handler().unwrap();
        assert!(!handler.health_check().api_key_configured);

        let settings = Settings {
            api_key: ApiKey::from_raw(Some(" key ")),
            ..Default::default()
        };
        let handler = settings.build_handler().unwrap();
        assert!(handler.health_check().api_key_configured);
        assert_eq!(handler.provider().name(), "gnews");
    }
}
