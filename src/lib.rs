//! # GNews Fetcher
//!
//! A thin HTTP proxy exposing a single news search endpoint backed by the
//! [GNews.io](https://gnews.io) API. Incoming parameters are validated,
//! translated into a GNews query, and the response is reshaped into a stable
//! local article schema.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gnews_fetcher::{config::Settings, server, types::ApiKey};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings {
//!         api_key: ApiKey::from_raw(Some("YOUR_API_KEY")),
//!         ..Default::default()
//!     };
//!
//!     let app = server::router(settings.build_handler()?);
//!     let listener = tokio::net::TcpListener::bind(settings.bind_addr()).await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod providers;
pub mod server;
pub mod types;
pub mod utils;

// Re-export common types
pub use error::{ApiError, NewsError, NewsResult};
pub use handler::{HealthStatus, NewsHandler};
pub use types::{ApiKey, Article, NewsProvider, SearchParams, SearchRequest, SearchResult, SortBy};
