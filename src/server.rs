//! HTTP surface of the news fetcher

use crate::{
    error::ApiError,
    handler::{HealthStatus, NewsHandler},
    types::{SearchParams, SearchResult, DEFAULT_LANGUAGE, DEFAULT_LIMIT, DEFAULT_QUERY, MAX_LIMIT},
};
use axum::{
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Json, Redirect, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::Span;

/// Error body, `{"detail": "..."}`
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidParameter(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ProviderUnavailable(_) | ApiError::UpstreamFailure(_) => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::RequestTimeout => StatusCode::GATEWAY_TIMEOUT,
        };
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the router for a handler
pub fn router(handler: NewsHandler) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/news", get(news))
        .route("/ui", get(ui_redirect))
        .route("/ui/", get(ui_redirect))
        .route("/docs", get(docs))
        .with_state(Arc::new(handler))
        .layer(
            TraceLayer::new_for_http()
                .on_request(|request: &Request<Body>, _span: &Span| {
                    log::debug!("{} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &Response, latency: Duration, _span: &Span| {
                    log::info!("{} in {}ms", response.status(), latency.as_millis());
                }),
        )
}

async fn root(State(handler): State<Arc<NewsHandler>>) -> Json<HealthStatus> {
    Json(handler.health_check())
}

async fn news(
    State(handler): State<Arc<NewsHandler>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<SearchResult>, ApiError> {
    let params: SearchParams = pairs.into_iter().collect();
    handler.handle_search(&params).await.map(Json)
}

async fn ui_redirect() -> Redirect {
    Redirect::temporary("/docs")
}

async fn docs() -> Json<serde_json::Value> {
    Json(json!({
        "title": "GNews Fetcher API",
        "description": "Fetch news using GNews.io",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/": {
                "method": "GET",
                "description": "Health check that confirms API key configuration"
            },
            "/news": {
                "method": "GET",
                "description": "Search news articles",
                "parameters": {
                    "query": {"type": "string", "default": DEFAULT_QUERY, "min_length": 1},
                    "limit": {"type": "integer", "default": DEFAULT_LIMIT, "minimum": 1, "maximum": MAX_LIMIT},
                    "sort_by": {"type": "string", "default": "publishedAt", "enum": ["publishedAt", "title"]},
                    "language": {"type": "string", "default": DEFAULT_LANGUAGE, "length": 2}
                }
            }
        }
    }))
}
