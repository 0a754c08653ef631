//! gnews-fetcher - HTTP server for the GNews search proxy
//!
//! Serves `GET /` (health) and `GET /news` (search). The GNews API key is read
//! once at startup from `--api-key`, `GNEWS_API_KEY`, or a `.env` file.

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use gnews_fetcher::{
    config::{Settings, DEFAULT_PORT},
    providers::gnews::DEFAULT_BASE_URL,
    server,
    types::{ApiKey, NewsProvider},
};
use std::net::IpAddr;

#[derive(Parser, Debug)]
#[command(name = "gnews-fetcher")]
#[command(about = "Fetch news using GNews.io")]
#[command(version)]
struct Cli {
    /// GNews API key
    #[arg(long, env = "GNEWS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// GNews search endpoint
    #[arg(long, env = "GNEWS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Address to bind
    #[arg(long, env = "GNEWS_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "GNEWS_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Upstream request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

impl Cli {
    fn into_settings(self) -> Settings {
        Settings {
            api_key: ApiKey::from_raw(self.api_key.as_deref()),
            base_url: self.base_url,
            timeout_ms: self.timeout_secs.saturating_mul(1000),
            host: self.host,
            port: self.port,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let settings = cli.into_settings();
    if settings.api_key.is_none() {
        log::warn!(
            "{}",
            "GNEWS_API_KEY is not set; /news will answer 502 until it is configured".yellow()
        );
    }

    let handler = settings
        .build_handler()
        .context("failed to build news handler")?;
    let provider = handler.provider();
    log::info!("Using provider '{}' with {:?}", provider.name(), provider.config());
    let app = server::router(handler);

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    log::info!("{} listening on {}", "gnews-fetcher".green().bold(), addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    log::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
