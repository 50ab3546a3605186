//! Crypto Tracker bridge server binary.
//!
//! Serves `POST /a2a` (chat messages) and `GET /` (liveness).

use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracker_api::config::{BridgeConfig, DEFAULT_HOST, DEFAULT_HTTP_TIMEOUT, DEFAULT_PORT};
use tracker_core::agent::{DEFAULT_FALLBACK_TIMEOUT, openai};
use tracker_core::coingecko;

/// CLI arguments for the bridge server. Every option can also be set
/// through the environment (or a `.env` file).
#[derive(Parser, Debug)]
#[command(name = "tracker_server", about = "Crypto Tracker bridge server")]
struct Args {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// API key for the conversational fallback agent.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    /// Chat model used by the fallback agent.
    #[arg(long, env = "OPENAI_MODEL", default_value = openai::DEFAULT_MODEL)]
    openai_model: String,

    /// OpenAI API root.
    #[arg(long, env = "OPENAI_BASE_URL", default_value = openai::DEFAULT_BASE_URL)]
    openai_base_url: String,

    /// CoinGecko API root.
    #[arg(long, env = "COINGECKO_BASE_URL", default_value = coingecko::DEFAULT_BASE_URL)]
    coingecko_base_url: String,

    /// Optional CoinGecko demo API key.
    #[arg(long, env = "COINGECKO_API_KEY", hide_env_values = true)]
    coingecko_api_key: Option<String>,

    /// Seconds to wait for the fallback agent before sending the canned reply.
    #[arg(
        long,
        env = "FALLBACK_TIMEOUT_SECS",
        default_value_t = DEFAULT_FALLBACK_TIMEOUT.as_secs()
    )]
    fallback_timeout_secs: u64,

    /// Per-request timeout for CoinGecko calls, in seconds.
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = DEFAULT_HTTP_TIMEOUT.as_secs())]
    http_timeout_secs: u64,
}

impl From<Args> for BridgeConfig {
    fn from(args: Args) -> Self {
        BridgeConfig {
            bind_addr: format!("{}:{}", args.host, args.port),
            openai_api_key: args.openai_api_key.filter(|k| !k.is_empty()),
            openai_model: args.openai_model,
            openai_base_url: args.openai_base_url,
            coingecko_base_url: args.coingecko_base_url,
            coingecko_api_key: args.coingecko_api_key.filter(|k| !k.is_empty()),
            fallback_timeout: Duration::from_secs(args.fallback_timeout_secs),
            http_timeout: Duration::from_secs(args.http_timeout_secs),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tracker_api=debug,tracker_core=debug".parse().unwrap()),
        )
        .init();

    let config = BridgeConfig::from(Args::parse());

    info!(
        version = tracker_core::version(),
        bind_addr = %config.bind_addr,
        coingecko = %config.coingecko_base_url,
        agent_configured = config.openai_api_key.is_some(),
        fallback_timeout = ?config.fallback_timeout,
        "starting tracker_server"
    );

    let state = tracker_api::AppState::from_config(&config)?;
    let app = tracker_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "bridge listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
