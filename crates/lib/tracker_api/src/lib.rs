//! # tracker_api
//!
//! HTTP API library for Crypto Tracker.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tracker_core::agent::openai::OpenAiAgent;
use tracker_core::agent::{ChatAgent, ConversationalFallback};
use tracker_core::coingecko::CoinGeckoClient;
use tracker_core::coins::{AliasTable, CoinResolver};
use tracker_core::market::{CoinSearch, MarketDataError, QuoteSource};
use tracker_core::price::PriceFetcher;

use crate::config::BridgeConfig;
use crate::handlers::{a2a, health};
use crate::services::reply::ReplyService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Reply pipeline for incoming messages.
    pub replies: ReplyService,
}

impl AppState {
    /// Wires the pipeline from explicit collaborators.
    pub fn new(
        aliases: Arc<AliasTable>,
        search: Arc<dyn CoinSearch>,
        quotes: Arc<dyn QuoteSource>,
        agent: Arc<dyn ChatAgent>,
        fallback_timeout: Duration,
    ) -> Self {
        let replies = ReplyService::new(
            CoinResolver::new(aliases, search),
            PriceFetcher::new(quotes),
            ConversationalFallback::new(agent, fallback_timeout),
        );
        Self { replies }
    }

    /// Wires CoinGecko and OpenAI from configuration, with the built-in
    /// alias table.
    pub fn from_config(config: &BridgeConfig) -> Result<Self, MarketDataError> {
        let coingecko = Arc::new(CoinGeckoClient::new(
            &config.coingecko_base_url,
            config.coingecko_api_key.clone(),
            config.http_timeout,
        )?);
        let agent = Arc::new(OpenAiAgent::new(
            &config.openai_base_url,
            &config.openai_model,
            config.openai_api_key.clone(),
        ));

        Ok(Self::new(
            Arc::new(AliasTable::default()),
            coingecko.clone(),
            coingecko,
            agent,
            config.fallback_timeout,
        ))
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health::health))
        .route("/a2a", post(a2a::a2a_handler))
        .layer(cors)
        .with_state(state)
}
