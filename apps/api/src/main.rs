mod config;
mod errors;
mod llm_client;
mod models;
mod recommendation;
mod routes;
mod state;
#[cfg(test)]
mod test_support;
mod youtube_client;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::recommendation::orchestrator::RecommendationOrchestrator;
use crate::recommendation::skill_extractor::SkillExtractor;
use crate::recommendation::video_search::VideoSearchClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::youtube_client::YouTubeClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Skill Video Recommender API v{}", env!("CARGO_PKG_VERSION"));

    let timeout = Duration::from_secs(config.upstream_timeout_secs);

    // Initialize LLM client
    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; every recommendation request will fail upstream");
    }
    let mut llm = LlmClient::new(config.openai_api_key.clone(), timeout)?;
    if let Some(url) = &config.openai_api_url {
        llm = llm.with_base_url(url.clone());
    }
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize video search (placeholders when no YouTube key)
    let youtube = config
        .youtube_api_key
        .clone()
        .map(|key| YouTubeClient::new(key, timeout))
        .transpose()?;
    let video_search = VideoSearchClient::new(youtube);
    if video_search.is_live() {
        info!("YouTube search client initialized");
    } else {
        warn!("YOUTUBE_API_KEY is not set; serving placeholder videos");
    }

    let orchestrator =
        RecommendationOrchestrator::new(SkillExtractor::new(Arc::new(llm)), Arc::new(video_search));

    let state = AppState { orchestrator };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
