use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Both upstream credentials are optional at startup; see `llm_client` and
/// `recommendation::video_search` for what happens when they are absent.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    /// Overrides the Chat Completions endpoint (OpenAI-compatible gateways).
    pub openai_api_url: Option<String>,
    pub youtube_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// Applied to every outbound HTTP call.
    pub upstream_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_api_url: optional_env("OPENAI_API_URL"),
            youtube_api_key: optional_env("YOUTUBE_API_KEY"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            upstream_timeout_secs: parse_timeout(
                &std::env::var("UPSTREAM_TIMEOUT_SECS").unwrap_or_else(|_| "10".to_string()),
            )?,
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    non_blank(std::env::var(key).ok())
}

/// Blank credentials are treated the same as missing ones.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_timeout(raw: &str) -> Result<u64> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .context("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")?;
    anyhow::ensure!(secs > 0, "UPSTREAM_TIMEOUT_SECS must be greater than zero");
    Ok(secs)
}
