//! YouTube Data API v3 client. Only `search.list` is used.
//!
//! This client reports failures; degrading to placeholders is the job of
//! `recommendation::video_search`.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::models::recommendation::Video;

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";
const WATCH_URL: &str = "https://www.youtube.com/watch";
/// Upper bound the API accepts for `maxResults`.
const MAX_RESULTS_CAP: usize = 50;

#[derive(Debug, Error)]
pub enum YouTubeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
}

#[derive(Clone)]
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    search_url: String,
}

impl YouTubeClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, YouTubeError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            search_url: SEARCH_URL.to_string(),
        })
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, search_url: impl Into<String>) -> Self {
        self.search_url = search_url.into();
        self
    }

    /// Runs a video search and returns up to `limit` results in API order.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<Video>, YouTubeError> {
        let max_results = limit.clamp(1, MAX_RESULTS_CAP).to_string();

        let response = self
            .client
            .get(&self.search_url)
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("q", query),
                ("maxResults", max_results.as_str()),
                ("relevanceLanguage", "en"),
                ("safeSearch", "moderate"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(YouTubeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let videos = parse_search_response(&body)?;
        debug!("YouTube search '{query}' returned {} videos", videos.len());

        Ok(videos.into_iter().take(limit).collect())
    }
}

/// Maps a `search.list` body to videos. Items without a video id
/// (channels, playlists) are skipped.
fn parse_search_response(body: &str) -> Result<Vec<Video>, YouTubeError> {
    let parsed: SearchListResponse = serde_json::from_str(body)?;

    Ok(parsed
        .items
        .into_iter()
        .filter_map(|item| {
            let video_id = item.id.video_id?;
            let title = item
                .snippet
                .map(|s| decode_html_entities(&s.title))
                .unwrap_or_else(|| video_id.clone());
            Some(Video::new(title, watch_url(&video_id)))
        })
        .collect())
}

fn watch_url(video_id: &str) -> String {
    format!("{WATCH_URL}?v={video_id}")
}

/// The search API returns HTML-escaped titles.
fn decode_html_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
