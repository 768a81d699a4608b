//! Video Search Client: always returns exactly `limit` videos per skill.
//!
//! Real results come from YouTube when a key is configured. Missing key, failed
//! call or short result list all fall back to placeholder entries, so a broken
//! search never fails the recommendation request.

use async_trait::async_trait;
use reqwest::Url;
use tracing::warn;

use crate::models::recommendation::Video;
use crate::youtube_client::YouTubeClient;

/// Appended to every skill to form the search query.
const QUERY_QUALIFIER: &str = "tutorial";
const RESULTS_PAGE_URL: &str = "https://www.youtube.com/results";

#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Infallible by contract: the result always has exactly `limit` entries.
    async fn search_videos(&self, skill: &str, limit: usize) -> Vec<Video>;
}

#[derive(Clone)]
pub struct VideoSearchClient {
    youtube: Option<YouTubeClient>,
}

impl VideoSearchClient {
    pub fn new(youtube: Option<YouTubeClient>) -> Self {
        Self { youtube }
    }

    pub fn is_live(&self) -> bool {
        self.youtube.is_some()
    }
}

#[async_trait]
impl VideoSearch for VideoSearchClient {
    async fn search_videos(&self, skill: &str, limit: usize) -> Vec<Video> {
        let Some(youtube) = &self.youtube else {
            return placeholder_videos(skill, limit);
        };

        match youtube.search(&search_query(skill), limit).await {
            Ok(videos) => fill_to_limit(videos, skill, limit),
            Err(e) => {
                warn!("Video search for '{skill}' failed, using placeholders: {e}");
                placeholder_videos(skill, limit)
            }
        }
    }
}

pub fn search_query(skill: &str) -> String {
    format!("{skill} {QUERY_QUALIFIER}")
}

pub fn placeholder_videos(skill: &str, limit: usize) -> Vec<Video> {
    (1..=limit).map(|n| placeholder_video(skill, n)).collect()
}

/// Deterministic stand-in: title names the skill, URL is a YouTube results
/// page for the same query the live search would run.
fn placeholder_video(skill: &str, n: usize) -> Video {
    Video::new(
        format!("Improving {skill} - Sample Video {n}"),
        placeholder_url(skill),
    )
}

fn placeholder_url(skill: &str) -> String {
    Url::parse_with_params(RESULTS_PAGE_URL, &[("search_query", search_query(skill))])
        .map(|url| url.to_string())
        .unwrap_or_else(|_| RESULTS_PAGE_URL.to_string())
}

/// Truncates to `limit`, then pads with placeholders numbered by position.
fn fill_to_limit(mut videos: Vec<Video>, skill: &str, limit: usize) -> Vec<Video> {
    videos.truncate(limit);
    let found = videos.len();
    if found < limit {
        warn!("Video search for '{skill}' returned {found}/{limit} results, padding");
        videos.extend((found + 1..=limit).map(|n| placeholder_video(skill, n)));
    }
    videos
}
