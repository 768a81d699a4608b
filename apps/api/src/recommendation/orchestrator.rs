//! Recommendation Orchestrator: report text in, ordered recommendations out.
//!
//! Flow: extract_skills (one LLM call) → search_videos per skill (concurrent)
//!       → zip back in extraction order.
//!
//! Only extractor failures cross this boundary. Video search degrades internally.

use std::sync::Arc;

use futures::future::join_all;
use tracing::info;

use crate::models::recommendation::Recommendation;
use crate::recommendation::skill_extractor::{SkillError, SkillExtractor};
use crate::recommendation::video_search::VideoSearch;

/// Videos returned for every skill.
pub const VIDEOS_PER_SKILL: usize = 2;

#[derive(Clone)]
pub struct RecommendationOrchestrator {
    extractor: SkillExtractor,
    video_search: Arc<dyn VideoSearch>,
}

impl RecommendationOrchestrator {
    pub fn new(extractor: SkillExtractor, video_search: Arc<dyn VideoSearch>) -> Self {
        Self {
            extractor,
            video_search,
        }
    }

    /// Returns one recommendation per extracted skill, in extraction order.
    /// A report with nothing to improve yields an empty list, not an error.
    pub async fn recommend(&self, report_text: &str) -> Result<Vec<Recommendation>, SkillError> {
        let skills = match self.extractor.extract_skills(report_text).await {
            Ok(skills) => skills,
            Err(SkillError::NoSkillsFound) => {
                info!("No skills found in report; returning empty recommendation list");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        // join_all yields results in input order regardless of completion order.
        let video_lists = join_all(
            skills
                .iter()
                .map(|skill| self.video_search.search_videos(skill, VIDEOS_PER_SKILL)),
        )
        .await;

        let recommendations: Vec<Recommendation> = skills
            .into_iter()
            .zip(video_lists)
            .map(|(skill, videos)| Recommendation { skill, videos })
            .collect();

        info!("Built {} recommendations", recommendations.len());
        Ok(recommendations)
    }
}
