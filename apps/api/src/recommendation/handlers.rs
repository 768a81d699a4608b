//! Axum route handlers for the Recommendation API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::recommendation::Recommendation;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub report_text: String,
}

/// POST /recommend-videos
///
/// Extracts the weak skill areas from a free-text assessment report and
/// returns videos for each, in the order the skills were found.
pub async fn handle_recommend_videos(
    State(state): State<AppState>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<Vec<Recommendation>>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    if request.report_text.trim().is_empty() {
        return Err(AppError::Validation(
            "report_text cannot be empty".to_string(),
        ));
    }

    let recommendations = state.orchestrator.recommend(&request.report_text).await?;

    Ok(Json(recommendations))
}
