pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::recommendation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route(
            "/recommend-videos",
            post(handlers::handle_recommend_videos),
        )
        .route(
            "/recommend-videos/",
            post(handlers::handle_recommend_videos),
        )
        .with_state(state)
}
