use crate::recommendation::orchestrator::RecommendationOrchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Nothing here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: RecommendationOrchestrator,
}
