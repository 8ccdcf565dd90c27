pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers as matching;
use crate::readiness::handlers as readiness;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/api/v1/matches", post(matching::handle_match))
        // Readiness API
        .route(
            "/api/v1/startups/:id/readiness",
            post(readiness::handle_assess_readiness),
        )
        .route(
            "/api/v1/startups/:id/readiness/checklist",
            post(readiness::handle_refresh_checklist),
        )
        .route("/api/v1/startups/:id/tasks", get(readiness::handle_list_tasks))
        .with_state(state)
}
