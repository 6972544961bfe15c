pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::application::handlers as application;
use crate::email::handlers as email;
use crate::extraction::handlers as extraction;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Extraction API
        .route("/api/v1/jobs/parse", post(extraction::handle_parse_job))
        .route(
            "/api/v1/profiles/skills",
            post(extraction::handle_profile_skills),
        )
        // Matching API
        .route("/api/v1/portfolio", get(matching::handle_list_portfolio))
        .route("/api/v1/matches", post(matching::handle_match))
        // Email API
        .route("/api/v1/emails", post(email::handle_compose_email))
        // Full pipeline
        .route(
            "/api/v1/applications",
            post(application::handle_create_application),
        )
        .with_state(state)
}
