//! Axum route handlers for the Application API.

use axum::{extract::State, Json};

use crate::application::pipeline::{run_application, ApplicationRequest, ApplicationResponse};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/applications
///
/// Full pipeline: fetch and parse the posting, merge profile skills, rank the
/// portfolio and compose the email.
pub async fn handle_create_application(
    State(state): State<AppState>,
    Json(request): Json<ApplicationRequest>,
) -> Result<Json<ApplicationResponse>, AppError> {
    let response = run_application(&state, request).await?;
    Ok(Json(response))
}
