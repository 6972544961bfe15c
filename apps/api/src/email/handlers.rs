//! Axum route handlers for the Email API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::email::composer::{
    compose_requested, ComposeMode, ComposeOptions, ComposeStyle, EmailDocument, RequestedMode,
};
use crate::errors::AppError;
use crate::matching::handlers::{resolve_top_k, MatchResponse};
use crate::matching::scorer::rank_portfolio;
use crate::models::job::JobRecord;
use crate::models::profile::UserProfile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub job: JobRecord,
    pub profile: UserProfile,
    #[serde(default)]
    pub style: ComposeStyle,
    #[serde(default)]
    pub mode: RequestedMode,
    pub seed: Option<u64>,
    #[serde(default = "default_true")]
    pub include_date: bool,
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct EmailResponse {
    pub email: EmailDocument,
    /// Subject line plus body, ready to paste.
    pub text: String,
    pub mode: ComposeMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub matches: MatchResponse,
}

pub(crate) fn default_true() -> bool {
    true
}

/// The applicant's name is the only required profile field.
pub fn validate_profile(profile: &UserProfile) -> Result<(), AppError> {
    if profile.name.trim().is_empty() {
        return Err(AppError::validation("profile.name cannot be empty"));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/emails
///
/// Composes an email for an already-parsed job. Portfolio matches are
/// computed from the job's skills.
pub async fn handle_compose_email(
    State(state): State<AppState>,
    Json(request): Json<EmailRequest>,
) -> Result<Json<EmailResponse>, AppError> {
    validate_profile(&request.profile)?;
    let top_k = resolve_top_k(request.top_k, state.config.default_top_k)?;

    let report = rank_portfolio(
        &*state.scorer,
        &request.job.skills,
        state.catalog.entries(),
        top_k,
    );
    let options = ComposeOptions::for_request(request.style, request.seed, request.include_date);
    let composed = compose_requested(
        &request.job,
        &report.matches,
        &request.profile,
        &options,
        request.mode,
        state.email_backend.as_deref(),
    )
    .await;

    Ok(Json(EmailResponse {
        text: composed.email.to_text(),
        email: composed.email,
        mode: composed.mode,
        notice: composed.notice,
        matches: MatchResponse::from(&report),
    }))
}
