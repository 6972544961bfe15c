//! Application pipeline: job URL in, tailored email out.
//!
//! Fetch and extract the posting (cached per URL), pull extra skills from
//! profile pages, rank the portfolio against the job's skills, then compose.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::email::composer::{
    compose_requested, ComposeMode, ComposeOptions, ComposeStyle, EmailDocument, RequestedMode,
};
use crate::email::handlers::{default_true, validate_profile};
use crate::errors::AppError;
use crate::extraction::sources::{
    check_profile_urls, fetch_profile_skills, load_job, merged_skills, ProfileSourceReport,
};
use crate::matching::handlers::{resolve_top_k, MatchResponse};
use crate::matching::scorer::rank_portfolio;
use crate::models::job::JobRecord;
use crate::models::profile::UserProfile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ApplicationRequest {
    pub url: String,
    pub profile: UserProfile,
    #[serde(default)]
    pub profile_urls: Vec<String>,
    #[serde(default)]
    pub style: ComposeStyle,
    #[serde(default)]
    pub mode: RequestedMode,
    /// Fixes template phrasing; the clock is used when absent.
    pub seed: Option<u64>,
    #[serde(default = "default_true")]
    pub include_date: bool,
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    pub job: JobRecord,
    pub cached: bool,
    pub matches: MatchResponse,
    pub email: EmailDocument,
    pub text: String,
    pub mode: ComposeMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub profile_sources: Vec<ProfileSourceReport>,
}

// ────────────────────────────────────────────────────────────────────────────
// Orchestration
// ────────────────────────────────────────────────────────────────────────────

pub async fn run_application(
    state: &AppState,
    request: ApplicationRequest,
) -> Result<ApplicationResponse, AppError> {
    validate_profile(&request.profile)?;
    check_profile_urls(&request.profile_urls)?;
    let top_k = resolve_top_k(request.top_k, state.config.default_top_k)?;

    // Step 1: Posting
    let loaded = load_job(state, &request.url).await?;

    // Step 2: Profile skills
    let mut profile = request.profile;
    let profile_sources = fetch_profile_skills(&*state.fetcher, &request.profile_urls).await;
    profile.merge_skills(merged_skills(&profile_sources));

    // Step 3: Portfolio ranking
    let report = rank_portfolio(
        &*state.scorer,
        &loaded.job.skills,
        state.catalog.entries(),
        top_k,
    );

    // Step 4: Email
    let options = ComposeOptions::for_request(request.style, request.seed, request.include_date);
    let composed = compose_requested(
        &loaded.job,
        &report.matches,
        &profile,
        &options,
        request.mode,
        state.email_backend.as_deref(),
    )
    .await;

    info!(
        "Application composed for {}: {} matches, mode={:?}",
        request.url,
        report.matches.len(),
        composed.mode
    );

    Ok(ApplicationResponse {
        job: JobRecord::clone(&loaded.job),
        cached: loaded.cached,
        matches: MatchResponse::from(&report),
        text: composed.email.to_text(),
        email: composed.email,
        mode: composed.mode,
        notice: composed.notice,
        profile_sources,
    })
}
