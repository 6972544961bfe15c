//! Axum route handlers for the Extraction API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extraction::extractor::parse_posting;
use crate::extraction::profile::{extract_profile_skills, MAX_PROFILE_SKILLS};
use crate::extraction::rules::RULES_VERSION;
use crate::extraction::sources::{
    check_profile_urls, fetch_profile_skills, load_job, merged_skills, ProfileSourceReport,
};
use crate::models::job::JobRecord;
use crate::models::profile::merge_skill_lists;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Exactly one of `url` and `text` must be given.
#[derive(Debug, Deserialize)]
pub struct ParseJobRequest {
    pub url: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobSource {
    Url,
    Text,
}

#[derive(Debug, Serialize)]
pub struct ParseJobResponse {
    pub job: JobRecord,
    pub source: JobSource,
    pub cached: bool,
    pub rules_version: u32,
}

#[derive(Debug, Deserialize)]
pub struct ProfileSkillsRequest {
    #[serde(default)]
    pub urls: Vec<String>,
    /// Pasted profile or resume text, scanned after the URLs.
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileSkillsResponse {
    pub skills: Vec<String>,
    pub sources: Vec<ProfileSourceReport>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/parse
///
/// Parses a posting from a URL (fetched, cached) or from pasted text.
pub async fn handle_parse_job(
    State(state): State<AppState>,
    Json(request): Json<ParseJobRequest>,
) -> Result<Json<ParseJobResponse>, AppError> {
    let url = request.url.as_deref().map(str::trim).filter(|u| !u.is_empty());
    let text = request.text.as_deref().filter(|t| !t.trim().is_empty());

    let (job, source, cached) = match (url, text) {
        (Some(url), None) => {
            let loaded = load_job(&state, url).await?;
            (JobRecord::clone(&loaded.job), JobSource::Url, loaded.cached)
        }
        (None, Some(text)) => (parse_posting(text, None), JobSource::Text, false),
        (Some(_), Some(_)) => {
            return Err(AppError::validation("provide either url or text, not both"));
        }
        (None, None) => return Err(AppError::validation("url or text is required")),
    };

    Ok(Json(ParseJobResponse {
        job,
        source,
        cached,
        rules_version: RULES_VERSION,
    }))
}

/// POST /api/v1/profiles/skills
///
/// Extracts skills from profile pages and optional pasted text. A page that
/// cannot be fetched is reported in `sources` and does not fail the request.
pub async fn handle_profile_skills(
    State(state): State<AppState>,
    Json(request): Json<ProfileSkillsRequest>,
) -> Result<Json<ProfileSkillsResponse>, AppError> {
    let text = request.text.as_deref().filter(|t| !t.trim().is_empty());
    if request.urls.is_empty() && text.is_none() {
        return Err(AppError::validation("urls or text is required"));
    }
    check_profile_urls(&request.urls)?;

    let sources = fetch_profile_skills(&*state.fetcher, &request.urls).await;
    let mut skills = merged_skills(&sources);
    if let Some(text) = text {
        merge_skill_lists(&mut skills, extract_profile_skills(text));
        skills.truncate(MAX_PROFILE_SKILLS);
    }

    Ok(Json(ProfileSkillsResponse { skills, sources }))
}
