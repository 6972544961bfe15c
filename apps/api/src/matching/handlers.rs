//! Axum route handlers for the Matching API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extraction::profile::parse_skill_list;
use crate::matching::scorer::{rank_portfolio, MatchReport, MatchStatus};
use crate::models::portfolio::PortfolioEntry;
use crate::models::profile::merge_skill_lists;
use crate::state::AppState;

pub const MAX_TOP_K: usize = 20;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PortfolioResponse {
    pub entries: Vec<PortfolioEntry>,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub skills: Vec<String>,
    /// Free text such as `"Python, SQL; Docker"`, merged after `skills`.
    pub skills_text: Option<String>,
    pub top_k: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredEntry {
    pub entry: PortfolioEntry,
    pub score: f64,
}

/// Owned form of `MatchReport` for response bodies.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    pub status: MatchStatus,
    pub scorer: &'static str,
    pub matches: Vec<ScoredEntry>,
}

impl From<&MatchReport<'_>> for MatchResponse {
    fn from(report: &MatchReport<'_>) -> Self {
        Self {
            status: report.status,
            scorer: report.scorer,
            matches: report
                .matches
                .iter()
                .map(|m| ScoredEntry {
                    entry: m.entry.clone(),
                    score: m.score,
                })
                .collect(),
        }
    }
}

/// `requested` when within `1..=MAX_TOP_K`, otherwise a validation error.
pub fn resolve_top_k(requested: Option<usize>, default: usize) -> Result<usize, AppError> {
    match requested {
        None => Ok(default),
        Some(k) if (1..=MAX_TOP_K).contains(&k) => Ok(k),
        Some(k) => Err(AppError::validation(format!(
            "top_k must be between 1 and {MAX_TOP_K}, got {k}"
        ))),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/portfolio
pub async fn handle_list_portfolio(State(state): State<AppState>) -> Json<PortfolioResponse> {
    let entries = state.catalog.entries().to_vec();
    Json(PortfolioResponse {
        count: entries.len(),
        entries,
    })
}

/// POST /api/v1/matches
///
/// Ranks the portfolio against the given skills. An empty query is not an
/// error: it comes back with status `empty_query` and no matches.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let top_k = resolve_top_k(request.top_k, state.config.default_top_k)?;

    let mut query = Vec::new();
    merge_skill_lists(&mut query, request.skills);
    if let Some(text) = request.skills_text.as_deref() {
        merge_skill_lists(&mut query, parse_skill_list(text));
    }

    let report = rank_portfolio(&*state.scorer, &query, state.catalog.entries(), top_k);
    tracing::debug!(
        "Matched {} skills: status={:?}, {} results",
        query.len(),
        report.status,
        report.matches.len()
    );

    Ok(Json(MatchResponse::from(&report)))
}
