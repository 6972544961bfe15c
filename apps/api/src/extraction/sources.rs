//! Fetch-backed extraction: job postings through the per-URL cache, and
//! skills from profile pages.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::extraction::extractor::parse_posting;
use crate::extraction::profile::{extract_profile_skills, ProfileSource, MAX_PROFILE_SKILLS};
use crate::fetch::{validate_url, PageFetcher};
use crate::models::job::JobRecord;
use crate::models::profile::merge_skill_lists;
use crate::state::AppState;

/// Profile pages fetched per request.
pub const MAX_PROFILE_URLS: usize = 5;

#[derive(Debug)]
pub struct LoadedJob {
    pub job: Arc<JobRecord>,
    pub cached: bool,
}

/// Outcome for one profile URL. Failures are reported here, never raised.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSourceReport {
    pub url: String,
    pub source: ProfileSource,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Returns the parsed posting for `url`, fetching only on a cache miss.
pub async fn load_job(state: &AppState, url: &str) -> Result<LoadedJob, AppError> {
    validate_url(url)?;

    if let Some(job) = state.job_cache.get(url).await {
        info!("Job cache hit for {}", url);
        return Ok(LoadedJob { job, cached: true });
    }

    let text = state.fetcher.fetch(url).await?;
    let record = parse_posting(&text, Some(url));
    info!(
        "Parsed posting {}: role={:?}, {} skills",
        url,
        record.role,
        record.skills.len()
    );

    let job = state.job_cache.insert(url, record).await;
    debug!("Job cache now holds {} postings", state.job_cache.len().await);
    Ok(LoadedJob { job, cached: false })
}

/// Fetches each profile page in order and extracts its skills.
pub async fn fetch_profile_skills(
    fetcher: &dyn PageFetcher,
    urls: &[String],
) -> Vec<ProfileSourceReport> {
    let mut reports = Vec::with_capacity(urls.len());

    for url in urls {
        let source = ProfileSource::from_url(url);
        let fetched = match validate_url(url) {
            Ok(_) => fetcher.fetch(url).await,
            Err(e) => Err(e),
        };

        let report = match fetched {
            Ok(text) => ProfileSourceReport {
                url: url.clone(),
                source,
                skills: extract_profile_skills(&text),
                error: None,
            },
            Err(e) => {
                warn!("Profile fetch failed for {}: {}", url, e);
                ProfileSourceReport {
                    url: url.clone(),
                    source,
                    skills: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        };
        reports.push(report);
    }

    reports
}

/// Union of all reported skills, first-seen order, capped.
pub fn merged_skills(reports: &[ProfileSourceReport]) -> Vec<String> {
    let mut skills = Vec::new();
    for report in reports {
        merge_skill_lists(&mut skills, report.skills.iter().cloned());
    }
    skills.truncate(MAX_PROFILE_SKILLS);
    skills
}

pub fn check_profile_urls(urls: &[String]) -> Result<(), AppError> {
    if urls.len() > MAX_PROFILE_URLS {
        return Err(AppError::validation(format!(
            "at most {MAX_PROFILE_URLS} profile URLs are accepted, got {}",
            urls.len()
        )));
    }
    Ok(())
}
