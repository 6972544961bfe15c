//! Skills from the user's side: profile pages and free-text skill lists.

use serde::Serialize;
use url::Url;

use crate::extraction::extractor::{cap_by_category, find_skills};
use crate::extraction::normalizer::normalize;
use crate::models::profile::merge_skill_lists;

pub const MAX_PROFILE_SKILLS: usize = 30;

/// Where a profile page lives. Only used to label results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSource {
    Linkedin,
    Github,
    Website,
}

impl ProfileSource {
    pub fn from_url(url: &str) -> Self {
        let host = Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_lowercase))
            .unwrap_or_default();
        if host == "linkedin.com" || host.ends_with(".linkedin.com") {
            ProfileSource::Linkedin
        } else if host == "github.com" || host.ends_with(".github.com") || host.ends_with(".github.io") {
            ProfileSource::Github
        } else {
            ProfileSource::Website
        }
    }
}

/// Dictionary skills found in a profile page. Unlike job extraction there is
/// no default set: a profile with no recognizable skills yields none.
pub fn extract_profile_skills(text: &str) -> Vec<String> {
    let found = find_skills(&normalize(text));
    cap_by_category(&found, MAX_PROFILE_SKILLS)
        .into_iter()
        .map(|skill| skill.name.to_string())
        .collect()
}

/// Splits `"Python, SQL; Docker"` style input into trimmed, non-empty skills,
/// dropping case-insensitive duplicates.
pub fn parse_skill_list(text: &str) -> Vec<String> {
    let mut skills = Vec::new();
    merge_skill_lists(&mut skills, text.split([',', ';', '\n']));
    skills
}
