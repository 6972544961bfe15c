use serde::{Deserialize, Serialize};

/// Role used when no rule produced a plausible job title.
pub const UNKNOWN_ROLE: &str = "Unknown Role";
/// Experience used when the posting states no year count.
pub const NOT_SPECIFIED: &str = "Not specified";
/// Description used when the posting has no sentence worth quoting.
pub const NO_DESCRIPTION: &str = "No description available.";

/// Skills reported when the dictionary found nothing, so matching always has input.
pub const DEFAULT_SKILLS: &[&str] = &["Communication", "Problem Solving", "Teamwork"];

pub const MAX_SKILLS: usize = 15;
pub const MAX_DESCRIPTION_CHARS: usize = 300;
pub const ELLIPSIS: &str = "...";

/// One parsed job posting.
///
/// Every field is populated: extraction gaps are represented by the sentinel
/// constants above rather than by empty strings or errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub role: String,
    pub experience: String,
    pub skills: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub company: Option<String>,
}

impl JobRecord {
    /// The record produced for empty or unreadable text.
    pub fn sentinel() -> Self {
        Self {
            role: UNKNOWN_ROLE.to_string(),
            experience: NOT_SPECIFIED.to_string(),
            skills: DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
            description: NO_DESCRIPTION.to_string(),
            company: None,
        }
    }

    pub fn has_known_role(&self) -> bool {
        self.role != UNKNOWN_ROLE
    }

    /// Years from an `"<n>+ years"` experience string, if present.
    pub fn experience_years(&self) -> Option<u32> {
        self.experience
            .split(|c: char| !c.is_ascii_digit())
            .find(|part| !part.is_empty())
            .and_then(|digits| digits.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_record_is_structurally_complete() {
        let record = JobRecord::sentinel();
        assert_eq!(record.role, UNKNOWN_ROLE);
        assert_eq!(record.experience, NOT_SPECIFIED);
        assert_eq!(record.skills.len(), DEFAULT_SKILLS.len());
        assert!(!record.description.is_empty());
        assert!(record.company.is_none());
        assert!(!record.has_known_role());
    }

    #[test]
    fn test_experience_years_parses_leading_number() {
        let mut record = JobRecord::sentinel();
        assert_eq!(record.experience_years(), None);
        record.experience = "7+ years".to_string();
        assert_eq!(record.experience_years(), Some(7));
    }

    #[test]
    fn test_job_record_deserializes_without_company() {
        let json = r#"{
            "role": "Data Scientist",
            "experience": "3+ years",
            "skills": ["Python", "SQL"],
            "description": "Build models."
        }"#;
        let record: JobRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.role, "Data Scientist");
        assert!(record.company.is_none());
    }
}
