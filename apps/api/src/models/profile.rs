use serde::{Deserialize, Serialize};

/// The applicant's identity and contact details, supplied per request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl UserProfile {
    /// Appends skills not already present (case-insensitive), keeping first-seen order.
    pub fn merge_skills<I, S>(&mut self, skills: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        merge_skill_lists(&mut self.skills, skills);
    }
}

/// Appends trimmed, non-blank skills to `target` unless already present (case-insensitive).
pub fn merge_skill_lists<I, S>(target: &mut Vec<String>, skills: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    for skill in skills {
        let skill: String = skill.into();
        let trimmed = skill.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !target
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(trimmed))
        {
            target.push(trimmed.to_string());
        }
    }
}

/// Returns the value when it holds something other than whitespace.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_skills_dedups_case_insensitively() {
        let mut profile = UserProfile {
            name: "Ada".to_string(),
            skills: vec!["Python".to_string()],
            ..Default::default()
        };
        profile.merge_skills(["python", "Rust", " ", "RUST", "Docker"]);
        assert_eq!(profile.skills, vec!["Python", "Rust", "Docker"]);
    }

    #[test]
    fn test_non_blank_filters_whitespace() {
        assert_eq!(non_blank(&Some("  ".to_string())), None);
        assert_eq!(non_blank(&None), None);
        assert_eq!(non_blank(&Some(" a@b.c ".to_string())), Some("a@b.c"));
    }

    #[test]
    fn test_profile_deserializes_with_only_name() {
        let profile: UserProfile = serde_json::from_str(r#"{"name": "Mohan"}"#).unwrap();
        assert_eq!(profile.name, "Mohan");
        assert!(profile.skills.is_empty());
        assert!(profile.email.is_none());
    }
}
