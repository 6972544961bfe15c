//! Attribute Extractor: turns normalized job-posting text into a `JobRecord`.
//!
//! Purely rule-based (see `extraction::rules`). Extraction never fails: any
//! attribute the rules cannot find is reported through the sentinel values
//! on `JobRecord`, so empty or garbage input still yields a complete record.

use tracing::debug;
use url::Url;

use crate::extraction::normalizer::normalize;
use crate::extraction::rules::{
    LabelRule, SkillCategory, COMPANY_MAX_CHARS, COMPANY_MIN_CHARS, COMPANY_RULES,
    DESCRIPTION_MAX_SENTENCES, DESCRIPTION_MIN_SENTENCE_CHARS, EXPERIENCE_YEARS,
    PAGE_TITLE_SEPARATORS, ROLE_MAX_CHARS, ROLE_MIN_CHARS, ROLE_PHRASE, ROLE_RULES, SKILL_RULES,
};
use crate::models::job::{
    JobRecord, DEFAULT_SKILLS, ELLIPSIS, MAX_DESCRIPTION_CHARS, MAX_SKILLS, NOT_SPECIFIED,
    NO_DESCRIPTION, UNKNOWN_ROLE,
};

/// A dictionary skill located in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoundSkill {
    pub name: &'static str,
    pub category: SkillCategory,
    /// Byte offset of the first occurrence.
    pub position: usize,
}

/// Extracts a `JobRecord` from normalized text.
pub fn extract(normalized_text: &str) -> JobRecord {
    let text = normalized_text.trim();
    if text.is_empty() {
        debug!("Empty posting text, returning sentinel record");
        return JobRecord::sentinel();
    }

    let record = JobRecord {
        role: extract_role(text).unwrap_or_else(|| UNKNOWN_ROLE.to_string()),
        experience: extract_experience_years(text)
            .map(|years| format!("{years}+ years"))
            .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        skills: extract_skills(text),
        description: extract_description(text),
        company: extract_company(text),
    };

    debug!(
        "Extracted role={:?} experience={:?} skills={} company={:?}",
        record.role,
        record.experience,
        record.skills.len(),
        record.company
    );

    record
}

/// Normalizes raw page text, extracts it, and falls back to the posting
/// URL's host for the company when the text names none.
pub fn parse_posting(raw_text: &str, source_url: Option<&str>) -> JobRecord {
    let mut record = extract(&normalize(raw_text));
    if record.company.is_none() {
        record.company = source_url.and_then(company_from_url);
    }
    record
}

// ────────────────────────────────────────────────────────────────────────────
// Role
// ────────────────────────────────────────────────────────────────────────────

fn extract_role(text: &str) -> Option<String> {
    for rule in ROLE_RULES.iter() {
        if let Some(candidate) = first_label_value(rule, text, ROLE_MIN_CHARS, ROLE_MAX_CHARS) {
            debug!("Role matched by rule '{}'", rule.name);
            return Some(candidate);
        }
    }

    // Fallback: a title-cased job noun phrase of at least two words.
    ROLE_PHRASE
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .find(|candidate| {
            candidate.split_whitespace().count() >= 2
                && within(candidate, ROLE_MIN_CHARS, ROLE_MAX_CHARS)
        })
}

fn first_label_value(rule: &LabelRule, text: &str, min: usize, max: usize) -> Option<String> {
    rule.pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|value| {
            if rule.is_page_title {
                cut_page_title(value.as_str())
            } else {
                clean_label_value(value.as_str())
            }
        })
        .find(|candidate| within(candidate, min, max))
}

/// Cuts a label value at the first `|` or `;` and strips trailing punctuation.
fn clean_label_value(raw: &str) -> String {
    let value = raw.split(['|', ';']).next().unwrap_or_default();
    value
        .trim()
        .trim_end_matches(['.', ',', ':', '-'])
        .trim()
        .to_string()
}

/// Keeps the part of a page title before the first site-name separator.
fn cut_page_title(raw: &str) -> String {
    let cut = PAGE_TITLE_SEPARATORS
        .iter()
        .filter_map(|sep| raw.find(sep))
        .min()
        .unwrap_or(raw.len());
    clean_label_value(&raw[..cut])
}

fn within(candidate: &str, min: usize, max: usize) -> bool {
    let len = candidate.chars().count();
    len >= min && len <= max
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

/// Largest year count mentioned; the higher bound is taken as the binding requirement.
fn extract_experience_years(text: &str) -> Option<u32> {
    EXPERIENCE_YEARS
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .filter(|years| *years >= 1)
        .max()
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// All dictionary skills present in `text`, ordered by first occurrence.
pub fn find_skills(text: &str) -> Vec<FoundSkill> {
    let mut found: Vec<FoundSkill> = SKILL_RULES
        .iter()
        .filter_map(|rule| {
            rule.pattern.find(text).map(|m| FoundSkill {
                name: rule.name,
                category: rule.category,
                position: m.start(),
            })
        })
        .collect();
    // Stable: equal positions keep dictionary order.
    found.sort_by_key(|skill| skill.position);
    found
}

/// Keeps at most `cap` skills, preferring technical over tool over soft, and
/// returns the survivors in their original text order.
pub fn cap_by_category(found: &[FoundSkill], cap: usize) -> Vec<FoundSkill> {
    if found.len() <= cap {
        return found.to_vec();
    }
    let mut keep: Vec<usize> = (0..found.len()).collect();
    keep.sort_by_key(|&i| (found[i].category, i));
    keep.truncate(cap);
    keep.sort_unstable();
    keep.into_iter().map(|i| found[i]).collect()
}

/// Job skills: capped at `MAX_SKILLS`, never empty.
pub fn extract_skills(text: &str) -> Vec<String> {
    let found = find_skills(text);
    if found.is_empty() {
        return DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect();
    }
    cap_by_category(&found, MAX_SKILLS)
        .into_iter()
        .map(|skill| skill.name.to_string())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Description
// ────────────────────────────────────────────────────────────────────────────

fn extract_description(text: &str) -> String {
    let sentences: Vec<&str> = split_sentences(text)
        .into_iter()
        .filter(|s| s.chars().count() > DESCRIPTION_MIN_SENTENCE_CHARS)
        .filter(|s| !is_label_line(s))
        .take(DESCRIPTION_MAX_SENTENCES)
        .collect();

    if sentences.is_empty() {
        return NO_DESCRIPTION.to_string();
    }
    truncate_with_ellipsis(&sentences.join(" "), MAX_DESCRIPTION_CHARS)
}

/// Splits at line breaks and at `.`, `!`, `?` followed by whitespace.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    for line in text.lines() {
        let mut start = 0;
        let mut chars = line.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if !matches!(c, '.' | '!' | '?') {
                continue;
            }
            if chars.peek().is_some_and(|&(_, next)| next.is_whitespace()) {
                let end = i + c.len_utf8();
                sentences.push(line[start..end].trim());
                start = end;
            }
        }
        sentences.push(line[start..].trim());
    }
    sentences.retain(|s| !s.is_empty());
    sentences
}

fn is_label_line(sentence: &str) -> bool {
    ROLE_RULES
        .iter()
        .chain(COMPANY_RULES.iter())
        .any(|rule| rule.pattern.is_match(sentence))
}

/// Truncates to at most `max` characters including the ellipsis, preferring a word boundary.
fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max - ELLIPSIS.len()).collect();
    if let Some(idx) = cut.rfind(char::is_whitespace) {
        if idx > cut.len() / 2 {
            cut.truncate(idx);
        }
    }
    let trimmed_len = cut.trim_end().len();
    cut.truncate(trimmed_len);
    cut.push_str(ELLIPSIS);
    cut
}

// ────────────────────────────────────────────────────────────────────────────
// Company
// ────────────────────────────────────────────────────────────────────────────

fn extract_company(text: &str) -> Option<String> {
    COMPANY_RULES
        .iter()
        .find_map(|rule| first_label_value(rule, text, COMPANY_MIN_CHARS, COMPANY_MAX_CHARS))
}

/// Host labels that say nothing about the employer.
const GENERIC_HOST_LABELS: &[&str] = &["www", "jobs", "careers", "career", "apply", "boards", "job-boards", "hire"];

/// Applicant-tracking hosts that put the employer in the first path segment.
const ATS_HOSTS: &[&str] = &[
    "greenhouse",
    "lever",
    "workable",
    "ashbyhq",
    "smartrecruiters",
    "recruitee",
    "bamboohr",
];

const KNOWN_EMPLOYERS: &[(&str, &str)] = &[
    ("google", "Google"),
    ("microsoft", "Microsoft"),
    ("amazon", "Amazon"),
    ("amazonjobs", "Amazon"),
    ("apple", "Apple"),
    ("ibm", "IBM"),
    ("facebook", "Meta"),
    ("meta", "Meta"),
    ("metacareers", "Meta"),
    ("netflix", "Netflix"),
    ("twitter", "X Corp"),
    ("linkedin", "LinkedIn"),
    ("salesforce", "Salesforce"),
    ("oracle", "Oracle"),
    ("adobe", "Adobe"),
    ("intel", "Intel"),
    ("nvidia", "NVIDIA"),
];

/// Best-effort employer name from a posting URL.
///
/// `https://careers.google.com/jobs/1` gives `Google`,
/// `https://boards.greenhouse.io/acme-labs/jobs/1` gives `Acme Labs`.
pub fn company_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_lowercase();

    let label = host
        .split('.')
        .find(|label| !label.is_empty() && !GENERIC_HOST_LABELS.contains(label))?
        .to_string();

    let slug = if ATS_HOSTS.contains(&label.as_str()) {
        parsed
            .path_segments()?
            .find(|segment| !segment.is_empty())?
            .to_lowercase()
    } else {
        label
    };

    if let Some((_, name)) = KNOWN_EMPLOYERS.iter().find(|(key, _)| *key == slug) {
        return Some(name.to_string());
    }

    let name = slug
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ");
    (!name.is_empty()).then_some(name)
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKEND_POSTING: &str = "
        Senior Backend Engineer
        Acme Cloud is growing fast and we need help scaling our platform.
        You will design APIs and own services end to end.
        Requirements: 5+ years building production systems, 3 years with Python.
        Tech we use: Python, Docker, AWS, PostgreSQL and Kubernetes.
    ";

    #[test]
    fn test_backend_posting_extracts_role_experience_and_skills() {
        let record = extract(&normalize(BACKEND_POSTING));
        assert!(record.role.contains("Backend Engineer"), "role was {}", record.role);
        assert_eq!(record.experience, "5+ years");
        for skill in ["Python", "Docker", "AWS"] {
            assert!(record.skills.iter().any(|s| s == skill), "missing {skill}");
        }
    }

    #[test]
    fn test_elided_posting_keeps_skill_before_ellipsis() {
        let text = "Senior Backend Engineer... 5+ years... Python, Docker, AWS...";
        let record = extract(&normalize(text));
        assert!(record.role.contains("Backend Engineer"), "role was {}", record.role);
        assert_eq!(record.experience, "5+ years");
        assert_eq!(record.skills, vec!["Python", "Docker", "AWS"]);
    }

    #[test]
    fn test_sentence_initial_words_are_not_skills() {
        let text = "Marketing Intern. Spring 2026 cohort. Express your ideas freely. \
                    Go beyond the brief with Canva.";
        assert_eq!(extract(text).skills, DEFAULT_SKILLS);

        let text = "Build APIs in Node.js, Express and Go. Swift experience is a plus.";
        assert_eq!(extract(text).skills, vec!["Node.js", "Express", "Go"]);
    }

    #[test]
    fn test_empty_text_yields_sentinels() {
        let record = extract("");
        assert_eq!(record.role, UNKNOWN_ROLE);
        assert_eq!(record.experience, NOT_SPECIFIED);
        assert_eq!(record.skills, DEFAULT_SKILLS);
        assert_eq!(record.description, NO_DESCRIPTION);
    }

    #[test]
    fn test_garbage_text_is_structurally_valid() {
        let record = extract("%%% ### ??? 12 ,,,");
        assert_eq!(record.role, UNKNOWN_ROLE);
        assert_eq!(record.experience, NOT_SPECIFIED);
        assert!(!record.skills.is_empty());
        assert!(!record.description.is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let first = extract(&normalize(BACKEND_POSTING));
        let second = extract(&normalize(BACKEND_POSTING));
        assert_eq!(first, second);
    }

    #[test]
    fn test_label_rules_take_priority_in_order() {
        let text = "Title: Careers | Acme\nRole: Platform Engineer\nPosition: Staff Data Engineer";
        assert_eq!(extract(text).role, "Staff Data Engineer");
    }

    #[test]
    fn test_label_value_out_of_range_falls_through() {
        let text = "Position: QA\nJob Title: Quality Analyst";
        assert_eq!(extract(text).role, "Quality Analyst");
    }

    #[test]
    fn test_page_title_is_cut_at_separator() {
        let text = "Title: Product Designer - Figma Careers\nWe design things together every day.";
        assert_eq!(extract(text).role, "Product Designer");
    }

    #[test]
    fn test_experience_takes_maximum() {
        let text = "Minimum 2 years in sales, ideally 3-7 years overall and 4+ yrs of CRM use.";
        assert_eq!(extract(text).experience, "7+ years");
    }

    #[test]
    fn test_zero_years_is_not_a_requirement() {
        assert_eq!(extract("0 years needed, fresh graduates welcome").experience, NOT_SPECIFIED);
    }

    #[test]
    fn test_skills_are_canonical_deduplicated_and_ordered() {
        let text = "We use postgres, python and Python3? No: python, k8s and docker.";
        let skills = extract(text).skills;
        assert_eq!(skills, vec!["PostgreSQL", "Python", "Kubernetes", "Docker"]);
    }

    #[test]
    fn test_skill_cap_prefers_technical() {
        let text = "Leadership, Communication, Negotiation, Mentoring, Jira, Figma, \
                    Python, Java, Rust, Docker, AWS, Azure, GCP, Kafka, Redis, MySQL, \
                    PostgreSQL, MongoDB, Terraform, Linux";
        let skills = extract(text).skills;
        assert_eq!(skills.len(), MAX_SKILLS);
        assert!(skills.contains(&"Python".to_string()));
        assert!(skills.contains(&"Linux".to_string()));
        assert!(!skills.contains(&"Leadership".to_string()));
        // Survivors stay in text order.
        let python = skills.iter().position(|s| s == "Python").unwrap();
        let linux = skills.iter().position(|s| s == "Linux").unwrap();
        assert!(python < linux);
    }

    #[test]
    fn test_cap_by_category_keeps_order_when_under_cap() {
        let found = find_skills("Figma then Python");
        let capped = cap_by_category(&found, 5);
        assert_eq!(capped, found);
        assert_eq!(capped[0].name, "Figma");
    }

    #[test]
    fn test_no_skills_gives_default_set() {
        let skills = extract_skills("We bake bread and sell it at the market every morning.");
        assert_eq!(skills, DEFAULT_SKILLS);
    }

    #[test]
    fn test_description_takes_plausible_sentences() {
        let text = "Short one.\nWe are building a new payments platform for Europe. \
                    You will work with a small team of engineers! Benefits include remote work.";
        let description = extract(text).description;
        assert!(description.starts_with("We are building a new payments platform"));
        assert!(!description.contains("Short one"));
        assert!(description.contains("Benefits include remote work."));
    }

    #[test]
    fn test_description_skips_label_lines() {
        let text = "Title: Senior Backend Engineer at Acme\nYou will own the ingestion pipeline for partners.";
        assert_eq!(
            extract(text).description,
            "You will own the ingestion pipeline for partners."
        );
    }

    #[test]
    fn test_description_truncated_with_ellipsis() {
        let sentence = format!("{}ends here.", "lengthy ".repeat(60));
        let description = extract(&sentence).description;
        assert!(description.chars().count() <= MAX_DESCRIPTION_CHARS);
        assert!(description.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_truncate_with_ellipsis_respects_limit() {
        let text = "word ".repeat(200);
        let cut = truncate_with_ellipsis(&text, 300);
        assert!(cut.chars().count() <= 300);
        assert!(cut.ends_with("word..."));
        assert_eq!(truncate_with_ellipsis("short", 300), "short");
    }

    #[test]
    fn test_company_label_is_extracted() {
        let text = "Company: Initech Ltd.\nRole: Support Engineer";
        assert_eq!(extract(text).company.as_deref(), Some("Initech Ltd"));
    }

    #[test]
    fn test_parse_posting_falls_back_to_url_company() {
        let record = parse_posting(
            "<p>Data Analyst needed with SQL.</p>",
            Some("https://careers.nvidia.com/job/42"),
        );
        assert_eq!(record.company.as_deref(), Some("NVIDIA"));
        assert!(record.skills.contains(&"SQL".to_string()));
    }

    #[test]
    fn test_company_from_url_known_and_unknown_hosts() {
        assert_eq!(company_from_url("https://www.google.com/about/careers").as_deref(), Some("Google"));
        assert_eq!(company_from_url("https://jobs.facebook.com/x").as_deref(), Some("Meta"));
        assert_eq!(company_from_url("https://spencer-tech.io/jobs").as_deref(), Some("Spencer Tech"));
        assert_eq!(company_from_url("not a url"), None);
    }

    #[test]
    fn test_company_from_url_uses_ats_path() {
        assert_eq!(
            company_from_url("https://boards.greenhouse.io/acme-labs/jobs/123").as_deref(),
            Some("Acme Labs")
        );
        assert_eq!(company_from_url("https://jobs.lever.co/").as_deref(), None);
    }
}
