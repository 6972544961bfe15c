//! Email Composer: builds the cold email from a job, its matched projects and
//! the applicant's profile.
//!
//! `compose` is pure: the same inputs and seed give byte-identical output.
//! `compose_with_backend` optionally hands the draft to a generative backend
//! and falls back to the template email on any failure.

use chrono::{NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;
use tracing::{info, warn};

use crate::email::prompts::{build_email_prompt, email_system, parse_generated_email};
use crate::email::templates::{
    detect_audience, detect_industry, fill, phrases_for, tone_phrasing, Tone, CALLS_TO_ACTION,
    COMPANY_PRAISE, NO_MATCH_SENTENCE, PORTFOLIO_MENTIONS,
};
use crate::llm_client::EmailBackend;
use crate::matching::scorer::MatchResult;
use crate::models::job::{JobRecord, ELLIPSIS, NO_DESCRIPTION};
use crate::models::profile::{non_blank, UserProfile};

const FALLBACK_COMPANY: &str = "your organization";
const FALLBACK_ROLE: &str = "advertised";
const FALLBACK_EXPERIENCE: &str = "several years";
const MAX_CITED_SKILLS: usize = 4;
const EXCERPT_CHARS: usize = 200;
const FUZZY_SKILL_THRESHOLD: f64 = 0.9;

const SKILLS_FOCUS_SENTENCE: &str =
    "In particular, my day-to-day work with {skills} maps directly onto what this role asks for.";
const CULTURE_FOCUS_SENTENCE: &str =
    "Beyond the role itself, the way {company} works and the team it has built are a big part of why I am applying.";
const EXCERPT_LEAD: &str = "What stood out to me in the posting:";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDocument {
    pub subject: String,
    pub body: String,
}

impl EmailDocument {
    /// Plain-text rendering with a `Subject:` header line.
    pub fn to_text(&self) -> String {
        format!("Subject: {}\n\n{}", self.subject, self.body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailLength {
    Short,
    #[default]
    Standard,
    Detailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    #[default]
    Skills,
    Projects,
    Culture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeStyle {
    pub tone: Tone,
    pub length: EmailLength,
    pub focus: Focus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeOptions {
    pub style: ComposeStyle,
    /// Seeds phrasing selection.
    pub seed: u64,
    /// Appended to the signature as `Date: October 19, 2026` when set.
    pub date: Option<NaiveDate>,
}

impl ComposeOptions {
    pub fn new(style: ComposeStyle, seed: u64) -> Self {
        Self {
            style,
            seed,
            date: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Seeds from the wall clock, optionally dating the signature today.
    pub fn from_clock(style: ComposeStyle, dated: bool) -> Self {
        let now = Utc::now();
        let options = Self::new(style, now.timestamp_micros() as u64);
        if dated {
            options.with_date(now.date_naive())
        } else {
            options
        }
    }

    /// Options for an API request: a caller-supplied seed wins over the clock.
    pub fn for_request(style: ComposeStyle, seed: Option<u64>, dated: bool) -> Self {
        let mut options = Self::from_clock(style, dated);
        if let Some(seed) = seed {
            options.seed = seed;
        }
        options
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComposeMode {
    Template,
    Generative,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComposedEmail {
    pub email: EmailDocument,
    pub mode: ComposeMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl ComposedEmail {
    pub fn template(email: EmailDocument, notice: Option<String>) -> Self {
        Self {
            email,
            mode: ComposeMode::Template,
            notice,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Template composition
// ────────────────────────────────────────────────────────────────────────────

/// Composes the template email. Never fails; missing job or profile details
/// fall back to neutral wording.
pub fn compose(
    job: &JobRecord,
    matches: &[MatchResult<'_>],
    profile: &UserProfile,
    options: &ComposeOptions,
) -> EmailDocument {
    let mut rng = StdRng::seed_from_u64(options.seed);
    let style = options.style;
    let phrases = phrases_for(detect_audience(job));
    let tone = tone_phrasing(style.tone);

    let company = job
        .company
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    let company_text = company.unwrap_or(FALLBACK_COMPANY);
    let role_text = if job.has_known_role() {
        job.role.as_str()
    } else {
        FALLBACK_ROLE
    };
    let experience_text = if job.experience_years().is_some() {
        job.experience.as_str()
    } else {
        FALLBACK_EXPERIENCE
    };
    let cited = cited_skills(&job.skills, &profile.skills);
    let skills_text = join_natural(&cited);
    let industry = detect_industry(company).label();

    let values = [
        ("role", role_text),
        ("company", company_text),
        ("experience", experience_text),
        ("skills", skills_text.as_str()),
        ("industry", industry),
    ];
    let short = style.length == EmailLength::Short;

    let greetings = tone.greetings.unwrap_or(phrases.greetings);
    let greeting = fill(pick_greeting(&mut rng, greetings, company.is_some()), &values);

    let mut introduction = fill(pick(&mut rng, phrases.introductions), &values);
    if let Some(warmth) = tone.warmth {
        append_sentence(&mut introduction, pick(&mut rng, warmth));
    }
    if !short || style.focus == Focus::Culture {
        append_sentence(&mut introduction, &fill(pick(&mut rng, COMPANY_PRAISE), &values));
    }

    let mut value = fill(pick(&mut rng, phrases.value_propositions), &values);
    if style.focus == Focus::Skills && !short {
        append_sentence(&mut value, &fill(SKILLS_FOCUS_SENTENCE, &values));
    }
    if !short {
        append_sentence(&mut value, pick(&mut rng, phrases.achievements));
    }

    let detailed_projects = style.focus == Focus::Projects || style.length == EmailLength::Detailed;
    let projects = project_section(pick(&mut rng, PORTFOLIO_MENTIONS), matches, detailed_projects);

    let mut paragraphs = vec![greeting, introduction];
    if style.focus == Focus::Projects {
        paragraphs.push(projects);
        paragraphs.push(value);
    } else {
        paragraphs.push(value);
        paragraphs.push(projects);
    }
    if style.focus == Focus::Culture {
        paragraphs.push(fill(CULTURE_FOCUS_SENTENCE, &values));
    }
    if style.length == EmailLength::Detailed && job.description != NO_DESCRIPTION {
        paragraphs.push(format!("{EXCERPT_LEAD}\n\"{}\"", excerpt(&job.description)));
    }
    paragraphs.push(fill(pick(&mut rng, CALLS_TO_ACTION), &values));
    paragraphs.push(signature(pick(&mut rng, tone.closings), profile, options.date));

    EmailDocument {
        subject: subject_line(job, company),
        body: paragraphs.join("\n\n"),
    }
}

fn pick(rng: &mut StdRng, options: &[&'static str]) -> &'static str {
    options.choose(rng).copied().unwrap_or_default()
}

/// Greetings that address the company by name are skipped when it is unknown.
fn pick_greeting(rng: &mut StdRng, greetings: &[&'static str], company_known: bool) -> &'static str {
    if company_known {
        return pick(rng, greetings);
    }
    let generic: Vec<&'static str> = greetings
        .iter()
        .copied()
        .filter(|greeting| !greeting.contains("{company}"))
        .collect();
    if generic.is_empty() {
        pick(rng, greetings)
    } else {
        pick(rng, &generic)
    }
}

fn append_sentence(paragraph: &mut String, sentence: &str) {
    if sentence.is_empty() {
        return;
    }
    paragraph.push(' ');
    paragraph.push_str(sentence);
}

fn subject_line(job: &JobRecord, company: Option<&str>) -> String {
    match (job.has_known_role(), company) {
        (true, Some(company)) => format!("Application for {} at {}", job.role, company),
        (true, None) => format!("Application for {} position", job.role),
        (false, Some(company)) => format!("Application for the advertised position at {company}"),
        (false, None) => "Application for the advertised position".to_string(),
    }
}

fn project_section(mention: &str, matches: &[MatchResult<'_>], detailed: bool) -> String {
    if matches.is_empty() {
        return NO_MATCH_SENTENCE.to_string();
    }
    let mut lines = vec![mention.to_string()];
    for result in matches {
        let entry = result.entry;
        let line = if detailed && !entry.description.is_empty() {
            format!(
                "- {} ({}): {} {}",
                entry.title,
                entry.stack_text(),
                entry.description,
                entry.link
            )
        } else {
            format!("- {}: {}", entry.title, entry.link)
        };
        lines.push(line);
    }
    lines.join("\n")
}

fn signature(closing: &str, profile: &UserProfile, date: Option<NaiveDate>) -> String {
    let mut lines = vec![closing.to_string(), profile.name.trim().to_string()];

    match (non_blank(&profile.role), non_blank(&profile.company)) {
        (Some(role), Some(company)) => lines.push(format!("{role} | {company}")),
        (Some(role), None) => lines.push(role.to_string()),
        (None, Some(company)) => lines.push(company.to_string()),
        (None, None) => {}
    }
    if let Some(email) = non_blank(&profile.email) {
        lines.push(format!("Email: {email}"));
    }
    if let Some(phone) = non_blank(&profile.phone) {
        lines.push(format!("Phone: {phone}"));
    }
    if let Some(linkedin) = non_blank(&profile.linkedin) {
        lines.push(format!("LinkedIn: {linkedin}"));
    }
    if let Some(date) = date {
        lines.push(format!("Date: {}", date.format("%B %d, %Y")));
    }
    lines.retain(|line| !line.is_empty());
    lines.join("\n")
}

fn excerpt(description: &str) -> String {
    if description.chars().count() <= EXCERPT_CHARS {
        return description.to_string();
    }
    let cut: String = description.chars().take(EXCERPT_CHARS).collect();
    format!("{}{ELLIPSIS}", cut.trim_end())
}

// ────────────────────────────────────────────────────────────────────────────
// Skill overlap
// ────────────────────────────────────────────────────────────────────────────

/// Job skills the profile also has, in job order.
pub fn skill_overlap(job_skills: &[String], profile_skills: &[String]) -> Vec<String> {
    job_skills
        .iter()
        .filter(|job_skill| {
            profile_skills
                .iter()
                .any(|profile_skill| skills_match(job_skill, profile_skill))
        })
        .cloned()
        .collect()
}

/// Case-insensitive equality, containment (for names of 3+ chars), or
/// Jaro-Winkler similarity of at least 0.9.
fn skills_match(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }
    let shorter = a.chars().count().min(b.chars().count());
    if shorter >= 3 && (a.contains(&b) || b.contains(&a)) {
        return true;
    }
    jaro_winkler(&a, &b) >= FUZZY_SKILL_THRESHOLD
}

/// Overlapping skills, or the first job skills when nothing overlaps.
fn cited_skills(job_skills: &[String], profile_skills: &[String]) -> Vec<String> {
    let overlap = skill_overlap(job_skills, profile_skills);
    let source = if overlap.is_empty() {
        job_skills.to_vec()
    } else {
        overlap
    };
    source.into_iter().take(MAX_CITED_SKILLS).collect()
}

/// `A`, `A and B`, `A, B and C`.
fn join_natural(items: &[String]) -> String {
    match items {
        [] => "the skills in the posting".to_string(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generative mode
// ────────────────────────────────────────────────────────────────────────────

/// Delegates to `backend` when one is given. Any backend failure, or a reply
/// that is not a usable email, yields the template email plus a notice.
pub async fn compose_with_backend(
    job: &JobRecord,
    matches: &[MatchResult<'_>],
    profile: &UserProfile,
    options: &ComposeOptions,
    backend: Option<&dyn EmailBackend>,
) -> ComposedEmail {
    let draft = compose(job, matches, profile, options);
    let Some(backend) = backend else {
        return ComposedEmail::template(draft, None);
    };

    let prompt = match build_email_prompt(job, matches, profile, &options.style, &draft) {
        Ok(prompt) => prompt,
        Err(e) => {
            warn!("Could not build email prompt, using template: {}", e);
            return ComposedEmail::template(draft, Some(fallback_notice(&e.to_string())));
        }
    };

    let generated = backend
        .generate(&email_system(), &prompt)
        .await
        .and_then(|reply| parse_generated_email(&reply));

    match generated {
        Ok(email) => {
            info!("Email generated by backend for role {:?}", job.role);
            ComposedEmail {
                email,
                mode: ComposeMode::Generative,
                notice: None,
            }
        }
        Err(e) => {
            warn!("Generative email failed, using template: {}", e);
            ComposedEmail::template(draft, Some(fallback_notice(&e.to_string())))
        }
    }
}

fn fallback_notice(reason: &str) -> String {
    format!("Generative mode was unavailable ({reason}); the template email is shown instead.")
}

pub const NOT_CONFIGURED_NOTICE: &str =
    "Generative mode is not configured; the template email is shown instead.";

/// Mode asked for by the caller. `Auto` uses the backend when one is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestedMode {
    #[default]
    Auto,
    Template,
    Generative,
}

/// Picks the backend to use for a request, plus a notice when generative
/// output was asked for but cannot be attempted.
pub fn resolve_backend(
    requested: RequestedMode,
    configured: Option<&dyn EmailBackend>,
) -> (Option<&dyn EmailBackend>, Option<String>) {
    match (requested, configured) {
        (RequestedMode::Template, _) => (None, None),
        (RequestedMode::Auto, backend) => (backend, None),
        (RequestedMode::Generative, Some(backend)) => (Some(backend), None),
        (RequestedMode::Generative, None) => (None, Some(NOT_CONFIGURED_NOTICE.to_string())),
    }
}

/// `compose_with_backend` after resolving the requested mode.
pub async fn compose_requested(
    job: &JobRecord,
    matches: &[MatchResult<'_>],
    profile: &UserProfile,
    options: &ComposeOptions,
    requested: RequestedMode,
    configured: Option<&dyn EmailBackend>,
) -> ComposedEmail {
    let (backend, notice) = resolve_backend(requested, configured);
    let mut composed = compose_with_backend(job, matches, profile, options, backend).await;
    if composed.notice.is_none() {
        composed.notice = notice;
    }
    composed
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::llm_client::LlmError;
    use crate::models::portfolio::PortfolioEntry;

    fn job() -> JobRecord {
        JobRecord {
            role: "Senior Backend Engineer".to_string(),
            experience: "5+ years".to_string(),
            skills: vec!["Python".to_string(), "Docker".to_string(), "AWS".to_string()],
            description: "We are scaling our payments platform across Europe.".to_string(),
            company: Some("Acme Cloud".to_string()),
        }
    }

    fn profile() -> UserProfile {
        UserProfile {
            name: "Ada Lovelace".to_string(),
            role: Some("Software Engineer".to_string()),
            company: Some("Analytical Engines".to_string()),
            email: Some("ada@example.com".to_string()),
            phone: None,
            linkedin: Some("https://linkedin.com/in/ada".to_string()),
            skills: vec!["python".to_string(), "Kubernetes".to_string()],
        }
    }

    fn catalog() -> Vec<PortfolioEntry> {
        vec![PortfolioEntry::new(
            "Payments API",
            "Python, Django, PostgreSQL",
            "Ledger service handling card payouts.",
            "https://example.com/payments",
        )]
    }

    fn options(seed: u64) -> ComposeOptions {
        ComposeOptions::new(ComposeStyle::default(), seed)
    }

    struct StubBackend(Result<&'static str, ()>);

    #[async_trait]
    impl EmailBackend for StubBackend {
        async fn generate(&self, _system: &str, _prompt: &str) -> Result<String, LlmError> {
            match self.0 {
                Ok(reply) => Ok(reply.to_string()),
                Err(()) => Err(LlmError::RateLimited { retries: 3 }),
            }
        }
    }

    #[test]
    fn test_same_seed_gives_identical_email() {
        let entries = catalog();
        let matches = vec![MatchResult { entry: &entries[0], score: 3.0 }];
        let first = compose(&job(), &matches, &profile(), &options(42));
        let second = compose(&job(), &matches, &profile(), &options(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_some_seed_changes_phrasing() {
        let entries = catalog();
        let matches = vec![MatchResult { entry: &entries[0], score: 3.0 }];
        let base = compose(&job(), &matches, &profile(), &options(0));
        let varied = (1..20).any(|seed| compose(&job(), &matches, &profile(), &options(seed)) != base);
        assert!(varied);
    }

    #[test]
    fn test_body_contains_all_sections() {
        let entries = catalog();
        let matches = vec![MatchResult { entry: &entries[0], score: 3.0 }];
        let email = compose(&job(), &matches, &profile(), &options(7));

        assert_eq!(email.subject, "Application for Senior Backend Engineer at Acme Cloud");
        assert!(email.body.contains("Senior Backend Engineer"));
        assert!(email.body.contains("- Payments API: https://example.com/payments"));
        assert!(email.body.contains("Ada Lovelace"));
        assert!(email.body.contains("Software Engineer | Analytical Engines"));
        assert!(email.body.contains("Email: ada@example.com"));
        assert!(email.body.contains("LinkedIn: https://linkedin.com/in/ada"));
        assert!(!email.body.contains("Phone:"));
    }

    #[test]
    fn test_empty_matches_use_fallback_sentence() {
        let email = compose(&job(), &[], &profile(), &options(1));
        assert!(email.body.contains(NO_MATCH_SENTENCE));
        assert!(!email.subject.is_empty());
    }

    #[test]
    fn test_unknown_role_and_company_read_naturally() {
        let email = compose(&JobRecord::sentinel(), &[], &UserProfile::default(), &options(3));
        assert_eq!(email.subject, "Application for the advertised position");
        assert!(!email.body.contains("Unknown Role"));
        assert!(email.body.contains(FALLBACK_COMPANY) || !email.body.contains("{company}"));
        assert!(!email.body.contains('{'));
    }

    #[test]
    fn test_greeting_never_names_an_unknown_company() {
        let job = JobRecord {
            company: None,
            ..job()
        };
        for tone in [Tone::Friendly, Tone::Enthusiastic] {
            for seed in 0..30 {
                let style = ComposeStyle {
                    tone,
                    ..ComposeStyle::default()
                };
                let email = compose(&job, &[], &profile(), &ComposeOptions::new(style, seed));
                let greeting = email.body.lines().next().unwrap();
                assert!(!greeting.contains(FALLBACK_COMPANY), "{tone:?}/{seed}: {greeting}");
                assert!(!greeting.contains('{'), "{tone:?}/{seed}: {greeting}");
            }
        }
    }

    #[test]
    fn test_greeting_can_name_a_known_company() {
        let style = ComposeStyle {
            tone: Tone::Friendly,
            ..ComposeStyle::default()
        };
        let named = (0..30).any(|seed| {
            compose(&job(), &[], &profile(), &ComposeOptions::new(style, seed))
                .body
                .starts_with("Hello Acme Cloud team,")
        });
        assert!(named);
    }

    #[test]
    fn test_value_paragraph_cites_overlap() {
        let email = compose(&job(), &[], &profile(), &options(5));
        // Only Python overlaps with the profile.
        assert!(email.body.contains("Python"));
        assert!(!email.body.contains("Python, Docker"));
    }

    #[test]
    fn test_signature_date_is_formatted() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let email = compose(&job(), &[], &profile(), &options(9).with_date(date));
        assert!(email.body.ends_with("Date: October 19, 2026"));
    }

    #[test]
    fn test_projects_focus_lists_projects_first_with_details() {
        let entries = catalog();
        let matches = vec![MatchResult { entry: &entries[0], score: 3.0 }];
        let style = ComposeStyle {
            focus: Focus::Projects,
            ..Default::default()
        };
        let email = compose(&job(), &matches, &profile(), &ComposeOptions::new(style, 11));
        assert!(email.body.contains("Ledger service handling card payouts."));
        let paragraphs: Vec<&str> = email.body.split("\n\n").collect();
        assert!(paragraphs[2].contains("Payments API"));
    }

    #[test]
    fn test_short_email_is_shorter_than_detailed() {
        let short = ComposeStyle {
            length: EmailLength::Short,
            ..Default::default()
        };
        let detailed = ComposeStyle {
            length: EmailLength::Detailed,
            ..Default::default()
        };
        let a = compose(&job(), &[], &profile(), &ComposeOptions::new(short, 2));
        let b = compose(&job(), &[], &profile(), &ComposeOptions::new(detailed, 2));
        assert!(a.body.len() < b.body.len());
        assert!(b.body.contains(EXCERPT_LEAD));
    }

    #[test]
    fn test_skill_overlap_is_fuzzy() {
        let job_skills: Vec<String> = ["PostgreSQL", "Node.js", "Go", "Kubernetes"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let profile_skills: Vec<String> = ["postgres", "nodejs", "Google Analytics", "Kubernetis"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let overlap = skill_overlap(&job_skills, &profile_skills);
        assert_eq!(overlap, vec!["PostgreSQL", "Node.js", "Kubernetes"]);
    }

    #[test]
    fn test_join_natural() {
        let items = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(join_natural(&items(&["A"])), "A");
        assert_eq!(join_natural(&items(&["A", "B"])), "A and B");
        assert_eq!(join_natural(&items(&["A", "B", "C"])), "A, B and C");
    }

    #[tokio::test]
    async fn test_backend_failure_falls_back_with_notice() {
        let backend = StubBackend(Err(()));
        let composed =
            compose_with_backend(&job(), &[], &profile(), &options(4), Some(&backend)).await;
        assert_eq!(composed.mode, ComposeMode::Template);
        assert_eq!(composed.email, compose(&job(), &[], &profile(), &options(4)));
        assert!(composed.notice.unwrap().contains("Rate limited"));
    }

    #[tokio::test]
    async fn test_backend_empty_reply_falls_back() {
        let backend = StubBackend(Ok(r#"{"subject": "", "body": ""}"#));
        let composed =
            compose_with_backend(&job(), &[], &profile(), &options(4), Some(&backend)).await;
        assert_eq!(composed.mode, ComposeMode::Template);
        assert!(composed.notice.is_some());
    }

    #[tokio::test]
    async fn test_backend_success_is_used() {
        let backend = StubBackend(Ok(r#"{"subject": "Hello Acme", "body": "Dear team, ..."}"#));
        let composed =
            compose_with_backend(&job(), &[], &profile(), &options(4), Some(&backend)).await;
        assert_eq!(composed.mode, ComposeMode::Generative);
        assert_eq!(composed.email.subject, "Hello Acme");
        assert!(composed.notice.is_none());
    }

    #[tokio::test]
    async fn test_template_mode_skips_configured_backend() {
        let backend = StubBackend(Ok(r#"{"subject": "Hello Acme", "body": "Dear team, ..."}"#));
        let composed = compose_requested(
            &job(),
            &[],
            &profile(),
            &options(4),
            RequestedMode::Template,
            Some(&backend),
        )
        .await;
        assert_eq!(composed.mode, ComposeMode::Template);
        assert!(composed.notice.is_none());
    }

    #[tokio::test]
    async fn test_generative_mode_without_backend_explains() {
        let composed = compose_requested(
            &job(),
            &[],
            &profile(),
            &options(4),
            RequestedMode::Generative,
            None,
        )
        .await;
        assert_eq!(composed.mode, ComposeMode::Template);
        assert_eq!(composed.notice.as_deref(), Some(NOT_CONFIGURED_NOTICE));
    }

    #[tokio::test]
    async fn test_no_backend_is_plain_template() {
        let composed = compose_with_backend(&job(), &[], &profile(), &options(4), None).await;
        assert_eq!(composed.mode, ComposeMode::Template);
        assert!(composed.notice.is_none());
    }
}
