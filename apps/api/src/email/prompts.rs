// Prompt payload for the generative email backend.
// Reuses cross-cutting fragments from llm_client::prompts.

use serde::{Deserialize, Serialize};

use crate::email::composer::{ComposeStyle, EmailDocument};
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::{strip_json_fences, LlmError};
use crate::matching::scorer::MatchResult;
use crate::models::job::JobRecord;
use crate::models::profile::UserProfile;

pub fn email_system() -> String {
    format!(
        "You are an experienced career coach writing concise, personal cold emails \
         to hiring managers. {JSON_ONLY_SYSTEM}"
    )
}

/// Replace: {grounding_instruction}, {payload_json}
pub const EMAIL_PROMPT_TEMPLATE: &str = r#"{grounding_instruction}

Write a cold email for the job application described below. The payload contains the
job record, the candidate profile, the best-matching portfolio projects, the requested
style, and a template draft you may improve on.

PAYLOAD:
{payload_json}

Return a JSON object with this EXACT schema:
{
  "subject": "Application for Senior Backend Engineer at Acme",
  "body": "Dear Hiring Team,\n\n..."
}

HARD RULES:
1. Follow the requested tone, length and focus
2. Mention every listed project with its link; if there are none, offer work samples on request
3. End the body with the candidate's signature block exactly as in the draft"#;

#[derive(Debug, Serialize)]
struct ProjectPayload<'a> {
    title: &'a str,
    tech_stack: &'a [String],
    description: &'a str,
    link: &'a str,
    score: f64,
}

#[derive(Debug, Serialize)]
struct EmailPayload<'a> {
    job: &'a JobRecord,
    profile: &'a UserProfile,
    projects: Vec<ProjectPayload<'a>>,
    style: &'a ComposeStyle,
    draft: &'a EmailDocument,
}

pub fn build_email_prompt(
    job: &JobRecord,
    matches: &[MatchResult<'_>],
    profile: &UserProfile,
    style: &ComposeStyle,
    draft: &EmailDocument,
) -> Result<String, serde_json::Error> {
    let payload = EmailPayload {
        job,
        profile,
        projects: matches
            .iter()
            .map(|m| ProjectPayload {
                title: &m.entry.title,
                tech_stack: &m.entry.tech_stack,
                description: &m.entry.description,
                link: &m.entry.link,
                score: m.score,
            })
            .collect(),
        style,
        draft,
    };

    let payload_json = serde_json::to_string_pretty(&payload)?;
    Ok(EMAIL_PROMPT_TEMPLATE
        .replace("{grounding_instruction}", GROUNDING_INSTRUCTION)
        .replace("{payload_json}", &payload_json))
}

#[derive(Debug, Deserialize)]
struct GeneratedEmail {
    subject: String,
    body: String,
}

/// Parses the backend reply; blank fields count as empty content.
pub fn parse_generated_email(reply: &str) -> Result<EmailDocument, LlmError> {
    let generated: GeneratedEmail = serde_json::from_str(strip_json_fences(reply))?;
    let subject = generated.subject.trim();
    let body = generated.body.trim();
    if subject.is_empty() || body.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    Ok(EmailDocument {
        subject: subject.to_string(),
        body: body.to_string(),
    })
}
