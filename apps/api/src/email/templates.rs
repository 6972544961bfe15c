//! Phrasing tables for the template composer: per-audience sets, shared sets,
//! tone overrides, and the audience / industry detection that picks them.
//!
//! Placeholders (`{role}`, `{company}`, `{skills}`, `{experience}`,
//! `{industry}`) are filled by `fill`.

use serde::{Deserialize, Serialize};

use crate::extraction::rules::{category_of, SkillCategory};
use crate::models::job::JobRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    Technical,
    NonTechnical,
    Executive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Enthusiastic,
}

/// Audience-specific phrasing.
#[derive(Debug)]
pub struct PhraseSet {
    pub greetings: &'static [&'static str],
    pub introductions: &'static [&'static str],
    pub value_propositions: &'static [&'static str],
    pub achievements: &'static [&'static str],
}

// ────────────────────────────────────────────────────────────────────────────
// Audience sets
// ────────────────────────────────────────────────────────────────────────────

const TECHNICAL: PhraseSet = PhraseSet {
    greetings: &["Dear Hiring Manager,", "Dear Hiring Team,", "Dear Engineering Team,"],
    introductions: &[
        "I am writing to express my interest in the {role} position at {company}.",
        "I would like to apply for the {role} position at {company}, as my experience lines up closely with what the team is looking for.",
        "I am reaching out about the {role} opening at {company}.",
    ],
    value_propositions: &[
        "With {experience} of hands-on work in {skills}, I am confident I can contribute from the first sprint.",
        "My background in {skills} has given me the technical depth and problem-solving habits this role calls for.",
        "I have a track record of shipping production work in {skills}, and I would bring the same care to your team.",
    ],
    achievements: &[
        "In previous roles I have delivered measurable improvements in reliability and performance.",
        "I have taken complex features from design through to production, on time and with solid test coverage.",
        "I enjoy turning ambiguous technical problems into simple, maintainable systems.",
    ],
};

const NON_TECHNICAL: PhraseSet = PhraseSet {
    greetings: &["Dear Hiring Manager,", "Dear Selection Committee,", "Dear Hiring Team,"],
    introductions: &[
        "I am writing to express my interest in the {role} position at {company}, which fits closely with my professional background.",
        "I am pleased to submit my application for the {role} position at {company}.",
        "I am applying for the {role} position at {company}, confident that my experience makes me a strong candidate.",
    ],
    value_propositions: &[
        "With {experience} of professional experience in {skills}, I bring the skill set and judgment this position requires.",
        "My background in {skills} has taught me to deliver reliable results in fast-moving environments.",
        "I offer a practical combination of {skills} that helps me turn challenges into measurable outcomes.",
    ],
    achievements: &[
        "I have consistently exceeded targets and delivered strong results under tight timelines.",
        "I have built lasting relationships with stakeholders at every level of the organization.",
        "My structured approach to problem solving has helped teams find and act on improvement opportunities.",
    ],
};

const EXECUTIVE: PhraseSet = PhraseSet {
    greetings: &["Dear Hiring Committee,", "Dear Selection Board,", "Dear Leadership Team,"],
    introductions: &[
        "I am writing to express my interest in the {role} position at {company}, where my leadership experience fits your strategic direction.",
        "I am submitting my application for the {role} position at {company}, bringing a record of leading teams through growth.",
        "I am applying for the {role} position at {company} with a proven track record of driving organizational results.",
    ],
    value_propositions: &[
        "With {experience} of leadership experience in {skills}, I have developed and executed strategies that drive growth.",
        "My expertise in {skills} has helped organizations through transformative periods while delivering sustainable results.",
        "I bring a record of leadership in {skills}, with particular strength in building high-performing teams.",
    ],
    achievements: &[
        "I have led organizational changes that produced significant gains in efficiency and market position.",
        "I have built and mentored leadership teams that consistently exceeded business objectives.",
        "My teams have delivered strong financial results in demanding market conditions.",
    ],
};

pub fn phrases_for(audience: Audience) -> &'static PhraseSet {
    match audience {
        Audience::Technical => &TECHNICAL,
        Audience::NonTechnical => &NON_TECHNICAL,
        Audience::Executive => &EXECUTIVE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared sets
// ────────────────────────────────────────────────────────────────────────────

pub const COMPANY_PRAISE: &[&str] = &[
    "I have long admired {company}'s reputation for excellence in the {industry} space.",
    "{company}'s approach to {industry} and its strong values resonate with how I like to work.",
    "I have been impressed by {company}'s commitment to quality, which makes this opportunity particularly appealing.",
];

pub const PORTFOLIO_MENTIONS: &[&str] = &[
    "Here are a few projects that show relevant work:",
    "Some examples of my previous work that fit this role:",
    "You can find related work in these portfolio pieces:",
];

pub const CALLS_TO_ACTION: &[&str] = &[
    "I would welcome the chance to discuss how my experience could contribute to {company}'s continued success.",
    "I am available for a conversation at your convenience to explore how I could add value to the team.",
    "I look forward to the possibility of discussing this opportunity further.",
];

pub const CLOSINGS: &[&str] = &["Sincerely,", "Kind regards,", "With best regards,"];

/// Used in place of the project list when nothing matched.
pub const NO_MATCH_SENTENCE: &str =
    "I would be glad to share work samples relevant to this role on request.";

// ────────────────────────────────────────────────────────────────────────────
// Tone overrides
// ────────────────────────────────────────────────────────────────────────────

/// Phrasing a tone swaps in. `None` keeps the audience set.
#[derive(Debug)]
pub struct TonePhrasing {
    pub greetings: Option<&'static [&'static str]>,
    pub closings: &'static [&'static str],
    /// Extra sentence after the introduction.
    pub warmth: Option<&'static [&'static str]>,
}

pub fn tone_phrasing(tone: Tone) -> TonePhrasing {
    match tone {
        Tone::Professional => TonePhrasing {
            greetings: None,
            closings: CLOSINGS,
            warmth: None,
        },
        Tone::Friendly => TonePhrasing {
            greetings: Some(&["Hi there,", "Hello {company} team,", "Hi Hiring Team,"]),
            closings: &["Best,", "Warm regards,", "Cheers,"],
            warmth: Some(&[
                "I have enjoyed following the work your team shares publicly.",
                "It would be great to bring my experience to a team like yours.",
            ]),
        },
        Tone::Enthusiastic => TonePhrasing {
            greetings: Some(&["Hello {company} team!", "Hi Hiring Team!", "Hello there!"]),
            closings: &["Excited to hear from you,", "All the best,", "With enthusiasm,"],
            warmth: Some(&[
                "I was genuinely excited to come across this opening!",
                "This is exactly the kind of role I have been hoping to find!",
            ]),
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Detection
// ────────────────────────────────────────────────────────────────────────────

const EXECUTIVE_KEYWORDS: &[&str] = &[
    "director",
    "vp",
    "vice president",
    "c-level",
    "chief",
    "head of",
    "managing director",
];

/// Years at or above which a role is treated as executive.
pub const EXECUTIVE_YEARS: u32 = 8;

const TECHNICAL_KEYWORDS: &[&str] = &[
    "developer", "engineer", "programmer", "technical", "technology", "software", "data",
    "system", "network", "devops", "cyber", "security", "architect", "scientist", "database",
    "cloud", "backend", "frontend", "fullstack", "full stack",
];

pub fn detect_audience(job: &JobRecord) -> Audience {
    let role = job.role.to_lowercase();
    let role_words: Vec<&str> = role
        .split(|c: char| !c.is_alphanumeric() && c != '-')
        .filter(|w| !w.is_empty())
        .collect();

    let executive_title = EXECUTIVE_KEYWORDS.iter().any(|keyword| {
        if keyword.contains(' ') {
            role.contains(keyword)
        } else {
            role_words.contains(keyword)
        }
    });
    if executive_title || job.experience_years().is_some_and(|y| y >= EXECUTIVE_YEARS) {
        return Audience::Executive;
    }

    let technical_role = TECHNICAL_KEYWORDS.iter().any(|keyword| role.contains(keyword));
    let technical_skills = job
        .skills
        .iter()
        .any(|skill| category_of(skill) == Some(SkillCategory::Technical));
    if technical_role || technical_skills {
        Audience::Technical
    } else {
        Audience::NonTechnical
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Technology,
    FinancialServices,
    Healthcare,
    Retail,
    ProfessionalServices,
    General,
}

impl Industry {
    pub fn label(self) -> &'static str {
        match self {
            Industry::Technology => "technology",
            Industry::FinancialServices => "financial services",
            Industry::Healthcare => "healthcare",
            Industry::Retail => "retail",
            Industry::ProfessionalServices => "professional services",
            Industry::General => "industry",
        }
    }
}

const INDUSTRY_KEYWORDS: &[(Industry, &[&str])] = &[
    (Industry::Technology, &["tech", "software", "computer", "data", "cloud", "labs", "ai"]),
    (Industry::FinancialServices, &["finance", "financial", "bank", "investment", "capital", "insurance"]),
    (Industry::Healthcare, &["health", "medical", "pharma", "care", "clinic", "bio"]),
    (Industry::Retail, &["retail", "shop", "store", "commerce", "market"]),
    (Industry::ProfessionalServices, &["consulting", "advisor", "advisory", "services", "partners"]),
];

/// Industry guessed from keywords in the company name.
pub fn detect_industry(company: Option<&str>) -> Industry {
    let Some(company) = company else {
        return Industry::General;
    };
    let company = company.to_lowercase();
    let words: Vec<&str> = company
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    INDUSTRY_KEYWORDS
        .iter()
        .find(|(_, keywords)| {
            keywords.iter().any(|keyword| {
                // Two-letter keywords must be whole words ("ai" is not "Dairy").
                if keyword.len() <= 2 {
                    words.contains(keyword)
                } else {
                    company.contains(keyword)
                }
            })
        })
        .map(|(industry, _)| *industry)
        .unwrap_or(Industry::General)
}

/// Replaces every `{key}` with its value.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_string(), |text, (key, value)| {
        text.replace(&format!("{{{key}}}"), value)
    })
}
