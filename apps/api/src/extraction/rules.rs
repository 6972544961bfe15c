//! Extraction rule table: role labels, company labels, experience pattern and
//! the skill dictionary, kept in one place and versioned as a unit.
//!
//! Bump `RULES_VERSION` whenever a pattern or dictionary entry changes, since
//! the same text may then extract differently.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const RULES_VERSION: u32 = 4;

// ────────────────────────────────────────────────────────────────────────────
// Label rules (role, company)
// ────────────────────────────────────────────────────────────────────────────

/// A `label: value` rule. The captured value runs to the end of the line or
/// to the first `|` / `;`.
pub struct LabelRule {
    pub name: &'static str,
    pub pattern: Regex,
    /// Page titles carry site names (`Engineer | Acme Careers`) that need cutting.
    pub is_page_title: bool,
}

fn label_rule(name: &'static str, labels: &str, is_page_title: bool) -> LabelRule {
    let pattern = format!(r"(?im)^[ \t]*(?:{labels})[ \t]*[:：][ \t]*([^\n]+)$");
    LabelRule {
        name,
        pattern: Regex::new(&pattern).expect("valid label pattern"),
        is_page_title,
    }
}

/// Role rules in priority order. The first rule producing a candidate of
/// plausible length wins.
pub static ROLE_RULES: LazyLock<Vec<LabelRule>> = LazyLock::new(|| {
    vec![
        label_rule("position", r"position|open\s+position", false),
        label_rule("role", r"role|job\s+role", false),
        label_rule("job_title", r"job\s+title|position\s+title", false),
        label_rule("page_title", r"title|page\s+title", true),
    ]
});

/// Title-cased job noun phrase, e.g. "Senior Backend Engineer" or "Head of Sales".
pub static ROLE_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:(?:Head|Director|VP|Vice President) of (?:[A-Z][\w&+#./-]*\s?){1,3}|(?:[A-Z][\w+#./-]*[ \t]+){0,4}(?:Engineer|Developer|Programmer|Manager|Analyst|Designer|Scientist|Architect|Consultant|Specialist|Executive|Administrator|Director|Officer|Intern|Coordinator|Representative|Recruiter|Accountant|Writer|Strategist|Researcher|Lead))\b",
    )
    .expect("valid role phrase pattern")
});

pub const ROLE_MIN_CHARS: usize = 4;
pub const ROLE_MAX_CHARS: usize = 100;

pub static COMPANY_RULES: LazyLock<Vec<LabelRule>> = LazyLock::new(|| {
    vec![
        label_rule("company", r"company|company\s+name", false),
        label_rule("employer", r"employer|hiring\s+company", false),
        label_rule("organization", r"organi[sz]ation", false),
    ]
});

pub const COMPANY_MIN_CHARS: usize = 2;
pub const COMPANY_MAX_CHARS: usize = 80;

/// Separators that split a page title into role and site name.
pub const PAGE_TITLE_SEPARATORS: &[&str] = &[" | ", " - ", " – ", " — ", " at ", " @ "];

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

/// `3 years`, `5+ years`, `10+ yrs`, `3-5 years` (captures the 5).
pub static EXPERIENCE_YEARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})[ \t]*\+?[ \t]*(?:years?|yrs?)\b").expect("valid experience pattern")
});

// ────────────────────────────────────────────────────────────────────────────
// Description
// ────────────────────────────────────────────────────────────────────────────

pub const DESCRIPTION_MIN_SENTENCE_CHARS: usize = 20;
pub const DESCRIPTION_MAX_SENTENCES: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Skill dictionary
// ────────────────────────────────────────────────────────────────────────────

/// Dictionary categories. Declaration order is cap priority: when more skills
/// are found than fit, technical ones are kept first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Technical,
    Tool,
    Soft,
}

/// One dictionary entry: canonical display name plus the surface forms that
/// map to it.
struct SkillDef {
    name: &'static str,
    category: SkillCategory,
    aliases: &'static [&'static str],
    /// Names that collide with ordinary English words are matched case-sensitively.
    case_sensitive: bool,
    /// The bare name also opens ordinary sentences ("Go beyond", "Express
    /// yourself"), so it only counts mid-sentence. Aliases are unaffected.
    mid_sentence_only: bool,
}

const fn skill_def(
    name: &'static str,
    category: SkillCategory,
    aliases: &'static [&'static str],
    case_sensitive: bool,
    mid_sentence_only: bool,
) -> SkillDef {
    SkillDef { name, category, aliases, case_sensitive, mid_sentence_only }
}

const fn tech(name: &'static str, aliases: &'static [&'static str]) -> SkillDef {
    skill_def(name, SkillCategory::Technical, aliases, false, false)
}

const fn tech_exact(name: &'static str, aliases: &'static [&'static str]) -> SkillDef {
    skill_def(name, SkillCategory::Technical, aliases, true, false)
}

const fn tech_word(name: &'static str, aliases: &'static [&'static str]) -> SkillDef {
    skill_def(name, SkillCategory::Technical, aliases, true, true)
}

const fn tool(name: &'static str, aliases: &'static [&'static str]) -> SkillDef {
    skill_def(name, SkillCategory::Tool, aliases, false, false)
}

const fn tool_exact(name: &'static str, aliases: &'static [&'static str]) -> SkillDef {
    skill_def(name, SkillCategory::Tool, aliases, true, false)
}

const fn tool_word(name: &'static str, aliases: &'static [&'static str]) -> SkillDef {
    skill_def(name, SkillCategory::Tool, aliases, true, true)
}

const fn soft(name: &'static str, aliases: &'static [&'static str]) -> SkillDef {
    skill_def(name, SkillCategory::Soft, aliases, false, false)
}

#[rustfmt::skip]
const SKILL_DEFS: &[SkillDef] = &[
    // Languages
    tech("Python", &[]),
    tech("JavaScript", &["JS", "ECMAScript"]),
    tech("TypeScript", &[]),
    tech("Java", &[]),
    tech("C++", &["CPP"]),
    tech("C#", &["CSharp"]),
    tech_word("Go", &["Golang"]),
    tech_exact("Rust", &[]),
    tech("Ruby", &[]),
    tech("PHP", &[]),
    tech_word("Swift", &[]),
    tech("Kotlin", &[]),
    tech("Scala", &[]),
    tech_exact("R", &[]),
    tech("SQL", &[]),
    tech("HTML", &["HTML5"]),
    tech("CSS", &["CSS3"]),
    tech("GraphQL", &[]),
    tech("Bash", &["Shell Scripting"]),
    // Frameworks and runtimes
    tech("React", &["React.js", "ReactJS"]),
    tech("React Native", &[]),
    tech("Angular", &["AngularJS"]),
    tech("Vue.js", &["Vue", "VueJS"]),
    tech("Next.js", &["NextJS"]),
    tech("Node.js", &["NodeJS"]),
    tech_word("Express", &["Express.js", "ExpressJS"]),
    tech("Django", &[]),
    tech("Flask", &[]),
    tech("FastAPI", &[]),
    tech_exact("Spring Boot", &["Spring Framework", "Spring MVC"]),
    tech("Ruby on Rails", &["Rails"]),
    tech(".NET", &["dotnet", "ASP.NET"]),
    tech("Flutter", &[]),
    tech("TensorFlow", &[]),
    tech("PyTorch", &[]),
    tech("Scikit-learn", &["sklearn"]),
    tech("Pandas", &[]),
    tech("NumPy", &[]),
    tech_word("Spark", &["Apache Spark", "PySpark"]),
    tech("Kafka", &["Apache Kafka"]),
    // Data stores
    tech("PostgreSQL", &["Postgres"]),
    tech("MySQL", &[]),
    tech("MongoDB", &["Mongo"]),
    tech("Redis", &[]),
    tech("Elasticsearch", &[]),
    tech("DynamoDB", &[]),
    tech("Firebase", &[]),
    // Cloud and delivery
    tech("AWS", &["Amazon Web Services"]),
    tech("Azure", &["Microsoft Azure"]),
    tech("GCP", &["Google Cloud", "Google Cloud Platform"]),
    tech("Docker", &[]),
    tech("Kubernetes", &["K8s"]),
    tech("Terraform", &[]),
    tech("CI/CD", &["CICD", "Continuous Integration"]),
    tech("Linux", &[]),
    tech("Microservices", &["Microservice"]),
    tech_exact("REST APIs", &["REST", "RESTful", "REST API"]),
    // Disciplines
    tech("Machine Learning", &["ML"]),
    tech("Deep Learning", &[]),
    tech("NLP", &["Natural Language Processing"]),
    tech("Computer Vision", &[]),
    tech("Data Analysis", &["Data Analytics"]),
    tech("Data Visualization", &[]),
    tech("Statistics", &["Statistical Analysis"]),
    tech("Cloud Architecture", &[]),
    tech("System Design", &[]),
    tech("Cybersecurity", &["Information Security", "Security Engineering"]),
    tech("DevOps", &[]),
    tech("Financial Modeling", &[]),
    tech("Digital Marketing", &[]),
    tech("SEO", &["Search Engine Optimization"]),
    // Tools
    tool("Git", &["GitHub", "GitLab"]),
    tool("Jira", &[]),
    tool("Confluence", &[]),
    tool("Figma", &[]),
    tool_word("Sketch", &[]),
    tool("Tableau", &[]),
    tool("Power BI", &["PowerBI"]),
    tool_exact("Excel", &["Microsoft Excel", "MS Excel"]),
    tool("Salesforce", &[]),
    tool("HubSpot", &[]),
    tool("CRM", &[]),
    tool("Jenkins", &[]),
    tool("Postman", &[]),
    tool("Google Analytics", &[]),
    // Soft skills and practices
    soft("Communication", &["Communication Skills", "Written Communication"]),
    soft("Leadership", &["Team Leadership"]),
    soft("Teamwork", &["Collaboration", "Team Player"]),
    soft("Problem Solving", &["Problem-Solving"]),
    soft("Critical Thinking", &[]),
    soft("Project Management", &[]),
    soft("Stakeholder Management", &[]),
    soft("Time Management", &[]),
    soft("Negotiation", &[]),
    soft("Mentoring", &["Mentorship"]),
    soft("Agile", &["Scrum", "Kanban"]),
    soft("Sales", &["Enterprise Sales"]),
    soft("Lead Generation", &["Lead Gen"]),
    soft("Customer Service", &["Customer Support"]),
    soft("Relationship Management", &["Account Management"]),
    soft("Attention to Detail", &["Detail-Oriented", "Detail Oriented"]),
    soft("Adaptability", &[]),
    soft("Presentation Skills", &["Public Speaking"]),
];

/// A compiled dictionary entry.
pub struct SkillRule {
    pub name: &'static str,
    pub category: SkillCategory,
    pub pattern: Regex,
}

/// Compiled skill dictionary, in declaration order.
pub static SKILL_RULES: LazyLock<Vec<SkillRule>> = LazyLock::new(|| {
    SKILL_DEFS
        .iter()
        .map(|def| SkillRule {
            name: def.name,
            category: def.category,
            pattern: skill_pattern(def),
        })
        .collect()
});

/// No word character (nor `+`, `#`, `.`, `&`) may precede a surface form.
const LEADING: &str = r"(?:^|[^\w+#.&])";

/// Preceded by a word or punctuation on the same line, but not by the start
/// of a line or a sentence-ending `.`, `!` or `?`.
const MID_SENTENCE_LEADING: &str = r"(?:[^\s.!?][ \t]+|[,;/(])";

/// A name alone on its line or heading a comma list (`Go, Rust`) is a skill
/// list entry rather than the start of a sentence.
fn list_entry(name: &str) -> String {
    format!(r"(?m:^)[ \t]*(?:{name})[ \t]*(?:,|(?m:$))")
}

/// No word character (nor `+`, `#`, `&`) may follow. A `.` may follow only
/// when it is not itself continued by a word character, so `AWS.` and
/// `AWS...` match while `Node.jsx` does not match `Node.js`.
const TRAILING: &str = r"(?:$|[^\w+#.&]|\.(?:\W|$))";

/// Builds a boundary-aware alternation over a skill's surface forms.
///
/// `\b` is not usable because names start or end with `+`, `#` or `.`, so the
/// boundaries are spelled out in `LEADING` and `TRAILING`.
fn skill_pattern(def: &SkillDef) -> Regex {
    let mut forms: Vec<&str> = def.aliases.to_vec();
    if !def.mid_sentence_only {
        forms.push(def.name);
    }

    let mut branches = Vec::with_capacity(3);
    if !forms.is_empty() {
        branches.push(format!("{LEADING}(?:{})", alternation(forms)));
    }
    if def.mid_sentence_only {
        let name = alternation(vec![def.name]);
        branches.push(format!("{MID_SENTENCE_LEADING}(?:{name})"));
        branches.push(list_entry(&name));
    }

    let flags = if def.case_sensitive { "" } else { "(?i)" };
    let pattern = format!("{flags}(?:{}){TRAILING}", branches.join("|"));
    Regex::new(&pattern).expect("valid skill pattern")
}

fn alternation(mut forms: Vec<&str>) -> String {
    // Longest first: the alternation is leftmost-first, "Google Cloud Platform" before "Google Cloud".
    forms.sort_by_key(|f| std::cmp::Reverse(f.len()));
    forms
        .iter()
        .map(|form| regex::escape(form).replace(' ', r"[\s-]+"))
        .collect::<Vec<_>>()
        .join("|")
}

/// Category of a canonical skill name, if it is in the dictionary.
pub fn category_of(name: &str) -> Option<SkillCategory> {
    SKILL_RULES
        .iter()
        .find(|rule| rule.name.eq_ignore_ascii_case(name))
        .map(|rule| rule.category)
}
