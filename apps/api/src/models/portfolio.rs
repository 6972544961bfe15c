use serde::{Deserialize, Serialize};

/// One portfolio project offered as evidence of a skill set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    pub title: String,
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub description: String,
    pub link: String,
}

impl PortfolioEntry {
    /// Builds an entry from a comma-separated stack string such as `"Python, Django"`.
    pub fn new(title: &str, tech_stack: &str, description: &str, link: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            tech_stack: split_stack(tech_stack),
            description: description.trim().to_string(),
            link: link.trim().to_string(),
        }
    }

    /// The stack rendered the way it is matched against: `", "`-joined.
    pub fn stack_text(&self) -> String {
        self.tech_stack.join(", ")
    }
}

/// Splits a stack string into trimmed, case-insensitively unique items.
pub fn split_stack(raw: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in raw.split([',', ';', '\n']) {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        if !items.iter().any(|existing| existing.eq_ignore_ascii_case(item)) {
            items.push(item.to_string());
        }
    }
    items
}
