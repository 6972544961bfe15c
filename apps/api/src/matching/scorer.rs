//! Skill Matcher: ranks portfolio entries against a set of query skills.
//!
//! Default: `KeywordScorer` (substring / whole-token rules, integer scores).
//! Alternative: `SimilarityScorer` (Jaro-Winkler against stack tokens).
//!
//! `AppState` holds an `Arc<dyn SkillScorer>`, chosen at startup via config.

use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use strsim::jaro_winkler;

use crate::models::portfolio::PortfolioEntry;

pub const DEFAULT_TOP_K: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// A catalog entry paired with its score. Borrowed from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchResult<'a> {
    pub entry: &'a PortfolioEntry,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Matched,
    NoMatch,
    EmptyQuery,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchReport<'a> {
    pub status: MatchStatus,
    pub scorer: &'static str,
    pub matches: Vec<MatchResult<'a>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Scores one entry against prepared query skills (trimmed, lower-cased,
/// non-empty). Implementations must be deterministic and never negative.
pub trait SkillScorer: Send + Sync {
    fn name(&self) -> &'static str;

    fn score(&self, skills: &[String], entry: &PortfolioEntry) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScorerKind {
    #[default]
    Keyword,
    Similarity,
}

impl ScorerKind {
    pub fn build(self) -> Arc<dyn SkillScorer> {
        match self {
            ScorerKind::Keyword => Arc::new(KeywordScorer),
            ScorerKind::Similarity => Arc::new(SimilarityScorer::default()),
        }
    }
}

impl FromStr for ScorerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keyword" => Ok(ScorerKind::Keyword),
            "similarity" => Ok(ScorerKind::Similarity),
            other => Err(format!("unknown scorer '{other}', expected 'keyword' or 'similarity'")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordScorer (default)
// ────────────────────────────────────────────────────────────────────────────

/// Per query skill, against the lower-cased `", "`-joined stack:
/// - skill is a substring of the stack → +3
/// - any word of the skill equals a whole stack token → +1
/// - otherwise → 0
pub struct KeywordScorer;

pub const SUBSTRING_POINTS: f64 = 3.0;
pub const TOKEN_POINTS: f64 = 1.0;

impl SkillScorer for KeywordScorer {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn score(&self, skills: &[String], entry: &PortfolioEntry) -> f64 {
        let stack = entry.stack_text().to_lowercase();
        let stack_tokens: Vec<&str> = tokens(&stack).collect();

        skills
            .iter()
            .map(|skill| {
                if stack.contains(skill.as_str()) {
                    SUBSTRING_POINTS
                } else if tokens(skill).any(|word| stack_tokens.contains(&word)) {
                    TOKEN_POINTS
                } else {
                    0.0
                }
            })
            .sum()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SimilarityScorer
// ────────────────────────────────────────────────────────────────────────────

/// Per query skill, the best Jaro-Winkler similarity against the stack items
/// and their tokens, counted only when it reaches `threshold`.
pub struct SimilarityScorer {
    pub threshold: f64,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self { threshold: 0.85 }
    }
}

impl SkillScorer for SimilarityScorer {
    fn name(&self) -> &'static str {
        "similarity"
    }

    fn score(&self, skills: &[String], entry: &PortfolioEntry) -> f64 {
        let items: Vec<String> = entry.tech_stack.iter().map(|s| s.to_lowercase()).collect();
        let candidates: Vec<&str> = items
            .iter()
            .map(String::as_str)
            .chain(items.iter().flat_map(|item| tokens(item)))
            .collect();

        skills
            .iter()
            .map(|skill| {
                let best = candidates
                    .iter()
                    .map(|candidate| jaro_winkler(skill, candidate))
                    .fold(0.0_f64, f64::max);
                if best >= self.threshold {
                    best
                } else {
                    0.0
                }
            })
            .sum()
    }
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | '/' | '(' | ')' | '|'))
        .filter(|token| !token.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Ranking
// ────────────────────────────────────────────────────────────────────────────

/// Trimmed, lower-cased, non-empty query skills.
pub fn prepare_query(query: &[String]) -> Vec<String> {
    query
        .iter()
        .map(|skill| skill.trim().to_lowercase())
        .filter(|skill| !skill.is_empty())
        .collect()
}

/// Top-`top_k` entries with a positive score, best first; ties keep catalog order.
pub fn match_skills_with<'a>(
    scorer: &dyn SkillScorer,
    query: &[String],
    catalog: &'a [PortfolioEntry],
    top_k: usize,
) -> Vec<MatchResult<'a>> {
    let skills = prepare_query(query);
    if skills.is_empty() || top_k == 0 {
        return Vec::new();
    }

    let mut results: Vec<MatchResult<'a>> = catalog
        .iter()
        .map(|entry| MatchResult {
            entry,
            score: scorer.score(&skills, entry),
        })
        .filter(|result| result.score > 0.0)
        .collect();

    // sort_by is stable, so equal scores stay in catalog order.
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results.truncate(top_k);
    results
}

/// Ranks the catalog and says whether the query was empty or found nothing.
pub fn rank_portfolio<'a>(
    scorer: &dyn SkillScorer,
    query: &[String],
    catalog: &'a [PortfolioEntry],
    top_k: usize,
) -> MatchReport<'a> {
    let matches = match_skills_with(scorer, query, catalog, top_k);
    let status = if prepare_query(query).is_empty() {
        MatchStatus::EmptyQuery
    } else if matches.is_empty() {
        MatchStatus::NoMatch
    } else {
        MatchStatus::Matched
    };

    MatchReport {
        status,
        scorer: scorer.name(),
        matches,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, stack: &str) -> PortfolioEntry {
        PortfolioEntry::new(title, stack, "", "https://example.com/p")
    }

    fn match_skills<'a>(
        query: &[String],
        catalog: &'a [PortfolioEntry],
        top_k: usize,
    ) -> Vec<MatchResult<'a>> {
        match_skills_with(&KeywordScorer, query, catalog, top_k)
    }

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn backend_and_frontend() -> Vec<PortfolioEntry> {
        vec![
            entry("Backend", "Python, Django, PostgreSQL"),
            entry("Frontend", "React, Node.js"),
        ]
    }

    #[test]
    fn test_python_sql_prefers_backend_entry() {
        let catalog = backend_and_frontend();
        let results = match_skills(&skills(&["Python", "SQL"]), &catalog, 3);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entry.title, "Backend");
        // Both skills are substrings of the stack ("sql" inside "postgresql").
        assert_eq!(results[0].score, 6.0);
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let catalog = backend_and_frontend();
        assert!(match_skills(&[], &catalog, 3).is_empty());
        assert!(match_skills(&skills(&["  ", ""]), &catalog, 3).is_empty());
    }

    #[test]
    fn test_top_k_zero_returns_nothing() {
        let catalog = backend_and_frontend();
        assert!(match_skills(&skills(&["Python"]), &catalog, 0).is_empty());
    }

    #[test]
    fn test_results_bounded_by_top_k() {
        let catalog = vec![
            entry("A", "Python"),
            entry("B", "Python, Flask"),
            entry("C", "Python, Django"),
            entry("D", "Python, FastAPI"),
        ];
        let results = match_skills(&skills(&["python"]), &catalog, 2);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = vec![entry("First", "Go, gRPC"), entry("Second", "Go, Kafka")];
        let results = match_skills(&skills(&["Go"]), &catalog, 3);
        let titles: Vec<&str> = results.iter().map(|r| r.entry.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn test_token_rule_awards_one_point() {
        let catalog = vec![entry("ML", "Python, Machine Learning, TensorFlow")];
        // "deep learning" is not a substring but "learning" is a whole token.
        let results = match_skills(&skills(&["Deep Learning"]), &catalog, 3);
        assert_eq!(results[0].score, TOKEN_POINTS);
    }

    #[test]
    fn test_token_rule_requires_whole_token() {
        let catalog = vec![entry("Web", "JavaScript, React")];
        assert!(match_skills(&skills(&["Java Spring"]), &catalog, 3).is_empty());
    }

    #[test]
    fn test_matching_is_deterministic() {
        let catalog = backend_and_frontend();
        let query = skills(&["python", "react", "node.js"]);
        let first = match_skills(&query, &catalog, 3);
        let second = match_skills(&query, &catalog, 3);
        assert_eq!(first, second);
    }

    #[test]
    fn test_adding_a_skill_never_lowers_scores() {
        let catalog = backend_and_frontend();
        let scorer = KeywordScorer;
        let base = prepare_query(&skills(&["python"]));
        let extended = prepare_query(&skills(&["python", "react"]));
        for e in &catalog {
            assert!(scorer.score(&extended, e) >= scorer.score(&base, e));
        }
    }

    #[test]
    fn test_skill_from_one_stack_never_narrows_its_lead() {
        let catalog = crate::matching::catalog::PortfolioCatalog::builtin();
        let entries = catalog.entries();
        let base = prepare_query(&skills(&["python", "react", "sql"]));
        let scorers: [&dyn SkillScorer; 2] = [&KeywordScorer, &SimilarityScorer::default()];

        for scorer in scorers {
            for a in entries {
                for b in entries {
                    let lead = scorer.score(&base, a) - scorer.score(&base, b);
                    let b_items: Vec<String> = b.tech_stack.iter().map(|s| s.to_lowercase()).collect();
                    for item in &a.tech_stack {
                        let item = item.to_lowercase();
                        if b_items.contains(&item) || base.contains(&item) {
                            continue;
                        }
                        let mut extended = base.clone();
                        extended.push(item.clone());
                        let new_lead = scorer.score(&extended, a) - scorer.score(&extended, b);
                        assert!(
                            new_lead >= lead - 1e-9,
                            "{}: adding {item} narrowed {} over {}",
                            scorer.name(),
                            a.title,
                            b.title
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_rank_portfolio_statuses() {
        let catalog = backend_and_frontend();
        let scorer = KeywordScorer;
        assert_eq!(
            rank_portfolio(&scorer, &[], &catalog, 3).status,
            MatchStatus::EmptyQuery
        );
        assert_eq!(
            rank_portfolio(&scorer, &skills(&["COBOL"]), &catalog, 3).status,
            MatchStatus::NoMatch
        );
        let report = rank_portfolio(&scorer, &skills(&["React"]), &catalog, 3);
        assert_eq!(report.status, MatchStatus::Matched);
        assert_eq!(report.scorer, "keyword");
    }

    #[test]
    fn test_similarity_scorer_tolerates_spelling_variants() {
        let catalog = vec![entry("Data", "PostgreSQL, Kubernetes"), entry("Web", "React")];
        let scorer = SimilarityScorer::default();
        let results = match_skills_with(&scorer, &skills(&["Postgres", "Kubernetis"]), &catalog, 3);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entry.title, "Data");
        assert!(results[0].score > 1.7);
    }

    #[test]
    fn test_similarity_scorer_ignores_distant_words() {
        let catalog = vec![entry("Web", "React, Node.js")];
        let scorer = SimilarityScorer::default();
        assert!(match_skills_with(&scorer, &skills(&["Haskell"]), &catalog, 3).is_empty());
    }

    #[test]
    fn test_scorer_kind_parsing() {
        assert_eq!("keyword".parse::<ScorerKind>(), Ok(ScorerKind::Keyword));
        assert_eq!(" Similarity ".parse::<ScorerKind>(), Ok(ScorerKind::Similarity));
        assert!("fuzzy".parse::<ScorerKind>().is_err());
        assert_eq!(ScorerKind::Similarity.build().name(), "similarity");
    }
}
