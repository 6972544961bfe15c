use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, bail, Result};

use crate::llm_client::LlmConfig;
use crate::matching::scorer::{ScorerKind, DEFAULT_TOP_K};

/// Application configuration loaded from environment variables once at startup.
/// Core modules receive what they need from here; none of them read the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Portfolio CSV; seeded with the built-in catalog when the file is missing.
    pub portfolio_csv: Option<PathBuf>,
    pub fetch_timeout_secs: u64,
    pub default_top_k: usize,
    pub scorer: ScorerKind,
    pub job_cache_capacity: usize,
    /// `None` when `LLM_API_KEY` is unset: generative email mode is disabled.
    pub llm: Option<LlmConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let default_top_k: usize = parse_or(var("DEFAULT_TOP_K"), "DEFAULT_TOP_K", DEFAULT_TOP_K)?;
        if default_top_k == 0 {
            bail!("DEFAULT_TOP_K must be at least 1");
        }
        let fetch_timeout_secs: u64 = parse_or(var("FETCH_TIMEOUT_SECS"), "FETCH_TIMEOUT_SECS", 12)?;
        if fetch_timeout_secs == 0 {
            bail!("FETCH_TIMEOUT_SECS must be at least 1");
        }

        let llm = match var("LLM_API_KEY") {
            Some(api_key) => {
                let mut llm = LlmConfig::new(api_key);
                if let Some(model) = var("LLM_MODEL") {
                    llm.model = model;
                }
                if let Some(endpoint) = var("LLM_API_URL") {
                    llm.endpoint = endpoint;
                }
                llm.max_tokens = parse_or(var("LLM_MAX_TOKENS"), "LLM_MAX_TOKENS", llm.max_tokens)?;
                Some(llm)
            }
            None => None,
        };

        Ok(Config {
            port: parse_or(var("PORT"), "PORT", 8080)?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            portfolio_csv: var("PORTFOLIO_CSV").map(PathBuf::from),
            fetch_timeout_secs,
            default_top_k,
            scorer: parse_or(var("MATCH_SCORER"), "MATCH_SCORER", ScorerKind::default())?,
            job_cache_capacity: parse_or(var("JOB_CACHE_CAPACITY"), "JOB_CACHE_CAPACITY", 64)?,
            llm,
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow!("{key} has invalid value '{raw}': {e}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::DEFAULT_MODEL;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.fetch_timeout_secs, 12);
        assert_eq!(config.default_top_k, 3);
        assert_eq!(config.scorer, ScorerKind::Keyword);
        assert_eq!(config.job_cache_capacity, 64);
        assert!(config.portfolio_csv.is_none());
        assert!(config.llm.is_none());
    }

    #[test]
    fn test_llm_config_present_with_key() {
        let config = config_from(&[("LLM_API_KEY", "sk-test"), ("LLM_MAX_TOKENS", "512")]).unwrap();
        let llm = config.llm.unwrap();
        assert_eq!(llm.api_key, "sk-test");
        assert_eq!(llm.model, DEFAULT_MODEL);
        assert_eq!(llm.max_tokens, 512);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("PORT", "  "), ("LLM_API_KEY", "")]).unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.llm.is_none());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("MATCH_SCORER", "random")]).is_err());
        assert!(config_from(&[("DEFAULT_TOP_K", "0")]).is_err());
    }

    #[test]
    fn test_scorer_and_csv_overrides() {
        let config = config_from(&[
            ("MATCH_SCORER", "similarity"),
            ("PORTFOLIO_CSV", "data/portfolio.csv"),
        ])
        .unwrap();
        assert_eq!(config.scorer, ScorerKind::Similarity);
        assert_eq!(config.portfolio_csv, Some(PathBuf::from("data/portfolio.csv")));
    }
}
