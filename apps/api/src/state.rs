use std::sync::Arc;

use crate::cache::JobCache;
use crate::config::Config;
use crate::fetch::PageFetcher;
use crate::llm_client::EmailBackend;
use crate::matching::catalog::PortfolioCatalog;
use crate::matching::scorer::SkillScorer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup, apart from the job cache.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog: Arc<PortfolioCatalog>,
    /// Pluggable scorer. Default: KeywordScorer. Swap via MATCH_SCORER.
    pub scorer: Arc<dyn SkillScorer>,
    pub fetcher: Arc<dyn PageFetcher>,
    /// `None` disables generative email mode.
    pub email_backend: Option<Arc<dyn EmailBackend>>,
    pub job_cache: Arc<JobCache>,
}

impl AppState {
    pub fn new(
        config: Config,
        catalog: PortfolioCatalog,
        fetcher: Arc<dyn PageFetcher>,
        email_backend: Option<Arc<dyn EmailBackend>>,
    ) -> Self {
        Self {
            scorer: config.scorer.build(),
            job_cache: Arc::new(JobCache::new(config.job_cache_capacity)),
            catalog: Arc::new(catalog),
            fetcher,
            email_backend,
            config,
        }
    }
}
