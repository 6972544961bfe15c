//! Bounded cache of parsed job postings, keyed by normalized URL.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;
use url::Url;

use crate::models::job::JobRecord;

/// Lower-cased scheme and host, fragment removed, trailing slash trimmed.
/// Unparsable input is only trimmed.
pub fn cache_key(url: &str) -> String {
    match Url::parse(url.trim()) {
        Ok(mut parsed) => {
            parsed.set_fragment(None);
            parsed.as_str().trim_end_matches('/').to_string()
        }
        Err(_) => url.trim().to_string(),
    }
}

#[derive(Default)]
struct Entries {
    records: HashMap<String, Arc<JobRecord>>,
    /// Insertion order, oldest first.
    order: VecDeque<String>,
}

/// Records are written once and shared as `Arc`s; the oldest entry is
/// evicted when full. A capacity of 0 disables caching.
pub struct JobCache {
    capacity: usize,
    entries: RwLock<Entries>,
}

impl JobCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: RwLock::new(Entries::default()),
        }
    }

    pub async fn get(&self, url: &str) -> Option<Arc<JobRecord>> {
        let key = cache_key(url);
        self.entries.read().await.records.get(&key).cloned()
    }

    /// Stores `record` unless the URL is already cached, and returns the
    /// shared record now held for that URL.
    pub async fn insert(&self, url: &str, record: JobRecord) -> Arc<JobRecord> {
        let record = Arc::new(record);
        if self.capacity == 0 {
            return record;
        }

        let key = cache_key(url);
        let mut entries = self.entries.write().await;
        if let Some(existing) = entries.records.get(&key) {
            return Arc::clone(existing);
        }

        while entries.order.len() >= self.capacity {
            match entries.order.pop_front() {
                Some(oldest) => {
                    debug!("Evicting cached job {}", oldest);
                    entries.records.remove(&oldest);
                }
                None => break,
            }
        }

        entries.order.push_back(key.clone());
        entries.records.insert(key, Arc::clone(&record));
        record
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.records.len()
    }
}
