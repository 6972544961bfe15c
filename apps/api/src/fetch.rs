//! Page Fetcher: retrieves a posting or profile page and reduces it to text.
//!
//! All network I/O for pages goes through `PageFetcher`, so handlers and the
//! pipeline can be exercised with a stub in tests.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("page returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("page has no readable text")]
    EmptyBody,
}

/// Fetches a page and returns its visible text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 12,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Accepts absolute `http`/`https` URLs with a host.
pub fn validate_url(url: &str) -> Result<Url, FetchError> {
    let invalid = |reason: &str| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    };

    let parsed = Url::parse(url.trim()).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if parsed.host_str().filter(|host| !host.is_empty()).is_none() {
        return Err(invalid("missing host"));
    }
    Ok(parsed)
}

/// reqwest-backed fetcher with a fixed timeout and browser user agent.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout_secs: u64,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs: config.timeout_secs,
        })
    }

    fn map_send_error(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                seconds: self.timeout_secs,
            }
        } else {
            FetchError::Network(error.to_string())
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = validate_url(url)?;
        info!("Fetching page: {}", parsed);

        let response = self
            .client
            .get(parsed)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Page fetch returned {} for {}", status, url);
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let html = response.text().await.map_err(|e| self.map_send_error(e))?;
        let text = html_to_text(&html);
        if text.trim().is_empty() {
            return Err(FetchError::EmptyBody);
        }

        debug!("Fetched {} chars of text from {}", text.len(), url);
        Ok(text)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HTML to text
// ────────────────────────────────────────────────────────────────────────────

static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("valid title selector"));
static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("valid body selector"));

const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "iframe", "head", "svg", "template"];

const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "tr", "section",
    "article", "header", "footer", "main", "aside", "nav", "br", "table", "dd", "dt",
];

/// Page title as a `Title:` line, then the body text with block elements on
/// their own lines. Whitespace cleanup is left to the normalizer.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();

    if let Some(title) = document.select(&TITLE).next() {
        let title = title.text().collect::<String>();
        let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
        if !title.is_empty() {
            out.push_str("Title: ");
            out.push_str(&title);
            out.push('\n');
        }
    }

    let root = document
        .select(&BODY)
        .next()
        .unwrap_or_else(|| document.root_element());
    collect_text(root, &mut out);
    out
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            let name = child.value().name();
            if SKIPPED_ELEMENTS.contains(&name) {
                continue;
            }
            let block = BLOCK_ELEMENTS.contains(&name);
            if block {
                out.push('\n');
            }
            collect_text(child, out);
            if block {
                out.push('\n');
            }
        }
    }
}
