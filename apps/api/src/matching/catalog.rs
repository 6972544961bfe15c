//! Portfolio catalog: the projects offered as evidence, loaded once at startup.
//!
//! Source format is CSV with required `Techstack` and `Links` columns and
//! optional `Title` and `Description` columns. Header names are matched
//! case-insensitively.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use crate::models::portfolio::PortfolioEntry;

const TITLE_COLUMN: &str = "Title";
const STACK_COLUMN: &str = "Techstack";
const DESCRIPTION_COLUMN: &str = "Description";
const LINK_COLUMN: &str = "Links";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot access catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("catalog is missing required column '{column}'")]
    MissingColumn { column: &'static str },
}

/// Immutable, ordered set of portfolio entries. Catalog order breaks score ties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioCatalog {
    entries: Vec<PortfolioEntry>,
}

impl PortfolioCatalog {
    /// Keeps only entries with a non-empty stack and an absolute http(s) link.
    pub fn new(entries: Vec<PortfolioEntry>) -> Self {
        let entries = entries
            .into_iter()
            .filter(|entry| {
                if entry.tech_stack.is_empty() {
                    warn!("Dropping portfolio entry '{}': empty tech stack", entry.title);
                    return false;
                }
                if !is_web_link(&entry.link) {
                    warn!("Dropping portfolio entry '{}': invalid link '{}'", entry.title, entry.link);
                    return false;
                }
                true
            })
            .collect();
        Self { entries }
    }

    pub fn builtin() -> Self {
        Self::new(builtin_entries())
    }

    pub fn entries(&self) -> &[PortfolioEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let stack_idx = required_column(&headers, STACK_COLUMN)?;
        let link_idx = required_column(&headers, LINK_COLUMN)?;
        let title_idx = column(&headers, TITLE_COLUMN);
        let description_idx = column(&headers, DESCRIPTION_COLUMN);

        let mut entries = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            let field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or_default();

            let stack = field(Some(stack_idx));
            let title = match field(title_idx) {
                "" => default_title(stack, row),
                title => title.to_string(),
            };
            entries.push(PortfolioEntry::new(
                &title,
                stack,
                field(description_idx),
                field(Some(link_idx)),
            ));
        }

        Ok(Self::new(entries))
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Startup loading: no path gives the built-in catalog, a missing file is
    /// seeded with the built-in catalog, an existing file is parsed.
    pub fn load_or_seed(path: Option<&Path>) -> Result<Self, CatalogError> {
        let Some(path) = path else {
            info!("No portfolio CSV configured, using built-in catalog");
            return Ok(Self::builtin());
        };

        if path.exists() {
            let catalog = Self::load(path)?;
            info!("Loaded {} portfolio entries from {}", catalog.len(), path.display());
            return Ok(catalog);
        }

        let catalog = Self::builtin();
        catalog.write_csv(path)?;
        info!("Seeded portfolio CSV at {} with {} entries", path.display(), catalog.len());
        Ok(catalog)
    }

    pub fn write_csv(&self, path: &Path) -> Result<(), CatalogError> {
        let io_error = |source: std::io::Error| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(io_error)?;
        let mut writer = WriterBuilder::new().from_writer(file);

        writer.write_record([TITLE_COLUMN, STACK_COLUMN, DESCRIPTION_COLUMN, LINK_COLUMN])?;
        for entry in &self.entries {
            writer.write_record([
                entry.title.as_str(),
                entry.stack_text().as_str(),
                entry.description.as_str(),
                entry.link.as_str(),
            ])?;
        }
        writer.flush().map_err(io_error)?;
        Ok(())
    }
}

fn column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

fn required_column(headers: &StringRecord, name: &'static str) -> Result<usize, CatalogError> {
    column(headers, name).ok_or(CatalogError::MissingColumn { column: name })
}

fn default_title(stack: &str, row: usize) -> String {
    match stack.split(',').map(str::trim).find(|s| !s.is_empty()) {
        Some(first) => format!("{first} Project"),
        None => format!("Project {}", row + 1),
    }
}

fn is_web_link(link: &str) -> bool {
    Url::parse(link)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false)
}

#[rustfmt::skip]
fn builtin_entries() -> Vec<PortfolioEntry> {
    vec![
        PortfolioEntry::new("MERN Storefront", "React, Node.js, MongoDB", "E-commerce storefront with a React client and a Node.js API.", "https://example.com/react-project"),
        PortfolioEntry::new("Django Booking Platform", "Python, Django, PostgreSQL", "Multi-tenant booking system with a relational data model.", "https://example.com/python-project"),
        PortfolioEntry::new("Spring Inventory Service", "Java, Spring Boot, MySQL", "Inventory microservice with REST endpoints and reporting.", "https://example.com/java-project"),
        PortfolioEntry::new("Realtime Dashboard", "JavaScript, React, Node.js", "Live metrics dashboard fed over websockets.", "https://example.com/js-project"),
        PortfolioEntry::new("Demand Forecasting Model", "Python, Machine Learning, TensorFlow", "Sales forecasting pipeline from feature engineering to serving.", "https://example.com/ml-project"),
        PortfolioEntry::new("Cloud Deployment Toolkit", "AWS, Docker, Kubernetes", "Container build and cluster deployment templates.", "https://example.com/devops-project"),
        PortfolioEntry::new("Fitness Tracker App", "React Native, Firebase, JavaScript", "Cross-platform mobile app with offline sync.", "https://example.com/mobile-project"),
        PortfolioEntry::new("Vue Project Board", "Vue.js, Express, MongoDB", "Kanban board with an Express backend.", "https://example.com/vue-project"),
        PortfolioEntry::new("Python & Web Portfolio", "Python, FastAPI, Flask, JavaScript, React, SQL, Docker", "Fullstack apps, REST APIs and microservices.", "https://example.com/portfolio-python"),
        PortfolioEntry::new("Data Analysis Projects", "Python, Pandas, NumPy, Scikit-learn, Tableau", "Data cleaning, exploratory analysis and ML models.", "https://example.com/portfolio-data"),
        PortfolioEntry::new("Business Development Case Studies", "Sales, Negotiation, CRM, Outreach, Lead Generation", "Qualified lead generation and closed enterprise deals.", "https://example.com/portfolio-bizdev"),
        PortfolioEntry::new("UI/UX & Design", "Figma, Prototyping, User Research, Design Systems", "Design deliverables and case studies.", "https://example.com/portfolio-design"),
    ]
}
