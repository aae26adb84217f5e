//! Browser-based page fetching for shopping results.
//!
//! Everything anti-detection-flavored lives here, away from the
//! deterministic extraction core: stealth launch arguments, consent
//! dismissal, a small reader-simulation pass, the captcha gate, and the
//! debug dump taken when a scrape goes wrong.
//!
//! # Usage
//!
//! ```rust,ignore
//! use centime::browser::{ChromeFetcher, PageFetcher};
//! use centime::config::FetchConfig;
//!
//! let fetcher = ChromeFetcher::new(FetchConfig::default()).await?;
//! let page = fetcher.fetch_results("Apple iPhone 13 noir 128GB").await?;
//! let records = centime::extract::extract_products(&page.html, None);
//! ```

mod chrome;
mod consent;

pub use chrome::ChromeFetcher;
pub use consent::ConsentDismisser;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::app::Result;

/// Source label attached to observations scraped through this module.
pub const SOURCE_LABEL: &str = "Google Shopping";

/// A results page after rendering, consent handling and the
/// pre-extraction interaction pass: ready for the extractor.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub url: String,
    pub html: String,
    pub fetched_at: DateTime<Utc>,
}

/// Trait for page-fetching implementations.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Render the shopping results page for a search query and return its
    /// markup.
    async fn fetch_results(&self, query: &str) -> Result<RenderedPage>;
}
