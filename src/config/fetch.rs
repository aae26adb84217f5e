use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the browser-based page fetcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Whether to run the browser in headless mode (default: true)
    pub headless: bool,

    /// Page load timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// Wait time after page load for dynamic content in milliseconds (default: 1000)
    pub wait_after_load_ms: u64,

    /// Interface language parameter (`hl`) for the results page (default: "fr")
    pub hl: String,

    /// Geolocation parameter (`gl`) for the results page (default: "fr")
    pub gl: String,

    /// Maximum number of result cards examined per page (default: none)
    pub max_cards: Option<usize>,

    /// Whether to dismiss the cookie-consent banner before scraping (default: true)
    pub dismiss_consent: bool,

    /// Whether to perform the small scroll-and-pause reader pass (default: true)
    pub simulate_reader: bool,

    /// Pin a user agent instead of picking one at random per launch
    pub user_agent: Option<String>,

    /// Directory for page-markup and screenshot dumps on scrape failure
    pub debug_dir: Option<PathBuf>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            headless: true,
            timeout_secs: 30,
            wait_after_load_ms: 1000,
            hl: "fr".to_string(),
            gl: "fr".to_string(),
            max_cards: None,
            dismiss_consent: true,
            simulate_reader: true,
            user_agent: None,
            debug_dir: None,
        }
    }
}

impl FetchConfig {
    /// Get the page load timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the wait time after load as a Duration
    pub fn wait_after_load(&self) -> Duration {
        Duration::from_millis(self.wait_after_load_ms)
    }

    /// Browser `--lang` value derived from the interface language.
    pub fn browser_lang(&self) -> String {
        match self.hl.as_str() {
            "fr" => "fr-FR".to_string(),
            "en" => "en-US".to_string(),
            other => other.to_string(),
        }
    }

    /// Create a config optimized for speed (less reliable)
    pub fn fast() -> Self {
        Self {
            timeout_secs: 15,
            wait_after_load_ms: 500,
            simulate_reader: false,
            ..Default::default()
        }
    }

    /// Create a config optimized for reliability (slower)
    pub fn thorough() -> Self {
        Self {
            timeout_secs: 60,
            wait_after_load_ms: 2500,
            ..Default::default()
        }
    }
}
