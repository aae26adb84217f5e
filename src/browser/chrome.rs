use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use chrono::Utc;
use futures::StreamExt;
use rand::Rng;
use tracing::{info, warn};
use url::Url;

use crate::app::{CentimeError, Result};
use crate::browser::consent::ConsentDismisser;
use crate::browser::{PageFetcher, RenderedPage};
use crate::config::FetchConfig;

/// Realistic Chromium user agents, one picked at random per launch unless
/// the config pins one.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/125.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/123.0.0.0 Safari/537.36",
];

/// Masks the obvious automation giveaways after load.
const STEALTH_SCRIPT: &str = r#"
    Object.defineProperty(navigator, 'webdriver', { get: () => undefined });
    Object.defineProperty(navigator, 'languages', { get: () => ['fr-FR', 'fr', 'en-US', 'en'] });
    Object.defineProperty(navigator, 'plugins', { get: () => [1, 2, 3, 4, 5] });
"#;

/// Boolean gate consulted before extraction proceeds.
const CAPTCHA_PROBE: &str = r#"
    document.querySelector(
        "div[class*='captcha'], div[id*='captcha'], iframe[src*='recaptcha']"
    ) !== null
"#;

/// Chrome-based page fetcher using chromiumoxide.
pub struct ChromeFetcher {
    browser: Arc<Browser>,
    config: FetchConfig,
    consent: ConsentDismisser,
}

impl ChromeFetcher {
    /// Launch a browser configured for scraping with the given settings.
    pub async fn new(config: FetchConfig) -> Result<Self> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(pick_user_agent);

        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-blink-features=AutomationControlled")
            .arg(format!("--lang={}", config.browser_lang()))
            .arg(format!("--user-agent={user_agent}"));

        if !config.headless {
            builder = builder.with_head();
        }

        let browser_config = builder
            .build()
            .map_err(|e| CentimeError::Browser(format!("failed to build browser config: {e}")))?;

        let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            CentimeError::Browser(format!(
                "failed to launch browser: {e}. Is Chrome or Chromium installed and in PATH?"
            ))
        })?;

        // Drive the CDP event stream for the lifetime of the browser.
        tokio::spawn(async move {
            while let Some(_event) = handler.next().await {}
        });

        Ok(Self {
            browser: Arc::new(browser),
            config,
            consent: ConsentDismisser::new(),
        })
    }

    /// Launch with default settings.
    pub async fn with_defaults() -> Result<Self> {
        Self::new(FetchConfig::default()).await
    }

    async fn render(&self, page: &Page, url: &str) -> Result<RenderedPage> {
        tokio::time::timeout(self.config.timeout(), async {
            page.goto(url).await?;
            page.wait_for_navigation().await?;
            Ok::<_, chromiumoxide::error::CdpError>(())
        })
        .await
        .map_err(|_| {
            CentimeError::Browser(format!(
                "page load timed out after {}s",
                self.config.timeout_secs
            ))
        })?
        .map_err(|e| CentimeError::Browser(format!("navigation failed: {e}")))?;
        tokio::time::sleep(self.config.wait_after_load()).await;

        // Double check after load: the launch arguments alone don't cover
        // pages that probe navigator properties late.
        if let Err(e) = page.evaluate(STEALTH_SCRIPT).await {
            warn!("stealth script failed: {e}");
        }

        if self.config.dismiss_consent {
            self.dismiss_consent(page).await;
        }
        if self.config.simulate_reader {
            self.simulate_reader(page).await;
        }

        if self.captcha_present(page).await {
            warn!("captcha challenge detected, aborting scrape");
            return Err(CentimeError::CaptchaDetected);
        }

        let html = page
            .content()
            .await
            .map_err(|e| CentimeError::Browser(format!("failed to read page content: {e}")))?;

        Ok(RenderedPage {
            url: url.to_string(),
            html,
            fetched_at: Utc::now(),
        })
    }

    async fn dismiss_consent(&self, page: &Page) {
        match page.evaluate(self.consent.dismissal_script()).await {
            Ok(result) => {
                if result.into_value::<bool>().unwrap_or(false) {
                    info!("consent banner dismissed");
                }
            }
            Err(e) => warn!("consent dismissal failed: {e}"),
        }
    }

    /// One small scroll and a jittered pause. All randomness stays on this
    /// side of the boundary; extraction remains deterministic.
    async fn simulate_reader(&self, page: &Page) {
        let (scroll_to, pause_ms) = {
            let mut rng = rand::thread_rng();
            (rng.gen_range(50..150u32), rng.gen_range(100..300u64))
        };
        if let Err(e) = page.evaluate(format!("window.scrollTo(0, {scroll_to});")).await {
            warn!("reader-simulation scroll failed: {e}");
        }
        tokio::time::sleep(Duration::from_millis(pause_ms)).await;
    }

    async fn captcha_present(&self, page: &Page) -> bool {
        match page.evaluate(CAPTCHA_PROBE).await {
            Ok(result) => result.into_value::<bool>().unwrap_or(false),
            Err(e) => {
                warn!("captcha probe failed: {e}");
                false
            }
        }
    }

    /// Persist the page markup and a screenshot for diagnosis when a
    /// scrape fails. Best effort only.
    async fn dump_debug(&self, page: &Page) {
        let Some(dir) = self.config.debug_dir.clone() else {
            return;
        };
        if let Err(e) = tokio::fs::create_dir_all(&dir).await {
            warn!("could not create debug directory: {e}");
            return;
        }

        match page.content().await {
            Ok(html) => {
                let path = dir.join("debug_page.html");
                match tokio::fs::write(&path, html).await {
                    Ok(()) => info!(path = %path.display(), "saved page markup for diagnosis"),
                    Err(e) => warn!("could not write debug page: {e}"),
                }
            }
            Err(e) => warn!("could not capture page markup: {e}"),
        }

        match page
            .screenshot(ScreenshotParams::builder().full_page(true).build())
            .await
        {
            Ok(bytes) => {
                let path = dir.join("debug_screenshot.png");
                if let Err(e) = tokio::fs::write(&path, bytes).await {
                    warn!("could not write debug screenshot: {e}");
                }
            }
            Err(e) => warn!("could not capture screenshot: {e}"),
        }
    }
}

#[async_trait]
impl PageFetcher for ChromeFetcher {
    async fn fetch_results(&self, query: &str) -> Result<RenderedPage> {
        let url = results_url(&self.config, query)?;
        info!(url = %url, "fetching shopping results page");

        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| CentimeError::Browser(format!("failed to open page: {e}")))?;

        let outcome = self.render(&page, url.as_str()).await;
        if outcome.is_err() {
            self.dump_debug(&page).await;
        }
        if let Err(e) = page.close().await {
            warn!("failed to close page: {e}");
        }

        outcome
    }
}

/// Build the shopping results URL for a query under the configured locale.
fn results_url(config: &FetchConfig, query: &str) -> Result<Url> {
    let url = Url::parse_with_params(
        "https://www.google.com/search",
        &[
            ("q", query),
            ("hl", config.hl.as_str()),
            ("gl", config.gl.as_str()),
            ("udm", "28"),
        ],
    )?;
    Ok(url)
}

fn pick_user_agent() -> String {
    let mut rng = rand::thread_rng();
    USER_AGENTS[rng.gen_range(0..USER_AGENTS.len())].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_url_encodes_query_and_locale() {
        let url = results_url(&FetchConfig::default(), "Apple iPhone 13 noir").unwrap();
        assert!(url.as_str().starts_with("https://www.google.com/search?"));
        assert!(url.as_str().contains("q=Apple+iPhone+13+noir"));
        assert!(url.as_str().contains("hl=fr"));
        assert!(url.as_str().contains("gl=fr"));
        assert!(url.as_str().contains("udm=28"));
    }

    #[test]
    fn test_pick_user_agent_comes_from_pool() {
        let ua = pick_user_agent();
        assert!(USER_AGENTS.contains(&ua.as_str()));
    }

    #[test]
    fn test_captcha_probe_targets_known_markers() {
        assert!(CAPTCHA_PROBE.contains("recaptcha"));
        assert!(CAPTCHA_PROBE.contains("captcha"));
    }
}
