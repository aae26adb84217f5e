//! Pre-search validation of a subject's reference image URL.
//!
//! A malformed subject is rejected fast, before any browser work happens.
//! An unreachable but well-formed URL only produces a warning; the image
//! is a hint for the operator, not an input to the search itself.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::warn;
use url::Url;

use crate::app::{CentimeError, Result};

pub struct ImageProbe {
    client: Client,
}

impl ImageProbe {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .user_agent("centime/0.1.0")
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }

    /// Check that an image URL is well formed and, when reachable, that it
    /// actually points at an image.
    pub async fn validate(&self, image_url: &str) -> Result<()> {
        check_url_shape(image_url)?;

        let response = match self.client.head(image_url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("could not verify image URL {image_url}: {e}");
                return Ok(());
            }
        };
        if let Err(e) = response.error_for_status_ref() {
            warn!("could not verify image URL {image_url}: {e}");
            return Ok(());
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_lowercase();

        if !content_type.starts_with("image/") {
            return Err(CentimeError::InvalidInput(format!(
                "URL does not point to an image: {image_url}"
            )));
        }

        Ok(())
    }
}

impl Default for ImageProbe {
    fn default() -> Self {
        Self::new()
    }
}

fn check_url_shape(image_url: &str) -> Result<()> {
    let parsed = Url::parse(image_url)
        .map_err(|_| CentimeError::InvalidInput(format!("invalid image URL: {image_url}")))?;

    let scheme_ok = matches!(parsed.scheme(), "http" | "https");
    if !scheme_ok || parsed.host_str().is_none() {
        return Err(CentimeError::InvalidInput(format!(
            "invalid image URL: {image_url}"
        )));
    }

    Ok(())
}
