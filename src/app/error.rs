use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum CentimeError {
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Captcha challenge detected, scrape aborted")]
    CaptchaDetected,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

pub type Result<T> = std::result::Result<T, CentimeError>;
