//! # Centime
//!
//! Ad-hoc price comparison for a single product: scrape a browser-rendered
//! shopping results page, normalize the result cards into product records,
//! and reduce the observed prices to robust summary statistics.
//!
//! ## Architecture
//!
//! ```text
//! Browser → rendered HTML → classify → extract → ProductRecord
//!                                                     ↓
//!                              observations → filter → AnalysisReport
//! ```
//!
//! - [`browser`]: chromiumoxide page fetching, consent handling, captcha gate
//! - [`extract`]: card classification and the two extraction strategies
//! - [`analysis`]: outlier filtering and price aggregation
//!
//! ## Quick Start
//!
//! ```bash
//! # Scrape listings for a raw query
//! centime scrape "Apple iPhone 13 noir 128GB"
//!
//! # Full analysis for a structured subject
//! centime analyze "iPhone 13" --brand Apple --color noir -k 128GB
//!
//! # Just show the composed query
//! centime query "iPhone 13" --brand Apple
//! ```

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires configuration and the image probe;
/// [`CentimeError`](app::CentimeError) is the crate-wide error type.
pub mod app;

/// Price aggregation.
///
/// Outlier filtering ([`filter_outliers`](analysis::filter_outliers)),
/// summary statistics ([`analyze`](analysis::analyze)) and price-text
/// parsing.
pub mod analysis;

/// Browser-based page fetching.
///
/// - [`ChromeFetcher`](browser::ChromeFetcher): stealth chromiumoxide fetcher
/// - [`PageFetcher`](browser::PageFetcher): async trait over page fetching
/// - [`ConsentDismisser`](browser::ConsentDismisser): consent-banner handling
pub mod browser;

/// Command-line interface using clap.
///
/// - `scrape <query>` - List extracted product records
/// - `analyze <name> [--brand --color --category --image-url -k ...]`
/// - `query <name> [...]` - Print the composed search query
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/centime/config.toml`; browser and traversal knobs
/// live in [`FetchConfig`](config::FetchConfig).
pub mod config;

/// Core domain models.
///
/// - [`ProductRecord`](domain::ProductRecord): one normalized listing
/// - [`PriceObservation`](domain::PriceObservation): one tagged price
/// - [`SearchSubject`](domain::SearchSubject): what to search for
/// - [`AnalysisReport`](domain::AnalysisReport): aggregated statistics
pub mod domain;

/// Product extraction from rendered markup.
///
/// Selector-driven, strictly local failure handling: fields degrade to a
/// sentinel, bad cards are dropped, traversal never aborts.
pub mod extract;

/// Image-URL validation for search subjects.
pub mod probe;
