//! Price aggregation: outlier filtering and summary statistics.
//!
//! Observations flow in from any source (scraped records or a search API),
//! get filtered to within two standard deviations of the mean, and come
//! out as an [`AnalysisReport`]. Per-source averages are intentionally
//! computed over the *unfiltered* set while the headline statistics use
//! the filtered one.

use std::collections::HashMap;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::domain::{AnalysisReport, PriceObservation, ProductRecord, UNAVAILABLE};

/// Typed failure modes of one analysis call. Returned, never raised; the
/// caller decides how to present them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("no price observations to analyze")]
    NoResults,
    #[error("no valid prices left after filtering")]
    NoValidPrices,
}

/// Drop observations more than two standard deviations from the mean.
///
/// Fewer than three observations is too small a sample to filter and is
/// returned unchanged. If filtering would remove everything, the original
/// list is returned instead; filtering never manufactures an empty result.
pub fn filter_outliers(prices: &[f64]) -> Vec<f64> {
    if prices.len() < 3 {
        return prices.to_vec();
    }

    let mean = prices.iter().sum::<f64>() / prices.len() as f64;
    let variance = prices
        .iter()
        .map(|price| (price - mean).powi(2))
        .sum::<f64>()
        / (prices.len() - 1) as f64;
    let std_dev = variance.sqrt();

    let filtered: Vec<f64> = prices
        .iter()
        .copied()
        .filter(|price| (price - mean).abs() <= 2.0 * std_dev)
        .collect();

    if filtered.is_empty() {
        prices.to_vec()
    } else {
        filtered
    }
}

/// Reduce a list of observations to summary statistics.
pub fn analyze(
    subject: &str,
    search_query: &str,
    observations: &[PriceObservation],
) -> Result<AnalysisReport, AnalysisError> {
    if observations.is_empty() {
        return Err(AnalysisError::NoResults);
    }

    let prices: Vec<f64> = observations.iter().map(|obs| obs.price).collect();
    let filtered = filter_outliers(&prices);
    if filtered.is_empty() {
        return Err(AnalysisError::NoValidPrices);
    }

    let average = round2(filtered.iter().sum::<f64>() / filtered.len() as f64);
    let median = round2(median_of(&filtered));
    let min = round2(filtered.iter().copied().fold(f64::INFINITY, f64::min));
    let max = round2(filtered.iter().copied().fold(f64::NEG_INFINITY, f64::max));

    let currency = observations
        .first()
        .map(|obs| obs.currency.clone())
        .unwrap_or_else(|| "EUR".to_string());
    let symbol = currency_symbol(&currency);

    // Per-source means over the full observation set, outliers included.
    let mut per_source: HashMap<String, (f64, usize)> = HashMap::new();
    for obs in observations {
        let entry = per_source.entry(obs.source.clone()).or_insert((0.0, 0));
        entry.0 += obs.price;
        entry.1 += 1;
    }
    let source_averages = per_source
        .into_iter()
        .map(|(source, (sum, count))| (source, round2(sum / count as f64)))
        .collect();

    Ok(AnalysisReport {
        subject: subject.to_string(),
        search_query: search_query.to_string(),
        total_observations: observations.len(),
        valid_count: filtered.len(),
        average_price: average,
        median_price: median,
        min_price: min,
        max_price: max,
        price_range: format!("{min:.2} - {max:.2} {symbol}"),
        source_averages,
        prices: filtered,
        currency,
    })
}

/// Pull a numeric price out of raw formatted text, e.g. `"1 249,00 €"`.
/// Comma is treated as the decimal separator. Unparseable or non-positive
/// text is rejected.
pub fn parse_price(text: &str) -> Option<f64> {
    let pattern = Regex::new(r"(\d+[.,]?\d*)").ok()?;
    let captures = pattern.captures(text)?;
    let price: f64 = captures[1].replace(',', ".").parse().ok()?;
    if price > 0.0 {
        Some(price)
    } else {
        None
    }
}

/// Convert extracted records into observations under one source label,
/// dropping records whose price text cannot be parsed.
pub fn observations_from_records(records: &[ProductRecord], source: &str) -> Vec<PriceObservation> {
    let mut observations = Vec::new();
    for record in records {
        if record.price == UNAVAILABLE {
            continue;
        }
        let Some(price) = parse_price(&record.price) else {
            debug!(price = %record.price, "dropping record with unparseable price");
            continue;
        };
        if let Some(obs) = PriceObservation::new(
            price,
            currency_of(&record.price),
            source,
            record.title.clone(),
            record.link.clone(),
        ) {
            observations.push(obs);
        }
    }
    observations
}

fn currency_of(price_text: &str) -> &'static str {
    if price_text.contains('$') {
        "USD"
    } else if price_text.contains('£') {
        "GBP"
    } else {
        "EUR"
    }
}

fn currency_symbol(code: &str) -> String {
    match code {
        "EUR" => "€".to_string(),
        "USD" => "$".to_string(),
        "GBP" => "£".to_string(),
        other => other.to_string(),
    }
}

fn median_of(input: &[f64]) -> f64 {
    let mut prices = input.to_vec();
    prices.sort_by(f64::total_cmp);
    let mid = prices.len() / 2;
    if prices.len() % 2 == 0 {
        (prices[mid - 1] + prices[mid]) / 2.0
    } else {
        prices[mid]
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
