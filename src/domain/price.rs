use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single price seen for a product, tagged with where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceObservation {
    pub price: f64,
    /// ISO-like currency code, e.g. `"EUR"`.
    pub currency: String,
    /// Label of the platform or listing source the price was seen on.
    pub source: String,
    pub title: String,
    pub url: String,
}

impl PriceObservation {
    /// Build an observation, rejecting non-positive prices.
    pub fn new(
        price: f64,
        currency: impl Into<String>,
        source: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Option<Self> {
        if !price.is_finite() || price <= 0.0 {
            return None;
        }
        Some(Self {
            price,
            currency: currency.into(),
            source: source.into(),
            title: title.into(),
            url: url.into(),
        })
    }
}

/// Summary statistics for one analysis run. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub subject: String,
    pub search_query: String,
    /// Observation count before outlier filtering.
    pub total_observations: usize,
    /// Observation count after outlier filtering.
    pub valid_count: usize,
    pub average_price: f64,
    pub median_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    /// `"<min> - <max> <symbol>"`.
    pub price_range: String,
    /// Per-source mean over the *unfiltered* observations.
    pub source_averages: HashMap<String, f64>,
    /// The filtered price list the headline statistics were computed from.
    pub prices: Vec<f64>,
    pub currency: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_rejects_zero_price() {
        assert!(PriceObservation::new(0.0, "EUR", "s", "t", "u").is_none());
    }

    #[test]
    fn test_observation_rejects_negative_price() {
        assert!(PriceObservation::new(-5.0, "EUR", "s", "t", "u").is_none());
    }

    #[test]
    fn test_observation_rejects_nan() {
        assert!(PriceObservation::new(f64::NAN, "EUR", "s", "t", "u").is_none());
    }

    #[test]
    fn test_observation_accepts_positive_price() {
        let obs = PriceObservation::new(49.99, "EUR", "google-shopping", "Widget", "https://x")
            .expect("positive price");
        assert_eq!(obs.price, 49.99);
        assert_eq!(obs.currency, "EUR");
    }
}
