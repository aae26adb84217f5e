use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder used wherever a field could not be resolved from the markup.
///
/// Extraction never fails on a single field; it degrades to this sentinel
/// and moves on.
pub const UNAVAILABLE: &str = "unavailable";

/// Which card shape a record was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardVariant {
    /// A structured result card with per-field markup.
    Structured,
    /// A card whose data lives in a single accessible label.
    Label,
}

/// A normalized product listing extracted from one result card.
///
/// Every field except `title` may carry the [`UNAVAILABLE`] sentinel; a
/// record with a sentinel title is never emitted by the extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: String,
    /// Raw formatted price text, e.g. `"899,00 €"`. Never reformatted.
    pub price: String,
    pub seller: String,
    pub rating: String,
    pub review_count: String,
    pub link: String,
    pub image: String,
    pub availability: String,
    pub shipping_cost: String,
    pub condition: String,
    /// The raw specification line, e.g. `"128 Go · iOS · Noir"`.
    pub specifications: String,
    /// Semantic fields parsed out of `specifications`.
    pub specification_fields: HashMap<String, String>,
    pub source_variant: CardVariant,
    pub extracted_at: DateTime<Utc>,
}

impl ProductRecord {
    /// Create an empty record for the given card variant, with every field
    /// set to the sentinel and the extraction timestamp set to now.
    pub fn new(variant: CardVariant) -> Self {
        Self {
            title: UNAVAILABLE.to_string(),
            price: UNAVAILABLE.to_string(),
            seller: UNAVAILABLE.to_string(),
            rating: UNAVAILABLE.to_string(),
            review_count: UNAVAILABLE.to_string(),
            link: UNAVAILABLE.to_string(),
            image: UNAVAILABLE.to_string(),
            availability: UNAVAILABLE.to_string(),
            shipping_cost: UNAVAILABLE.to_string(),
            condition: UNAVAILABLE.to_string(),
            specifications: String::new(),
            specification_fields: HashMap::new(),
            source_variant: variant,
            extracted_at: Utc::now(),
        }
    }

    /// A record is only worth keeping if it resolved a title.
    pub fn has_title(&self) -> bool {
        self.title != UNAVAILABLE && !self.title.is_empty()
    }

    /// One-line summary for listing output.
    pub fn display_line(&self) -> String {
        format!("{} - {} ({})", self.title, self.price, self.seller)
    }
}
