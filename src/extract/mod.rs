//! Product extraction from rendered shopping results markup.
//!
//! The pipeline is selector-driven and strictly local in its failure
//! handling:
//!
//! ```text
//! rendered HTML → card candidates → classify → strategy → ProductRecord
//! ```
//!
//! - [`classify`] maps a card's class signature to a [`CardVariant`];
//!   unknown signatures are skipped.
//! - The structured strategy reads per-field markup through ordered
//!   selector lists.
//! - The label strategy parses a single accessible-label sentence.
//! - [`resolve_text`]/[`resolve_attribute`] implement the ordered-selector
//!   fallthrough both strategies rely on.
//!
//! Extraction is synchronous and deterministic; cards are visited in
//! document order and the output preserves that order. A malformed card
//! degrades to sentinel fields or is dropped, it never aborts the walk.

mod classify;
mod label;
mod resolve;
mod structured;

pub use classify::classify;
pub use resolve::{resolve_attribute, resolve_text};
pub use structured::parse_specifications;

use scraper::{Html, Selector};
use tracing::{debug, info};

use crate::domain::{CardVariant, ProductRecord};

/// Container shapes of the two known result-card layouts, in one group
/// selector so candidates come back in document order.
const CARD_SELECTORS: &str = "div.rwVHAc.itPOE, div.njFjte[jsname='ZvZkAe']";

/// Extract all product records from a rendered results page.
///
/// `cap` bounds how many card candidates are examined; extraction itself
/// has no other way to stop early.
pub fn extract_products(html: &str, cap: Option<usize>) -> Vec<ProductRecord> {
    let document = Html::parse_document(html);
    extract_from_document(&document, cap)
}

/// Same as [`extract_products`] for an already-parsed document.
pub fn extract_from_document(document: &Html, cap: Option<usize>) -> Vec<ProductRecord> {
    let Ok(selector) = Selector::parse(CARD_SELECTORS) else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for element in document.select(&selector).take(cap.unwrap_or(usize::MAX)) {
        let Some(variant) = classify(element) else {
            debug!("skipping card with unrecognized signature");
            continue;
        };

        let record = match variant {
            CardVariant::Structured => structured::extract(element),
            CardVariant::Label => label::extract(element),
        };

        match record {
            Some(record) => records.push(record),
            None => debug!(?variant, "discarding card without a resolvable title"),
        }
    }

    info!(count = records.len(), "extracted product records");
    records
}
