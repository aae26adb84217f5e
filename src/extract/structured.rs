use std::collections::HashMap;

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::domain::{CardVariant, ProductRecord, UNAVAILABLE};
use crate::extract::resolve::{resolve_attribute, resolve_text};

// Known selector shapes per field, in priority order. Class names are the
// obfuscated tokens observed on the French shopping results markup.
const TITLE_SELECTORS: &[&str] = &[
    "div.gkQHve",
    "h3.tAxDx",
    "div.tAxDx",
    "span.tAxDx",
    "div[role='heading']",
    "h4",
    "a[href*='shopping']",
];
const PRICE_SELECTORS: &[&str] = &[
    "span.lmQWe",
    "span.pVBUqb",
    "span.T14wmb",
    "div.T14wmb",
    "span[aria-label*='€']",
];
const SELLER_SELECTORS: &[&str] = &[
    "span.WJMUdc",
    "div.WJMUdc",
    "span.aULzUe",
    "div.aULzUe",
    "div.merchant",
];
const RATING_SELECTORS: &[&str] = &["span.yi40Hd", "span.Rsc7Yb", "div.yi40Hd"];
const LINK_SELECTORS: &[&str] = &["a[href*='shopping']", "a[href*='url']", "a[data-ved]"];
const IMAGE_SELECTORS: &[&str] = &["img[src*='shopping']", "img.rISBZc"];
const AVAILABILITY_SELECTORS: &[&str] = &["span.Y4TKme", "div.Y4TKme"];
const SHIPPING_SELECTORS: &[&str] = &["span.vEjMR", "div.vEjMR"];
const CONDITION_SELECTORS: &[&str] = &["span.Bctlcc", "div.qptdjc"];
const SPEC_SELECTORS: &[&str] = &["div.yjT1q", "span.yjT1q", "div.HE9vIb"];

/// Rows of secondary detail text scanned by the shipping fallback.
const DETAIL_LINE_SELECTORS: &[&str] = &["div.pYkkge", "span.wPt0yc"];

/// Tokens matching one of these exactly (case-insensitive) classify as a
/// color in [`parse_specifications`].
const COLOR_NAMES: &[&str] = &[
    "noir", "blanc", "bleu", "rouge", "vert", "jaune", "rose", "violet", "gris", "or", "argent",
];

/// Extract a record from a structured result card. Returns `None` when no
/// title can be resolved; every other missing field degrades to the
/// sentinel.
pub fn extract(element: ElementRef<'_>) -> Option<ProductRecord> {
    let mut record = ProductRecord::new(CardVariant::Structured);

    record.title = resolve_text(element, TITLE_SELECTORS);
    if record.title == UNAVAILABLE {
        record.title = title_from_card_link(element);
    }
    if !record.has_title() {
        return None;
    }

    record.price = resolve_text(element, PRICE_SELECTORS);
    record.seller = resolve_text(element, SELLER_SELECTORS);
    if record.seller == UNAVAILABLE {
        record.seller = seller_from_label(element);
    }
    record.rating = resolve_text(element, RATING_SELECTORS);
    if record.rating == UNAVAILABLE {
        record.rating = rating_from_label(element);
    }
    record.link = resolve_attribute(element, LINK_SELECTORS, "href");
    record.image = resolve_attribute(element, IMAGE_SELECTORS, "src");
    record.availability = resolve_text(element, AVAILABILITY_SELECTORS);
    record.condition = resolve_text(element, CONDITION_SELECTORS);
    record.shipping_cost = resolve_text(element, SHIPPING_SELECTORS);
    if record.shipping_cost == UNAVAILABLE {
        record.shipping_cost = shipping_from_detail_lines(element);
    }

    let specifications = resolve_text(element, SPEC_SELECTORS);
    if specifications != UNAVAILABLE {
        record.specification_fields = parse_specifications(&specifications);
        record.specifications = specifications;
    }

    Some(record)
}

/// Title fallback: the card's link often carries the full product name as
/// its accessible label.
fn title_from_card_link(element: ElementRef<'_>) -> String {
    resolve_attribute(element, &["a[aria-label]"], "aria-label")
}

/// Seller fallback: scan accessible labels for the "Vendu par <name>"
/// phrase.
fn seller_from_label(element: ElementRef<'_>) -> String {
    let label = resolve_attribute(element, &["[aria-label*='Vendu par']"], "aria-label");
    if label == UNAVAILABLE {
        return label;
    }
    let Ok(pattern) = Regex::new(r"Vendu par\s+(.+)") else {
        return UNAVAILABLE.to_string();
    };
    pattern
        .captures(&label)
        .map(|caps| caps[1].trim().trim_end_matches('.').to_string())
        .unwrap_or_else(|| UNAVAILABLE.to_string())
}

/// Rating fallback: an accessible label of the form "Note : <number>". If
/// the pattern does not match but the attribute is non-empty, the raw
/// attribute text is used as-is.
fn rating_from_label(element: ElementRef<'_>) -> String {
    let label = resolve_attribute(
        element,
        &["span[aria-label*='Note']", "span[aria-label*='étoiles']"],
        "aria-label",
    );
    if label == UNAVAILABLE {
        return label;
    }
    let Ok(pattern) = Regex::new(r"Note\s*:?\s*(\d+[,.]?\d*)") else {
        return label;
    };
    match pattern.captures(&label) {
        Some(caps) => caps[1].to_string(),
        None => label,
    }
}

/// Shipping fallback: the first detail line mentioning delivery or carrying
/// a currency symbol.
fn shipping_from_detail_lines(element: ElementRef<'_>) -> String {
    for raw in DETAIL_LINE_SELECTORS {
        let Ok(selector) = Selector::parse(raw) else {
            continue;
        };
        for found in element.select(&selector) {
            let text = found
                .text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            if text.to_lowercase().contains("livraison") || text.contains('€') {
                return text;
            }
        }
    }
    UNAVAILABLE.to_string()
}

/// Classify the tokens of a free-text specification string into semantic
/// fields.
///
/// Tokens are split on the literal `" · "` delimiter. A token containing a
/// colon is treated as an explicit key/value pair (last write wins on a
/// duplicate key). Anything else goes through substring heuristics in a
/// fixed priority order; a token matching several patterns takes the first,
/// which is a known source of misclassification kept for reproducibility.
pub fn parse_specifications(raw: &str) -> HashMap<String, String> {
    let mut fields = HashMap::new();

    for token in raw.split(" · ") {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        if let Some((key, value)) = token.split_once(':') {
            fields.insert(key.trim().to_string(), value.trim().to_string());
            continue;
        }

        let upper = token.to_uppercase();
        let lower = token.to_lowercase();
        let key = if upper.contains("GO") {
            "Storage".to_string()
        } else if upper.contains("PO") {
            "Screen size".to_string()
        } else if upper.contains("IOS") {
            "OS".to_string()
        } else if upper.contains("5G") {
            "Connectivity".to_string()
        } else if upper.contains("MP") {
            "Camera".to_string()
        } else if COLOR_NAMES.contains(&lower.as_str()) {
            "Color".to_string()
        } else if upper.contains("IPHONE") {
            "Model".to_string()
        } else {
            format!("Spec_{}", fields.len())
        };
        fields.insert(key, token.to_string());
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn card(html: &str) -> Html {
        Html::parse_fragment(html)
    }

    fn card_element(document: &Html) -> ElementRef<'_> {
        let selector = Selector::parse("div.rwVHAc").unwrap();
        document.select(&selector).next().unwrap()
    }

    const FULL_CARD: &str = r#"
        <div class="rwVHAc itPOE">
          <div class="gkQHve">iPhone 13 128 Go</div>
          <span class="lmQWe">589,00 €</span>
          <span class="WJMUdc">Amazon.fr</span>
          <span class="yi40Hd">4,6</span>
          <a href="/shopping/product/123" data-ved="x">voir</a>
          <img class="rISBZc" src="https://img.example/p.jpg">
          <span class="Y4TKme">En stock</span>
          <span class="vEjMR">Livraison gratuite</span>
          <div class="yjT1q">128 GO · iOS · Noir</div>
        </div>"#;

    #[test]
    fn test_extract_full_card() {
        let document = card(FULL_CARD);
        let record = extract(card_element(&document)).expect("card has a title");
        assert_eq!(record.title, "iPhone 13 128 Go");
        assert_eq!(record.price, "589,00 €");
        assert_eq!(record.seller, "Amazon.fr");
        assert_eq!(record.rating, "4,6");
        assert_eq!(record.link, "/shopping/product/123");
        assert_eq!(record.image, "https://img.example/p.jpg");
        assert_eq!(record.availability, "En stock");
        assert_eq!(record.shipping_cost, "Livraison gratuite");
        assert_eq!(record.specifications, "128 GO · iOS · Noir");
        assert_eq!(record.source_variant, CardVariant::Structured);
    }

    #[test]
    fn test_missing_title_discards_record() {
        let document = card(r#"<div class="rwVHAc itPOE"><span class="lmQWe">10 €</span></div>"#);
        assert!(extract(card_element(&document)).is_none());
    }

    #[test]
    fn test_title_falls_back_to_link_label() {
        let document = card(
            r#"<div class="rwVHAc itPOE"><a aria-label="iPhone 13 mini" href="/p">x</a></div>"#,
        );
        let record = extract(card_element(&document)).unwrap();
        assert_eq!(record.title, "iPhone 13 mini");
    }

    #[test]
    fn test_seller_falls_back_to_vendu_par_label() {
        let document = card(
            r#"<div class="rwVHAc itPOE">
                 <div class="gkQHve">iPhone 13</div>
                 <span aria-label="Vendu par Boulanger.">détails</span>
               </div>"#,
        );
        let record = extract(card_element(&document)).unwrap();
        assert_eq!(record.seller, "Boulanger");
    }

    #[test]
    fn test_rating_fallback_pattern_and_raw() {
        let document = card(
            r#"<div class="rwVHAc itPOE">
                 <div class="gkQHve">iPhone 13</div>
                 <span aria-label="Note : 4,5 sur 5">stars</span>
               </div>"#,
        );
        let record = extract(card_element(&document)).unwrap();
        assert_eq!(record.rating, "4,5");

        let document = card(
            r#"<div class="rwVHAc itPOE">
                 <div class="gkQHve">iPhone 13</div>
                 <span aria-label="4,5 étoiles">stars</span>
               </div>"#,
        );
        let record = extract(card_element(&document)).unwrap();
        // Pattern miss with a non-empty attribute keeps the raw text.
        assert_eq!(record.rating, "4,5 étoiles");
    }

    #[test]
    fn test_shipping_fallback_scans_detail_lines() {
        let document = card(
            r#"<div class="rwVHAc itPOE">
                 <div class="gkQHve">iPhone 13</div>
                 <div class="pYkkge">Reconditionné</div>
                 <div class="pYkkge">Livraison 4,99 €</div>
               </div>"#,
        );
        let record = extract(card_element(&document)).unwrap();
        assert_eq!(record.shipping_cost, "Livraison 4,99 €");
    }

    #[test]
    fn test_missing_fields_degrade_to_sentinel() {
        let document = card(r#"<div class="rwVHAc itPOE"><div class="gkQHve">iPhone 13</div></div>"#);
        let record = extract(card_element(&document)).unwrap();
        assert_eq!(record.price, UNAVAILABLE);
        assert_eq!(record.seller, UNAVAILABLE);
        assert_eq!(record.link, UNAVAILABLE);
        assert!(record.specifications.is_empty());
    }

    #[test]
    fn test_parse_specifications_heuristics() {
        let fields = parse_specifications("128 GO · iOS · Noir");
        assert_eq!(fields.len(), 3);
        assert_eq!(fields["Storage"], "128 GO");
        assert_eq!(fields["OS"], "iOS");
        assert_eq!(fields["Color"], "Noir");
    }

    #[test]
    fn test_parse_specifications_colon_takes_precedence() {
        let fields = parse_specifications("Écran: 6.1 po");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["Écran"], "6.1 po");
    }

    #[test]
    fn test_parse_specifications_priority_order() {
        // "5G 12MP" matches both connectivity and camera; the first listed
        // check wins.
        let fields = parse_specifications("5G 12MP");
        assert_eq!(fields["Connectivity"], "5G 12MP");
        assert!(!fields.contains_key("Camera"));
    }

    #[test]
    fn test_parse_specifications_fallback_key_numbering() {
        let fields = parse_specifications("128 GO · mystère · autre");
        assert_eq!(fields["Storage"], "128 GO");
        assert_eq!(fields["Spec_1"], "mystère");
        assert_eq!(fields["Spec_2"], "autre");
    }

    #[test]
    fn test_parse_specifications_duplicate_key_last_wins() {
        let fields = parse_specifications("Écran: 6.1 po · Écran: 6.7 po");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["Écran"], "6.7 po");
    }

    #[test]
    fn test_parse_specifications_empty_tokens_skipped() {
        let fields = parse_specifications(" ·  · iOS");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["OS"], "iOS");
    }
}
