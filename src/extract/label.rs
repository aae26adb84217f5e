use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::domain::{CardVariant, ProductRecord, UNAVAILABLE};

/// Tokens that terminate the seller clause inside the label sentence.
const SELLER_END_MARKERS: [&str; 2] = ["En magasin", "Note"];

/// Extract a record from a label card. The element's own `aria-label`
/// attribute is the sole data source; structural lookups are only used for
/// the link and image, which the label cannot carry.
///
/// The label is assumed to read like
/// `"<title>. Prix actuel : <amount> €. Plus de prix disponibles.
/// <seller> et plus. En magasin. Note : <n> sur 5. <n> avis."`.
/// Each clause is matched independently; a missing clause degrades that
/// field to the sentinel and never invalidates the rest.
pub fn extract(element: ElementRef<'_>) -> Option<ProductRecord> {
    let label = element.value().attr("aria-label")?.trim();
    if label.is_empty() {
        return None;
    }

    let mut record = ProductRecord::new(CardVariant::Label);

    record.title = title_from(label)?;
    record.price = price_from(label).unwrap_or_else(|| UNAVAILABLE.to_string());
    record.seller = seller_from(label).unwrap_or_else(|| UNAVAILABLE.to_string());
    record.rating = rating_from(label).unwrap_or_else(|| UNAVAILABLE.to_string());
    record.review_count = review_count_from(label).unwrap_or_else(|| UNAVAILABLE.to_string());
    record.availability = if label.contains("En magasin") {
        "En magasin".to_string()
    } else {
        UNAVAILABLE.to_string()
    };
    record.link = link_from(element);
    record.image = image_from(element);

    Some(record)
}

/// The title is everything before the first period.
fn title_from(label: &str) -> Option<String> {
    let title = label.split('.').next()?.trim();
    if title.is_empty() {
        return None;
    }
    Some(title.to_string())
}

/// `"Prix actuel : 589,00 €"`, amount and symbol captured verbatim,
/// never reformatted.
fn price_from(label: &str) -> Option<String> {
    let pattern = Regex::new(r"Prix actuel\s*:?\s*(\d[\d\s,.]*€)").ok()?;
    let captures = pattern.captures(label)?;
    Some(captures[1].trim().to_string())
}

/// The seller name sits between the "more prices available" clause and
/// either the availability or the rating clause. A trailing "et plus"
/// enumeration suffix is stripped.
fn seller_from(label: &str) -> Option<String> {
    let idx = label.find("disponibles.")?;
    let after = &label[idx + "disponibles.".len()..];
    let end = SELLER_END_MARKERS
        .iter()
        .filter_map(|marker| after.find(marker))
        .min()
        .unwrap_or(after.len());

    let mut seller = after[..end].trim().trim_end_matches('.').trim().to_string();
    if let Some(stripped) = seller.strip_suffix(" et plus") {
        seller = stripped.trim_end().to_string();
    }
    if seller.is_empty() {
        return None;
    }
    Some(seller)
}

fn rating_from(label: &str) -> Option<String> {
    let pattern = Regex::new(r"Note\s*:?\s*(\d+[,.]?\d*)").ok()?;
    let captures = pattern.captures(label)?;
    Some(captures[1].to_string())
}

fn review_count_from(label: &str) -> Option<String> {
    let pattern = Regex::new(r"(\d+\s?k?)\s*avis").ok()?;
    let captures = pattern.captures(label)?;
    Some(captures[1].trim().to_string())
}

/// The label carries no URL; the card's parent usually wraps it in a link.
fn link_from(element: ElementRef<'_>) -> String {
    let Some(parent) = element.parent().and_then(ElementRef::wrap) else {
        return UNAVAILABLE.to_string();
    };
    if parent.value().name() == "a" {
        if let Some(href) = parent.value().attr("href") {
            let href = href.trim();
            if !href.is_empty() {
                return href.to_string();
            }
        }
    }
    let Ok(selector) = Selector::parse("a[href]") else {
        return UNAVAILABLE.to_string();
    };
    parent
        .select(&selector)
        .next()
        .and_then(|link| link.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(String::from)
        .unwrap_or_else(|| UNAVAILABLE.to_string())
}

fn image_from(element: ElementRef<'_>) -> String {
    let Ok(selector) = Selector::parse("img[src]") else {
        return UNAVAILABLE.to_string();
    };
    element
        .select(&selector)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .map(String::from)
        .unwrap_or_else(|| UNAVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const WIDGET_LABEL: &str = "Widget X. Prix actuel : 50,00 €. Plus de prix disponibles. \
                                ShopCo et plus. En magasin. Note : 4,5 sur 5. 10 avis.";

    fn label_card(label: &str) -> Html {
        Html::parse_fragment(&format!(
            r#"<a href="https://shop.example/widget">
                 <div class="njFjte" jsname="ZvZkAe" aria-label="{label}">
                   <img src="https://img.example/widget.jpg">
                 </div>
               </a>"#
        ))
    }

    fn card_element(document: &Html) -> ElementRef<'_> {
        let selector = Selector::parse("div.njFjte").unwrap();
        document.select(&selector).next().unwrap()
    }

    #[test]
    fn test_extract_full_label() {
        let document = label_card(WIDGET_LABEL);
        let record = extract(card_element(&document)).expect("label has a title");
        assert_eq!(record.title, "Widget X");
        assert_eq!(record.price, "50,00 €");
        assert_eq!(record.seller, "ShopCo");
        assert_eq!(record.rating, "4,5");
        assert_eq!(record.review_count, "10");
        assert_eq!(record.availability, "En magasin");
        assert_eq!(record.link, "https://shop.example/widget");
        assert_eq!(record.image, "https://img.example/widget.jpg");
        assert_eq!(record.source_variant, CardVariant::Label);
    }

    #[test]
    fn test_fields_with_no_label_analog_stay_sentinel() {
        let document = label_card(WIDGET_LABEL);
        let record = extract(card_element(&document)).unwrap();
        assert_eq!(record.condition, UNAVAILABLE);
        assert_eq!(record.shipping_cost, UNAVAILABLE);
        assert!(record.specifications.is_empty());
        assert!(record.specification_fields.is_empty());
    }

    #[test]
    fn test_missing_label_discards_record() {
        let document =
            Html::parse_fragment(r#"<div class="njFjte" jsname="ZvZkAe">no label</div>"#);
        assert!(extract(card_element(&document)).is_none());
    }

    #[test]
    fn test_missing_clauses_are_local_failures() {
        let document = label_card("Casque audio. Quelques détails sans prix.");
        let record = extract(card_element(&document)).unwrap();
        assert_eq!(record.title, "Casque audio");
        assert_eq!(record.price, UNAVAILABLE);
        assert_eq!(record.seller, UNAVAILABLE);
        assert_eq!(record.rating, UNAVAILABLE);
        assert_eq!(record.availability, UNAVAILABLE);
    }

    #[test]
    fn test_seller_without_et_plus_suffix() {
        let document = label_card(
            "Tablette. Prix actuel : 199,00 €. Plus de prix disponibles. MediaStore. \
             Note : 4,1 sur 5. 3 avis.",
        );
        let record = extract(card_element(&document)).unwrap();
        assert_eq!(record.seller, "MediaStore");
    }

    #[test]
    fn test_seller_clause_cut_at_rating_when_no_store() {
        let document = label_card(
            "Tablette. Prix actuel : 199,00 €. Plus de prix disponibles. \
             MediaStore et plus. Note : 4,1 sur 5.",
        );
        let record = extract(card_element(&document)).unwrap();
        assert_eq!(record.seller, "MediaStore");
        assert_eq!(record.availability, UNAVAILABLE);
    }

    #[test]
    fn test_link_unavailable_without_parent_anchor() {
        let document = Html::parse_fragment(
            r#"<div class="njFjte" aria-label="Souris. Prix actuel : 20,00 €."></div>"#,
        );
        let record = extract(card_element(&document)).unwrap();
        assert_eq!(record.link, UNAVAILABLE);
        assert_eq!(record.image, UNAVAILABLE);
        assert_eq!(record.price, "20,00 €");
    }

    #[test]
    fn test_review_count_with_k_suffix() {
        let document = label_card(
            "Coque. Prix actuel : 9,99 €. Plus de prix disponibles. CaseShop. 2k avis.",
        );
        let record = extract(card_element(&document)).unwrap();
        assert_eq!(record.review_count, "2k");
    }
}
