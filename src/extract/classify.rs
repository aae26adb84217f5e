use scraper::ElementRef;

use crate::domain::CardVariant;

/// Both tokens must be present for the structured-card layout.
const STRUCTURED_CLASSES: [&str; 2] = ["rwVHAc", "itPOE"];

/// Single distinctive token of the accessible-label card layout.
const LABEL_CLASS: &str = "njFjte";

/// Map a result-card element to a known extraction strategy by its class
/// list. Unrecognized signatures (including elements with no class list)
/// yield `None` and the card is skipped without error.
pub fn classify(element: ElementRef<'_>) -> Option<CardVariant> {
    let classes: Vec<&str> = element.value().classes().collect();
    if classes.is_empty() {
        return None;
    }
    if STRUCTURED_CLASSES.iter().all(|class| classes.contains(class)) {
        return Some(CardVariant::Structured);
    }
    if classes.contains(&LABEL_CLASS) {
        return Some(CardVariant::Label);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn classify_fragment(html: &str) -> Option<CardVariant> {
        let document = Html::parse_fragment(html);
        let selector = Selector::parse("div").unwrap();
        classify(document.select(&selector).next().unwrap())
    }

    #[test]
    fn test_structured_signature_needs_both_tokens() {
        assert_eq!(
            classify_fragment(r#"<div class="rwVHAc itPOE"></div>"#),
            Some(CardVariant::Structured)
        );
        assert_eq!(classify_fragment(r#"<div class="rwVHAc"></div>"#), None);
        assert_eq!(classify_fragment(r#"<div class="itPOE"></div>"#), None);
    }

    #[test]
    fn test_label_signature() {
        assert_eq!(
            classify_fragment(r#"<div class="njFjte" jsname="ZvZkAe"></div>"#),
            Some(CardVariant::Label)
        );
    }

    #[test]
    fn test_extra_classes_do_not_confuse() {
        assert_eq!(
            classify_fragment(r#"<div class="x rwVHAc y itPOE z"></div>"#),
            Some(CardVariant::Structured)
        );
    }

    #[test]
    fn test_unrecognized_or_absent_class_list() {
        assert_eq!(classify_fragment(r#"<div class="something-else"></div>"#), None);
        assert_eq!(classify_fragment("<div></div>"), None);
    }
}
