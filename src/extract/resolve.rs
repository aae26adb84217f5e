use scraper::{ElementRef, Selector};

use crate::domain::UNAVAILABLE;

/// Try each selector in listed order against the element's descendants and
/// return the first non-empty trimmed text found. Exhaustion yields the
/// [`UNAVAILABLE`] sentinel, never an error.
///
/// Result-card markup drifts across A/B-tested layouts; an ordered list of
/// known selector shapes is the sole resilience mechanism against that.
pub fn resolve_text(element: ElementRef<'_>, selectors: &[&str]) -> String {
    for raw in selectors {
        let Ok(selector) = Selector::parse(raw) else {
            continue;
        };
        for found in element.select(&selector) {
            let text = element_text(found);
            if !text.is_empty() {
                return text;
            }
        }
    }
    UNAVAILABLE.to_string()
}

/// Same fallthrough contract as [`resolve_text`], but reading a named
/// attribute instead of text content.
pub fn resolve_attribute(element: ElementRef<'_>, selectors: &[&str], attribute: &str) -> String {
    for raw in selectors {
        let Ok(selector) = Selector::parse(raw) else {
            continue;
        };
        for found in element.select(&selector) {
            if let Some(value) = found.value().attr(attribute) {
                let value = value.trim();
                if !value.is_empty() {
                    return value.to_string();
                }
            }
        }
    }
    UNAVAILABLE.to_string()
}

/// Collapse an element's text nodes into one whitespace-normalized string.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn first_div(document: &Html) -> ElementRef<'_> {
        let selector = Selector::parse("div.card").unwrap();
        document.select(&selector).next().unwrap()
    }

    #[test]
    fn test_first_matching_selector_wins() {
        let document = Html::parse_fragment(
            r#"<div class="card"><span class="a">First</span><span class="b">Second</span></div>"#,
        );
        let element = first_div(&document);
        assert_eq!(resolve_text(element, &["span.a", "span.b"]), "First");
        assert_eq!(resolve_text(element, &["span.b", "span.a"]), "Second");
    }

    #[test]
    fn test_empty_match_falls_through() {
        let document = Html::parse_fragment(
            r#"<div class="card"><span class="a">   </span><span class="b">Value</span></div>"#,
        );
        let element = first_div(&document);
        assert_eq!(resolve_text(element, &["span.a", "span.b"]), "Value");
    }

    #[test]
    fn test_later_sibling_of_same_selector_is_considered() {
        let document = Html::parse_fragment(
            r#"<div class="card"><span class="a"></span><span class="a">Second sibling</span></div>"#,
        );
        let element = first_div(&document);
        assert_eq!(resolve_text(element, &["span.a"]), "Second sibling");
    }

    #[test]
    fn test_no_match_yields_sentinel() {
        let document = Html::parse_fragment(r#"<div class="card"><p>text</p></div>"#);
        let element = first_div(&document);
        assert_eq!(resolve_text(element, &["span.missing"]), UNAVAILABLE);
    }

    #[test]
    fn test_text_is_trimmed_and_collapsed() {
        let document = Html::parse_fragment(
            r#"<div class="card"><span class="a">  iPhone <b>13</b>  </span></div>"#,
        );
        let element = first_div(&document);
        assert_eq!(resolve_text(element, &["span.a"]), "iPhone 13");
    }

    #[test]
    fn test_invalid_selector_is_skipped() {
        let document = Html::parse_fragment(r#"<div class="card"><span class="a">ok</span></div>"#);
        let element = first_div(&document);
        assert_eq!(resolve_text(element, &["span..", "span.a"]), "ok");
    }

    #[test]
    fn test_resolve_attribute() {
        let document = Html::parse_fragment(
            r#"<div class="card"><a href="">empty</a><a href="https://x/p">link</a></div>"#,
        );
        let element = first_div(&document);
        assert_eq!(resolve_attribute(element, &["a"], "href"), "https://x/p");
        assert_eq!(resolve_attribute(element, &["a"], "missing"), UNAVAILABLE);
    }
}
