/// Generates the JavaScript that dismisses the cookie-consent banner.
///
/// Refusal is attempted first through known button selectors, then through
/// a text scan over all buttons (the banner's markup changes often, its
/// wording rarely). Runs in the browser context and returns whether a
/// button was clicked.
pub struct ConsentDismisser {
    refuse_selectors: Vec<String>,
    refuse_texts: Vec<String>,
}

impl Default for ConsentDismisser {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsentDismisser {
    pub fn new() -> Self {
        Self {
            refuse_selectors: vec![
                // Google's own refuse-all button id
                "#W0wltc".to_string(),
                "button[aria-label*='Refuser']".to_string(),
                "button[id*='reject']".to_string(),
            ],
            refuse_texts: vec!["Tout refuser".to_string(), "Refuser".to_string()],
        }
    }

    /// Build the click-first-match script.
    pub fn dismissal_script(&self) -> String {
        let selectors = self
            .refuse_selectors
            .iter()
            .map(|s| format!("'{}'", s.replace('\'', "\\'")))
            .collect::<Vec<_>>()
            .join(", ");

        let texts = self
            .refuse_texts
            .iter()
            .map(|t| format!("'{}'", t.replace('\'', "\\'")))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            r#"
            (() => {{
                const refuseSelectors = [{selectors}];
                for (const selector of refuseSelectors) {{
                    const button = document.querySelector(selector);
                    if (button) {{
                        button.click();
                        return true;
                    }}
                }}

                const refuseTexts = [{texts}];
                const buttons = Array.from(document.querySelectorAll('button'));
                for (const text of refuseTexts) {{
                    const button = buttons.find(b => b.textContent.trim().includes(text));
                    if (button) {{
                        button.click();
                        return true;
                    }}
                }}

                return false;
            }})()
            "#
        )
    }
}
