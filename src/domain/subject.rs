use serde::{Deserialize, Serialize};

/// What the operator is asking about: a product described by name plus
/// optional attributes that sharpen the search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSubject {
    pub name: String,
    pub image_url: Option<String>,
    pub color: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub extra_keywords: Vec<String>,
}

impl SearchSubject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image_url: None,
            color: None,
            brand: None,
            category: None,
            extra_keywords: Vec::new(),
        }
    }

    /// Compose the search string: brand, name, color, category, then extra
    /// keywords in listed order, space-separated. No deduplication and no
    /// reordering; the field order is fixed.
    pub fn search_query(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();

        if let Some(ref brand) = self.brand {
            parts.push(brand);
        }
        parts.push(&self.name);
        if let Some(ref color) = self.color {
            parts.push(color);
        }
        if let Some(ref category) = self.category {
            parts.push(category);
        }
        for keyword in &self.extra_keywords {
            parts.push(keyword);
        }

        parts.join(" ")
    }
}
