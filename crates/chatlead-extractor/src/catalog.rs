//! Product model catalog
//!
//! Resolution order:
//! 1. Direct case-insensitive containment of a catalog name in the text;
//!    the earliest catalog entry wins.
//! 2. Keyword fallback: every keyword present in the text maps to the first
//!    catalog entry that contains it; the earliest resulting entry wins.

use std::collections::BTreeMap;
use tracing::warn;

/// Ordered list of known product models with keyword shortcuts
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    models: Vec<String>,
    lowered: Vec<String>,
    /// keyword (lowercase) → index into `models`
    keywords: Vec<(String, usize)>,
}

impl ProductCatalog {
    /// Build a catalog
    ///
    /// Keywords that resolve to no catalog entry are dropped with a warning.
    pub fn new(models: Vec<String>, keywords: &[String]) -> Self {
        let lowered: Vec<String> = models.iter().map(|m| m.to_lowercase()).collect();

        let mut resolved = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            let key = keyword.trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            match lowered.iter().position(|m| m.contains(&key)) {
                Some(idx) => resolved.push((key, idx)),
                None => warn!("Keyword '{}' matches no catalog model, ignoring", keyword),
            }
        }

        Self {
            models,
            lowered,
            keywords: resolved,
        }
    }

    /// Resolve the product model mentioned in text, if any
    pub fn match_model(&self, text: &str) -> Option<&str> {
        let haystack = text.to_lowercase();

        if let Some(idx) = self.lowered.iter().position(|m| haystack.contains(m.as_str())) {
            return Some(self.models[idx].as_str());
        }

        self.keywords
            .iter()
            .filter(|(key, _)| haystack.contains(key.as_str()))
            .map(|(_, idx)| *idx)
            .min()
            .map(|idx| self.models[idx].as_str())
    }

    /// Catalog models in priority order
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Resolved keyword table (keyword → catalog model)
    pub fn keyword_map(&self) -> BTreeMap<&str, &str> {
        self.keywords
            .iter()
            .map(|(key, idx)| (key.as_str(), self.models[*idx].as_str()))
            .collect()
    }

    /// Number of catalog models
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
