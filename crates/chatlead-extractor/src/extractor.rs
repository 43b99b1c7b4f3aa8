//! Core Extractor implementation

use crate::catalog::ProductCatalog;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::rules::CompiledRule;
use chatlead_domain::traits::RecordExtractor;
use chatlead_domain::{ExtractedRecord, Field};
use tracing::debug;

/// The Extractor turns one message's text into a partial lead record
///
/// Extraction is pure: the same text always yields the same record, and the
/// extractor holds no mutable state, so one instance can be shared freely
/// across threads.
#[derive(Debug, Clone)]
pub struct Extractor {
    rules: Vec<CompiledRule>,
    catalog: ProductCatalog,
    stop_words: Vec<String>,
    max_text_length: usize,
}

impl Extractor {
    /// Create a new Extractor
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or a pattern fails to compile
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;

        let rules = config
            .rules
            .iter()
            .map(CompiledRule::compile)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Extractor ready: {} rules, {} catalog models",
            rules.len(),
            config.catalog.len()
        );

        Ok(Self {
            rules,
            catalog: ProductCatalog::new(config.catalog, &config.keywords),
            stop_words: config.stop_words,
            max_text_length: config.max_text_length,
        })
    }

    /// Extract whatever fields the text carries
    ///
    /// Returns `None` for empty or whitespace-only text, and when no field matched.
    pub fn extract(&self, text: &str) -> Option<ExtractedRecord> {
        if text.trim().is_empty() {
            return None;
        }
        let text = self.truncate(text);

        let mut record = ExtractedRecord::new();
        for rule in &self.rules {
            if record.is_filled(rule.field) {
                continue;
            }
            if let Some(value) = rule.apply(text, &self.stop_words) {
                record.set(rule.field, Some(value));
            }
        }
        if let Some(model) = self.catalog.match_model(text) {
            record.set(Field::ProductModel, Some(model.to_string()));
        }

        if record.has_any_data() {
            debug!("Extracted fields: {:?}", record.filled_fields());
            Some(record)
        } else {
            None
        }
    }

    /// Extract from a loosely typed payload
    ///
    /// Anything other than a JSON string carries no text and yields `None`.
    pub fn extract_value(&self, value: &serde_json::Value) -> Option<ExtractedRecord> {
        value.as_str().and_then(|text| self.extract(text))
    }

    /// Run a single field's rule (or the catalog, for the product model)
    pub fn extract_field(&self, field: Field, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }
        let text = self.truncate(text);

        if field == Field::ProductModel {
            return self.catalog.match_model(text).map(str::to_string);
        }
        self.rules
            .iter()
            .filter(|rule| rule.field == field)
            .find_map(|rule| rule.apply(text, &self.stop_words))
    }

    /// The product catalog in use
    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    /// Maximum characters inspected per message
    pub fn max_text_length(&self) -> usize {
        self.max_text_length
    }

    fn truncate<'a>(&self, text: &'a str) -> &'a str {
        match text.char_indices().nth(self.max_text_length) {
            Some((idx, _)) => {
                debug!("Text truncated to {} chars", self.max_text_length);
                &text[..idx]
            }
            None => text,
        }
    }
}

impl RecordExtractor for Extractor {
    fn extract(&self, text: &str) -> Option<ExtractedRecord> {
        Extractor::extract(self, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_extractor() -> Extractor {
        Extractor::new(ExtractorConfig::default()).unwrap()
    }

    #[test]
    fn test_extract_empty_text() {
        let extractor = create_test_extractor();
        assert!(extractor.extract("").is_none());
        assert!(extractor.extract("   \n\t").is_none());
    }

    #[test]
    fn test_extract_no_match() {
        let extractor = create_test_extractor();
        assert!(extractor.extract("hola, buenas tardes").is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ExtractorConfig {
            max_text_length: 0,
            ..Default::default()
        };
        assert!(matches!(Extractor::new(config), Err(ExtractorError::Config(_))));
    }

    #[test]
    fn test_truncates_on_char_boundary() {
        let config = ExtractorConfig {
            max_text_length: 5,
            ..Default::default()
        };
        let extractor = Extractor::new(config).unwrap();
        assert_eq!(extractor.truncate("ñáéíóú"), "ñáéíó");
        assert_eq!(extractor.truncate("abc"), "abc");
    }

    #[test]
    fn test_text_beyond_limit_is_ignored() {
        let config = ExtractorConfig {
            max_text_length: 20,
            ..Default::default()
        };
        let extractor = Extractor::new(config).unwrap();
        let text = format!("{}correo ana@example.com", "x ".repeat(20));
        assert!(extractor.extract(&text).is_none());
    }

    #[test]
    fn test_extract_value_non_string() {
        let extractor = create_test_extractor();
        assert!(extractor.extract_value(&serde_json::json!(3001234567u64)).is_none());
        assert!(extractor.extract_value(&serde_json::Value::Null).is_none());
        assert!(extractor
            .extract_value(&serde_json::json!({"text": "ana@example.com"}))
            .is_none());

        let record = extractor
            .extract_value(&serde_json::json!("ana@example.com"))
            .unwrap();
        assert_eq!(record.get(Field::Email), Some("ana@example.com"));
    }

    #[test]
    fn test_extract_field() {
        let extractor = create_test_extractor();
        assert_eq!(
            extractor.extract_field(Field::Phone, "mi cel 300 123 4567 o 3001234567"),
            Some("3001234567".to_string())
        );
        assert_eq!(
            extractor.extract_field(Field::ProductModel, "la raider"),
            Some("TVS Raider".to_string())
        );
        assert_eq!(extractor.extract_field(Field::Brand, "TVS"), None);
    }
}
