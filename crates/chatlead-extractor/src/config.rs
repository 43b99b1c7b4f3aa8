//! Configuration for the Extractor

use crate::error::ExtractorError;
use crate::rules::{spanish_rules, RuleConfig};
use chatlead_domain::Field;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Configuration for the Extractor
///
/// Every section is optional in TOML; missing sections take the Colombian
/// Spanish defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum input text length (characters); longer texts are truncated
    pub max_text_length: usize,

    /// Known product models, in priority order
    pub catalog: Vec<String>,

    /// Short keywords resolved against the catalog when no full name matches
    pub keywords: Vec<String>,

    /// Words that can never be a captured value on their own
    pub stop_words: Vec<String>,

    /// Field rules
    pub rules: Vec<RuleConfig>,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.catalog.is_empty() {
            return Err("catalog cannot be empty".to_string());
        }

        let mut seen = HashSet::new();
        for model in &self.catalog {
            let key = model.trim().to_lowercase();
            if key.is_empty() {
                return Err("catalog entries cannot be blank".to_string());
            }
            if !seen.insert(key) {
                return Err(format!("Duplicate catalog entry: {}", model));
            }
        }

        for rule in &self.rules {
            if !rule.field.is_extracted() || rule.field == Field::ProductModel {
                return Err(format!("Field {} cannot have a pattern rule", rule.field));
            }
            if rule.patterns.is_empty() {
                return Err(format!("Rule for {} has no patterns", rule.field));
            }
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ExtractorError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_text_length: 10_000,
            catalog: default_catalog(),
            keywords: to_strings(&[
                "duke", "pulsar", "dominar", "apache", "boxer", "discover", "ntorq", "raider",
            ]),
            stop_words: to_strings(&["un", "una", "el", "la", "de"]),
            rules: spanish_rules(),
        }
    }
}

fn default_catalog() -> Vec<String> {
    to_strings(&[
        "AK 125",
        "AK 150",
        "AK 200",
        "AKT 125",
        "Bajaj Boxer",
        "Bajaj CT",
        "Bajaj Platina",
        "Bajaj Pulsar",
        "Discover 125",
        "Discover 150",
        "Dominar 250",
        "Dominar 400",
        "KTM Duke 200",
        "KTM Duke 390",
        "KTM RC 200",
        "KTM RC 390",
        "Husqvarna Svartpilen",
        "Husqvarna Vitpilen",
        "TVS Apache",
        "TVS Ntorq",
        "TVS Raider",
        "TVS Sport",
    ])
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_max_text_length() {
        let config = ExtractorConfig {
            max_text_length: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let config = ExtractorConfig {
            catalog: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_catalog_entry_rejected() {
        let mut config = ExtractorConfig::default();
        config.catalog.push("tvs raider".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.contains("Duplicate"));
    }

    #[test]
    fn test_product_model_rule_rejected() {
        let mut config = ExtractorConfig::default();
        config
            .rules
            .push(RuleConfig::new(Field::ProductModel, &["moto"], &[]));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_extracted_field_rule_rejected() {
        let mut config = ExtractorConfig::default();
        config.rules.push(RuleConfig::new(Field::Brand, &["tvs"], &[]));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rule_without_patterns_rejected() {
        let mut config = ExtractorConfig::default();
        config.rules.push(RuleConfig::new(Field::Email, &[], &[]));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = ExtractorConfig::from_toml("max_text_length = 500\n").unwrap();
        assert_eq!(parsed.max_text_length, 500);
        assert_eq!(parsed.catalog, ExtractorConfig::default().catalog);
        assert_eq!(parsed.rules.len(), 5);
    }

    #[test]
    fn test_custom_rules_from_toml() {
        let toml_str = r#"
catalog = ["Vespa Primavera"]

[[rules]]
field = "email"
patterns = ['(\S+@\S+)']
post = ["lowercase"]
"#;
        let parsed = ExtractorConfig::from_toml(toml_str).unwrap();
        assert!(parsed.validate().is_ok());
        assert_eq!(parsed.rules.len(), 1);
        assert_eq!(parsed.rules[0].field, Field::Email);
    }
}
