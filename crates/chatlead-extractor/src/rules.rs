//! Pattern rules: field → ordered patterns + post-processing
//!
//! Rules are plain data so a different language's pattern set can be loaded
//! from configuration without touching the extractor or the merge laws.

use crate::error::ExtractorError;
use chatlead_domain::Field;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One normalization step applied to a raw capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStep {
    /// Strip leading and trailing whitespace
    Trim,
    /// Lowercase the value
    Lowercase,
    /// Remove thousands-grouping dots
    RemoveDots,
    /// Remove whitespace and hyphens
    RemoveSeparators,
    /// Discard the value if it is one of the configured stop words
    RejectStopWords,
}

impl PostStep {
    fn apply(&self, value: String, stop_words: &[String]) -> Option<String> {
        match self {
            PostStep::Trim => Some(value.trim().to_string()),
            PostStep::Lowercase => Some(value.to_lowercase()),
            PostStep::RemoveDots => Some(value.replace('.', "")),
            PostStep::RemoveSeparators => Some(
                value
                    .chars()
                    .filter(|c| !c.is_whitespace() && *c != '-')
                    .collect(),
            ),
            PostStep::RejectStopWords => {
                let key = value.trim().to_lowercase();
                if stop_words.iter().any(|w| w.to_lowercase() == key) {
                    None
                } else {
                    Some(value)
                }
            }
        }
    }
}

/// Configuration of one field's extraction rule
///
/// Patterns are tried in order; the first one whose first match survives
/// post-processing wins. The value is capture group 1, or the whole match
/// when the pattern has no groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Target field
    pub field: Field,

    /// Patterns in priority order
    pub patterns: Vec<String>,

    /// Normalization applied to the captured text
    #[serde(default)]
    pub post: Vec<PostStep>,
}

impl RuleConfig {
    /// Create a rule
    pub fn new(field: Field, patterns: &[&str], post: &[PostStep]) -> Self {
        Self {
            field,
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            post: post.to_vec(),
        }
    }
}

/// Colombian Spanish rule set
pub fn spanish_rules() -> Vec<RuleConfig> {
    vec![
        RuleConfig::new(
            Field::DocumentId,
            &[
                // Labeled, plain or grouped with dots (1.234.567)
                r"(?i:\b(?:c[eé]dula|cc|documento|identificaci[oó]n))[:\s]*(\d{6,10}|\d{1,3}(?:\.\d{3}){2,3})",
                r"\b(\d{6,10})\b",
            ],
            &[PostStep::RemoveDots],
        ),
        RuleConfig::new(
            Field::Email,
            &[r"([a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,})"],
            &[PostStep::Lowercase],
        ),
        RuleConfig::new(
            Field::Phone,
            &[
                // Mobile shape, optional country prefix
                r"(?:\+?57)?[:\s]*(3\d{9})\b",
                r"(?i:\b(?:tel[eé]fono|celular|m[oó]vil|whatsapp))[:\s]*([\d\s\-]{7,15})",
            ],
            &[PostStep::RemoveSeparators],
        ),
        RuleConfig::new(
            Field::Name,
            &[r"(?i:\b(?:me\s+llamo|mi\s+nombre\s+es|nombre|soy))[:\s]*([A-Za-zÁÉÍÓÚÑáéíóúñ]+(?:\s+[A-Za-zÁÉÍÓÚÑáéíóúñ]+){0,3})"],
            &[PostStep::Trim],
        ),
        RuleConfig::new(
            Field::Profession,
            &[r"(?i:\b(?:soy|trabajo\s+como|profesi[oó]n|ocupaci[oó]n))[:\s]*(?:(?i:un[ao]?)\s+)?([a-záéíóúñ]+(?:\s+[a-záéíóúñ]+){0,2})"],
            &[PostStep::Trim, PostStep::Lowercase, PostStep::RejectStopWords],
        ),
    ]
}

/// A rule with its patterns compiled
#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
    pub(crate) field: Field,
    patterns: Vec<Regex>,
    post: Vec<PostStep>,
}

impl CompiledRule {
    /// Compile a rule configuration
    pub(crate) fn compile(config: &RuleConfig) -> Result<Self, ExtractorError> {
        let patterns = config
            .patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|source| ExtractorError::Pattern {
                    field: config.field,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            field: config.field,
            patterns,
            post: config.post.clone(),
        })
    }

    /// Run the rule over text
    pub(crate) fn apply(&self, text: &str, stop_words: &[String]) -> Option<String> {
        for (idx, pattern) in self.patterns.iter().enumerate() {
            let Some(caps) = pattern.captures(text) else {
                continue;
            };
            let Some(raw) = caps.get(1).or_else(|| caps.get(0)) else {
                continue;
            };

            let value = self
                .post
                .iter()
                .try_fold(raw.as_str().to_string(), |v, step| step.apply(v, stop_words));

            match value {
                Some(v) if !v.is_empty() => {
                    debug!("Field {} matched by pattern {}", self.field, idx);
                    return Some(v);
                }
                _ => debug!("Field {} candidate rejected by pattern {}", self.field, idx),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiled(field: Field) -> CompiledRule {
        let config = spanish_rules()
            .into_iter()
            .find(|r| r.field == field)
            .unwrap();
        CompiledRule::compile(&config).unwrap()
    }

    fn stop_words() -> Vec<String> {
        ["un", "una", "el", "la", "de"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_spanish_rules_compile() {
        for rule in spanish_rules() {
            assert!(CompiledRule::compile(&rule).is_ok(), "rule for {} failed", rule.field);
        }
    }

    #[test]
    fn test_invalid_pattern_reports_field() {
        let rule = RuleConfig::new(Field::Email, &["(unclosed"], &[]);
        let err = CompiledRule::compile(&rule).unwrap_err();
        assert!(matches!(err, ExtractorError::Pattern { field: Field::Email, .. }));
    }

    #[test]
    fn test_labeled_document_beats_standalone() {
        let rule = compiled(Field::DocumentId);
        let value = rule.apply("pedido 987654, cc 1.234.567", &[]);
        assert_eq!(value.as_deref(), Some("1234567"));
    }

    #[test]
    fn test_standalone_document_fallback() {
        let rule = compiled(Field::DocumentId);
        assert_eq!(rule.apply("es 52123456", &[]).as_deref(), Some("52123456"));
        assert_eq!(rule.apply("tengo 12345", &[]), None);
        assert_eq!(rule.apply("12345678901", &[]), None);
    }

    #[test]
    fn test_phone_with_country_prefix() {
        let rule = compiled(Field::Phone);
        assert_eq!(rule.apply("+57 3001234567", &[]).as_deref(), Some("3001234567"));
        assert_eq!(rule.apply("573159876543", &[]).as_deref(), Some("3159876543"));
    }

    #[test]
    fn test_labeled_phone_fallback_strips_separators() {
        let rule = compiled(Field::Phone);
        let value = rule.apply("mi teléfono: 604 444-1234", &[]);
        assert_eq!(value.as_deref(), Some("6044441234"));
    }

    #[test]
    fn test_mobile_shape_beats_label() {
        let rule = compiled(Field::Phone);
        let value = rule.apply("teléfono fijo 6044441234 o 3209998877", &[]);
        assert_eq!(value.as_deref(), Some("3209998877"));
    }

    #[test]
    fn test_labeled_phone_all_separators_is_rejected() {
        let rule = compiled(Field::Phone);
        assert_eq!(rule.apply("celular -------", &[]), None);
    }

    #[test]
    fn test_profession_stop_word_rejected() {
        let rule = compiled(Field::Profession);
        assert_eq!(rule.apply("soy un", &stop_words()), None);
        assert_eq!(rule.apply("soy de", &stop_words()), None);
        assert_eq!(
            rule.apply("soy una contadora", &stop_words()).as_deref(),
            Some("contadora")
        );
    }

    #[test]
    fn test_profession_requires_lowercase_tokens() {
        let rule = compiled(Field::Profession);
        assert_eq!(rule.apply("soy Pedro", &stop_words()), None);
        assert_eq!(
            rule.apply("Trabajo como conductor de taxi", &stop_words()).as_deref(),
            Some("conductor de taxi")
        );
    }

    #[test]
    fn test_name_labels() {
        let rule = compiled(Field::Name);
        assert_eq!(rule.apply("Mi nombre es María José", &[]).as_deref(), Some("María José"));
        assert_eq!(rule.apply("nombre: Andrés", &[]).as_deref(), Some("Andrés"));
        assert_eq!(rule.apply("hola buenas tardes", &[]), None);
    }

    #[test]
    fn test_post_steps() {
        assert_eq!(PostStep::RemoveDots.apply("1.234".into(), &[]).as_deref(), Some("1234"));
        assert_eq!(
            PostStep::RemoveSeparators.apply("300 123-45".into(), &[]).as_deref(),
            Some("30012345")
        );
        assert_eq!(PostStep::RejectStopWords.apply(" La ".into(), &stop_words()), None);
    }
}
