//! Option lists and defaults for operator-edited fields

use crate::error::CrmError;
use chatlead_domain::{ExtractedRecord, Field, RecordEdit};
use serde::{Deserialize, Serialize};

/// Choices the operator form offers, and what an unset field defaults to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormOptions {
    /// Accepted document types
    pub document_types: Vec<String>,

    /// Document type used when the record has none
    pub default_document_type: String,

    /// Accepted campaigns
    pub campaigns: Vec<String>,

    /// Campaign used when the record has none
    pub default_campaign: String,

    /// Brand used when the record has none
    pub default_brand: String,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            document_types: ["CC", "NIT", "TI", "CE", "PS"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            default_document_type: "CC".to_string(),
            campaigns: [
                "SALA",
                "REFERIDO",
                "TIKTOK COLOMBIANO",
                "REDES COLOMBIANO",
                "TIKTOK EXTRANJERO",
                "REDES EXTRANJERO",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            default_campaign: "REDES COLOMBIANO".to_string(),
            default_brand: "TVS".to_string(),
        }
    }
}

impl FormOptions {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.document_types.is_empty() {
            return Err("document_types cannot be empty".to_string());
        }
        if self.campaigns.is_empty() {
            return Err("campaigns cannot be empty".to_string());
        }
        if Self::canonical(&self.document_types, &self.default_document_type).is_none() {
            return Err(format!(
                "default_document_type '{}' is not in document_types",
                self.default_document_type
            ));
        }
        if Self::canonical(&self.campaigns, &self.default_campaign).is_none() {
            return Err(format!(
                "default_campaign '{}' is not in campaigns",
                self.default_campaign
            ));
        }
        if self.default_brand.trim().is_empty() {
            return Err("default_brand cannot be blank".to_string());
        }
        Ok(())
    }

    /// Options list constraining a field, if any
    pub fn allowed(&self, field: Field) -> Option<&[String]> {
        match field {
            Field::DocumentType => Some(&self.document_types),
            Field::Campaign => Some(&self.campaigns),
            _ => None,
        }
    }

    /// Check an operator edit against the option lists
    ///
    /// Values are matched case-insensitively and rewritten to the configured
    /// spelling. Clearing a field is always allowed.
    pub fn check_edit(&self, edit: &RecordEdit) -> Result<RecordEdit, CrmError> {
        let mut checked = RecordEdit::new();
        for (field, value) in edit.iter() {
            let value = match self.allowed(field) {
                Some(allowed) if !value.trim().is_empty() => Self::canonical(allowed, value)
                    .ok_or_else(|| CrmError::InvalidOption {
                        field,
                        value: value.to_string(),
                        allowed: allowed.join(", "),
                    })?
                    .to_string(),
                _ => value.to_string(),
            };
            checked = checked.set(field, value);
        }
        Ok(checked)
    }

    /// Copy of the record with unset form fields given their defaults
    pub fn with_defaults(&self, record: &ExtractedRecord) -> ExtractedRecord {
        let mut filled = record.clone();
        for (field, default) in [
            (Field::DocumentType, &self.default_document_type),
            (Field::Campaign, &self.default_campaign),
            (Field::Brand, &self.default_brand),
        ] {
            if !filled.is_filled(field) {
                filled.set(field, Some(default.clone()));
            }
        }
        filled
    }

    fn canonical<'a>(allowed: &'a [String], value: &str) -> Option<&'a str> {
        let value = value.trim();
        allowed
            .iter()
            .find(|option| option.eq_ignore_ascii_case(value))
            .map(String::as_str)
    }
}
