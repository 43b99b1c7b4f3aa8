//! Record module - the structured lead snapshot for one conversation

use crate::Field;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structured lead data inferred from chat text or entered by an operator
///
/// Every field is independently present or absent. A value that is present
/// but blank is treated exactly like an absent one by the merge laws.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedRecord {
    /// Full-name candidate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// National ID, digits only
    #[serde(alias = "cedula", skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,

    /// Lowercased email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Phone number, digits only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Short lowercase profession phrase
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,

    /// Catalog product name
    #[serde(alias = "motoModel", skip_serializing_if = "Option::is_none")]
    pub product_model: Option<String>,

    /// Kind of national ID (operator-edited)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,

    /// Product brand (operator-edited)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Marketing campaign (operator-edited)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
}

impl ExtractedRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    ///
    /// # Examples
    ///
    /// ```
    /// use chatlead_domain::{ExtractedRecord, Field};
    ///
    /// let record = ExtractedRecord::new().with(Field::Name, "Ana Gómez");
    /// assert_eq!(record.get(Field::Name), Some("Ana Gómez"));
    /// ```
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    /// Get a field value if it is present and not blank
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field)
            .as_deref()
            .filter(|v| !v.trim().is_empty())
    }

    /// Replace a field value
    pub fn set(&mut self, field: Field, value: Option<String>) {
        *self.slot_mut(field) = value;
    }

    /// Whether the field holds a non-blank value
    pub fn is_filled(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    /// Whether at least one field holds a non-blank value
    ///
    /// This is the predicate that gates CRM opportunity submission.
    pub fn has_any_data(&self) -> bool {
        Field::ALL.iter().any(|f| self.is_filled(*f))
    }

    /// Whether no field holds a value
    pub fn is_empty(&self) -> bool {
        !self.has_any_data()
    }

    /// Fields that currently hold a value, in display order
    pub fn filled_fields(&self) -> Vec<Field> {
        Field::ALL
            .iter()
            .copied()
            .filter(|f| self.is_filled(*f))
            .collect()
    }

    /// Iterate over filled fields and their values, in display order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL
            .iter()
            .filter_map(move |f| self.get(*f).map(|v| (*f, v)))
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::Name => &self.name,
            Field::DocumentId => &self.document_id,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Profession => &self.profession,
            Field::ProductModel => &self.product_model,
            Field::DocumentType => &self.document_type,
            Field::Brand => &self.brand,
            Field::Campaign => &self.campaign,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Name => &mut self.name,
            Field::DocumentId => &mut self.document_id,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Profession => &mut self.profession,
            Field::ProductModel => &mut self.product_model,
            Field::DocumentType => &mut self.document_type,
            Field::Brand => &mut self.brand,
            Field::Campaign => &mut self.campaign,
        }
    }
}

/// A set of explicit operator edits
///
/// Each entry replaces the corresponding field unconditionally. A blank
/// value clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordEdit {
    changes: BTreeMap<Field, String>,
}

impl RecordEdit {
    /// Create an empty edit
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field to a value
    pub fn set(mut self, field: Field, value: impl Into<String>) -> Self {
        self.changes.insert(field, value.into());
        self
    }

    /// Clear a field
    pub fn clear(self, field: Field) -> Self {
        self.set(field, String::new())
    }

    /// Iterate over the edited fields and their new values
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.changes.iter().map(|(f, v)| (*f, v.as_str()))
    }

    /// The new value for a field, if the edit touches it
    pub fn get(&self, field: Field) -> Option<&str> {
        self.changes.get(&field).map(String::as_str)
    }

    /// Fields touched by this edit
    pub fn fields(&self) -> Vec<Field> {
        self.changes.keys().copied().collect()
    }

    /// Whether the edit touches no field
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

impl FromIterator<(Field, String)> for RecordEdit {
    fn from_iter<I: IntoIterator<Item = (Field, String)>>(iter: I) -> Self {
        Self {
            changes: iter.into_iter().collect(),
        }
    }
}
