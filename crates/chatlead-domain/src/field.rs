//! Field module - the named slots of a lead record

use serde::{Deserialize, Serialize};

/// A named field of an [`ExtractedRecord`](crate::ExtractedRecord)
///
/// Six fields are extraction targets; the remaining three are only ever set
/// by the operator (their defaults come from form configuration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Full-name candidate
    Name,

    /// National ID (cedula), digits only
    #[serde(alias = "cedula")]
    DocumentId,

    /// Lowercased email address
    Email,

    /// Phone number, digits only
    Phone,

    /// Short lowercase profession phrase
    Profession,

    /// Catalog product the contact is interested in
    #[serde(alias = "motoModel")]
    ProductModel,

    /// Kind of national ID (operator-edited)
    DocumentType,

    /// Product brand (operator-edited)
    Brand,

    /// Marketing campaign (operator-edited)
    Campaign,
}

impl Field {
    /// Fields the extractor produces, in display order
    pub const EXTRACTED: [Field; 6] = [
        Field::Name,
        Field::DocumentId,
        Field::Email,
        Field::Phone,
        Field::Profession,
        Field::ProductModel,
    ];

    /// Every field of a record, in display order
    pub const ALL: [Field; 9] = [
        Field::Name,
        Field::DocumentId,
        Field::Email,
        Field::Phone,
        Field::Profession,
        Field::ProductModel,
        Field::DocumentType,
        Field::Brand,
        Field::Campaign,
    ];

    /// Get the field key as used in serialized records
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::DocumentId => "documentId",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Profession => "profession",
            Field::ProductModel => "productModel",
            Field::DocumentType => "documentType",
            Field::Brand => "brand",
            Field::Campaign => "campaign",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::DocumentId => "Document ID",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Profession => "Profession",
            Field::ProductModel => "Product model",
            Field::DocumentType => "Document type",
            Field::Brand => "Brand",
            Field::Campaign => "Campaign",
        }
    }

    /// Whether the extractor ever produces this field
    pub fn is_extracted(&self) -> bool {
        Self::EXTRACTED.contains(self)
    }

    /// Parse a field key, case-insensitively
    ///
    /// Accepts the serialized key (`documentId`), snake case (`document_id`)
    /// and the legacy keys `cedula` and `motoModel`.
    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "name" => Some(Field::Name),
            "documentid" | "cedula" => Some(Field::DocumentId),
            "email" => Some(Field::Email),
            "phone" => Some(Field::Phone),
            "profession" => Some(Field::Profession),
            "productmodel" | "motomodel" => Some(Field::ProductModel),
            "documenttype" => Some(Field::DocumentType),
            "brand" => Some(Field::Brand),
            "campaign" => Some(Field::Campaign),
            _ => None,
        }
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid field: {}", s))
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_keys() {
        for field in Field::ALL {
            assert_eq!(Field::parse(field.as_str()), Some(field));
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Field::parse("cedula"), Some(Field::DocumentId));
        assert_eq!(Field::parse("motoModel"), Some(Field::ProductModel));
        assert_eq!(Field::parse("document_type"), Some(Field::DocumentType));
        assert_eq!(Field::parse("PHONE"), Some(Field::Phone));
        assert!(Field::parse("address").is_none());
    }

    #[test]
    fn test_extracted_subset() {
        assert!(Field::Phone.is_extracted());
        assert!(!Field::Campaign.is_extracted());
        assert!(!Field::Brand.is_extracted());
        assert!(!Field::DocumentType.is_extracted());
    }
}
