//! Opportunity request types and the sink trait

use chatlead_domain::{ConversationId, ExtractedRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything a CRM needs to open an opportunity for a lead
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityRequest {
    /// Contact identifier (the channel address without its domain)
    pub contact_id: String,

    /// Conversation the lead came from
    pub conversation_id: ConversationId,

    /// Accumulated record, with form defaults filled in
    pub record: ExtractedRecord,

    /// Free-form operator notes
    #[serde(default)]
    pub notes: String,
}

/// Follow-up state of an opportunity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpStatus {
    /// Being worked by a salesperson
    InProcess,
    /// The lead will not buy
    Lost,
    /// A quote was sent
    Quote,
}

impl FollowUpStatus {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowUpStatus::InProcess => "in_process",
            FollowUpStatus::Lost => "lost",
            FollowUpStatus::Quote => "quote",
        }
    }
}

impl fmt::Display for FollowUpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FollowUpStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "in_process" | "inprocess" => Ok(FollowUpStatus::InProcess),
            "lost" => Ok(FollowUpStatus::Lost),
            "quote" => Ok(FollowUpStatus::Quote),
            other => Err(format!("Invalid follow-up status: {}", other)),
        }
    }
}

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpportunityReceipt {
    /// Identifier the CRM assigned to the opportunity
    pub opportunity_id: String,

    /// Whether the initial in-process follow-up was recorded
    pub follow_up_recorded: bool,
}

/// Trait for the external CRM that receives opportunities
///
/// Implementations own the wire mapping (document type codes, campaign
/// values) and the transport.
pub trait OpportunitySink {
    /// Error type for sink operations
    type Error: fmt::Display;

    /// Create an opportunity, returning the CRM's identifier for it
    fn create_opportunity(&self, request: &OpportunityRequest) -> Result<String, Self::Error>;

    /// Record a follow-up on an existing opportunity
    fn record_follow_up(
        &self,
        opportunity_id: &str,
        status: FollowUpStatus,
        notes: &str,
    ) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatlead_domain::Field;

    #[test]
    fn test_follow_up_status_parse() {
        assert_eq!("quote".parse::<FollowUpStatus>().unwrap(), FollowUpStatus::Quote);
        assert_eq!("In-Process".parse::<FollowUpStatus>().unwrap(), FollowUpStatus::InProcess);
        assert!("won".parse::<FollowUpStatus>().is_err());
    }

    #[test]
    fn test_request_json_shape() {
        let request = OpportunityRequest {
            contact_id: "573001234567".to_string(),
            conversation_id: ConversationId::new("573001234567@s.whatsapp.net").unwrap(),
            record: ExtractedRecord::new().with(Field::ProductModel, "TVS Raider"),
            notes: "llamar en la tarde".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contactId"], "573001234567");
        assert_eq!(json["record"]["productModel"], "TVS Raider");
        assert!(json["record"].get("email").is_none());
    }
}
