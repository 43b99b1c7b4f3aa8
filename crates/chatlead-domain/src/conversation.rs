//! Conversation identifiers and inbound message events

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of one chat contact/channel (e.g. `573001234567@s.whatsapp.net`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConversationId(String);

impl ConversationId {
    /// Create a new conversation identifier
    ///
    /// # Errors
    /// Returns error if the identifier is blank
    pub fn new(value: impl Into<String>) -> Result<Self, String> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err("Conversation id cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the identifier as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Contact part of a channel address (text before `@`)
    pub fn contact(&self) -> &str {
        self.0.split('@').next().unwrap_or(&self.0)
    }
}

impl TryFrom<String> for ConversationId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConversationId> for String {
    fn from(id: ConversationId) -> Self {
        id.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One message delivered by the ingestion collaborator
///
/// `text` is absent for media or other non-text payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundMessage {
    /// Conversation the message belongs to
    pub conversation_id: ConversationId,

    /// Transport message id, used to drop redeliveries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    /// Message text, if the payload carried any
    #[serde(default)]
    pub text: Option<String>,

    /// Whether the message comes from a history fetch rather than live delivery
    #[serde(default)]
    pub historical: bool,
}

impl InboundMessage {
    /// Create a live text message
    pub fn live(conversation_id: ConversationId, text: impl Into<String>) -> Self {
        Self {
            conversation_id,
            message_id: None,
            text: Some(text.into()),
            historical: false,
        }
    }

    /// Create a historical text message
    pub fn historical(conversation_id: ConversationId, text: impl Into<String>) -> Self {
        Self {
            historical: true,
            ..Self::live(conversation_id, text)
        }
    }

    /// Attach a transport message id
    pub fn with_message_id(mut self, id: impl Into<String>) -> Self {
        self.message_id = Some(id.into());
        self
    }
}
