//! Error types for the CRM boundary

use chatlead_domain::{ConversationId, Field};
use chatlead_store::StoreError;
use thiserror::Error;

/// Errors that can occur while editing or submitting a lead
#[derive(Error, Debug)]
pub enum CrmError {
    /// The record holds no data, so there is nothing to submit
    #[error("Conversation {0} has no lead data to submit")]
    NoData(ConversationId),

    /// The CRM refused the request
    #[error("CRM rejected the request: {0}")]
    Rejected(String),

    /// No record exists for the conversation
    #[error("Unknown conversation: {0}")]
    UnknownConversation(ConversationId),

    /// An operator edit used a value outside the configured options
    #[error("Invalid {field}: '{value}' (allowed: {allowed})")]
    InvalidOption {
        /// Edited field
        field: Field,
        /// Rejected value
        value: String,
        /// Accepted values, comma separated
        allowed: String,
    },

    /// Storage error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
