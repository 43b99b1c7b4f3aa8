//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the merge laws and the
//! infrastructure that feeds or persists them.

use crate::{ConversationId, ExtractedRecord};

/// Trait for turning one message's text into a partial record
///
/// Implemented by the extraction layer (chatlead-extractor). Implementations
/// must be pure: same text, same result, no shared mutable state.
pub trait RecordExtractor {
    /// Extract whatever fields the text carries, or `None` when it carries none
    fn extract(&self, text: &str) -> Option<ExtractedRecord>;
}

impl<T: RecordExtractor + ?Sized> RecordExtractor for &T {
    fn extract(&self, text: &str) -> Option<ExtractedRecord> {
        (**self).extract(text)
    }
}

impl<T: RecordExtractor + ?Sized> RecordExtractor for std::sync::Arc<T> {
    fn extract(&self, text: &str) -> Option<ExtractedRecord> {
        (**self).extract(text)
    }
}

/// Trait for persisting per-conversation records
///
/// Implemented by the infrastructure layer (chatlead-store). Methods take
/// `&self` so one store can back many concurrently updated conversations.
pub trait RecordStore {
    /// Error type for store operations
    type Error;

    /// Load the record of one conversation
    fn load(&self, id: &ConversationId) -> Result<Option<ExtractedRecord>, Self::Error>;

    /// Insert or replace the record of one conversation
    fn save(&self, id: &ConversationId, record: &ExtractedRecord) -> Result<(), Self::Error>;

    /// Load every stored record
    fn load_all(&self) -> Result<Vec<(ConversationId, ExtractedRecord)>, Self::Error>;

    /// Record a processed message id
    ///
    /// Returns `false` when the id was already recorded for the conversation.
    fn mark_seen(&self, id: &ConversationId, message_id: &str) -> Result<bool, Self::Error>;
}
