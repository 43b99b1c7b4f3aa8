//! Chatlead Domain Layer
//!
//! This crate contains the lead record model and the merge laws that
//! accumulate it across a conversation. It depends only on `serde`, and
//! defines the trait interfaces the extraction and storage layers implement.
//!
//! ## Key Concepts
//!
//! - **ExtractedRecord**: structured lead data for one conversation, every
//!   field optional
//! - **Fold**: merge that only fills empty fields (message text)
//! - **Override**: merge that always takes the new value (operator edits)
//! - **Conversation**: one ongoing exchange with a chat contact
//!
//! ## Architecture
//!
//! - Pure data and merge logic only
//! - Extraction and persistence live in other crates behind the traits in
//!   [`traits`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod conversation;
pub mod field;
pub mod merge;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use conversation::{ConversationId, InboundMessage};
pub use field::Field;
pub use record::{ExtractedRecord, RecordEdit};
