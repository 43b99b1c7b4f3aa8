//! Chatlead CRM boundary
//!
//! Everything the operator console needs between the accumulated record and
//! an external CRM: the option lists for operator-edited fields, validated
//! edits, and opportunity submission through the [`OpportunitySink`] trait.
//!
//! Mapping a request onto a particular CRM's wire format, and the transport
//! that carries it, belong to the sink implementation and live elsewhere.
//!
//! # Example Usage
//!
//! ```
//! use chatlead_crm::{submit_opportunity, FormOptions, RecordingSink};
//! use chatlead_domain::{ConversationId, InboundMessage};
//! use chatlead_extractor::{Extractor, ExtractorConfig};
//! use chatlead_store::Accumulator;
//!
//! let acc = Accumulator::new(Extractor::new(ExtractorConfig::default()).unwrap());
//! let id = ConversationId::new("573001234567@s.whatsapp.net").unwrap();
//! acc.ingest(&InboundMessage::live(id.clone(), "Me llamo Ana Díaz")).unwrap();
//!
//! let sink = RecordingSink::new();
//! let receipt = submit_opportunity(&acc, &sink, &FormOptions::default(), &id, "").unwrap();
//! assert_eq!(sink.requests()[0].contact_id, "573001234567");
//! assert!(receipt.follow_up_recorded);
//! ```

#![warn(missing_docs)]

mod error;
mod mock;
mod operator;
mod options;
mod types;

pub use error::CrmError;
pub use mock::RecordingSink;
pub use operator::{apply_operator_edit, submit_opportunity};
pub use options::FormOptions;
pub use types::{FollowUpStatus, OpportunityReceipt, OpportunityRequest, OpportunitySink};
