//! Chatlead Extractor
//!
//! Pulls structured lead fields out of free-form chat messages with an
//! ordered, configurable rule table and a product catalog.
//!
//! # Overview
//!
//! Each message is inspected independently. Five fields come from pattern
//! rules (document id, email, phone, name, profession); the product model
//! comes from the catalog. A field that no rule matches is simply absent.
//! Text that matches nothing yields no record at all.
//!
//! # Architecture
//!
//! ```text
//! Message text → Extractor → { rules, catalog } → ExtractedRecord (partial)
//! ```
//!
//! Folding partial records into one record per conversation is the job of
//! `chatlead-store`; this crate never keeps state between calls.
//!
//! # Example Usage
//!
//! ```
//! use chatlead_domain::Field;
//! use chatlead_extractor::{Extractor, ExtractorConfig};
//!
//! let extractor = Extractor::new(ExtractorConfig::default()).unwrap();
//!
//! let record = extractor.extract("Me llamo Ana, quiero la TVS Raider").unwrap();
//! assert_eq!(record.get(Field::Name), Some("Ana"));
//! assert_eq!(record.get(Field::ProductModel), Some("TVS Raider"));
//! ```

#![warn(missing_docs)]

mod catalog;
mod config;
mod error;
mod extractor;
mod rules;


pub use catalog::ProductCatalog;
pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use rules::{spanish_rules, PostStep, RuleConfig};
