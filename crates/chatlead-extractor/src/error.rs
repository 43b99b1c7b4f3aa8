//! Error types for the Extractor

use chatlead_domain::Field;
use thiserror::Error;

/// Errors that can occur while building an Extractor
///
/// Extraction itself never fails; these only surface from configuration.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// A rule pattern failed to compile
    #[error("Invalid pattern for {field}: {source}")]
    Pattern {
        /// Field the rule targets
        field: Field,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Failed to read a configuration file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
