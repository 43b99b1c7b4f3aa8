//! Command implementations.

pub mod catalog;
pub mod config;
pub mod edit;
pub mod extract;
pub mod replay;
pub mod show;

pub use self::catalog::execute_catalog;
pub use self::config::execute_config;
pub use self::edit::execute_edit;
pub use self::extract::execute_extract;
pub use self::replay::execute_replay;
pub use self::show::execute_show;

use crate::config::Config;
use crate::error::Result;
use chatlead_extractor::Extractor;
use chatlead_store::{Accumulator, SqliteRecordStore};
use std::sync::Arc;

/// Build the extractor described by the configuration.
pub fn build_extractor(config: &Config) -> Result<Extractor> {
    Ok(Extractor::new(config.extractor.clone())?)
}

/// Build an accumulator, backed by the configured database unless `in_memory`.
pub fn open_accumulator(config: &Config, in_memory: bool) -> Result<Accumulator<Extractor>> {
    let accumulator = Accumulator::new(build_extractor(config)?);
    if in_memory {
        return Ok(accumulator);
    }

    let path = config.database_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let store = SqliteRecordStore::new(&path)?;
    tracing::debug!("Using database {}", path.display());
    Ok(accumulator.with_store(Arc::new(store)))
}
