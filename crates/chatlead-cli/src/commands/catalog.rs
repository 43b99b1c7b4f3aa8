//! Catalog command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the catalog command.
pub fn execute_catalog(config: &Config, formatter: &Formatter) -> Result<()> {
    let extractor = super::build_extractor(config)?;
    println!("{}", formatter.format_catalog(extractor.catalog())?);
    Ok(())
}
