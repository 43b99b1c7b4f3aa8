//! Show command implementation.

use crate::cli::ShowArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use chatlead_domain::ConversationId;

/// Execute the show command.
pub fn execute_show(args: ShowArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let accumulator = super::open_accumulator(config, false)?;

    match args.conversation {
        Some(raw) => {
            let id = ConversationId::new(raw).map_err(CliError::InvalidInput)?;
            let record = accumulator
                .record(&id)?
                .ok_or_else(|| CliError::InvalidInput(format!("Unknown conversation: {}", id)))?;
            println!("{}", formatter.format_record(&id, &record)?);
        }
        None => {
            accumulator.hydrate()?;
            let mut records = Vec::new();
            for id in accumulator.conversation_ids()? {
                if let Some(record) = accumulator.record(&id)? {
                    records.push((id, record));
                }
            }
            println!("{}", formatter.format_records(&records)?);
        }
    }

    Ok(())
}
