//! Replay command implementation.

use crate::cli::ReplayArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use chatlead_domain::{ConversationId, InboundMessage};
use chatlead_store::IngestOutcome;
use std::collections::BTreeSet;
use std::fs;
use std::io::Read;

/// Tally of a replay run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Messages that filled at least one field
    pub merged: usize,
    /// Messages with no extractable data, or nothing new
    pub unchanged: usize,
    /// Redelivered messages that were dropped
    pub duplicates: usize,
}

/// Execute the replay command.
pub fn execute_replay(args: ReplayArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let contents = if args.stdin {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else if let Some(file) = args.file {
        fs::read_to_string(&file)?
    } else {
        return Err(CliError::InvalidInput(
            "Must specify either --file or --stdin".to_string(),
        ));
    };

    let events = parse_transcript(&contents)?;
    if events.is_empty() {
        println!("{}", formatter.warning("Transcript contains no messages"));
        return Ok(());
    }

    let accumulator = super::open_accumulator(config, args.dry_run)?;
    let mut summary = ReplaySummary::default();

    for event in &events {
        match accumulator.ingest(event)? {
            IngestOutcome::Duplicate => summary.duplicates += 1,
            IngestOutcome::Merged(changed) if !changed.is_empty() => summary.merged += 1,
            _ => summary.unchanged += 1,
        }
    }

    let mut records = Vec::new();
    for id in conversations(&events) {
        if let Some(record) = accumulator.record(&id)? {
            records.push((id, record));
        }
    }

    println!("{}", formatter.format_records(&records)?);
    println!(
        "{}",
        formatter.success(&format!(
            "Replayed {} message(s): {} with new data, {} unchanged, {} duplicate(s)",
            events.len(),
            summary.merged,
            summary.unchanged,
            summary.duplicates
        ))
    );

    Ok(())
}

/// Parse a transcript: a JSON array of message events.
pub fn parse_transcript(contents: &str) -> Result<Vec<InboundMessage>> {
    Ok(serde_json::from_str(contents)?)
}

/// Conversations mentioned in a transcript, sorted.
pub fn conversations(events: &[InboundMessage]) -> Vec<ConversationId> {
    let ids: BTreeSet<_> = events.iter().map(|e| e.conversation_id.clone()).collect();
    ids.into_iter().collect()
}
