//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! Plain lines are treated as incoming chat messages for the current
//! conversation; lines starting with `/` are console commands.

use crate::commands::edit::{build_edit, parse_assignment};
use crate::commands::extract::parse_field;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use chatlead_crm::{apply_operator_edit, submit_opportunity, RecordingSink};
use chatlead_domain::{ConversationId, ExtractedRecord, InboundMessage, RecordEdit};
use chatlead_extractor::Extractor;
use chatlead_store::{Accumulator, IngestOutcome};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Run the interactive REPL.
pub fn run_repl(conversation: String, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut current = ConversationId::new(conversation).map_err(CliError::InvalidInput)?;
    let accumulator = crate::commands::open_accumulator(config, false)?;

    println!(
        "{}",
        formatter.info("Chatlead REPL - Type a message, '/help' for commands, '/exit' to quit")
    );
    println!("{}", formatter.info(&format!("Conversation: {}", current)));
    println!();

    // Initialize readline editor
    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(editor_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        let prompt = format!("{}> ", current.contact());

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(ReplCommand::Switch(id)) => {
                        println!("{}", formatter.info(&format!("Conversation: {}", id)));
                        current = id;
                    }
                    Ok(cmd) => {
                        if let Err(e) =
                            execute_repl_command(cmd, &current, &accumulator, config, formatter)
                        {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use '/exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    Message(String),
    Show,
    Edit(RecordEdit),
    Submit(String),
    Switch(ConversationId),
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let Some(command) = line.strip_prefix('/') else {
        return Ok(ReplCommand::Message(line.to_string()));
    };

    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };

    match name {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "show" => Ok(ReplCommand::Show),
        "edit" => parse_edit_command(rest),
        "clear" => parse_clear_command(rest),
        "submit" => Ok(ReplCommand::Submit(rest.to_string())),
        "switch" => ConversationId::new(rest)
            .map(ReplCommand::Switch)
            .map_err(|_| CliError::InvalidInput("Usage: /switch <conversation>".to_string())),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: /{}. Type '/help' for available commands.",
            name
        ))),
    }
}

/// Execute a REPL command against the current conversation.
fn execute_repl_command(
    cmd: ReplCommand,
    current: &ConversationId,
    accumulator: &Accumulator<Extractor>,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        ReplCommand::Message(text) => {
            let message = InboundMessage::live(current.clone(), text);
            match accumulator.ingest(&message)? {
                IngestOutcome::Merged(changed) => println!("{}", formatter.changed_fields(&changed)),
                IngestOutcome::NoData => println!("{}", formatter.info("No lead data in message")),
                IngestOutcome::Duplicate => println!("{}", formatter.warning("Duplicate message")),
            }
        }
        ReplCommand::Show => {
            let record = accumulator.record(current)?.unwrap_or_default();
            println!("{}", formatter.format_record(current, &record)?);
        }
        ReplCommand::Edit(edit) => {
            let record: ExtractedRecord =
                apply_operator_edit(accumulator, &config.form, current, &edit)?;
            println!("{}", formatter.format_record(current, &record)?);
        }
        ReplCommand::Submit(notes) => {
            let sink = RecordingSink::new();
            let receipt = submit_opportunity(accumulator, &sink, &config.form, current, &notes)?;
            if let Some(request) = sink.requests().last() {
                println!("{}", formatter.format_request(request)?);
            }
            println!(
                "{}",
                formatter.success(&format!(
                    "Opportunity {} prepared (dry run)",
                    receipt.opportunity_id
                ))
            );
        }
        ReplCommand::Exit | ReplCommand::Help | ReplCommand::Switch(_) => {}
    }

    Ok(())
}

fn parse_edit_command(rest: &str) -> Result<ReplCommand> {
    if rest.is_empty() {
        return Err(CliError::InvalidInput(
            "Usage: /edit <field>=<value>".to_string(),
        ));
    }
    // A single assignment; the value may contain spaces
    let (field, value) = parse_assignment(rest)?;
    Ok(ReplCommand::Edit(RecordEdit::new().set(field, value)))
}

fn parse_clear_command(rest: &str) -> Result<ReplCommand> {
    let fields: Vec<&str> = rest.split_whitespace().collect();
    if fields.is_empty() {
        return Err(CliError::InvalidInput(
            "Usage: /clear <field> [field2] ...".to_string(),
        ));
    }
    for name in &fields {
        parse_field(name)?;
    }
    let no_assignments: [&str; 0] = [];
    Ok(ReplCommand::Edit(build_edit(&no_assignments, &fields)?))
}

fn editor_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::other(format!(
        "Failed to initialize editor: {}",
        e
    )))
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::home()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  <text>                         - Ingest a message for the current conversation");
    println!("  /show                          - Show the current record");
    println!("  /edit <field>=<value>          - Set a field (operator edit)");
    println!("  /clear <field> [field2] ...    - Clear fields");
    println!("  /submit [notes]                - Prepare a CRM opportunity (dry run)");
    println!("  /switch <conversation>         - Work on another conversation");
    println!("  /help, /?                      - Show this help");
    println!("  /exit, /quit, /q               - Exit REPL");
    println!();
    println!("  Fields: name, documentId, email, phone, profession, productModel,");
    println!("          documentType, brand, campaign");
    println!();
}
