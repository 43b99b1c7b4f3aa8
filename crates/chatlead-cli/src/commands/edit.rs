//! Edit command implementation.

use super::extract::parse_field;
use crate::cli::EditArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use chatlead_crm::apply_operator_edit;
use chatlead_domain::{ConversationId, Field, RecordEdit};

/// Execute the edit command.
pub fn execute_edit(args: EditArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let id = ConversationId::new(args.conversation).map_err(CliError::InvalidInput)?;
    let edit = build_edit(&args.set, &args.clear)?;
    if edit.is_empty() {
        return Err(CliError::InvalidInput(
            "Nothing to edit. Use --set field=value or --clear field".to_string(),
        ));
    }

    let accumulator = super::open_accumulator(config, false)?;
    let record = apply_operator_edit(&accumulator, &config.form, &id, &edit)?;

    println!("{}", formatter.success(&format!("Updated {} field(s)", edit.fields().len())));
    println!("{}", formatter.format_record(&id, &record)?);
    Ok(())
}

/// Build an edit from `field=value` assignments and fields to clear.
pub fn build_edit<S: AsRef<str>>(assignments: &[S], clears: &[S]) -> Result<RecordEdit> {
    let mut edit = RecordEdit::new();
    for assignment in assignments {
        let (field, value) = parse_assignment(assignment.as_ref())?;
        edit = edit.set(field, value);
    }
    for name in clears {
        edit = edit.clear(parse_field(name.as_ref())?);
    }
    Ok(edit)
}

/// Parse one `field=value` assignment.
pub fn parse_assignment(assignment: &str) -> Result<(Field, String)> {
    let (name, value) = assignment.split_once('=').ok_or_else(|| {
        CliError::InvalidInput(format!("Expected field=value, got '{}'", assignment))
    })?;
    Ok((parse_field(name.trim())?, value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        let (field, value) = parse_assignment("name = Ana María").unwrap();
        assert_eq!(field, Field::Name);
        assert_eq!(value, "Ana María");

        let (field, value) = parse_assignment("email=").unwrap();
        assert_eq!(field, Field::Email);
        assert_eq!(value, "");

        assert!(parse_assignment("name").is_err());
        assert!(parse_assignment("age=30").is_err());
    }

    #[test]
    fn test_build_edit() {
        let edit = build_edit(&["campaign=SALA", "brand=TVS"], &["phone"]).unwrap();
        assert_eq!(edit.get(Field::Campaign), Some("SALA"));
        assert_eq!(edit.get(Field::Brand), Some("TVS"));
        assert_eq!(edit.get(Field::Phone), Some(""));
    }
}
