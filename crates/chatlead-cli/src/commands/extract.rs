//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use chatlead_domain::Field;
use std::io::Read;

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let text = if args.stdin {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        args.text.join(" ")
    };

    let extractor = super::build_extractor(config)?;

    match args.field {
        Some(name) => {
            let field = parse_field(&name)?;
            match extractor.extract_field(field, &text) {
                Some(value) => println!("{}", value),
                None => println!("{}", formatter.warning(&format!("No {} found", field.label()))),
            }
        }
        None => {
            let record = extractor.extract(&text);
            println!("{}", formatter.format_extraction(record.as_ref())?);
        }
    }

    Ok(())
}

/// Parse a field name accepted on the command line.
pub fn parse_field(name: &str) -> Result<Field> {
    Field::parse(name).ok_or_else(|| {
        let known: Vec<&str> = Field::ALL.iter().map(|f| f.as_str()).collect();
        CliError::InvalidInput(format!(
            "Unknown field '{}'. Known fields: {}",
            name,
            known.join(", ")
        ))
    })
}
