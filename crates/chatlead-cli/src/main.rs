//! Chatlead CLI - Command-line console for chat lead extraction.

use chatlead_cli::commands;
use chatlead_cli::repl;
use chatlead_cli::{Cli, Command, Config, Formatter};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CHATLEAD_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> chatlead_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load config; a missing file yields the defaults
    let config_path = match cli.config {
        Some(path) => PathBuf::from(path),
        None => Config::path()?,
    };
    let mut config = Config::load_from(&config_path)?;

    if let Some(database) = cli.database {
        config.database = Some(database);
    }

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Handle commands
    match cli.command {
        None => repl::run_repl("console".to_string(), &config, &formatter)?,
        Some(Command::Repl(args)) => repl::run_repl(args.conversation, &config, &formatter)?,
        Some(Command::Extract(args)) => commands::execute_extract(args, &config, &formatter)?,
        Some(Command::Replay(args)) => commands::execute_replay(args, &config, &formatter)?,
        Some(Command::Show(args)) => commands::execute_show(args, &config, &formatter)?,
        Some(Command::Edit(args)) => commands::execute_edit(args, &config, &formatter)?,
        Some(Command::Catalog) => commands::execute_catalog(&config, &formatter)?,
        Some(Command::Config(args)) => {
            commands::execute_config(args, &config, &config_path, &formatter)?
        }
    }

    Ok(())
}
