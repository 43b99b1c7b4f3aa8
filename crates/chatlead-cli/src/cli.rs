//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Chatlead - Extract lead data from chat conversations.
#[derive(Debug, Parser)]
#[command(name = "chatlead")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CHATLEAD_CONFIG")]
    pub config: Option<String>,

    /// SQLite database path (overrides the config file)
    #[arg(long, global = true, env = "CHATLEAD_DB")]
    pub database: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (bare values)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract lead fields from one message
    Extract(ExtractArgs),

    /// Fold a JSON transcript of message events into stored records
    Replay(ReplayArgs),

    /// Show stored records
    Show(ShowArgs),

    /// Edit fields of a stored record
    Edit(EditArgs),

    /// List the product catalog and keyword shortcuts
    Catalog,

    /// Show or initialize the configuration
    Config(ConfigArgs),

    /// Enter interactive REPL mode
    Repl(ReplArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Message text (words are joined with spaces)
    pub text: Vec<String>,

    /// Run a single field's rule
    #[arg(long)]
    pub field: Option<String>,

    /// Read the message from stdin
    #[arg(long)]
    pub stdin: bool,
}

/// Arguments for the replay command.
#[derive(Debug, Parser)]
pub struct ReplayArgs {
    /// JSON file with an array of message events
    #[arg(short = 'i', long)]
    pub file: Option<String>,

    /// Read the events from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Keep results in memory instead of the database
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Conversation id (all conversations when omitted)
    pub conversation: Option<String>,
}

/// Arguments for the edit command.
#[derive(Debug, Parser)]
pub struct EditArgs {
    /// Conversation id
    pub conversation: String,

    /// Field assignments (field=value)
    #[arg(short, long = "set", value_name = "FIELD=VALUE")]
    pub set: Vec<String>,

    /// Fields to clear
    #[arg(long, value_name = "FIELD")]
    pub clear: Vec<String>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Arguments for the REPL.
#[derive(Debug, Parser)]
pub struct ReplArgs {
    /// Conversation to work on
    #[arg(default_value = "console")]
    pub conversation: String,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
