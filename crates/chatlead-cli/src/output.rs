//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use chatlead_crm::OpportunityRequest;
use chatlead_domain::{ConversationId, ExtractedRecord, Field};
use chatlead_extractor::ProductCatalog;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const EMPTY: &str = "-";

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the result of extracting one message.
    pub fn format_extraction(&self, record: Option<&ExtractedRecord>) -> Result<String> {
        match (self.format, record) {
            (OutputFormat::Json, record) => Ok(serde_json::to_string_pretty(&record)?),
            (_, None) => Ok(self.colorize("No lead data found.", "yellow")),
            (OutputFormat::Quiet, Some(record)) => Ok(Self::quiet_record(record)),
            (OutputFormat::Table, Some(record)) => Ok(self.record_table(record, false)),
        }
    }

    /// Format one conversation's record.
    pub fn format_record(&self, id: &ConversationId, record: &ExtractedRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "conversationId": id,
                "record": record,
                "hasAnyData": record.has_any_data(),
            }))?),
            OutputFormat::Quiet => Ok(Self::quiet_record(record)),
            OutputFormat::Table => {
                let header = self.colorize(&format!("Conversation {}", id), "cyan");
                Ok(format!("{}\n{}", header, self.record_table(record, true)))
            }
        }
    }

    /// Format a list of conversation records.
    pub fn format_records(&self, records: &[(ConversationId, ExtractedRecord)]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = records
                    .iter()
                    .map(|(id, record)| {
                        serde_json::json!({
                            "conversationId": id,
                            "record": record,
                            "hasAnyData": record.has_any_data(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Quiet => Ok(records
                .iter()
                .map(|(id, _)| id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => Ok(self.records_table(records)),
        }
    }

    /// Format the product catalog.
    pub fn format_catalog(&self, catalog: &ProductCatalog) -> Result<String> {
        let keywords = catalog.keyword_map();
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "models": catalog.models(),
                "keywords": keywords,
            }))?),
            OutputFormat::Quiet => Ok(catalog.models().join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["#", "Model", "Keywords"]);
                for (idx, model) in catalog.models().iter().enumerate() {
                    let shortcuts: Vec<&str> = keywords
                        .iter()
                        .filter(|(_, target)| **target == model.as_str())
                        .map(|(key, _)| *key)
                        .collect();
                    builder.push_record([
                        (idx + 1).to_string(),
                        model.clone(),
                        shortcuts.join(", "),
                    ]);
                }
                Ok(Self::styled(builder))
            }
        }
    }

    /// Format an opportunity request (dry-run submission).
    pub fn format_request(&self, request: &OpportunityRequest) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(request)?),
            OutputFormat::Quiet => Ok(request.contact_id.clone()),
            OutputFormat::Table => {
                let mut out = self.colorize(&format!("Contact {}", request.contact_id), "cyan");
                out.push('\n');
                out.push_str(&self.record_table(&request.record, false));
                if !request.notes.trim().is_empty() {
                    out.push_str(&format!("\nNotes: {}", request.notes));
                }
                Ok(out)
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Describe fields that changed.
    pub fn changed_fields(&self, fields: &[Field]) -> String {
        if fields.is_empty() {
            return self.info("No new data");
        }
        let labels: Vec<&str> = fields.iter().map(|f| f.label()).collect();
        self.success(&format!("Captured: {}", labels.join(", ")))
    }

    fn record_table(&self, record: &ExtractedRecord, all_fields: bool) -> String {
        let fields: Vec<Field> = if all_fields {
            Field::ALL.to_vec()
        } else {
            record.filled_fields()
        };

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for field in fields {
            let value = record.get(field).unwrap_or(EMPTY);
            builder.push_record([field.label(), value]);
        }
        Self::styled(builder)
    }

    fn records_table(&self, records: &[(ConversationId, ExtractedRecord)]) -> String {
        if records.is_empty() {
            return self.colorize("No conversations found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Conversation", "Name", "Document", "Phone", "Email", "Model", "Filled"]);
        for (id, record) in records {
            builder.push_record([
                id.to_string(),
                record.get(Field::Name).unwrap_or(EMPTY).to_string(),
                record.get(Field::DocumentId).unwrap_or(EMPTY).to_string(),
                record.get(Field::Phone).unwrap_or(EMPTY).to_string(),
                record.get(Field::Email).unwrap_or(EMPTY).to_string(),
                record.get(Field::ProductModel).unwrap_or(EMPTY).to_string(),
                format!("{}/{}", record.filled_fields().len(), Field::ALL.len()),
            ]);
        }
        Self::styled(builder)
    }

    fn styled(builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    fn quiet_record(record: &ExtractedRecord) -> String {
        record
            .iter()
            .map(|(field, value)| format!("{}={}", field.as_str(), value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
