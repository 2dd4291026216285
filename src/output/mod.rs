//! Output formatting for the command-line front end.
//!
//! Supports multiple output formats:
//! - `table` - Human-readable table (default)
//! - `json` - Structured JSON
//! - `yaml` - YAML format
//! - `jsonl` - JSON Lines (one object per line)

mod table;

pub use table::TableFormatter;

use std::io::IsTerminal;

use serde::Serialize;

use crate::cache::Translations;
use crate::error::Result;

/// Widest translation shown in table mode.
const MAX_TRANSLATION_WIDTH: usize = 60;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
    /// YAML format.
    Yaml,
    /// JSON Lines format (one object per line).
    JsonLines,
}

impl OutputFormat {
    /// Parse an output format from a string.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            "jsonl" | "jsonlines" => Ok(Self::JsonLines),
            _ => Err(crate::error::Error::invalid_arg(format!(
                "Unknown output format '{s}'. Use: table, json, yaml, jsonl"
            ))),
        }
    }
}

/// One token and its rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationRow {
    /// Identifier token.
    pub token: String,
    /// Cached translation or placeholder.
    pub translation: String,
}

/// Output writer that handles format selection and terminal capabilities.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    format: OutputFormat,
    color: bool,
    quiet: bool,
}

impl Output {
    /// Create a new output writer.
    pub const fn new(format: OutputFormat, color: bool, quiet: bool) -> Self {
        Self { format, color, quiet }
    }

    /// Create an output writer from CLI options.
    pub fn from_cli(format: &str, quiet: bool) -> Result<Self> {
        let format = OutputFormat::parse(format)?;
        Ok(Self::new(format, std::io::stderr().is_terminal(), quiet))
    }

    /// Print a token→translation mapping.
    pub fn mapping(&self, translations: &Translations) -> Result<()> {
        let rows: Vec<TranslationRow> = translations
            .iter()
            .map(|(token, translation)| TranslationRow {
                token: token.clone(),
                translation: translation.clone(),
            })
            .collect();

        match self.format {
            OutputFormat::Json => self.json(translations),
            OutputFormat::Yaml => self.yaml(translations),
            OutputFormat::Table | OutputFormat::JsonLines => self.rows(&rows),
        }
    }

    /// Print rows, one per token.
    pub fn rows(&self, rows: &[TranslationRow]) -> Result<()> {
        match self.format {
            OutputFormat::Table => {
                let mut table = TableFormatter::new();
                table.headers(["TOKEN", "TRANSLATION"]).max_width(1, MAX_TRANSLATION_WIDTH);
                for row in rows {
                    table.row([row.token.as_str(), row.translation.as_str()]);
                }
                table.print();
                Ok(())
            },
            OutputFormat::Json => self.json(rows),
            OutputFormat::Yaml => self.yaml(rows),
            OutputFormat::JsonLines => {
                for row in rows {
                    println!("{}", serde_json::to_string(row)?);
                }
                Ok(())
            },
        }
    }

    /// Print a plain list, one entry per line (JSON array in json/yaml).
    pub fn list(&self, items: &[&str]) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.json(items),
            OutputFormat::Yaml => self.yaml(items),
            OutputFormat::Table | OutputFormat::JsonLines => {
                for item in items {
                    println!("{item}");
                }
                Ok(())
            },
        }
    }

    fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    fn yaml<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        print!("{}", serde_yaml::to_string(value)?);
        Ok(())
    }

    /// Print a message to stderr (info, progress).
    pub fn info(&self, message: &str) {
        if !self.quiet {
            eprintln!("{message}");
        }
    }

    /// Print a warning message.
    pub fn warn(&self, message: &str) {
        if !self.quiet {
            if self.color {
                eprintln!("\x1b[33m⚠\x1b[0m {message}");
            } else {
                eprintln!("⚠ {message}");
            }
        }
    }
}
