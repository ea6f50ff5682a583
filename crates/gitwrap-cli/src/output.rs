//! Rendering of command results as styled text or JSON.

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use clap::ValueEnum;
use console::style;
use serde_json::json;

use gitwrap_core::config::{GitwrapConfig, to_toml};

#[derive(Clone, Copy, ValueEnum, Default, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

pub struct Printer {
    format: OutputFormat,
}

impl Printer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn value(&self, key: &str, value: &str) -> Result<()> {
        match self.format {
            OutputFormat::Table => println!("{}", value),
            OutputFormat::Json => print_json(&json!({ key: value }))?,
        }
        Ok(())
    }

    pub fn optional(&self, key: &str, value: Option<&str>) -> Result<()> {
        match self.format {
            OutputFormat::Table => match value {
                Some(value) => println!("{}", value),
                None => println!("{}", style(format!("(no {})", key)).dim()),
            },
            OutputFormat::Json => print_json(&json!({ key: value }))?,
        }
        Ok(())
    }

    pub fn list(&self, key: &str, items: &[String]) -> Result<()> {
        match self.format {
            OutputFormat::Table => {
                if items.is_empty() {
                    println!("{}", style(format!("(no {})", key)).dim());
                }
                for item in items {
                    println!("{}", item);
                }
            }
            OutputFormat::Json => print_json(&json!({ key: items }))?,
        }
        Ok(())
    }

    pub fn date(&self, reference: &str, date: &DateTime<FixedOffset>) -> Result<()> {
        match self.format {
            OutputFormat::Table => println!(
                "{}  {}",
                style(reference).cyan(),
                date.format("%Y-%m-%d %H:%M:%S %z")
            ),
            OutputFormat::Json => print_json(&json!({
                "reference": reference,
                "date": date.to_rfc3339(),
                "timestamp": date.timestamp(),
            }))?,
        }
        Ok(())
    }

    pub fn done(&self, message: &str) -> Result<()> {
        match self.format {
            OutputFormat::Table => println!("{} {}", style("✓").green().bold(), message),
            OutputFormat::Json => print_json(&json!({ "ok": true, "message": message }))?,
        }
        Ok(())
    }

    pub fn config(&self, config: &GitwrapConfig) -> Result<()> {
        match self.format {
            OutputFormat::Table => print!("{}", to_toml(config)?),
            OutputFormat::Json => print_json(&serde_json::to_value(config)?)?,
        }
        Ok(())
    }
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
