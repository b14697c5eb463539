//! Rendering of JSON documents for the command line.

use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON formatted output
    Json,
    /// Pretty-printed JSON output
    JsonPretty,
    /// Human-readable key/value listing
    Table,
}

/// Render `data` in the requested format.
pub fn render<T: Serialize>(format: OutputFormat, data: &T) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string(data),
        OutputFormat::JsonPretty => serde_json::to_string_pretty(data),
        OutputFormat::Table => {
            let mut out = String::new();
            write_table(&mut out, &serde_json::to_value(data)?, 0);
            Ok(out.trim_end_matches('\n').to_string())
        }
    }
}

/// One `key: value` line per scalar member; containers open a header line and
/// indent their children, array items are labelled by position.
fn write_table(out: &mut String, value: &Value, depth: usize) {
    let pad = "  ".repeat(depth);
    let Value::Object(members) = value else {
        let _ = writeln!(out, "{pad}{}", scalar_text(value));
        return;
    };

    for (key, member) in members {
        match member {
            Value::Object(_) => {
                let _ = writeln!(out, "{pad}{key}:");
                write_table(out, member, depth + 1);
            }
            Value::Array(items) => {
                let _ = writeln!(out, "{pad}{key}:");
                for (position, item) in items.iter().enumerate() {
                    let _ = writeln!(out, "{pad}  [{position}]:");
                    write_table(out, item, depth + 2);
                }
            }
            scalar => {
                let _ = writeln!(out, "{pad}{key}: {}", scalar_text(scalar));
            }
        }
    }
}

// Strings print bare; everything else uses its JSON text.
fn scalar_text(value: &Value) -> String {
    match value.as_str() {
        Some(text) => text.to_string(),
        None => value.to_string(),
    }
}
