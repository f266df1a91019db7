//! Rendering of command results as tables or JSON.
//!
//! Rendering is split from printing so the formats can be checked in
//! tests. Status lines stay plain text in table mode and become a small
//! JSON object in JSON mode, so scripted callers always get JSON on stdout.

use serde::Serialize;
use serde_json::json;
use tabled::{Table, Tabled};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Kind of a one-line status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The operation finished.
    Ok,
    /// Something the user should look at, the operation still finished.
    Warning,
}

impl Status {
    fn symbol(self) -> &'static str {
        match self {
            Self::Ok => "✓",
            Self::Warning => "⚠",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
        }
    }
}

/// Render rows as a table, or as a JSON array.
pub fn render_list<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) -> String {
    match format {
        OutputFormat::Table if rows.is_empty() => "Nothing to show.".to_string(),
        OutputFormat::Table => Table::new(rows).to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".into()),
    }
}

/// Render one value as pretty debug output, or as a JSON document.
pub fn render_item<T: Serialize + std::fmt::Debug>(item: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => format!("{:#?}", item),
        OutputFormat::Json => serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".into()),
    }
}

/// Render a status line.
pub fn render_status(status: Status, msg: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => format!("{} {}", status.symbol(), msg),
        OutputFormat::Json => json!({ "status": status.name(), "message": msg }).to_string(),
    }
}

/// Print rows in the selected format
pub fn print_list<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) {
    println!("{}", render_list(rows, format));
}

/// Print a single item in the selected format
pub fn print_item<T: Serialize + std::fmt::Debug>(item: &T, format: OutputFormat) {
    println!("{}", render_item(item, format));
}

/// Print a status line in the selected format
pub fn print_status(status: Status, msg: &str, format: OutputFormat) {
    println!("{}", render_status(status, msg, format));
}

/// Print an aligned `key: value` line
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<20} {}", format!("{}:", key), value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Tabled)]
    struct Row {
        key: String,
        value: String,
    }

    fn rows() -> Vec<Row> {
        vec![Row {
            key: "exportskeleton.hkx".to_string(),
            value: "skeleton.hkx".to_string(),
        }]
    }

    #[test]
    fn test_table_list_contains_headers_and_values() {
        let table = render_list(&rows(), OutputFormat::Table);
        assert!(table.contains("key"));
        assert!(table.contains("exportskeleton.hkx"));
    }

    #[test]
    fn test_empty_table_list() {
        let empty: Vec<Row> = Vec::new();
        assert_eq!(render_list(&empty, OutputFormat::Table), "Nothing to show.");
        assert_eq!(render_list(&empty, OutputFormat::Json), "[]");
    }

    #[test]
    fn test_json_list_is_an_array() {
        let json: serde_json::Value =
            serde_json::from_str(&render_list(&rows(), OutputFormat::Json)).expect("json");
        assert_eq!(json[0]["value"], "skeleton.hkx");
    }

    #[test]
    fn test_status_formats() {
        assert_eq!(
            render_status(Status::Ok, "Conversion finished", OutputFormat::Table),
            "✓ Conversion finished"
        );
        let json: serde_json::Value = serde_json::from_str(&render_status(
            Status::Warning,
            "hkxcmd not found",
            OutputFormat::Json,
        ))
        .expect("json");
        assert_eq!(json["status"], "warning");
        assert_eq!(json["message"], "hkxcmd not found");
    }
}
