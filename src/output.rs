//! @ai:module:intent Format result trees, the catalog, shapes and batch reports
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_tree, format_catalog, format_shape, format_batch_result, to_json
//! @ai:module:depends_on tree, parser, batch
//! @ai:module:stateless true

use crate::batch::{BatchResult, CaptureStatus};
use crate::parser::Parser;
use crate::tree::{Map, Tree, Value};
use colored::Colorize;
use serde::{Deserialize, Serialize};

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

/// @ai:intent Format any serializable value as JSON
/// @ai:effects pure
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(value).unwrap_or_default()
    } else {
        serde_json::to_string(value).unwrap_or_default()
    }
}

fn json_or<T: Serialize>(value: &T, format: OutputFormat, text: impl FnOnce() -> String) -> String {
    match format {
        OutputFormat::Json => to_json(value, false),
        OutputFormat::JsonPretty => to_json(value, true),
        OutputFormat::Text => text(),
    }
}

/// @ai:intent Format a result tree
/// @ai:effects pure
pub fn format_tree(tree: &Tree, format: OutputFormat) -> String {
    json_or(tree, format, || {
        let mut output = String::new();
        write_map(&mut output, tree.root(), 0);
        output
    })
}

fn write_map(output: &mut String, map: &Map, depth: usize) {
    let indent = "  ".repeat(depth);
    for (key, value) in map {
        let key = key.to_string();
        match value {
            Value::Map(inner) => {
                output.push_str(&format!("{}{}\n", indent, key.cyan().bold()));
                write_map(output, inner, depth + 1);
            }
            Value::List(items) if items.iter().any(|item| matches!(item, Value::Map(_))) => {
                output.push_str(&format!("{}{}\n", indent, key.cyan().bold()));
                for item in items {
                    match item {
                        Value::Map(inner) => {
                            output.push_str(&format!("{}  -\n", indent));
                            write_map(output, inner, depth + 2);
                        }
                        scalar => output.push_str(&format!("{}  - {}\n", indent, scalar_text(scalar))),
                    }
                }
            }
            scalar => {
                output.push_str(&format!("{}{}: {}\n", indent, key.cyan(), scalar_text(scalar)));
            }
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string().yellow().to_string(),
        Value::Int(n) => n.to_string().green().to_string(),
        Value::Str(s) => s.clone(),
        Value::List(items) => format!(
            "[{}]",
            items.iter().map(scalar_text).collect::<Vec<_>>().join(", ")
        ),
        Value::Map(_) => "{..}".to_string(),
    }
}

#[derive(Serialize)]
struct CatalogEntry<'a> {
    name: &'a str,
    description: &'a str,
    commands: &'a [&'a str],
}

/// @ai:intent Format the list of available parsers
/// @ai:effects pure
pub fn format_catalog(parsers: &[&Parser], format: OutputFormat) -> String {
    let entries: Vec<_> = parsers
        .iter()
        .map(|p| CatalogEntry {
            name: p.name,
            description: p.description,
            commands: p.commands,
        })
        .collect();

    json_or(&entries, format, || {
        let mut output = String::new();
        for entry in &entries {
            output.push_str(&format!("{}\n", entry.name.bold()));
            output.push_str(&format!("  {}\n", entry.description.dimmed()));
            for command in entry.commands {
                output.push_str(&format!("  {} {}\n", "$".dimmed(), command));
            }
        }
        output.push_str(&format!("\n{} parsers\n", entries.len()));
        output
    })
}

/// @ai:intent Format the declared shape of one parser's result
/// @ai:effects pure
pub fn format_shape(parser: &Parser, format: OutputFormat) -> String {
    let described = parser.shape.describe();
    match format {
        OutputFormat::Json => to_json(&described, false),
        OutputFormat::JsonPretty => to_json(&described, true),
        OutputFormat::Text => format!("{}\n{}\n", parser.name.bold(), to_json(&described, true)),
    }
}

/// @ai:intent Format a batch report
/// @ai:effects pure
pub fn format_batch_result(result: &BatchResult, format: OutputFormat) -> String {
    json_or(result, format, || format_batch_result_text(result))
}

fn format_batch_result_text(result: &BatchResult) -> String {
    let mut output = String::new();

    for capture in &result.captures {
        let status = match capture.status {
            CaptureStatus::Parsed => "OK".green().bold(),
            CaptureStatus::Failed => "FAIL".red().bold(),
            CaptureStatus::Skipped => "SKIP".yellow().bold(),
        };
        output.push_str(&format!(
            "{} {} ({})\n",
            status,
            capture.path.display().to_string().dimmed(),
            capture.command.as_deref().unwrap_or("-")
        ));
        if let Some(message) = &capture.message {
            output.push_str(&format!("  {} {}\n", "reason:".cyan(), message));
        }
    }

    output.push('\n');
    output.push_str(&format!("Checked {} captures\n", result.files_checked));

    if result.failed > 0 {
        output.push_str(&format!(
            "{} failed, {} parsed, {} skipped\n",
            result.failed.to_string().red().bold(),
            result.parsed,
            result.skipped.to_string().yellow()
        ));
    } else {
        output.push_str(&format!(
            "{} {} parsed, {} skipped\n",
            "OK".green().bold(),
            result.parsed,
            result.skipped.to_string().yellow()
        ));
    }

    output
}
