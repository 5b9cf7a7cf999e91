//! Output formatting utilities

use crate::cli::OutputFormat;
use crate::error::Result;
use serde_json::Value;

/// Render `value` in the requested format, without a trailing newline
pub fn render(value: &Value, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?.trim_end().to_string(),
    };
    Ok(rendered)
}
