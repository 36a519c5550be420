use chrono::{DateTime, Utc};
use clap::ValueEnum;
use console::style;
use serde::{Deserialize, Serialize};

use crate::error::{DirError, ErrorCode, Result, StructuredError};

/// Output format for CLI commands
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable formatted output with colors (default)
    #[default]
    Human,
    /// Pretty-printed JSON inside a response envelope
    Json,
    /// Plain text without colors or formatting
    Plain,
    /// Tab-separated values (for shell scripting)
    Tsv,
}

impl OutputFormat {
    /// Check if this format should use colors
    #[must_use]
    pub const fn use_colors(&self) -> bool {
        matches!(self, Self::Human)
    }

}

/// Envelope wrapped around every `--output-format json` payload.
#[derive(Serialize)]
pub struct JsonResponse<T> {
    pub status: ResponseStatus,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub data: T,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Ok,
    Error {
        code: ErrorCode,
        numeric_code: u16,
        message: String,
        suggestion: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        context: Option<serde_json::Value>,
        recoverable: bool,
        category: String,
    },
}

impl From<StructuredError> for ResponseStatus {
    fn from(err: StructuredError) -> Self {
        Self::Error {
            code: err.code,
            numeric_code: err.numeric_code,
            message: err.message,
            suggestion: err.suggestion,
            context: err.context,
            recoverable: err.recoverable,
            category: err.category,
        }
    }
}

impl From<&DirError> for ResponseStatus {
    fn from(err: &DirError) -> Self {
        err.to_structured().into()
    }
}

pub fn json_ok<T: Serialize>(data: T) -> JsonResponse<T> {
    JsonResponse {
        status: ResponseStatus::Ok,
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data,
    }
}

/// Error envelope carrying the structured form of `err`.
pub fn json_error(err: &DirError) -> JsonResponse<serde_json::Value> {
    JsonResponse {
        status: err.into(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data: serde_json::Value::Null,
    }
}

pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)?;
    println!("{payload}");
    Ok(())
}

pub struct HumanLayout {
    lines: Vec<String>,
    key_width: usize,
}

impl Default for HumanLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanLayout {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            key_width: 14,
        }
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push(String::new());
        self
    }

    pub fn kv(&mut self, key: &str, value: &str) -> &mut Self {
        let key_style = style(format!("{key:width$}", width = self.key_width))
            .dim()
            .to_string();
        self.lines.push(format!("{key_style} {value}"));
        self
    }

    #[must_use]
    pub fn build(&self) -> String {
        self.lines.join("\n")
    }
}

pub fn emit_human(layout: &HumanLayout) {
    println!("{}", layout.build());
}

/// Emit TSV output with headers
pub fn emit_tsv<T, F>(headers: &[&str], items: &[T], row_fn: F)
where
    F: Fn(&T) -> Vec<String>,
{
    println!("{}", headers.join("\t"));
    for item in items {
        let row: Vec<String> = row_fn(item).iter().map(|cell| tsv_escape(cell)).collect();
        println!("{}", row.join("\t"));
    }
}

/// Replace characters that would break a TSV row.
#[must_use]
pub fn tsv_escape(cell: &str) -> String {
    cell.replace(['\t', '\n', '\r'], " ")
}

/// Report `err` on the right stream for `format`.
///
/// JSON output gets an error envelope on stdout; every other format gets a
/// one-line message and suggestion on stderr.
pub fn emit_error(err: &DirError, format: OutputFormat) {
    if format == OutputFormat::Json {
        if let Ok(payload) = serde_json::to_string_pretty(&json_error(err)) {
            println!("{payload}");
            return;
        }
    }

    let structured = err.to_structured();
    if format.use_colors() {
        eprintln!("{} {}", style("error:").red().bold(), structured);
        eprintln!("{} {}", style("hint:").yellow(), structured.suggestion);
    } else {
        eprintln!("error: {structured}");
        eprintln!("hint: {}", structured.suggestion);
    }
}
