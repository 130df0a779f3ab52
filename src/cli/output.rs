//! Output formatting for CLI commands.
//!
//! Every command renders to a `String`; `main` decides where it goes.

use std::fmt::Write;

use serde::Serialize;
use serde_json::Value;

use crate::core::{Complaint, Guidance, PRODUCT_CATEGORIES, RECOGNIZED_BANKS, SearchOutcome};
use crate::error::{CommandError, Result};

/// Narrative characters shown per complaint in text output.
const NARRATIVE_PREVIEW_CHARS: usize = 240;

/// CLI output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Parses a format name; unknown names fall back to text.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Serializes any value as pretty JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| {
        CommandError::OutputFormat(format!("JSON serialization failed: {e}")).into()
    })
}

/// Formats a search outcome.
///
/// CSV bodies are emitted unchanged in either format.
pub fn format_outcome(outcome: &SearchOutcome, format: OutputFormat) -> Result<String> {
    if let SearchOutcome::Csv(text) = outcome {
        return Ok(text.clone());
    }

    match format {
        OutputFormat::Json => to_json(outcome),
        OutputFormat::Text => Ok(match outcome {
            SearchOutcome::Complaints(list) => format_complaints(list),
            SearchOutcome::Guidance(guidance) => format_guidance(guidance),
            SearchOutcome::Csv(text) => text.clone(),
        }),
    }
}

/// Formats a raw CFPB response body, as returned by the agent.
pub fn format_raw(body: &Value, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(body),
        OutputFormat::Text => format_outcome(&crate::core::normalize(body), format),
    }
}

/// Formats the reference lists.
pub fn format_reference(format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(&serde_json::json!({
            "product_categories": PRODUCT_CATEGORIES,
            "bank_names": RECOGNIZED_BANKS,
        })),
        OutputFormat::Text => {
            let mut out = String::from("Product categories:\n");
            for product in PRODUCT_CATEGORIES {
                let _ = writeln!(out, "  {product}");
            }
            out.push_str("\nBank names:\n");
            for bank in RECOGNIZED_BANKS {
                let _ = writeln!(out, "  {bank}");
            }
            Ok(out)
        }
    }
}

fn format_complaints(list: &[Complaint]) -> String {
    let mut out = String::new();
    for complaint in list {
        let _ = writeln!(
            out,
            "#{}  {}  {}",
            display(&complaint.complaint_id),
            display(&complaint.date_received),
            display(&complaint.company)
        );
        let _ = writeln!(
            out,
            "  Product: {} / {}",
            display(&complaint.product),
            display(&complaint.sub_product)
        );
        let _ = writeln!(out, "  Issue:   {}", display(&complaint.issue));
        let _ = writeln!(out, "  State:   {}", display(&complaint.state));
        if !complaint.narrative.is_empty() {
            let _ = writeln!(out, "  {}", preview(&complaint.narrative));
        }
        out.push('\n');
    }
    let _ = write!(out, "{} complaint(s)", list.len());
    out
}

fn format_guidance(guidance: &Guidance) -> String {
    guidance.system_message.trim_end().to_string()
}

fn display(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= NARRATIVE_PREVIEW_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(NARRATIVE_PREVIEW_CHARS).collect();
    format!("{}...", cut.trim_end())
}
