//! System prompt for the query-parser agent.
//!
//! The compiled-in prompt can be replaced with a file; a missing or
//! unreadable file falls back to the default.

use std::fmt::Write;
use std::path::Path;

use crate::core::reference::{PRODUCT_CATEGORIES, RECOGNIZED_BANKS};

/// Instructions for turning a question into complaint-search parameters.
pub const QUERY_PARSER_SYSTEM_PROMPT: &str = r#"You turn questions about U.S. banking complaints into search parameters for the CFPB Consumer Complaint Database.

Return a single JSON object. Use only these keys and omit any you cannot infer:

- "search": free-text search term (string)
- "company": company name exactly as the CFPB records it (string)
- "product": one CFPB product category (string)
- "date": earliest date received, formatted YYYY-MM-DD (string)
- "state": two-letter U.S. state code (string)
- "size": number of complaints to return, 1-100 (integer)

Return only the JSON object, with no surrounding text."#;

/// Loads the parser prompt from `path`, falling back to the default.
///
/// The default is followed by the known product categories and bank names.
#[must_use]
pub fn load_parser_prompt(path: Option<&Path>) -> String {
    path.and_then(|p| std::fs::read_to_string(p).ok())
        .unwrap_or_else(default_parser_prompt)
}

/// Returns the compiled-in prompt with reference lists appended.
#[must_use]
pub fn default_parser_prompt() -> String {
    let mut prompt = String::from(QUERY_PARSER_SYSTEM_PROMPT);

    prompt.push_str("\n\nProduct categories:\n");
    for product in PRODUCT_CATEGORIES {
        let _ = writeln!(prompt, "- {product}");
    }

    prompt.push_str("\nCompany names:\n");
    for bank in RECOGNIZED_BANKS {
        let _ = writeln!(prompt, "- {bank}");
    }

    prompt
}

/// Formats the user message for a question.
#[must_use]
pub fn build_parser_prompt(question: &str) -> String {
    format!("Question: {}", question.trim())
}
