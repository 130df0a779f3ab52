//! MCP tool parameter types.
//!
//! Defines the input schemas for MCP tools using `schemars` for automatic
//! JSON Schema generation required by the MCP protocol.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::query::DEFAULT_SIZE;
use crate::core::{ComplaintQuery, FieldRestrict, ResponseFormat, SortOrder};
use crate::error::ValidationError;

/// Parameters for the `search_complaints` MCP tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchComplaintsParams {
    /// Full-text query matched across narrative, product, and issue fields.
    /// Leave blank to fetch the most recent complaints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Exact company string as shown in the CFPB database, e.g.
    /// `"JPMorgan Chase Bank, N.A."`, `"Bank of America, N.A."`,
    /// `"Wells Fargo Bank, N.A."`, `"PNC Bank N.A."`, `"Ally Bank"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// Exact CFPB product category, e.g. `"Mortgage"`, `"Credit card"`,
    /// `"Checking or savings account"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,

    /// Two-letter state code of the consumer, e.g. `"CA"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Only return complaints received on or after this date (e.g.
    /// `"2024-01-01"`). Mutually exclusive with `days`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,

    /// Look back this many days (default 30, 0 = no date filter).
    /// Mutually exclusive with `since`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,

    /// Maximum number of results to return (1-100, default 20).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,

    /// Pagination offset (default 0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,

    /// Sort order: `"relevance"`, `"created_date_desc"` (default),
    /// `"created_date_asc"`, or `"total_amount_desc"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    /// Restrict the text search to `"all"`, `"keyword"`, or
    /// `"complaint_what_happened"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Set to `true` to return only complaints that include consumer
    /// narrative text.
    #[serde(default)]
    pub narrative_only: bool,

    /// Response format: `"json"` (default) or `"csv"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl SearchComplaintsParams {
    /// Converts tool arguments into a [`ComplaintQuery`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for unknown sort, field, or format values.
    pub fn into_query(self) -> Result<ComplaintQuery, ValidationError> {
        Ok(ComplaintQuery {
            text: self.text,
            company: self.company,
            product: self.product,
            state: self.state,
            since: self.since,
            days: self.days,
            size: self.size.unwrap_or(DEFAULT_SIZE),
            offset: self.offset.unwrap_or(0),
            sort: self.sort.as_deref().map(str::parse::<SortOrder>).transpose()?,
            field_restrict: self
                .field
                .as_deref()
                .map(str::parse::<FieldRestrict>)
                .transpose()?,
            narrative_only: self.narrative_only,
            format: self
                .format
                .as_deref()
                .map(str::parse::<ResponseFormat>)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}
