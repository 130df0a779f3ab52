//! Complaint query model and the CFPB parameter mapper.
//!
//! [`ComplaintQuery`] holds loosely-specified caller intent. [`map_query`]
//! validates it and translates it into the exact query-string vocabulary
//! of the CFPB search API ([`CfpbParams`]).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Default page size.
pub const DEFAULT_SIZE: u32 = 20;
/// Largest page size the CFPB API accepts.
pub const MAX_SIZE: u32 = 100;
/// Lookback applied when neither `since` nor `days` is supplied.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;

/// Date layouts accepted for `since`, tried in order after ISO 8601.
const DATE_FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
];

/// Date-time layouts accepted for `since`; only the date part is kept.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Result ordering understood by the CFPB API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Search relevance.
    Relevance,
    /// Newest first.
    #[default]
    CreatedDateDesc,
    /// Oldest first.
    CreatedDateAsc,
    /// Largest disputed amount first.
    TotalAmountDesc,
}

impl SortOrder {
    /// Returns the CFPB wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::CreatedDateDesc => "created_date_desc",
            Self::CreatedDateAsc => "created_date_asc",
            Self::TotalAmountDesc => "total_amount_desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relevance" => Ok(Self::Relevance),
            "created_date_desc" => Ok(Self::CreatedDateDesc),
            "created_date_asc" => Ok(Self::CreatedDateAsc),
            "total_amount_desc" => Ok(Self::TotalAmountDesc),
            _ => Err(ValidationError::UnsupportedSort {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which complaint fields the free-text term is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRestrict {
    /// Every searchable field.
    All,
    /// Keyword fields only.
    Keyword,
    /// The consumer narrative only.
    ComplaintWhatHappened,
}

impl FieldRestrict {
    /// Returns the CFPB wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Keyword => "keyword",
            Self::ComplaintWhatHappened => "complaint_what_happened",
        }
    }
}

impl FromStr for FieldRestrict {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "keyword" => Ok(Self::Keyword),
            "complaint_what_happened" => Ok(Self::ComplaintWhatHappened),
            _ => Err(ValidationError::UnsupportedField {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for FieldRestrict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body format requested from the CFPB API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Search-hit JSON, normalized into complaints.
    #[default]
    Json,
    /// Raw CSV export, returned unchanged.
    Csv,
}

impl ResponseFormat {
    /// Returns the CFPB wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// Returns the `Accept` header value for this format.
    #[must_use]
    pub const fn accept(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
        }
    }
}

impl FromStr for ResponseFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(ValidationError::UnsupportedFormat {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-facing complaint search filters.
///
/// Built per request and dropped with it. Fields use the caller's
/// vocabulary; [`map_query`] translates them to CFPB parameter names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintQuery {
    /// Free-text search term.
    pub text: Option<String>,
    /// Exact CFPB company name (e.g. `"PNC Bank N.A."`).
    pub company: Option<String>,
    /// Exact CFPB product category.
    pub product: Option<String>,
    /// Two-letter state code.
    pub state: Option<String>,
    /// Earliest date received. Mutually exclusive with `days`.
    pub since: Option<String>,
    /// Lookback in days. `None` means the 30-day default, `Some(0)` means
    /// no lower bound.
    pub days: Option<u32>,
    /// Page size, `1..=100`.
    pub size: u32,
    /// Pagination offset.
    pub offset: u32,
    /// Result ordering; newest first when unset.
    pub sort: Option<SortOrder>,
    /// Field restriction for the free-text term.
    pub field_restrict: Option<FieldRestrict>,
    /// Only complaints that carry consumer narrative text.
    pub narrative_only: bool,
    /// Response body format.
    pub format: ResponseFormat,
}

impl Default for ComplaintQuery {
    fn default() -> Self {
        Self {
            text: None,
            company: None,
            product: None,
            state: None,
            since: None,
            days: None,
            size: DEFAULT_SIZE,
            offset: 0,
            sort: None,
            field_restrict: None,
            narrative_only: false,
            format: ResponseFormat::Json,
        }
    }
}

impl ComplaintQuery {
    /// Maps this query using today's local date for `days` resolution.
    ///
    /// # Errors
    ///
    /// See [`map_query`].
    pub fn to_params(&self) -> Result<CfpbParams, ValidationError> {
        map_query(self, Local::now().date_naive())
    }
}

/// CFPB query parameters keyed by official parameter name.
///
/// Never holds empty values. Ordered so that equal inputs compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CfpbParams(BTreeMap<&'static str, String>);

impl CfpbParams {
    /// Returns the value for a parameter name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns `true` if the parameter is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    fn set(&mut self, key: &'static str, value: impl Into<String>) {
        let value = value.into();
        if !value.is_empty() {
            self.0.insert(key, value);
        }
    }
}

/// Validates a query and maps it to CFPB parameters.
///
/// `today` anchors the `days` lookback so a single call resolves one date.
///
/// # Errors
///
/// Returns [`ValidationError`] when `size` is outside `1..=100`, when both
/// `since` and `days` are supplied, or when `since` is not a date.
pub fn map_query(query: &ComplaintQuery, today: NaiveDate) -> Result<CfpbParams, ValidationError> {
    if !(1..=MAX_SIZE).contains(&query.size) {
        return Err(ValidationError::SizeOutOfRange { size: query.size });
    }

    let since = non_empty(query.since.as_deref());
    if since.is_some() && query.days.is_some() {
        return Err(ValidationError::MutuallyExclusiveDates);
    }

    let date_min = match since {
        Some(raw) => Some(parse_calendar_date(raw)?),
        None => lookback(today, query.days.unwrap_or(DEFAULT_LOOKBACK_DAYS))?,
    };

    let mut params = CfpbParams::default();
    params.set("size", query.size.to_string());
    params.set("frm", query.offset.to_string());
    params.set("sort", query.sort.unwrap_or_default().as_str());

    if let Some(text) = non_empty(query.text.as_deref()) {
        params.set("search_term", text);
        params.set("field", FieldRestrict::All.as_str());
    }
    if let Some(field) = query.field_restrict {
        params.set("field", field.as_str());
    }
    if let Some(company) = non_empty(query.company.as_deref()) {
        params.set("company", company);
    }
    if let Some(product) = non_empty(query.product.as_deref()) {
        params.set("product", product);
    }
    if let Some(state) = non_empty(query.state.as_deref()) {
        params.set("state", state);
    }
    if let Some(date) = date_min {
        params.set("date_received_min", date.format("%Y-%m-%d").to_string());
    }
    if query.narrative_only {
        params.set("has_narrative", "true");
    }
    if query.format == ResponseFormat::Csv {
        params.set("format", ResponseFormat::Csv.as_str());
    }

    Ok(params)
}

/// Reads a calendar date in any of the accepted layouts.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] if no layout matches.
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let s = raw.trim();
    let invalid = || ValidationError::InvalidDate {
        value: raw.to_string(),
    };

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    for fmt in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    // Compact YYYYMMDD
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        let year: i32 = s[..4].parse().map_err(|_| invalid())?;
        let month: u32 = s[4..6].parse().map_err(|_| invalid())?;
        let day: u32 = s[6..].parse().map_err(|_| invalid())?;
        return NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid);
    }

    Err(invalid())
}

fn lookback(today: NaiveDate, days: u32) -> Result<Option<NaiveDate>, ValidationError> {
    if days == 0 {
        return Ok(None);
    }
    today
        .checked_sub_days(Days::new(u64::from(days)))
        .map(Some)
        .ok_or_else(|| ValidationError::InvalidDate {
            value: format!("{days} days before {today}"),
        })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
