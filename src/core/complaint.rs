//! Complaint records and the search-hit normalizer.
//!
//! The CFPB API answers with Elasticsearch-shaped JSON
//! (`hits.hits[]._source`). [`normalize`] flattens that into [`Complaint`]
//! records, or into a [`Guidance`] payload when nothing matched.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::reference::{PRODUCT_CATEGORIES, RECOGNIZED_BANKS, zero_result_note};

/// A single consumer complaint.
///
/// Fields other than `narrative` are the verbatim `_source` values, `null`
/// when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    /// CFPB complaint identifier.
    pub complaint_id: Value,
    /// Date the CFPB received the complaint.
    pub date_received: Value,
    /// Date the complaint was forwarded to the company.
    pub date_sent_to_company: Value,
    /// Product category.
    pub product: Value,
    /// Sub-product.
    pub sub_product: Value,
    /// Issue.
    pub issue: Value,
    /// Sub-issue.
    pub sub_issue: Value,
    /// Consumer narrative; empty when the consumer gave none.
    pub narrative: String,
    /// Whether the consumer consented to publishing the narrative.
    pub consumer_consent_provided: Value,
    /// Company name.
    pub company: Value,
    /// Company's public response.
    pub company_public_response: Value,
    /// Company's response to the consumer.
    pub company_response_to_consumer: Value,
    /// Whether the company responded in time.
    pub timely_response: Value,
    /// Whether the consumer disputed the response.
    pub consumer_disputed: Value,
    /// Consumer's state.
    pub state: Value,
    /// Consumer's ZIP code.
    pub zip_code: Value,
    /// Submission channel.
    pub submitted_via: Value,
    /// Tags such as `"Servicemember"` or `"Older American"`.
    pub tags: Value,
}

impl Complaint {
    /// Builds a complaint from a hit's `_source` object.
    #[must_use]
    pub fn from_source(source: &Value) -> Self {
        let field = |key: &str| source.get(key).cloned().unwrap_or(Value::Null);

        let narrative = source
            .get("consumer_complaint_narrative")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Self {
            complaint_id: field("complaint_id"),
            date_received: field("date_received"),
            date_sent_to_company: field("date_sent_to_company"),
            product: field("product"),
            sub_product: field("sub_product"),
            issue: field("issue"),
            sub_issue: field("sub_issue"),
            narrative,
            consumer_consent_provided: field("consumer_consent_provided"),
            company: field("company"),
            company_public_response: field("company_public_response"),
            company_response_to_consumer: field("company_response_to_consumer"),
            timely_response: field("timely_response"),
            consumer_disputed: field("consumer_disputed"),
            state: field("state"),
            zip_code: field("zip_code"),
            submitted_via: field("submitted_via"),
            tags: field("tags"),
        }
    }
}

/// Payload returned instead of an empty list when a search matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guidance {
    /// Explanation of likely causes, with both lists inlined.
    pub system_message: String,
    /// Every valid product category.
    pub product_categories: Vec<String>,
    /// Every recognized bank name.
    pub bank_names: Vec<String>,
}

impl Guidance {
    /// Builds the zero-result guidance from the static reference data.
    #[must_use]
    pub fn zero_results() -> Self {
        Self {
            system_message: zero_result_note(),
            product_categories: PRODUCT_CATEGORIES.iter().map(|s| (*s).to_string()).collect(),
            bank_names: RECOGNIZED_BANKS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// Result of a complaint search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchOutcome {
    /// One or more complaints, in upstream order.
    Complaints(Vec<Complaint>),
    /// Zero results; guidance for refining the query.
    Guidance(Guidance),
    /// Raw CSV body, not normalized.
    Csv(String),
}

impl SearchOutcome {
    /// Number of complaints carried (zero for guidance, unknown-as-zero for CSV).
    #[must_use]
    pub fn complaint_count(&self) -> usize {
        match self {
            Self::Complaints(list) => list.len(),
            Self::Guidance(_) | Self::Csv(_) => 0,
        }
    }
}

/// Normalizes a CFPB JSON search response.
///
/// Hits without a `_source` object produce an all-null complaint so the
/// output keeps one record per hit.
#[must_use]
pub fn normalize(body: &Value) -> SearchOutcome {
    let hits = body
        .pointer("/hits/hits")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    if hits.is_empty() {
        return SearchOutcome::Guidance(Guidance::zero_results());
    }

    let empty = Value::Object(serde_json::Map::new());
    let complaints = hits
        .iter()
        .map(|hit| Complaint::from_source(hit.get("_source").unwrap_or(&empty)))
        .collect();

    SearchOutcome::Complaints(complaints)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_hits_returns_guidance() {
        let outcome = normalize(&json!({"hits": {"hits": []}}));
        let SearchOutcome::Guidance(guidance) = outcome else {
            panic!("expected guidance");
        };
        assert_eq!(guidance.product_categories.len(), 10);
        assert_eq!(guidance.bank_names.len(), 20);
        for product in PRODUCT_CATEGORIES {
            assert!(guidance.product_categories.iter().any(|p| p == product));
        }
        for bank in RECOGNIZED_BANKS {
            assert!(guidance.bank_names.iter().any(|b| b == bank));
        }
    }

    #[test]
    fn test_missing_hits_path_returns_guidance() {
        assert!(matches!(normalize(&json!({})), SearchOutcome::Guidance(_)));
        assert!(matches!(
            normalize(&json!({"hits": {"total": 0}})),
            SearchOutcome::Guidance(_)
        ));
    }

    #[test]
    fn test_one_complaint_per_hit_in_order() {
        let body = json!({"hits": {"hits": [
            {"_source": {"complaint_id": "3", "company": "Ally Bank"}},
            {"_source": {"complaint_id": "1", "company": "Regions Bank"}},
            {"_source": {"complaint_id": "2", "company": "Truist Bank"}}
        ]}});
        let SearchOutcome::Complaints(list) = normalize(&body) else {
            panic!("expected complaints");
        };
        let ids: Vec<_> = list.iter().map(|c| c.complaint_id.clone()).collect();
        assert_eq!(ids, vec![json!("3"), json!("1"), json!("2")]);
        assert_eq!(list[1].company, json!("Regions Bank"));
    }

    #[test]
    fn test_narrative_defaults_to_empty() {
        let body = json!({"hits": {"hits": [
            {"_source": {"complaint_id": "1"}},
            {"_source": {"complaint_id": "2", "consumer_complaint_narrative": null}},
            {"_source": {"complaint_id": "3", "consumer_complaint_narrative": "They charged me twice."}}
        ]}});
        let SearchOutcome::Complaints(list) = normalize(&body) else {
            panic!("expected complaints");
        };
        assert_eq!(list[0].narrative, "");
        assert_eq!(list[1].narrative, "");
        assert_eq!(list[2].narrative, "They charged me twice.");
    }

    #[test]
    fn test_absent_fields_are_null_and_values_verbatim() {
        let body = json!({"hits": {"hits": [{"_source": {
            "complaint_id": 4_812_345,
            "timely_response": "Yes",
            "tags": ["Servicemember", "Older American"]
        }}]}});
        let SearchOutcome::Complaints(list) = normalize(&body) else {
            panic!("expected complaints");
        };
        let c = &list[0];
        assert_eq!(c.complaint_id, json!(4_812_345));
        assert_eq!(c.timely_response, json!("Yes"));
        assert_eq!(c.sub_issue, Value::Null);
        assert_eq!(c.zip_code, Value::Null);
        assert_eq!(c.tags, json!(["Servicemember", "Older American"]));
    }

    #[test]
    fn test_tags_are_not_coerced() {
        let body = json!({"hits": {"hits": [
            {"_source": {"tags": "Servicemember"}},
            {"_source": {"tags": ["Older American", 7, null]}}
        ]}});
        let SearchOutcome::Complaints(list) = normalize(&body) else {
            panic!("expected complaints");
        };
        assert_eq!(list[0].tags, json!("Servicemember"));
        assert_eq!(list[1].tags, json!(["Older American", 7, null]));
    }

    #[test]
    fn test_hit_without_source() {
        let SearchOutcome::Complaints(list) = normalize(&json!({"hits": {"hits": [{}]}})) else {
            panic!("expected complaints");
        };
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].company, Value::Null);
        assert_eq!(list[0].tags, Value::Null);
    }

    #[test]
    fn test_outcome_serialization() {
        let guidance = serde_json::to_value(SearchOutcome::Guidance(Guidance::zero_results()))
            .unwrap_or_default();
        assert!(guidance["system_message"].is_string());
        assert_eq!(guidance["bank_names"].as_array().map_or(0, Vec::len), 20);

        let complaints = serde_json::to_value(normalize(&json!({"hits": {"hits": [
            {"_source": {"complaint_id": "9"}}
        ]}})))
        .unwrap_or_default();
        assert!(complaints.is_array());
        assert_eq!(complaints[0]["narrative"], json!(""));
        assert_eq!(complaints[0]["tags"], Value::Null);

        let csv = serde_json::to_value(SearchOutcome::Csv("a,b\n".to_string())).unwrap_or_default();
        assert_eq!(csv, json!("a,b\n"));
    }
}
