//! Route handlers.
//!
//! # Responsibility
//! - Decode request bodies and query strings into service inputs.
//! - Wrap service results in the public JSON envelopes.

use std::sync::Arc;

use attrbase_core::{
    AttributeIngestService, AttributeList, AttributeQuery, AttributeQueryService, IngestOutcome,
    SqliteAttributeRepository,
};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::state::AppState;

/// `{ "data": ... }` envelope.
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// `GET /health`. Never touches storage.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// `POST /api/attribute` with `{ "attributes": string | string[] }`.
pub async fn create_attributes_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<DataEnvelope<IngestOutcome>>, ApiError> {
    let Json(body) = payload.map_err(|_| ApiError::InvalidRequestShape)?;
    let items = parse_attributes_field(&body)?;

    let outcome = state
        .with_connection(move |conn| {
            let repo = SqliteAttributeRepository::try_new(conn)?;
            AttributeIngestService::new(repo).create_attributes(items.as_slice())
        })
        .await?;

    Ok(Json(DataEnvelope { data: outcome }))
}

/// `GET /api/attribute?limit=<int>&search=<string>`.
pub async fn filter_attributes_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<AttributeList>, ApiError> {
    let query = list_query_from_params(&params);

    let list = state
        .with_connection(move |conn| {
            let repo = SqliteAttributeRepository::try_new(conn)?;
            AttributeQueryService::new(repo).get_attributes(&query)
        })
        .await?;

    Ok(Json(list))
}

/// Accepts a single string or an array made only of strings.
pub fn parse_attributes_field(body: &Value) -> Result<Vec<String>, ApiError> {
    match body.get("attributes") {
        Some(Value::String(single)) => Ok(vec![single.clone()]),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_owned)
                    .ok_or(ApiError::InvalidRequestShape)
            })
            .collect(),
        _ => Err(ApiError::InvalidRequestShape),
    }
}

/// Builds the service query from raw query-string pairs; the first
/// occurrence of each key wins.
pub fn list_query_from_params(params: &[(String, String)]) -> AttributeQuery {
    let first = |key: &str| {
        params
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    };

    AttributeQuery {
        limit: first("limit").map_or(0, parse_limit),
        search: first("search")
            .filter(|text| !text.is_empty())
            .map(str::to_owned),
    }
}

/// Lenient integer parsing: optional leading whitespace and sign, then the
/// longest run of ASCII digits. Anything unparsable or non-positive is `0`.
pub fn parse_limit(raw: &str) -> usize {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if negative || digits.is_empty() {
        return 0;
    }

    digits.parse::<usize>().unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::{list_query_from_params, parse_attributes_field, parse_limit};
    use crate::error::ApiError;
    use serde_json::json;

    #[test]
    fn parse_limit_reads_leading_digits() {
        assert_eq!(parse_limit("5"), 5);
        assert_eq!(parse_limit(" 12abc"), 12);
        assert_eq!(parse_limit("+3"), 3);
    }

    #[test]
    fn parse_limit_treats_garbage_and_negatives_as_no_limit() {
        assert_eq!(parse_limit(""), 0);
        assert_eq!(parse_limit("abc"), 0);
        assert_eq!(parse_limit("-4"), 0);
        assert_eq!(parse_limit("0"), 0);
    }

    #[test]
    fn parse_limit_saturates_on_overflow() {
        assert_eq!(parse_limit("99999999999999999999999999"), usize::MAX);
    }

    #[test]
    fn empty_search_is_not_a_search() {
        let params = vec![
            ("limit".to_string(), "2".to_string()),
            ("search".to_string(), String::new()),
        ];
        let query = list_query_from_params(&params);
        assert_eq!(query.limit, 2);
        assert_eq!(query.search, None);
    }

    #[test]
    fn attributes_field_accepts_string_or_string_array() {
        assert_eq!(
            parse_attributes_field(&json!({ "attributes": "Color" })).unwrap(),
            vec!["Color"]
        );
        assert_eq!(
            parse_attributes_field(&json!({ "attributes": ["Color", "Size"] })).unwrap(),
            vec!["Color", "Size"]
        );
        assert!(parse_attributes_field(&json!({ "attributes": [] }))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn attributes_field_rejects_other_shapes() {
        for body in [
            json!({}),
            json!({ "attributes": 7 }),
            json!({ "attributes": null }),
            json!({ "attributes": ["Color", 1] }),
            json!(["Color"]),
        ] {
            assert!(matches!(
                parse_attributes_field(&body),
                Err(ApiError::InvalidRequestShape)
            ));
        }
    }
}
