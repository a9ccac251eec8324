//! Extraction of item payloads from incoming requests.
//!
//! A payload travels as a JSON text inside a named form field, either in
//! the query string or in an `application/x-www-form-urlencoded` body.
//! Update requests may instead carry the JSON object as the raw body.

use axum::http::{HeaderMap, header};
use serde_json::Value;

use crate::error::{DocumentError, DocumentResult};
use crate::models::Item;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn is_form_body(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim_start().starts_with(FORM_CONTENT_TYPE))
        .unwrap_or(false)
}

fn first_value(encoded: &[u8], name: &str) -> Option<String> {
    url::form_urlencoded::parse(encoded)
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// First non-empty value of form field `name`. Form-encoded body values
/// take precedence over query values.
pub fn form_field(query: Option<&str>, headers: &HeaderMap, body: &[u8], name: &str) -> Option<String> {
    let from_body = is_form_body(headers)
        .then(|| first_value(body, name))
        .flatten();

    from_body
        .or_else(|| query.and_then(|q| first_value(q.as_bytes(), name)))
        .filter(|value| !value.is_empty())
}

/// Parse `raw` as a JSON object.
pub fn parse_item(raw: &[u8]) -> DocumentResult<Item> {
    match serde_json::from_slice::<Value>(raw) {
        Ok(Value::Object(item)) => Ok(item),
        Ok(other) => Err(DocumentError::InvalidPayload(format!(
            "expected a JSON object, got {}",
            kind(&other)
        ))),
        Err(e) => Err(DocumentError::InvalidPayload(e.to_string())),
    }
}

/// Payload for create: the named field is required.
pub fn required_item(
    query: Option<&str>,
    headers: &HeaderMap,
    body: &[u8],
    name: &str,
) -> DocumentResult<Item> {
    let raw = form_field(query, headers, body, name)
        .ok_or_else(|| DocumentError::MissingPayload(name.to_string()))?;
    parse_item(raw.as_bytes())
}

/// Payload for update: the named field when present, otherwise the raw body.
pub fn field_or_body_item(
    query: Option<&str>,
    headers: &HeaderMap,
    body: &[u8],
    name: &str,
) -> DocumentResult<Item> {
    match form_field(query, headers, body, name) {
        Some(raw) => parse_item(raw.as_bytes()),
        None if body.is_empty() || is_form_body(headers) => {
            Err(DocumentError::MissingPayload(name.to_string()))
        }
        None => parse_item(body),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn form_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        headers
    }

    #[test]
    fn test_field_from_query() {
        let query = "job=%7B%22Name%22%3A%22build%22%7D&other=1";
        let raw = form_field(Some(query), &HeaderMap::new(), b"", "job").unwrap();
        assert_eq!(raw, r#"{"Name":"build"}"#);
    }

    #[test]
    fn test_field_from_form_body() {
        let body = b"job=%7B%22Name%22%3A%22a%20b%22%7D";
        let item = required_item(None, &form_headers(), body, "job").unwrap();
        assert_eq!(item["Name"], "a b");
    }

    #[test]
    fn test_body_wins_over_query() {
        let raw = form_field(Some("job=query"), &form_headers(), b"job=body", "job").unwrap();
        assert_eq!(raw, "body");
    }

    #[test]
    fn test_body_ignored_without_form_content_type() {
        assert!(form_field(None, &HeaderMap::new(), b"job=body", "job").is_none());
    }

    #[test]
    fn test_empty_field_counts_as_missing() {
        let err = required_item(Some("job="), &HeaderMap::new(), b"", "job").unwrap_err();
        assert!(matches!(err, DocumentError::MissingPayload(name) if name == "job"));
    }

    #[test]
    fn test_non_object_payload_rejected() {
        let err = required_item(Some("job=%5B1%2C2%5D"), &HeaderMap::new(), b"", "job").unwrap_err();
        assert!(matches!(err, DocumentError::InvalidPayload(msg) if msg.contains("an array")));
    }

    #[test]
    fn test_malformed_payload_rejected() {
        let err = parse_item(b"{not json").unwrap_err();
        assert!(matches!(err, DocumentError::InvalidPayload(_)));
    }

    #[test]
    fn test_update_falls_back_to_raw_body() {
        let item =
            field_or_body_item(None, &HeaderMap::new(), br#"{"Status":"done"}"#, "job").unwrap();
        assert_eq!(item["Status"], "done");
    }

    #[test]
    fn test_update_prefers_field() {
        let item = field_or_body_item(
            Some("job=%7B%22Status%22%3A%22q%22%7D"),
            &HeaderMap::new(),
            br#"{"Status":"body"}"#,
            "job",
        )
        .unwrap();
        assert_eq!(item["Status"], "q");
    }

    #[test]
    fn test_update_without_any_payload() {
        let err = field_or_body_item(None, &HeaderMap::new(), b"", "job").unwrap_err();
        assert!(matches!(err, DocumentError::MissingPayload(_)));
    }
}
