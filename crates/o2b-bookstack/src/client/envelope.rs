//! Normalization of Bookstack response bodies.
//!
//! Success responses are normally `{"data": ...}`, some endpoints return a
//! bare list, and errors come back as `{"message": ...}` or `{"error": ...}`
//! (sometimes with a nested `{"error": {"message": ...}}`).

use serde_json::{Map, Value};

use crate::error::BookstackError;

const DECODE_PREVIEW_BYTES: usize = 200;
const PARSE_PREVIEW_CHARS: usize = 500;

/// Decode a body as UTF-8 JSON.
pub(super) fn decode_json(bytes: &[u8]) -> Result<Value, BookstackError> {
    let text = std::str::from_utf8(bytes).map_err(|source| BookstackError::Decode {
        source,
        preview: bytes[..bytes.len().min(DECODE_PREVIEW_BYTES)]
            .escape_ascii()
            .to_string(),
    })?;

    serde_json::from_str(text).map_err(|source| BookstackError::Parse {
        source,
        preview: text.chars().take(PARSE_PREVIEW_CHARS).collect(),
    })
}

/// Return the payload under `data`, accepting bare lists.
pub(super) fn unwrap_data(value: Value) -> Result<Value, BookstackError> {
    match value {
        Value::Object(mut map) => {
            if let Some(data) = map.remove("data") {
                return Ok(data);
            }
            if let Some(message) = error_message(&map) {
                return Err(BookstackError::Api {
                    message,
                    response: Value::Object(map),
                });
            }
            Err(BookstackError::UnexpectedEnvelope {
                keys: map.keys().cloned().collect(),
                response: Value::Object(map),
            })
        }
        list @ Value::Array(_) => Ok(list),
        other => Err(BookstackError::UnexpectedEnvelope {
            keys: Vec::new(),
            response: other,
        }),
    }
}

/// Message for an error status, from whatever the body holds.
pub(super) fn http_error_message(status: u16, body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => error_message(&map).unwrap_or_else(|| format!("HTTP {status}")),
        Ok(_) => format!("HTTP {status}"),
        Err(_) if body.is_empty() => "Unknown error".to_owned(),
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}

/// `message` if present, otherwise `error`.
fn error_message(map: &Map<String, Value>) -> Option<String> {
    map.get("message")
        .or_else(|| map.get("error"))
        .map(message_text)
}

fn message_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(inner) => match inner.get("message") {
            Some(Value::String(s)) => s.clone(),
            _ => value.to_string(),
        },
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_unwrap_data_list() {
        let data = unwrap_data(json!({"data": [1, 2, 3], "total": 3})).unwrap();
        assert_eq!(data, json!([1, 2, 3]));
    }

    #[test]
    fn test_unwrap_bare_list() {
        assert_eq!(unwrap_data(json!([1, 2, 3])).unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn test_unwrap_error_payload() {
        let err = unwrap_data(json!({"error": "bad token"})).unwrap_err();
        assert!(matches!(&err, BookstackError::Api { message, .. } if message == "bad token"));
        assert!(err.to_string().contains("bad token"));
    }

    #[test]
    fn test_unwrap_message_preferred_over_error() {
        let err = unwrap_data(json!({"error": "second", "message": "first"})).unwrap_err();
        assert!(matches!(err, BookstackError::Api { message, .. } if message == "first"));
    }

    #[test]
    fn test_unwrap_unexpected_keys() {
        let err = unwrap_data(json!({"foo": "bar"})).unwrap_err();
        let msg = err.to_string();

        assert!(matches!(&err, BookstackError::UnexpectedEnvelope { keys, .. } if keys == &["foo"]));
        assert!(msg.contains("[\"foo\"]"));
        assert!(msg.contains(r#"{"foo":"bar"}"#));
        assert!(msg.contains("1. Invalid API credentials"));
        assert!(msg.contains("BOOKSTACK_TOKEN_ID"));
        assert!(msg.contains("2. Incorrect BOOKSTACK_BASE_URL"));
        assert!(msg.contains("3. API endpoint format has changed"));
    }

    #[test]
    fn test_unwrap_scalar_is_unexpected() {
        let err = unwrap_data(json!(42)).unwrap_err();
        assert!(matches!(err, BookstackError::UnexpectedEnvelope { keys, .. } if keys.is_empty()));
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let err = decode_json(b"{\"data\": \"\xff\xfe\"}").unwrap_err();
        let BookstackError::Decode { preview, .. } = &err else {
            panic!("expected decode error, got {err:?}");
        };
        assert!(preview.contains("\\xff"));
        assert!(err.to_string().contains("Failed to decode API response"));
    }

    #[test]
    fn test_decode_preview_truncated() {
        let mut body = vec![b'a'; 300];
        body.push(0xff);
        let err = decode_json(&body).unwrap_err();
        let BookstackError::Decode { preview, .. } = err else {
            panic!("expected decode error");
        };
        assert_eq!(preview.len(), DECODE_PREVIEW_BYTES);
    }

    #[test]
    fn test_decode_invalid_json() {
        let body = format!("<html>{}</html>", "x".repeat(1000));
        let err = decode_json(body.as_bytes()).unwrap_err();
        let BookstackError::Parse { preview, .. } = &err else {
            panic!("expected parse error, got {err:?}");
        };
        assert_eq!(preview.chars().count(), PARSE_PREVIEW_CHARS);
        assert!(preview.starts_with("<html>"));
        assert!(err.to_string().contains("Failed to parse API response as JSON"));
    }

    #[test]
    fn test_http_message_field() {
        let body = br#"{"message": "No permission", "error": "ignored"}"#;
        assert_eq!(http_error_message(403, body), "No permission");
    }

    #[test]
    fn test_http_error_field() {
        assert_eq!(http_error_message(401, br#"{"error": "bad token"}"#), "bad token");
    }

    #[test]
    fn test_http_nested_error_object() {
        let body = br#"{"error": {"code": 404, "message": "Book not found"}}"#;
        assert_eq!(http_error_message(404, body), "Book not found");
    }

    #[test]
    fn test_http_json_without_message() {
        assert_eq!(http_error_message(500, br#"{"status": "down"}"#), "HTTP 500");
        assert_eq!(http_error_message(502, b"[1, 2]"), "HTTP 502");
    }

    #[test]
    fn test_http_plain_text_body() {
        assert_eq!(http_error_message(502, b"Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_http_empty_body() {
        assert_eq!(http_error_message(500, b""), "Unknown error");
    }
}
