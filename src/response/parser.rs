//! Decoding of raw response bodies, with uniform detection of provider
//! error envelopes.
//!
//! The provider's error signaling is format-inconsistent: error payloads are
//! always JSON, even when XML was requested. The XML path is therefore
//! strict on success and format-tolerant on failure: a body that does not
//! parse as XML is re-read as JSON before being declared malformed.

use crate::response::error::ResponseError;
use log::warn;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decodes a JSON body into a [`Value`], surfacing provider errors.
///
/// The presence of a non-null `message` field is the sole error
/// discriminator; a successful payload never carries one. The numeric code
/// is read from `cod` (number or string form), defaulting to 0.
pub(crate) fn parse_json(body: &str) -> Result<Value, ResponseError> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        warn!("response body is not valid JSON: {e}");
        ResponseError::Malformed {
            detail: e.to_string(),
            body: body.to_string(),
        }
    })?;
    if let Some(message) = provider_message(&value) {
        let code = provider_code(&value);
        warn!("provider rejected the request: {message} (code {code})");
        return Err(ResponseError::Provider { message, code });
    }
    Ok(value)
}

/// [`parse_json`] followed by typed decoding of the validated envelope.
pub(crate) fn parse_json_as<T: DeserializeOwned>(body: &str) -> Result<T, ResponseError> {
    let value = parse_json(body)?;
    decode_value(value, body)
}

/// Decodes a JSON body whose envelope carries an explicit status code
/// instead of the `message` discriminator (the history endpoint reports a
/// benign `message` on success, so it cannot go through [`parse_json`]).
///
/// Any `cod` other than `success_code` raises a provider error with the
/// envelope's message and code.
pub(crate) fn parse_status_json_as<T: DeserializeOwned>(
    body: &str,
    success_code: i64,
) -> Result<T, ResponseError> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        warn!("response body is not valid JSON: {e}");
        ResponseError::Malformed {
            detail: e.to_string(),
            body: body.to_string(),
        }
    })?;
    let code = provider_code(&value);
    if code != success_code {
        let message = provider_message(&value).unwrap_or_default();
        warn!("provider rejected the request: {message} (code {code})");
        return Err(ResponseError::Provider { message, code });
    }
    decode_value(value, body)
}

/// Decodes an XML body into `T`.
///
/// Strict on the success path. On parse failure the body is re-read as
/// JSON: a JSON object carrying a `message` field is a provider error
/// envelope; anything else is malformed, with the raw body retained for
/// diagnostics.
pub(crate) fn parse_xml<T: DeserializeOwned>(body: &str) -> Result<T, ResponseError> {
    let xml_error = match serde_xml_rs::from_str::<T>(body) {
        Ok(document) => return Ok(document),
        Err(e) => e,
    };

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = provider_message(&value) {
            let code = provider_code(&value);
            warn!("provider rejected the request: {message} (code {code})");
            return Err(ResponseError::Provider { message, code });
        }
    }

    warn!("response body is not valid XML: {xml_error}");
    Err(ResponseError::Malformed {
        detail: xml_error.to_string(),
        body: body.to_string(),
    })
}

fn decode_value<T: DeserializeOwned>(value: Value, body: &str) -> Result<T, ResponseError> {
    serde_json::from_value(value).map_err(|e| {
        warn!("response envelope has an unexpected shape: {e}");
        ResponseError::Malformed {
            detail: e.to_string(),
            body: body.to_string(),
        }
    })
}

fn provider_message(value: &Value) -> Option<String> {
    match value.get("message") {
        None | Some(Value::Null) => None,
        Some(Value::String(message)) => Some(message.clone()),
        Some(other) => Some(other.to_string()),
    }
}

/// The provider emits `cod` both as a number and as a string depending on
/// the endpoint; both forms normalize to `i64`, defaulting to 0.
fn provider_code(value: &Value) -> i64 {
    match value.get("cod") {
        Some(Value::Number(code)) => code.as_i64().unwrap_or(0),
        Some(Value::String(code)) => code.parse().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Doc {
        value: String,
    }

    #[test]
    fn valid_xml_parses_without_an_error_marker() {
        let doc: Doc = parse_xml(r#"<doc value="ok"/>"#).unwrap();
        assert_eq!(doc.value, "ok");
    }

    #[test]
    fn json_error_envelope_surfaces_through_the_xml_path() {
        let body = r#"{"message": "city not found", "cod": 404}"#;
        let err = parse_xml::<Doc>(body).unwrap_err();
        match err {
            ResponseError::Provider { message, code } => {
                assert_eq!(message, "city not found");
                assert_eq!(code, 404);
            }
            other => panic!("expected a provider error, got {other:?}"),
        }
    }

    #[test]
    fn string_codes_normalize_to_numbers() {
        let body = r#"{"message": "blocked", "cod": "429"}"#;
        let err = parse_xml::<Doc>(body).unwrap_err();
        assert!(matches!(err, ResponseError::Provider { code: 429, .. }));
    }

    #[test]
    fn unreadable_bodies_are_malformed_and_keep_the_raw_body() {
        let err = parse_xml::<Doc>("neither xml nor json").unwrap_err();
        match err {
            ResponseError::Malformed { body, .. } => {
                assert_eq!(body, "neither xml nor json");
            }
            other => panic!("expected malformed, got {other:?}"),
        }
    }

    #[test]
    fn json_with_message_is_a_provider_error() {
        let err = parse_json(r#"{"message": "nothing to geocode", "cod": 400}"#).unwrap_err();
        assert!(matches!(
            err,
            ResponseError::Provider { code: 400, .. }
        ));
    }

    #[test]
    fn json_without_message_passes_through() {
        let value = parse_json(r#"{"cnt": 2, "list": []}"#).unwrap();
        assert_eq!(value["cnt"], 2);
    }

    #[test]
    fn null_message_is_not_an_error_marker() {
        assert!(parse_json(r#"{"message": null, "cnt": 0}"#).is_ok());
    }

    #[test]
    fn undecodable_json_is_malformed() {
        let err = parse_json("{not json").unwrap_err();
        assert!(matches!(err, ResponseError::Malformed { .. }));
    }

    #[derive(Debug, Deserialize)]
    struct StatusDoc {
        #[serde(default)]
        cnt: u32,
    }

    #[test]
    fn status_check_accepts_the_success_code_despite_a_message() {
        let body = r#"{"message": "Count: 24", "cod": "200", "cnt": 24}"#;
        let doc: StatusDoc = parse_status_json_as(body, 200).unwrap();
        assert_eq!(doc.cnt, 24);
    }

    #[test]
    fn status_check_raises_provider_errors_with_the_envelope_fields() {
        let body = r#"{"message": "requested time is out of allowed range", "cod": 400}"#;
        let err = parse_status_json_as::<StatusDoc>(body, 200).unwrap_err();
        match err {
            ResponseError::Provider { message, code } => {
                assert_eq!(message, "requested time is out of allowed range");
                assert_eq!(code, 400);
            }
            other => panic!("expected a provider error, got {other:?}"),
        }
    }
}
