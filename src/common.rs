use std::time::Duration;

use log::warn;
use reqwest::StatusCode;

use crate::error::{Error, ErrorResponse};

pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Decodes a failure-status body into an [`Error`].
///
/// Prefers the structured [`ErrorResponse`] shape; anything else, including a
/// parse that yields an empty message, falls back to echoing the raw body
/// together with the status code.
pub(crate) fn parse_error_from_body(status: StatusCode, body: &[u8]) -> Error {
    if let Ok(parsed) = serde_json::from_slice::<ErrorResponse>(body) {
        if !parsed.error.is_empty() {
            return Error::Api {
                message: parsed.error,
                correlation_id: parsed.correlation_id,
            };
        }
    }
    warn!(
        "error response body is not structured (status {})",
        status.as_u16()
    );
    Error::ApiUnparsed {
        status: status.as_u16(),
        body: String::from_utf8_lossy(body).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_body_yields_api_error() {
        let err = parse_error_from_body(
            StatusCode::NOT_FOUND,
            br#"{"error":"not found","correlation_id":"abc"}"#,
        );
        match err {
            Error::Api {
                message,
                correlation_id,
            } => {
                assert_eq!(message, "not found");
                assert_eq!(correlation_id, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn structured_error_display_keeps_prefix_and_correlation() {
        let err = parse_error_from_body(
            StatusCode::FORBIDDEN,
            br#"{"error":"policy denied","correlation_id":"req-42"}"#,
        );
        assert_eq!(
            err.to_string(),
            "api error: 'policy denied' (correlation: req-42)"
        );
    }

    #[test]
    fn unparsable_body_yields_fallback_with_status() {
        let err = parse_error_from_body(StatusCode::INTERNAL_SERVER_ERROR, b"oops");
        assert_eq!(err.to_string(), "api error: *unparsed 'oops' (status 500)");
    }

    #[test]
    fn empty_message_falls_back_to_raw_body() {
        let body = br#"{"correlation_id":"abc"}"#;
        let err = parse_error_from_body(StatusCode::BAD_GATEWAY, body);
        match err {
            Error::ApiUnparsed { status, body } => {
                assert_eq!(status, 502);
                assert!(body.contains("abc"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
