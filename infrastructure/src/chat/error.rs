//! Mapping of HTTP failures and error envelopes to [`GatewayError`]

use super::protocol::{ErrorBody, ErrorEnvelope};
use hairlens_application::GatewayError;
use hairlens_domain::core::string::truncate;
use serde_json::Value;

const MAX_ERROR_BODY: usize = 300;

/// Error for a non-success HTTP status, preferring the envelope message
pub fn from_status(status: u16, body: &str, retry_after: Option<u64>) -> GatewayError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .unwrap_or_else(|| truncate(body.trim(), MAX_ERROR_BODY));
    GatewayError::from_status(status, message, retry_after)
}

/// Error for a success response that carries an `error` envelope.
///
/// Mapped by `error.code` like an HTTP status; unknown codes are transient.
pub fn from_envelope(error: &ErrorBody) -> GatewayError {
    let message = error
        .message
        .clone()
        .unwrap_or_else(|| "provider returned an error".to_string());
    match error.code.as_ref().and_then(status_code) {
        Some(status) => GatewayError::from_status(status, message, None),
        None => GatewayError::Other(message),
    }
}

fn status_code(code: &Value) -> Option<u16> {
    match code {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Seconds from a `Retry-After` header; HTTP-date values are ignored
pub fn parse_retry_after(value: &str) -> Option<u64> {
    value.trim().parse().ok()
}

pub fn from_reqwest(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hairlens_application::FailureCategory;

    #[test]
    fn test_status_uses_envelope_message() {
        let err = from_status(402, r#"{"error":{"message":"Insufficient credits","code":402}}"#, None);
        assert_eq!(err, GatewayError::QuotaExhausted("Insufficient credits".to_string()));
    }

    #[test]
    fn test_status_falls_back_to_raw_body() {
        let err = from_status(503, "upstream overloaded", None);
        assert_eq!(err, GatewayError::Unavailable("upstream overloaded".to_string()));
    }

    #[test]
    fn test_rate_limit_keeps_retry_after() {
        let err = from_status(429, "", parse_retry_after(" 30 "));
        assert!(matches!(err, GatewayError::RateLimited { retry_after: Some(30), .. }));
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), None);
    }

    #[test]
    fn test_envelope_code_mapping() {
        let numeric = ErrorBody {
            message: Some("busy".into()),
            code: Some(Value::from(503)),
        };
        assert_eq!(from_envelope(&numeric).category(), FailureCategory::Unavailable);

        let textual = ErrorBody {
            message: Some("no such model".into()),
            code: Some(Value::from("404")),
        };
        assert_eq!(from_envelope(&textual).category(), FailureCategory::InvalidModel);

        let unknown = ErrorBody {
            message: None,
            code: Some(Value::from("server_error")),
        };
        assert_eq!(from_envelope(&unknown).category(), FailureCategory::Transient);
    }
}
