use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TutorApiError {
    #[error("invalid retry policy: {0}")]
    InvalidRetryPolicy(String),

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("retry budget exhausted after {attempts} attempts (last error: {last_error:?})")]
    RetryExhausted {
        attempts: u32,
        last_error: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Extract a human-readable application error from a non-success response.
///
/// Prefers a string `detail` field, then the raw body, then the canonical
/// status reason when the body is empty.
pub fn parse_error_detail(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(serde_json::Value::String(detail)) = parsed.detail {
            if !detail.is_empty() {
                return detail;
            }
        }
    }

    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}
