/// Default base URL for a locally hosted tutor service.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Normalize a base URL: trim whitespace and trailing slashes, falling back
/// to [`DEFAULT_BASE_URL`] when blank.
pub fn normalize_base_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_BASE_URL
    } else {
        input.trim()
    };

    base.trim_end_matches('/').to_string()
}

/// Credential endpoint.
pub fn token_url(base: &str) -> String {
    format!("{}/api/token", normalize_base_url(base))
}

/// Chat endpoint.
pub fn chat_url(base: &str) -> String {
    format!("{}/api/chat", normalize_base_url(base))
}

/// Startup-message endpoint, parameterized by a percent-encoded topic.
pub fn startup_message_url(base: &str, topic: &str) -> String {
    format!(
        "{}/api/startup-message?topic={}",
        normalize_base_url(base),
        urlencoding::encode(topic)
    )
}
