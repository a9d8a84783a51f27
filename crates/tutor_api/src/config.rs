use std::time::Duration;

use crate::url::DEFAULT_BASE_URL;

/// Transport configuration for tutor service requests.
#[derive(Debug, Clone)]
pub struct TutorApiConfig {
    /// Base URL the `/api/*` endpoints are resolved against.
    pub base_url: String,
    /// Optional timeout applied to every individual attempt.
    pub timeout: Option<Duration>,
}

impl Default for TutorApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl TutorApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
