use reqwest::{Client, Method, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::TutorApiConfig;
use crate::error::TutorApiError;
use crate::payload::{ChatRequest, TokenBody};
use crate::retry::{backoff_delay, RetryPolicy};
use crate::url::{chat_url, startup_message_url, token_url};

/// One logical request against the tutor service.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
}

impl Endpoint {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            body: None,
        }
    }

    pub fn post_json(url: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            body: Some(body),
        }
    }
}

#[derive(Debug)]
pub struct TutorApiClient {
    http: Client,
    config: TutorApiConfig,
}

impl TutorApiClient {
    pub fn new(config: TutorApiConfig) -> Result<Self, TutorApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(TutorApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &TutorApiConfig {
        &self.config
    }

    pub fn startup_endpoint(&self, topic: &str) -> Endpoint {
        Endpoint::get(startup_message_url(&self.config.base_url, topic))
    }

    pub fn chat_endpoint(&self, request: &ChatRequest) -> Result<Endpoint, TutorApiError> {
        let body = serde_json::to_value(request)?;
        Ok(Endpoint::post_json(chat_url(&self.config.base_url), body))
    }

    /// Fetches a short-lived credential token. Best-effort: callers may
    /// proceed without one when this fails.
    pub async fn fetch_token(&self) -> Result<String, TutorApiError> {
        let response = self
            .http
            .get(token_url(&self.config.base_url))
            .send()
            .await?
            .error_for_status()?;
        let body: TokenBody = response.json().await?;
        Ok(body.token)
    }

    /// Performs one logical request, retrying transparently while the service
    /// reports transient overload (HTTP 503) or the call fails at the network
    /// level. Any other completed response, success or not, is returned as-is
    /// on the attempt it arrived.
    ///
    /// No delay is taken before the first attempt. Concurrent calls share no
    /// state and are not throttled against each other.
    pub async fn fetch_with_retry(
        &self,
        endpoint: &Endpoint,
        policy: &RetryPolicy,
    ) -> Result<Response, TutorApiError> {
        policy.validate()?;

        let mut last_error = None;
        for attempt in 1..=policy.max_attempts {
            if attempt > 1 {
                tokio::time::sleep(backoff_delay(policy, attempt - 1)).await;
            }

            match self.send_once(endpoint).await {
                Ok(response) if response.status() == StatusCode::SERVICE_UNAVAILABLE => {
                    debug!(attempt, url = %endpoint.url, "service unavailable, backing off");
                    last_error = Some(format!("HTTP {}", response.status()));
                }
                Ok(response) => return Ok(response),
                Err(error) => {
                    debug!(attempt, url = %endpoint.url, %error, "request failed, backing off");
                    last_error = Some(error.to_string());
                }
            }
        }

        warn!(
            url = %endpoint.url,
            attempts = policy.max_attempts,
            "retry budget exhausted"
        );
        Err(TutorApiError::RetryExhausted {
            attempts: policy.max_attempts,
            last_error,
        })
    }

    async fn send_once(&self, endpoint: &Endpoint) -> Result<Response, reqwest::Error> {
        let mut request = self.http.request(endpoint.method.clone(), &endpoint.url);
        if let Some(body) = &endpoint.body {
            request = request.json(body);
        }
        request.send().await
    }
}
