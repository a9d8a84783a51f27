//! Transport-only tutor service client primitives.
//!
//! This crate owns request building, wire payload shapes, and the
//! retry/backoff policy for the tutor chat endpoints. It holds no session
//! state and no UI coupling; interpretation of application-level responses
//! (success replies vs. `detail` error bodies) is the caller's job.
//!
//! Retry boundary: only HTTP 503 and network-level failures are treated as
//! transient. Every other completed response, including other 5xx statuses,
//! is returned to the caller on the first attempt.

pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod retry;
pub mod url;

pub use client::{Endpoint, TutorApiClient};
pub use config::TutorApiConfig;
pub use error::{parse_error_detail, TutorApiError};
pub use payload::{ChatRequest, ReplyBody, TokenBody, WireMessage};
pub use retry::RetryPolicy;
pub use url::normalize_base_url;
