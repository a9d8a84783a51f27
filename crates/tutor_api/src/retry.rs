use std::time::Duration;

use rand::Rng;

use crate::error::TutorApiError;

/// Default attempt budget for one logical fetch.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
/// Default base delay before the first retry.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(500);
/// Default upper bound for the uniform jitter added to each delay.
pub const DEFAULT_JITTER: Duration = Duration::from_millis(200);

/// Retry configuration for one logical fetch. Immutable per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Must be at least 1.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each subsequent retry.
    /// Must be non-zero.
    pub base_delay: Duration,
    /// Exclusive upper bound for the uniform jitter added to each delay.
    pub jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
            jitter: DEFAULT_JITTER,
        }
    }
}

impl RetryPolicy {
    /// Rejects policies that would never attempt or never back off.
    pub fn validate(&self) -> Result<(), TutorApiError> {
        if self.max_attempts == 0 {
            return Err(TutorApiError::InvalidRetryPolicy(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if self.base_delay.is_zero() {
            return Err(TutorApiError::InvalidRetryPolicy(
                "base_delay must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Deterministic exponential component of the delay taken after
/// `prior_attempts` consecutive retryable failures (`prior_attempts` >= 1).
pub fn exponential_delay(policy: &RetryPolicy, prior_attempts: u32) -> Duration {
    let exponent = prior_attempts.saturating_sub(1).min(30);
    policy.base_delay.saturating_mul(2u32.saturating_pow(exponent))
}

/// Uniform sample from `[0, bound)`; zero when the bound is zero.
pub fn sample_jitter(bound: Duration) -> Duration {
    if bound.is_zero() {
        return Duration::ZERO;
    }

    let micros = rand::thread_rng().gen_range(0..bound.as_micros() as u64);
    Duration::from_micros(micros)
}

/// Full backoff delay after `prior_attempts` consecutive retryable failures.
pub fn backoff_delay(policy: &RetryPolicy, prior_attempts: u32) -> Duration {
    exponential_delay(policy, prior_attempts) + sample_jitter(policy.jitter)
}
