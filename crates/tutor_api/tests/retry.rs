use std::time::Duration;

use tutor_api::retry::{backoff_delay, exponential_delay, sample_jitter, RetryPolicy};
use tutor_api::TutorApiError;

#[test]
fn default_policy_matches_session_fetch_budget() {
    let policy = RetryPolicy::default();

    assert_eq!(policy.max_attempts, 5);
    assert_eq!(policy.base_delay, Duration::from_millis(500));
    assert_eq!(policy.jitter, Duration::from_millis(200));
    assert!(policy.validate().is_ok());
}

#[test]
fn zero_attempts_is_a_configuration_error() {
    let policy = RetryPolicy {
        max_attempts: 0,
        ..RetryPolicy::default()
    };

    assert!(matches!(
        policy.validate(),
        Err(TutorApiError::InvalidRetryPolicy(_))
    ));
}

#[test]
fn zero_base_delay_is_a_configuration_error() {
    let policy = RetryPolicy {
        base_delay: Duration::ZERO,
        ..RetryPolicy::default()
    };

    assert!(matches!(
        policy.validate(),
        Err(TutorApiError::InvalidRetryPolicy(_))
    ));
}

#[test]
fn exponential_delay_doubles_per_completed_attempt() {
    let policy = RetryPolicy::default();

    assert_eq!(exponential_delay(&policy, 1), Duration::from_millis(500));
    assert_eq!(exponential_delay(&policy, 2), Duration::from_millis(1000));
    assert_eq!(exponential_delay(&policy, 3), Duration::from_millis(2000));
    assert_eq!(exponential_delay(&policy, 4), Duration::from_millis(4000));
}

#[test]
fn exponential_delay_saturates_instead_of_overflowing() {
    let policy = RetryPolicy::default();

    let huge = exponential_delay(&policy, 1000);
    assert_eq!(huge, exponential_delay(&policy, 31));
}

#[test]
fn jitter_sample_stays_below_bound() {
    let bound = Duration::from_millis(200);

    for _ in 0..64 {
        let sample = sample_jitter(bound);
        assert!(sample < bound, "sample {sample:?} exceeds bound {bound:?}");
    }
}

#[test]
fn jitter_sample_with_zero_bound_is_zero() {
    assert_eq!(sample_jitter(Duration::ZERO), Duration::ZERO);
}

#[test]
fn backoff_delay_lies_in_jittered_window() {
    let policy = RetryPolicy::default();

    for prior_attempts in 1..=4 {
        let floor = exponential_delay(&policy, prior_attempts);
        let ceiling = floor + policy.jitter;

        for _ in 0..16 {
            let delay = backoff_delay(&policy, prior_attempts);
            assert!(delay >= floor, "delay {delay:?} below floor {floor:?}");
            assert!(delay < ceiling, "delay {delay:?} at or above {ceiling:?}");
        }
    }
}
