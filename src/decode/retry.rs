//! Retry and backoff helpers for image downloads.

use std::time::Duration;

/// Default number of retry attempts for transient network errors.
pub const DEFAULT_NETWORK_RETRIES: u32 = 3;

/// Base delay for exponential backoff (500 milliseconds).
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_millis(500);

/// Maximum delay cap for exponential backoff (8 seconds).
pub const DEFAULT_BACKOFF_MAX: Duration = Duration::from_secs(8);

/// Whether a reqwest error is worth retrying.
///
/// Connection failures, timeouts, interrupted bodies and gateway errors
/// (502, 503, 504) are transient; everything else is not.
pub fn is_transient_network_error(error: &reqwest::Error) -> bool {
    if error.is_connect() || error.is_timeout() || error.is_body() {
        return true;
    }

    error.status().is_some_and(|s| is_transient_status(s.as_u16()))
}

/// Gateway status codes that usually clear up on their own.
pub fn is_transient_status(status: u16) -> bool {
    matches!(status, 502..=504)
}

/// Calculate exponential backoff delay with jitter.
///
/// Uses the formula: min(base * 2^attempt + base/2, max_delay)
pub fn calculate_backoff(attempt: u32, base: Duration, max: Duration) -> Duration {
    let exponential = base.saturating_mul(2u32.saturating_pow(attempt));
    let jitter_ms = (base.as_millis() as u64).min(1000);
    let jitter = Duration::from_millis(jitter_ms / 2);
    exponential.saturating_add(jitter).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_backoff_grows() {
        let base = Duration::from_secs(1);
        let max = Duration::from_secs(60);
        let first = calculate_backoff(0, base, max);
        let second = calculate_backoff(1, base, max);
        let third = calculate_backoff(2, base, max);

        assert_eq!(first, Duration::from_millis(1500));
        assert_eq!(second, Duration::from_millis(2500));
        assert_eq!(third, Duration::from_millis(4500));
    }

    #[test]
    fn test_calculate_backoff_respects_max() {
        let delay = calculate_backoff(30, DEFAULT_BACKOFF_BASE, DEFAULT_BACKOFF_MAX);
        assert_eq!(delay, DEFAULT_BACKOFF_MAX);
    }

    #[test]
    fn test_transient_statuses() {
        assert!(is_transient_status(502));
        assert!(is_transient_status(503));
        assert!(is_transient_status(504));
        assert!(!is_transient_status(404));
        assert!(!is_transient_status(500));
    }
}
