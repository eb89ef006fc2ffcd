//! Retry decisions.

use std::time::Duration;

use ccnews_core::{HttpMethod, HttpSettings};

/// Retry budget for one request.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RetryBudget {
    max_retries: u32,
    used: u32,
}

impl RetryBudget {
    /// Non-retryable methods get no retries at all.
    pub(crate) fn for_method(settings: &HttpSettings, method: HttpMethod) -> Self {
        let max_retries = if settings.is_retry_method(method) {
            settings.max_retries
        } else {
            0
        };
        Self {
            max_retries,
            used: 0,
        }
    }

    /// Consume one retry, returning its 1-based number.
    pub(crate) const fn take(&mut self) -> Option<u32> {
        if self.used < self.max_retries {
            self.used += 1;
            Some(self.used)
        } else {
            None
        }
    }
}

/// Delay before retry `attempt`, preferring the server's `Retry-After`.
pub(crate) fn retry_delay(
    settings: &HttpSettings,
    attempt: u32,
    retry_after: Option<Duration>,
) -> Duration {
    let cap = Duration::from_secs_f64(settings.max_backoff.max(0.0));
    retry_after.map_or_else(|| settings.backoff_delay(attempt), |d| d.min(cap))
}

/// Parse a `Retry-After` value given in seconds.
///
/// HTTP-date values are not supported and fall back to backoff.
pub(crate) fn parse_retry_after(value: &str) -> Option<Duration> {
    let secs: f64 = value.trim().parse().ok()?;
    (secs.is_finite() && secs >= 0.0).then(|| Duration::from_secs_f64(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_for_idempotent_method() {
        let settings = HttpSettings::default().with_max_retries(2);
        let mut budget = RetryBudget::for_method(&settings, HttpMethod::Get);
        assert_eq!(budget.take(), Some(1));
        assert_eq!(budget.take(), Some(2));
        assert_eq!(budget.take(), None);
    }

    #[test]
    fn test_budget_for_post_is_empty() {
        let settings = HttpSettings::default().with_max_retries(5);
        let mut budget = RetryBudget::for_method(&settings, HttpMethod::Post);
        assert_eq!(budget.take(), None);
    }

    #[test]
    fn test_retry_after_overrides_and_caps() {
        let settings = HttpSettings::default().with_backoff(0.5, 10.0);
        assert_eq!(
            retry_delay(&settings, 1, Some(Duration::from_secs(2))),
            Duration::from_secs(2)
        );
        assert_eq!(
            retry_delay(&settings, 1, Some(Duration::from_secs(120))),
            Duration::from_secs(10)
        );
        assert_eq!(retry_delay(&settings, 2, None), Duration::from_secs(1));
    }

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(parse_retry_after("3"), Some(Duration::from_secs(3)));
        assert_eq!(parse_retry_after(" 0.5 "), Some(Duration::from_millis(500)));
        assert_eq!(parse_retry_after("-1"), None);
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), None);
    }
}
