//! Exponential back-off for transient collector failures.

use std::future::Future;
use std::time::Duration;

use crate::error::CollectorError;

/// Timeouts, refused connections and 5xx responses are worth another try.
/// Anything else will fail the same way again.
pub(crate) fn is_retriable(err: &CollectorError) -> bool {
    match err {
        CollectorError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        CollectorError::Deserialize { .. } | CollectorError::InvalidBaseUrl { .. } => false,
    }
}

/// How often and how patiently to repeat a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    pub(crate) max_retries: u32,
    pub(crate) backoff_base_ms: u64,
}

impl RetryPolicy {
    const MAX_DELAY_MS: u64 = 60_000;

    #[cfg(test)]
    pub(crate) fn none() -> Self {
        Self {
            max_retries: 0,
            backoff_base_ms: 0,
        }
    }

    /// Nominal delay before retry `attempt` (1-based): `base * 2^(attempt-1)`,
    /// capped at one minute.
    fn nominal_delay_ms(self, attempt: u32) -> u64 {
        let doublings = attempt.saturating_sub(1).min(10);
        self.backoff_base_ms
            .saturating_mul(1u64 << doublings)
            .min(Self::MAX_DELAY_MS)
    }

    /// Nominal delay scaled by a random factor in `[0.75, 1.25)`.
    fn jittered_delay(self, attempt: u32) -> Duration {
        let factor = 0.75 + rand::random::<f64>() * 0.5;
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let ms = (self.nominal_delay_ms(attempt) as f64 * factor) as u64;
        Duration::from_millis(ms)
    }

    /// Run `operation` until it succeeds, fails permanently, or the retry
    /// budget is spent. The last error is returned.
    pub(crate) async fn run<T, F, Fut>(self, mut operation: F) -> Result<T, CollectorError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, CollectorError>>,
    {
        let mut attempt = 0u32;
        loop {
            let err = match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            if attempt >= self.max_retries || !is_retriable(&err) {
                return Err(err);
            }

            attempt += 1;
            let delay = self.jittered_delay(attempt);
            tracing::warn!(
                attempt,
                max_retries = self.max_retries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "collector request failed; retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }
}
