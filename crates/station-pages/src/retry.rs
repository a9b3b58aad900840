//! Bounded retry of flaky UI steps.

use std::future::Future;
use std::time::Duration;

use station_browser::PageHandle;
use station_config::RetryConfig;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::PageError;

/// Retry configuration for [`retry_action`].
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay after the first failed attempt.
    pub base_delay: Duration,
    /// Upper bound for any single delay.
    pub max_delay: Duration,
    /// Exponential backoff multiplier.
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            backoff_multiplier: config.backoff_multiplier,
        }
    }
}

impl RetryPolicy {
    /// One attempt, no recovery.
    pub fn single() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay after the failed attempt with zero-based index `attempt`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self.base_delay.as_millis() as f64
            * self.backoff_multiplier.powi(attempt as i32);
        let delay = delay.min(self.max_delay.as_millis() as f64);
        Duration::from_millis(delay as u64)
    }
}

/// Run `action` until it succeeds or the policy's attempts are used up.
///
/// Between attempts the page is reloaded, `on_failure` runs, and the task
/// sleeps for the backoff delay. A failed reload or recovery is logged and
/// does not end the loop. The final failure is returned as
/// [`PageError::RetriesExhausted`] carrying the last error.
pub async fn retry_action<T, A, AFut, R, RFut>(
    page: &dyn PageHandle,
    mut action: A,
    mut on_failure: R,
    policy: &RetryPolicy,
) -> Result<T, PageError>
where
    A: FnMut() -> AFut,
    AFut: Future<Output = Result<T, PageError>>,
    R: FnMut() -> RFut,
    RFut: Future<Output = Result<(), PageError>>,
{
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        let err = match action().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        attempt += 1;
        if attempt >= attempts {
            debug!("Giving up after {} attempt(s)", attempts);
            return Err(PageError::RetriesExhausted {
                attempts,
                last: Box::new(err),
            });
        }

        let delay = policy.delay_for_attempt(attempt - 1);
        warn!(
            "Attempt {}/{} failed: {}, reloading and retrying in {:?}",
            attempt, attempts, err, delay
        );

        if let Err(e) = page.reload().await {
            warn!("Reload before attempt {} failed: {}", attempt + 1, e);
        }
        if let Err(e) = on_failure().await {
            warn!("Recovery before attempt {} failed: {}", attempt + 1, e);
        }
        sleep(delay).await;
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
