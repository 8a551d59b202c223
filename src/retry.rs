//! Bounded retry around a single source call.

use std::future::Future;
use std::time::Duration;

use log::{debug, warn};
use rand::Rng;

use crate::error::{R6sError, Result};

/// Delay schedule between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same pause before every retry.
    Fixed(Duration),
    /// `base * 2^n` capped at `max`, with full jitter.
    Exponential { base: Duration, max: Duration },
}

impl Backoff {
    /// Pause after the failed attempt numbered `attempt` (1-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        match *self {
            Backoff::Fixed(delay) => delay,
            Backoff::Exponential { base, max } => {
                let factor = 1u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
                let ceiling = base.saturating_mul(factor).min(max);
                let ceiling_ms = ceiling.as_millis() as u64;
                if ceiling_ms == 0 {
                    return Duration::ZERO;
                }
                Duration::from_millis(rand::thread_rng().gen_range(0..=ceiling_ms))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total calls allowed, first one included. Never below 1.
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Backoff) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// Policy without pauses, for tests and one-shot calls.
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Backoff::Fixed(Duration::ZERO))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Backoff::Fixed(Duration::from_secs(1)))
    }
}

/// Run `call` until it succeeds, fails terminally, or the policy's attempts
/// are spent. Exhaustion yields [`R6sError::SourceUnavailable`] carrying the
/// last failure.
pub async fn with_retry<T, F, Fut>(source_name: &str, policy: &RetryPolicy, mut call: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        let err = match call().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!("{source_name} succeeded on attempt {attempt}");
                }
                return Ok(value);
            }
            Err(err) => err,
        };

        if !err.is_retryable() {
            debug!("{source_name} failed terminally: {err}");
            return Err(err);
        }

        if attempt >= policy.max_attempts {
            warn!("{source_name} giving up after {attempt} attempts: {err}");
            return Err(R6sError::SourceUnavailable {
                source_name: source_name.to_string(),
                attempts: attempt,
                last_error: err.to_string(),
            });
        }

        let delay = policy.backoff.delay(attempt);
        warn!(
            "{source_name} attempt {attempt}/{} failed: {err}; retrying in {delay:?}",
            policy.max_attempts
        );
        tokio::time::sleep(delay).await;
    }
}
