use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use ytdl_logging::{ytdl_debug, ytdl_warn};

use crate::{LookupError, LookupErrorKind, ProcessError, ProcessErrorKind};

/// Bounds one collaborator call: per-attempt timeout plus capped exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first; `0` is treated as `1`.
    pub attempts: u32,
    pub timeout: Duration,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn lookup_default() -> Self {
        Self {
            attempts: 3,
            timeout: Duration::from_secs(20),
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(4),
        }
    }

    pub fn processing_default() -> Self {
        Self {
            timeout: Duration::from_secs(120),
            ..Self::lookup_default()
        }
    }

    /// Delay before retry number `retry` (zero-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Errors that know whether another attempt could help.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
    fn timed_out(after: Duration) -> Self;
}

impl Retryable for LookupError {
    fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            LookupErrorKind::Unreachable | LookupErrorKind::TimedOut
        )
    }

    fn timed_out(after: Duration) -> Self {
        LookupError::new(LookupErrorKind::TimedOut, format!("no answer within {after:?}"))
    }
}

impl Retryable for ProcessError {
    fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            ProcessErrorKind::Unreachable | ProcessErrorKind::TimedOut
        )
    }

    fn timed_out(after: Duration) -> Self {
        ProcessError::new(ProcessErrorKind::TimedOut, format!("no answer within {after:?}"))
    }
}

/// Runs `op` under `policy`, retrying retryable failures.
pub async fn run_with_retry<T, E, F, Fut>(policy: &RetryPolicy, label: &str, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + Display,
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        let outcome = match tokio::time::timeout(policy.timeout, op()).await {
            Ok(result) => result,
            Err(_) => Err(E::timed_out(policy.timeout)),
        };
        match outcome {
            Ok(value) => {
                if attempt > 1 {
                    ytdl_debug!("{} succeeded on attempt {}/{}", label, attempt, attempts);
                }
                return Ok(value);
            }
            Err(err) if attempt < attempts && err.is_retryable() => {
                let delay = policy.delay_for(attempt - 1);
                ytdl_warn!(
                    "{} attempt {}/{} failed: {}; retrying in {:?}",
                    label,
                    attempt,
                    attempts,
                    err,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
