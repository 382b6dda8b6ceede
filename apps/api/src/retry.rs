//! Retry Controller: bounded attempts with exponential backoff around a fallible async call.
//!
//! Delay after failed attempt `a` (0-based) is `base_delay * 2^a`: 1s, 2s, 4s and so on with the
//! default 1s base. The final failure is returned unchanged; nothing is logged as an error here.

use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

use crate::config::Config;

/// Which failures are worth another attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RetryMode {
    /// Every failure is retried the same way, permanent or not.
    #[default]
    Blind,
    /// Only failures the error reports as transient are retried.
    Transient,
}

#[derive(Debug, Error)]
#[error("expected 'blind' or 'transient'")]
pub struct ParseRetryModeError;

impl FromStr for RetryMode {
    type Err = ParseRetryModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blind" => Ok(RetryMode::Blind),
            "transient" => Ok(RetryMode::Transient),
            _ => Err(ParseRetryModeError),
        }
    }
}

/// Errors the controller can ask about retryability.
pub trait Retryable {
    fn is_transient(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub mode: RetryMode,
}

impl RetryPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_attempts: config.max_retries,
            base_delay: config.retry_base_delay,
            mode: config.retry_mode,
        }
    }

    /// Backoff before the attempt following failed attempt `attempt`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(1u32 << attempt.min(16))
    }

    fn should_retry<E: Retryable>(&self, error: &E) -> bool {
        match self.mode {
            RetryMode::Blind => true,
            RetryMode::Transient => error.is_transient(),
        }
    }
}

/// Runs `op` until it succeeds or the policy's attempts are used up.
pub async fn retry_with_backoff<T, E, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, E>
where
    E: Retryable + std::fmt::Display,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if attempt + 1 >= max_attempts || !policy.should_retry(&e) => return Err(e),
            Err(e) => {
                let delay = policy.delay_after(attempt);
                warn!(
                    "Attempt {}/{} failed: {e}; retrying after {}ms",
                    attempt + 1,
                    max_attempts,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;

    #[derive(Debug, Error)]
    #[error("{message}")]
    struct FakeError {
        message: String,
        transient: bool,
    }

    impl Retryable for FakeError {
        fn is_transient(&self) -> bool {
            self.transient
        }
    }

    fn fail(message: &str, transient: bool) -> FakeError {
        FakeError {
            message: message.to_string(),
            transient,
        }
    }

    fn policy(mode: RetryMode) -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            mode,
        }
    }

    #[test]
    fn test_delays_double_per_attempt() {
        let p = policy(RetryMode::Blind);
        assert_eq!(p.delay_after(0), Duration::from_secs(1));
        assert_eq!(p.delay_after(1), Duration::from_secs(2));
        assert_eq!(p.delay_after(2), Duration::from_secs(4));
    }

    #[test]
    fn test_retry_mode_parses_case_insensitively() {
        assert_eq!("Blind".parse::<RetryMode>().unwrap(), RetryMode::Blind);
        assert_eq!(" transient ".parse::<RetryMode>().unwrap(), RetryMode::Transient);
        assert!("never".parse::<RetryMode>().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_on_first_attempt_makes_one_call() {
        let calls = Arc::new(Mutex::new(0u32));
        let counter = calls.clone();

        let result: Result<&str, FakeError> = retry_with_backoff(&policy(RetryMode::Blind), |_| {
            let counter = counter.clone();
            async move {
                *counter.lock().unwrap() += 1;
                Ok("done")
            }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_doubles_between_attempts() {
        let started: Arc<Mutex<Vec<Instant>>> = Arc::new(Mutex::new(Vec::new()));
        let log = started.clone();

        let result = retry_with_backoff(&policy(RetryMode::Blind), |attempt| {
            let log = log.clone();
            async move {
                log.lock().unwrap().push(Instant::now());
                if attempt < 2 {
                    Err(fail("upstream unavailable", true))
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);

        let started = started.lock().unwrap();
        assert_eq!(started.len(), 3);
        let first_gap = started[1] - started[0];
        let second_gap = started[2] - started[1];
        assert!(first_gap >= Duration::from_secs(1) && first_gap < Duration::from_millis(1100));
        assert!(second_gap >= Duration::from_secs(2) && second_gap < Duration::from_millis(2100));
        assert!(second_gap >= first_gap);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_surfaces_last_error() {
        let result: Result<(), FakeError> =
            retry_with_backoff(&policy(RetryMode::Blind), |attempt| async move {
                Err(fail(&format!("failure #{}", attempt + 1), true))
            })
            .await;

        assert_eq!(result.unwrap_err().to_string(), "failure #3");
    }

    #[tokio::test(start_paused = true)]
    async fn test_blind_mode_retries_permanent_errors() {
        let calls = Arc::new(Mutex::new(0u32));
        let counter = calls.clone();

        let result: Result<(), FakeError> = retry_with_backoff(&policy(RetryMode::Blind), |_| {
            let counter = counter.clone();
            async move {
                *counter.lock().unwrap() += 1;
                Err(fail("bad request", false))
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(*calls.lock().unwrap(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_mode_stops_on_permanent_error() {
        let calls = Arc::new(Mutex::new(0u32));
        let counter = calls.clone();

        let result: Result<(), FakeError> =
            retry_with_backoff(&policy(RetryMode::Transient), |_| {
                let counter = counter.clone();
                async move {
                    *counter.lock().unwrap() += 1;
                    Err(fail("invalid api key", false))
                }
            })
            .await;

        assert_eq!(result.unwrap_err().to_string(), "invalid api key");
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_attempt_policy_never_sleeps() {
        let p = RetryPolicy {
            max_attempts: 1,
            ..policy(RetryMode::Blind)
        };
        let before = Instant::now();

        let result: Result<(), FakeError> =
            retry_with_backoff(&p, |_| async { Err(fail("nope", true)) }).await;

        assert!(result.is_err());
        assert_eq!(Instant::now() - before, Duration::ZERO);
    }
}
