//! # Retry Policy
//!
//! Configurable retry for flaky store lookups.
//!
//! ## Schedule
//! ```text
//! attempt 1 ──fail──► sleep(d1) ──► attempt 2 ──fail──► sleep(d2) ──► ... attempt N ──fail──► Err
//!                                                                      (max_attempts)
//!
//! Fixed(2s):                     d1 = 2s, d2 = 2s, ...
//! Exponential{100ms, max 1s}:    d1 = 100ms, d2 = 200ms, d3 = 400ms, ... ≤ 1s
//! ```
//!
//! Sleeping goes through a [`Sleeper`] so tests can record delays instead of
//! waiting for them.

use async_trait::async_trait;
use backoff::backoff::{Backoff, Constant};
use backoff::ExponentialBackoff;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Something that can wait for a duration.
#[async_trait]
pub trait Sleeper: Send + Sync + fmt::Debug {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the Tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackoffKind {
    Fixed(Duration),
    /// Doubles from `initial`, capped at `max`. No jitter.
    Exponential { initial: Duration, max: Duration },
}

/// How many times to try and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: BackoffKind,
}

impl Default for RetryPolicy {
    /// Three attempts, two seconds apart.
    fn default() -> Self {
        RetryPolicy::fixed(3, Duration::from_secs(2))
    }
}

impl RetryPolicy {
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        RetryPolicy {
            max_attempts: max_attempts.max(1),
            backoff: BackoffKind::Fixed(delay),
        }
    }

    pub fn exponential(max_attempts: u32, initial: Duration, max: Duration) -> Self {
        RetryPolicy {
            max_attempts: max_attempts.max(1),
            backoff: BackoffKind::Exponential { initial, max },
        }
    }

    /// A single attempt.
    pub fn no_retry() -> Self {
        RetryPolicy::fixed(1, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff(&self) -> BackoffKind {
        self.backoff
    }

    fn schedule(&self) -> Box<dyn Backoff + Send> {
        match self.backoff {
            BackoffKind::Fixed(delay) => Box::new(Constant::new(delay)),
            BackoffKind::Exponential { initial, max } => Box::new(ExponentialBackoff {
                current_interval: initial,
                initial_interval: initial,
                max_interval: max,
                multiplier: 2.0,
                randomization_factor: 0.0,
                max_elapsed_time: None,
                ..Default::default()
            }),
        }
    }

    /// Delays that a fully failing run would wait, in order.
    pub fn delays(&self) -> Vec<Duration> {
        let mut schedule = self.schedule();
        (1..self.max_attempts)
            .map(|_| schedule.next_backoff().unwrap_or(Duration::ZERO))
            .collect()
    }

    /// Runs `op` until it succeeds or attempts run out.
    ///
    /// `op` receives the 1-based attempt number. The last error is returned.
    pub async fn run<T, E, F, Fut>(
        &self,
        sleeper: &dyn Sleeper,
        operation: &str,
        mut op: F,
    ) -> Result<T, E>
    where
        E: fmt::Display,
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut schedule = self.schedule();
        let mut attempt = 1;

        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.max_attempts => {
                    let delay = schedule.next_backoff().unwrap_or(Duration::ZERO);
                    warn!(
                        operation,
                        attempt,
                        max_attempts = self.max_attempts,
                        ?delay,
                        error = %err,
                        "Attempt failed, retrying"
                    );
                    sleeper.sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    warn!(operation, attempt, error = %err, "Giving up");
                    return Err(err);
                }
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
