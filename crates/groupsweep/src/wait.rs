//! Bounded retry and polling at a fixed interval.
//!
//! Two flavors share one [`RetryPolicy`]:
//!
//! - [`poll_until_terminal`] repeats a describe call until a predicate on the
//!   returned state holds, the resource disappears, or the ceiling is hit.
//! - [`retry_transient`] repeats a mutating call while its error classifies
//!   as transient.
//!
//! Neither returns an error: the outcome enums carry everything the caller
//! needs to record a per-resource result, and exhausting the ceiling never
//! aborts the run.

use crate::aws::error::{ErrorClass, ProviderError};
use backon::{BackoffBuilder, ConstantBuilder, Retryable};
use groupsweep_common::defaults::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_INTERVAL};
use std::fmt::Debug;
use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

/// Interval and attempt ceiling for polls and retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Fixed delay between attempts
    pub interval: Duration,
    /// Total attempts, including the first
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_RETRY_INTERVAL,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl RetryPolicy {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts: max_attempts.max(1),
        }
    }

    /// No delay between attempts
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(Duration::ZERO, max_attempts)
    }

    fn backoff(&self) -> ConstantBuilder {
        ConstantBuilder::default()
            .with_delay(self.interval)
            .with_max_times(self.max_attempts.saturating_sub(1) as usize)
    }
}

/// Result of [`poll_until_terminal`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// The predicate held for `state`
    Reached { state: T, attempts: u32 },
    /// The resource stopped being returned
    Gone { attempts: u32 },
    /// Ceiling hit before a terminal state; `last` is the last state seen
    Exhausted { attempts: u32, last: Option<T> },
    /// A describe call failed with a non-retryable error
    Failed { attempts: u32, error: ProviderError },
}

/// Result of [`retry_transient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome {
    Succeeded { attempts: u32 },
    /// The call reported the target as already gone
    NotFound { attempts: u32 },
    /// Every attempt failed transiently
    Exhausted { attempts: u32, error: ProviderError },
    /// A non-transient error stopped the retries
    Failed { attempts: u32, error: ProviderError },
}

/// Poll `describe` until `is_terminal` holds for the returned state.
///
/// `Ok(None)` from `describe`, or an error that `classify` maps to
/// [`ErrorClass::NotFound`], means the resource is gone. Transient errors are
/// treated like a not-ready state. Any other error stops the poll.
///
/// # Arguments
/// * `policy` - Interval and attempt ceiling
/// * `resource` - Name for logging
/// * `describe` - Fetches the current state
/// * `is_terminal` - Returns true once no further transition is expected
/// * `classify` - Maps describe errors to an [`ErrorClass`]
pub async fn poll_until_terminal<T, F, Fut, P, C>(
    policy: &RetryPolicy,
    resource: &str,
    mut describe: F,
    is_terminal: P,
    classify: C,
) -> PollOutcome<T>
where
    T: Debug,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, ProviderError>>,
    P: Fn(&T) -> bool,
    C: Fn(&ProviderError) -> ErrorClass,
{
    let mut delays = policy.backoff().build();
    let mut attempts = 0u32;
    let mut last = None;

    loop {
        attempts += 1;

        match describe().await {
            Ok(Some(state)) if is_terminal(&state) => {
                debug!(resource = %resource, attempts, state = ?state, "Reached terminal state");
                return PollOutcome::Reached { state, attempts };
            }
            Ok(Some(state)) => {
                debug!(resource = %resource, attempt = attempts, state = ?state, "Not terminal yet");
                last = Some(state);
            }
            Ok(None) => {
                debug!(resource = %resource, attempts, "Resource no longer returned");
                return PollOutcome::Gone { attempts };
            }
            Err(error) => match classify(&error) {
                ErrorClass::NotFound => {
                    debug!(resource = %resource, attempts, "Resource no longer exists");
                    return PollOutcome::Gone { attempts };
                }
                ErrorClass::Transient => {
                    debug!(resource = %resource, attempt = attempts, error = %error, "Transient describe failure");
                }
                _ => {
                    warn!(resource = %resource, attempts, error = %error, "Describe failed");
                    return PollOutcome::Failed { attempts, error };
                }
            },
        }

        match delays.next() {
            Some(delay) => tokio::time::sleep(delay).await,
            None => {
                warn!(resource = %resource, attempts, last = ?last, "Gave up waiting for terminal state");
                return PollOutcome::Exhausted { attempts, last };
            }
        }
    }
}

/// Run `op`, retrying while `classify` reports its error as transient.
pub async fn retry_transient<F, Fut, C>(
    policy: &RetryPolicy,
    resource: &str,
    mut op: F,
    classify: C,
) -> RetryOutcome
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), ProviderError>>,
    C: Fn(&ProviderError) -> ErrorClass,
{
    let attempts = AtomicU32::new(0);

    let result = (|| {
        attempts.fetch_add(1, Ordering::Relaxed);
        op()
    })
    .retry(policy.backoff())
    .when(|e| classify(e).is_transient())
    .notify(|e, dur| {
        warn!(
            resource = %resource,
            delay = ?dur,
            error = %e,
            "Transient failure, retrying..."
        );
    })
    .await;

    let attempts = attempts.load(Ordering::Relaxed);
    match result {
        Ok(()) => RetryOutcome::Succeeded { attempts },
        Err(error) => match classify(&error) {
            ErrorClass::NotFound => RetryOutcome::NotFound { attempts },
            ErrorClass::Transient => RetryOutcome::Exhausted { attempts, error },
            _ => RetryOutcome::Failed { attempts, error },
        },
    }
}
