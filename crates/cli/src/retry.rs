// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded retry for rate-limited remote calls.
//!
//! A call is attempted up to [`RetryPolicy::max_attempts`] times. Only
//! failures the caller classifies as retryable are retried; each one is
//! followed by a fixed cooldown before the next attempt. Any other failure
//! is returned at once and does not count against the budget.

use std::fmt;
use std::time::Duration;

/// How many times a call may be attempted and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    pub cooldown: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 3,
            cooldown: Duration::from_secs(60),
        }
    }
}

/// Blocks the current thread between attempts.
///
/// Abstracted so tests can count sleeps instead of waiting.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Sleeper backed by [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}

/// Why a retried call gave up.
#[derive(Debug, PartialEq, Eq)]
pub enum RetryError<E> {
    /// Every attempt hit a retryable failure; `last` is the final one.
    Exhausted { attempts: u32, last: E },
    /// A failure that is never retried.
    Fatal(E),
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, cooldown: Duration) -> Self {
        RetryPolicy {
            max_attempts,
            cooldown,
        }
    }
}

/// Runs `call` until it succeeds, fails fatally, or the budget runs out.
pub fn with_retry<T, E, F, P>(
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    operation: &str,
    is_retryable: P,
    mut call: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Result<T, E>,
    P: Fn(&E) -> bool,
    E: fmt::Display,
{
    let mut attempt = 0;

    loop {
        attempt += 1;

        match call() {
            Ok(value) => return Ok(value),
            Err(e) if !is_retryable(&e) => return Err(RetryError::Fatal(e)),
            Err(e) if attempt >= policy.max_attempts => {
                tracing::error!(operation, attempt, error = %e, "max retries reached");
                return Err(RetryError::Exhausted {
                    attempts: attempt,
                    last: e,
                });
            }
            Err(e) => {
                tracing::warn!(
                    operation,
                    attempt,
                    max_attempts = policy.max_attempts,
                    cooldown_secs = policy.cooldown.as_secs(),
                    error = %e,
                    "rate limited, waiting before retry"
                );
                sleeper.sleep(policy.cooldown);
            }
        }
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
