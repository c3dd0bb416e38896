// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::tracker::test_helpers::RecordingSleeper;
use std::cell::Cell;

#[derive(Debug, PartialEq, Eq)]
enum Failure {
    Busy,
    Broken,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

fn is_busy(e: &Failure) -> bool {
    *e == Failure::Busy
}

fn policy() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_secs(60))
}

#[test]
fn succeeds_first_time_without_sleeping() {
    let sleeper = RecordingSleeper::default();
    let result: Result<u32, RetryError<Failure>> =
        with_retry(&policy(), &sleeper, "create issue", is_busy, || Ok(7));

    assert_eq!(result, Ok(7));
    assert!(sleeper.slept.borrow().is_empty());
}

#[test]
fn two_rate_limits_then_success_sleeps_twice() {
    let sleeper = RecordingSleeper::default();
    let calls = Cell::new(0);

    let result = with_retry(&policy(), &sleeper, "create note", is_busy, || {
        calls.set(calls.get() + 1);
        if calls.get() < 3 {
            Err(Failure::Busy)
        } else {
            Ok("done")
        }
    });

    assert_eq!(result, Ok("done"));
    assert_eq!(calls.get(), 3);
    assert_eq!(
        *sleeper.slept.borrow(),
        vec![Duration::from_secs(60), Duration::from_secs(60)]
    );
}

#[test]
fn exhausting_the_budget_makes_no_extra_attempt() {
    let sleeper = RecordingSleeper::default();
    let calls = Cell::new(0);

    let result: Result<(), _> = with_retry(&policy(), &sleeper, "upload file", is_busy, || {
        calls.set(calls.get() + 1);
        Err(Failure::Busy)
    });

    assert_eq!(
        result,
        Err(RetryError::Exhausted {
            attempts: 3,
            last: Failure::Busy
        })
    );
    assert_eq!(calls.get(), 3);
}

#[test]
fn fatal_failure_propagates_immediately() {
    let sleeper = RecordingSleeper::default();
    let calls = Cell::new(0);

    let result: Result<(), _> = with_retry(&policy(), &sleeper, "close issue", is_busy, || {
        calls.set(calls.get() + 1);
        Err(Failure::Broken)
    });

    assert_eq!(result, Err(RetryError::Fatal(Failure::Broken)));
    assert_eq!(calls.get(), 1);
    assert!(sleeper.slept.borrow().is_empty());
}

#[test]
fn fatal_after_rate_limit_is_not_counted_as_exhaustion() {
    let sleeper = RecordingSleeper::default();
    let calls = Cell::new(0);

    let result: Result<(), _> = with_retry(&policy(), &sleeper, "create issue", is_busy, || {
        calls.set(calls.get() + 1);
        if calls.get() == 1 {
            Err(Failure::Busy)
        } else {
            Err(Failure::Broken)
        }
    });

    assert_eq!(result, Err(RetryError::Fatal(Failure::Broken)));
    assert_eq!(sleeper.slept.borrow().len(), 1);
}

#[test]
fn single_attempt_policy_never_sleeps() {
    let sleeper = RecordingSleeper::default();
    let result: Result<(), _> = with_retry(
        &RetryPolicy::new(1, Duration::from_secs(5)),
        &sleeper,
        "create issue",
        is_busy,
        || Err(Failure::Busy),
    );

    assert!(matches!(result, Err(RetryError::Exhausted { attempts: 1, .. })));
    assert!(sleeper.slept.borrow().is_empty());
}

#[test]
fn default_policy_is_three_attempts_one_minute_apart() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_attempts, 3);
    assert_eq!(policy.cooldown, Duration::from_secs(60));
}
