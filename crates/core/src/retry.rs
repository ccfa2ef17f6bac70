// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retry predicates consulted after each failed attempt.

use crate::error::RunError;

/// Decides whether a failed attempt should be retried.
///
/// `attempt_timed_out` is true only when this attempt's own deadline fired.
/// Implementations must be stateless apart from diagnostics; a single
/// filter may be shared by many concurrent invocations.
pub trait RetryFilter: Send + Sync {
    fn should_retry(&self, error: &RunError, attempt_timed_out: bool) -> bool;
}

impl<F> RetryFilter for F
where
    F: Fn(&RunError, bool) -> bool + Send + Sync,
{
    fn should_retry(&self, error: &RunError, attempt_timed_out: bool) -> bool {
        self(error, attempt_timed_out)
    }
}

/// Retries timeouts only. This is the default filter.
pub fn timeout_retry_filter(error: &RunError, attempt_timed_out: bool) -> bool {
    attempt_timed_out || error.is_deadline_exceeded()
}

/// Retries every failure that reaches the filter.
pub fn always_retry(_error: &RunError, _attempt_timed_out: bool) -> bool {
    true
}

pub fn never_retry(_error: &RunError, _attempt_timed_out: bool) -> bool {
    false
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
