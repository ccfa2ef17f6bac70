// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Caller-facing result of one command invocation.

use crate::error::{ErrorKind, RunError};

/// Exit code reported when the process never reached a terminal state
/// we could observe: it failed to start, or it was terminated by a signal.
pub const EXIT_CODE_UNKNOWN: i32 = -1;

/// Everything a caller learns from an invocation.
#[derive(Debug)]
pub struct Outcome {
    /// Captured stdout of the final attempt (empty when collection is off).
    pub stdout: String,
    pub stderr: String,
    /// Both streams, interleaved in the order the writes were observed.
    pub combined: String,
    /// Terminal error; `None` on success.
    pub error: Option<RunError>,
    /// 1-based count of attempts made, including the final one.
    pub attempts: u32,
    pub exit_code: i32,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(RunError::kind)
    }

    /// Convert into a `Result`, keeping the outcome on success.
    pub fn into_result(self) -> Result<Outcome, RunError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self),
        }
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
