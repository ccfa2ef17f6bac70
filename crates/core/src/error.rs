// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal error taxonomy for a command invocation.

use serde::{Deserialize, Serialize};
use std::process::ExitStatus;
use std::time::Duration;

/// Coarse classification of a [`RunError`], stable enough to match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The process ran to completion with a non-zero status.
    ProcessExitFailure,
    /// An attempt deadline or the total deadline elapsed.
    DeadlineExceeded,
    /// Every permitted attempt was consumed.
    RetriesExhausted,
    /// The process could not be created.
    StartFailure,
    /// The caller canceled the invocation.
    Canceled,
    /// Reading output or waiting on the process failed.
    Io,
}

crate::simple_display! {
    ErrorKind {
        ProcessExitFailure => "process_exit_failure",
        DeadlineExceeded => "deadline_exceeded",
        RetriesExhausted => "retries_exhausted",
        StartFailure => "start_failure",
        Canceled => "canceled",
        Io => "io",
    }
}

/// Errors that end a command invocation (or a single attempt of it).
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Executable missing, permission denied, unreadable stdin file, ...
    #[error("failed to start `{program}`: {source}")]
    StartFailure {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The per-attempt deadline elapsed and the process was killed.
    #[error("`{program}` timed out: no completion within {timeout:?}")]
    AttemptTimeout { program: String, timeout: Duration },

    /// The job-level deadline elapsed; overrides the attempt's own error.
    #[error("`{program}` timed out: total timeout of {timeout:?} exceeded")]
    TotalTimeout { program: String, timeout: Duration },

    #[error("`{program}` failed: {status}")]
    ExitFailure { program: String, status: ExitStatus },

    #[error("`{program}` gave up after {attempts} attempts: {last}")]
    RetriesExhausted {
        program: String,
        attempts: u32,
        #[source]
        last: Box<RunError>,
    },

    #[error("`{program}` was canceled")]
    Canceled { program: String },

    /// A caller-supplied output destination rejected a write.
    #[error("writing output of `{program}` failed: {source}")]
    Output {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("waiting on `{program}` failed: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl RunError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RunError::StartFailure { .. } => ErrorKind::StartFailure,
            RunError::AttemptTimeout { .. } | RunError::TotalTimeout { .. } => {
                ErrorKind::DeadlineExceeded
            }
            RunError::ExitFailure { .. } => ErrorKind::ProcessExitFailure,
            RunError::RetriesExhausted { .. } => ErrorKind::RetriesExhausted,
            RunError::Canceled { .. } => ErrorKind::Canceled,
            RunError::Output { .. } | RunError::Wait { .. } => ErrorKind::Io,
        }
    }

    /// True for every error caused by a deadline: attempt timeouts, the
    /// total timeout, and retry exhaustion (which is reported as a
    /// deadline/exhausted composite).
    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::DeadlineExceeded | ErrorKind::RetriesExhausted
        )
    }

    /// Program name the error refers to.
    pub fn program(&self) -> &str {
        match self {
            RunError::StartFailure { program, .. }
            | RunError::AttemptTimeout { program, .. }
            | RunError::TotalTimeout { program, .. }
            | RunError::ExitFailure { program, .. }
            | RunError::RetriesExhausted { program, .. }
            | RunError::Canceled { program }
            | RunError::Output { program, .. }
            | RunError::Wait { program, .. } => program,
        }
    }

    /// The innermost attempt error (unwraps [`RunError::RetriesExhausted`]).
    pub fn last_attempt(&self) -> &RunError {
        match self {
            RunError::RetriesExhausted { last, .. } => last.last_attempt(),
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
