// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Serializable view of an [`Outcome`] and the exit code it maps to.

use cmder_core::{CommandSpec, ErrorKind, Outcome, EXIT_CODE_UNKNOWN};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct OutcomeReport<'a> {
    pub command: String,
    pub success: bool,
    pub attempts: u32,
    pub exit_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub stdout: &'a str,
    pub stderr: &'a str,
    pub combined: &'a str,
}

impl<'a> OutcomeReport<'a> {
    pub fn new(spec: &CommandSpec, outcome: &'a Outcome) -> Self {
        Self {
            command: spec.command_line(),
            success: outcome.is_success(),
            attempts: outcome.attempts,
            exit_code: outcome.exit_code,
            error_kind: outcome.error_kind(),
            error: outcome.error.as_ref().map(ToString::to_string),
            stdout: &outcome.stdout,
            stderr: &outcome.stderr,
            combined: &outcome.combined,
        }
    }
}

/// Exit code for this process: 0 on success, the child's code when it has
/// a meaningful one, 1 otherwise.
pub fn process_exit_code(outcome: &Outcome) -> i32 {
    match outcome.exit_code {
        _ if outcome.is_success() => 0,
        0 | EXIT_CODE_UNKNOWN => 1,
        code => code,
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
