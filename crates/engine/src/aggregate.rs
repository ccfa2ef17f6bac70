// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Folds per-attempt bookkeeping into the final [`Outcome`].

use cmder_core::{Outcome, RunError, EXIT_CODE_UNKNOWN};

use crate::fanout::Captures;

/// Attempt counter, last exit code and capture buffers for one invocation.
pub(crate) struct ResultAggregator {
    captures: Option<Captures>,
    attempts: u32,
    exit_code: i32,
}

impl ResultAggregator {
    pub(crate) fn new(collect_output: bool) -> Self {
        Self { captures: collect_output.then(Captures::default), attempts: 0, exit_code: 0 }
    }

    /// Start a new attempt: bump the counter and reset the captures, so the
    /// outcome reflects the final attempt only.
    pub(crate) fn begin_attempt(&mut self) -> Option<&Captures> {
        self.attempts += 1;
        self.exit_code = 0;
        if let Some(captures) = &self.captures {
            captures.clear();
        }
        self.captures.as_ref()
    }

    pub(crate) fn record_exit_code(&mut self, code: Option<i32>) {
        self.exit_code = code.unwrap_or(EXIT_CODE_UNKNOWN);
    }

    pub(crate) fn finish(self, result: Result<(), RunError>) -> Outcome {
        let (stdout, stderr, combined) = match &self.captures {
            Some(c) => (c.stdout.contents(), c.stderr.contents(), c.combined.contents()),
            None => (String::new(), String::new(), String::new()),
        };
        let (error, exit_code) = match result {
            Ok(()) => (None, 0),
            Err(error) => (Some(error), self.exit_code),
        };
        Outcome { stdout, stderr, combined, error, attempts: self.attempts, exit_code }
    }
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
