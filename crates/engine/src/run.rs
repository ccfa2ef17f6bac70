// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Public entry points: run a [`CommandSpec`] to an [`Outcome`].

use cmder_core::{CommandSpec, Outcome, RunError};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::aggregate::ResultAggregator;
use crate::attempt::AttemptContext;
use crate::process::{run_process, ProcessFailure};
use crate::retry::{AttemptRunner, RetryLoop};

/// Run `spec` to completion with retries and timeouts applied.
///
/// The spec is only read; the same template may be run any number of times,
/// concurrently, and every run gets its own buffers, timers and counters.
pub async fn run(spec: &CommandSpec) -> Outcome {
    run_with_cancel(spec, &CancellationToken::new()).await
}

/// Like [`run`], bounded by an outer cancellation token.
///
/// Canceling `cancel` kills the running attempt and ends the run with
/// [`RunError::Canceled`]; no further attempts start.
pub async fn run_with_cancel(spec: &CommandSpec, cancel: &CancellationToken) -> Outcome {
    let start = Instant::now();
    let mut attempts = ProcessAttempts::new(spec);
    let result = RetryLoop::new(spec).run(cancel, &mut attempts).await;
    let outcome = attempts.aggregator.finish(result);
    let elapsed_ms = start.elapsed().as_millis() as u64;
    match &outcome.error {
        None => tracing::debug!(
            program = %spec.program,
            attempts = outcome.attempts,
            elapsed_ms,
            "run succeeded"
        ),
        Some(error) => tracing::debug!(
            program = %spec.program,
            attempts = outcome.attempts,
            elapsed_ms,
            exit_code = outcome.exit_code,
            error = %error,
            "run failed"
        ),
    }
    outcome
}

/// Runs real processes, one per attempt, feeding the aggregator.
struct ProcessAttempts<'a> {
    spec: &'a CommandSpec,
    aggregator: ResultAggregator,
}

impl<'a> ProcessAttempts<'a> {
    fn new(spec: &'a CommandSpec) -> Self {
        Self { spec, aggregator: ResultAggregator::new(spec.collect_output) }
    }

    fn program(&self) -> String {
        self.spec.program.clone()
    }
}

impl AttemptRunner for ProcessAttempts<'_> {
    async fn run_attempt(&mut self, ctx: &AttemptContext) -> Result<(), RunError> {
        let captures = self.aggregator.begin_attempt().cloned();
        let result = run_process(self.spec, ctx, captures.as_ref()).await;

        match result {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => {
                self.aggregator.record_exit_code(status.code());
                Err(RunError::ExitFailure { program: self.program(), status })
            }
            Err(ProcessFailure::Spawn(source)) => {
                self.aggregator.record_exit_code(None);
                Err(RunError::StartFailure { program: self.program(), source })
            }
            Err(ProcessFailure::Wait(source)) => {
                self.aggregator.record_exit_code(None);
                Err(RunError::Wait { program: self.program(), source })
            }
            Err(ProcessFailure::Output(source)) => {
                Err(RunError::Output { program: self.program(), source })
            }
            Err(ProcessFailure::Canceled { status }) => {
                self.aggregator.record_exit_code(status.and_then(|s| s.code()));
                Err(RunError::Canceled { program: self.program() })
            }
        }
    }
}

#[cfg(all(test, unix))]
#[path = "run_tests.rs"]
mod tests;
