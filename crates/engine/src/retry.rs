// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job-level retry loop bounded by the total timeout.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use cmder_core::{CommandSpec, RunError};
use tokio_util::sync::CancellationToken;

use crate::attempt::{AttemptContext, AttemptScope};

/// Runs a single attempt inside the scope described by `ctx`.
///
/// Implementations must stop promptly once `ctx.token` is canceled and
/// report that as [`RunError::Canceled`]; the loop reclassifies it.
pub(crate) trait AttemptRunner {
    async fn run_attempt(&mut self, ctx: &AttemptContext) -> Result<(), RunError>;
}

pub(crate) struct RetryLoop<'a> {
    spec: &'a CommandSpec,
}

impl<'a> RetryLoop<'a> {
    pub(crate) fn new(spec: &'a CommandSpec) -> Self {
        Self { spec }
    }

    /// Run up to `retries + 1` attempts under a job scope derived from `cancel`.
    pub(crate) async fn run<R: AttemptRunner>(
        &self,
        cancel: &CancellationToken,
        runner: &mut R,
    ) -> Result<(), RunError> {
        let spec = self.spec;
        let job = cancel.child_token();
        // Cancels the total-timeout timer however we leave this function.
        let _job_guard = job.clone().drop_guard();
        let job_timed_out = Arc::new(AtomicBool::new(false));
        if !spec.total_timeout.is_zero() {
            tokio::spawn(total_timer(job.clone(), spec.total_timeout, Arc::clone(&job_timed_out)));
        }

        if spec.verbose {
            let cwd = spec.cwd.as_deref().map(|p| p.display().to_string()).unwrap_or_default();
            tracing::info!("{}$ {}", cwd, spec.command_line());
        }

        let attempts = spec.max_attempts();
        let mut index = 0;
        loop {
            let scope = AttemptScope::open(&job, spec.attempt_timeout, spec.extend_on_output);
            let result = runner.run_attempt(&scope.context(index)).await;
            let attempt_timed_out = scope.close().await;

            let error = match result {
                Ok(()) => {
                    tracing::debug!(program = %spec.program, attempt = index + 1, "succeeded");
                    return Ok(());
                }
                Err(error) => self.classify(error, attempt_timed_out),
            };
            tracing::debug!(
                program = %spec.program,
                attempt = index + 1,
                attempt_timed_out,
                error = %error,
                "attempt failed"
            );

            if matches!(error, RunError::StartFailure { .. }) {
                return Err(error);
            }
            if job.is_cancelled() {
                return Err(self.job_error(job_timed_out.load(Ordering::SeqCst)));
            }
            if !spec.retry_filter.should_retry(&error, attempt_timed_out) {
                return Err(error);
            }

            index += 1;
            if index >= attempts {
                return Err(RunError::RetriesExhausted {
                    program: spec.program.clone(),
                    attempts,
                    last: Box::new(error),
                });
            }
            if spec.verbose {
                tracing::warn!("retrying {}, attempt {}/{}", spec.program, index + 1, attempts);
            }
        }
    }

    /// A canceled attempt whose own deadline fired is an attempt timeout.
    fn classify(&self, error: RunError, attempt_timed_out: bool) -> RunError {
        match error {
            RunError::Canceled { program } if attempt_timed_out => {
                RunError::AttemptTimeout { program, timeout: self.spec.attempt_timeout }
            }
            other => other,
        }
    }

    /// The job scope was canceled: either our total timer or the caller.
    fn job_error(&self, timed_out: bool) -> RunError {
        let program = self.spec.program.clone();
        if timed_out {
            RunError::TotalTimeout { program, timeout: self.spec.total_timeout }
        } else {
            RunError::Canceled { program }
        }
    }
}

async fn total_timer(job: CancellationToken, timeout: Duration, timed_out: Arc<AtomicBool>) {
    tokio::select! {
        _ = job.cancelled() => {}
        _ = tokio::time::sleep(timeout) => {
            timed_out.store(true, Ordering::SeqCst);
            tracing::debug!(?timeout, "total timeout elapsed");
            job.cancel();
        }
    }
}

#[cfg(all(test, unix))]
#[path = "retry_tests.rs"]
mod tests;
