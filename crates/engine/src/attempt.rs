// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-attempt cancellation scope with an extendable deadline.
//!
//! The deadline watcher sleeps until the current deadline, re-reads it on
//! wake, and either sleeps again (the deadline moved) or marks the attempt
//! timed out and cancels the scope. The liveness watcher moves the
//! deadline to `now + timeout` for every output signal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::tap::LivenessSender;

/// Shared, extendable deadline.
#[derive(Debug)]
pub(crate) struct Deadline {
    at: Mutex<Instant>,
    timeout: Duration,
}

impl Deadline {
    /// `None` when `now + timeout` is past what the clock can represent;
    /// such a deadline never elapses.
    fn new(timeout: Duration) -> Option<Self> {
        let at = Instant::now().checked_add(timeout)?;
        Some(Self { at: Mutex::new(at), timeout })
    }

    pub(crate) fn get(&self) -> Instant {
        *self.at.lock()
    }

    /// Move the deadline to `now + timeout`. Never moves it backwards.
    pub(crate) fn extend(&self) {
        let Some(next) = Instant::now().checked_add(self.timeout) else {
            return;
        };
        let mut at = self.at.lock();
        if next > *at {
            *at = next;
        }
    }
}

/// Handles an attempt runner needs: the token its process is bound to and
/// the sender its output tap signals on.
#[derive(Debug, Clone)]
pub(crate) struct AttemptContext {
    /// Zero-based attempt index.
    pub(crate) index: u32,
    pub(crate) token: CancellationToken,
    pub(crate) liveness: LivenessSender,
}

/// One attempt's scope: a child token of the job, its deadline and watchers.
pub(crate) struct AttemptScope {
    token: CancellationToken,
    timed_out: Arc<AtomicBool>,
    liveness: LivenessSender,
    watchers: Vec<JoinHandle<()>>,
}

impl AttemptScope {
    /// Open a scope under `job`. A zero or unrepresentably large `timeout`
    /// starts no deadline watcher.
    pub(crate) fn open(job: &CancellationToken, timeout: Duration, extend_on_output: bool) -> Self {
        let token = job.child_token();
        let timed_out = Arc::new(AtomicBool::new(false));
        let (liveness, signals) = LivenessSender::channel();
        let mut watchers = Vec::new();

        let deadline = if timeout.is_zero() { None } else { Deadline::new(timeout) };
        if deadline.is_none() && !timeout.is_zero() {
            tracing::debug!(?timeout, "attempt timeout out of clock range, treating as unbounded");
        }
        if let Some(deadline) = deadline.map(Arc::new) {
            watchers.push(tokio::spawn(watch_deadline(
                Arc::clone(&deadline),
                token.clone(),
                Arc::clone(&timed_out),
            )));
            if extend_on_output {
                watchers.push(tokio::spawn(watch_liveness(
                    Arc::clone(&deadline),
                    token.clone(),
                    signals,
                )));
            }
        }

        Self { token, timed_out, liveness, watchers }
    }

    pub(crate) fn context(&self, index: u32) -> AttemptContext {
        AttemptContext { index, token: self.token.clone(), liveness: self.liveness.clone() }
    }

    pub(crate) fn timed_out(&self) -> bool {
        self.timed_out.load(Ordering::SeqCst)
    }

    /// Cancel the scope and wait for both watchers to finish.
    ///
    /// Returns whether this attempt's own deadline fired.
    pub(crate) async fn close(mut self) -> bool {
        self.token.cancel();
        for watcher in std::mem::take(&mut self.watchers) {
            if let Err(e) = watcher.await {
                tracing::warn!(error = %e, "attempt watcher failed");
            }
        }
        self.timed_out()
    }
}

impl Drop for AttemptScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

async fn watch_deadline(
    deadline: Arc<Deadline>,
    token: CancellationToken,
    timed_out: Arc<AtomicBool>,
) {
    loop {
        let at = deadline.get();
        tokio::select! {
            _ = token.cancelled() => return,
            _ = tokio::time::sleep_until(at) => {}
        }
        if Instant::now() >= deadline.get() {
            timed_out.store(true, Ordering::SeqCst);
            tracing::debug!("attempt deadline elapsed");
            token.cancel();
            return;
        }
    }
}

async fn watch_liveness(
    deadline: Arc<Deadline>,
    token: CancellationToken,
    mut signals: mpsc::Receiver<()>,
) {
    loop {
        tokio::select! {
            _ = token.cancelled() => return,
            signal = signals.recv() => match signal {
                Some(()) => {
                    deadline.extend();
                    tracing::trace!("attempt deadline extended");
                }
                None => return,
            },
        }
    }
}

#[cfg(test)]
#[path = "attempt_tests.rs"]
mod tests;
