// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pass-through writer that reports output activity.

use std::io::{self, Write};

use tokio::sync::mpsc;

/// Capacity of the liveness channel. Signals beyond this are dropped:
/// one pending signal already extends the deadline.
pub(crate) const LIVENESS_CAPACITY: usize = 16;

/// Non-blocking sender half of the liveness channel.
#[derive(Clone, Debug)]
pub(crate) struct LivenessSender(mpsc::Sender<()>);

impl LivenessSender {
    pub(crate) fn channel() -> (LivenessSender, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(LIVENESS_CAPACITY);
        (LivenessSender(tx), rx)
    }

    /// Signal activity. Never blocks: a full or closed channel drops the ping.
    pub(crate) fn notify(&self) {
        let _ = self.0.try_send(());
    }
}

/// A writer that hands every chunk to `inner` unchanged, then signals liveness.
pub(crate) struct OutputTap<W> {
    inner: W,
    liveness: LivenessSender,
}

impl<W: Write> OutputTap<W> {
    pub(crate) fn new(inner: W, liveness: LivenessSender) -> Self {
        Self { inner, liveness }
    }
}

impl<W: Write> Write for OutputTap<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write_all(buf)?;
        self.liveness.notify();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
#[path = "tap_tests.rs"]
mod tests;
