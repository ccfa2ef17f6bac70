// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output destinations: caller-supplied sinks and in-memory capture buffers.

use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// A cloneable, thread-safe output destination.
///
/// Clones share the same underlying writer, so a sink placed on a
/// template spec is written by every invocation built from that template.
///
/// Writes happen synchronously on the task that reads the child's pipe.
/// A writer must not block for long: a stalled sink stalls that stream's
/// output and, on a current-thread runtime, the attempt's deadline watcher.
/// Put a channel or buffer in front of slow destinations.
#[derive(Clone)]
pub struct Sink {
    label: &'static str,
    inner: Arc<Mutex<dyn Write + Send>>,
}

impl Sink {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self::labeled("writer", writer)
    }

    fn labeled(label: &'static str, writer: impl Write + Send + 'static) -> Self {
        Self { label, inner: Arc::new(Mutex::new(writer)) }
    }

    /// Forward to the parent process's stdout.
    pub fn stdout() -> Self {
        Self::labeled("stdout", io::stdout())
    }

    /// Forward to the parent process's stderr.
    pub fn stderr() -> Self {
        Self::labeled("stderr", io::stderr())
    }

    /// Write the whole chunk and flush, holding the lock for both.
    pub fn write_chunk(&self, chunk: &[u8]) -> io::Result<()> {
        let mut inner = self.inner.lock();
        inner.write_all(chunk)?;
        inner.flush()
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Sink").field(&self.label).finish()
    }
}

impl From<CaptureBuffer> for Sink {
    fn from(buffer: CaptureBuffer) -> Self {
        Sink::labeled("capture", buffer)
    }
}

/// Shared in-memory byte buffer.
#[derive(Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, chunk: &[u8]) {
        self.bytes.lock().extend_from_slice(chunk);
    }

    pub fn len(&self) -> usize {
        self.bytes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.bytes.lock().clear();
    }

    /// Captured bytes decoded as UTF-8 (lossy).
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.lock().clone()
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Debug for CaptureBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureBuffer").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
