// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output fan-out: one process stream to capture buffers, caller sinks
//! and the liveness tap.

use std::fmt;
use std::io::{self, Write};

use cmder_core::{CaptureBuffer, CommandSpec, Sink};

use crate::tap::{LivenessSender, OutputTap};

/// Which child stream a fan-out serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stream {
    Stdout,
    Stderr,
}

cmder_core::simple_display! {
    Stream {
        Stdout => "stdout",
        Stderr => "stderr",
    }
}

/// In-memory captures for one invocation.
///
/// Both streams append to `combined` under its single lock, which is what
/// orders interleaved writes from the two concurrently read pipes.
#[derive(Clone, Default)]
pub(crate) struct Captures {
    pub(crate) stdout: CaptureBuffer,
    pub(crate) stderr: CaptureBuffer,
    pub(crate) combined: CaptureBuffer,
}

impl Captures {
    pub(crate) fn clear(&self) {
        self.stdout.clear();
        self.stderr.clear();
        self.combined.clear();
    }

    fn stream(&self, stream: Stream) -> &CaptureBuffer {
        match stream {
            Stream::Stdout => &self.stdout,
            Stream::Stderr => &self.stderr,
        }
    }
}

/// Ordered destination list: stream capture, combined capture, caller sinks.
pub(crate) struct Destinations {
    buffers: Vec<CaptureBuffer>,
    sinks: Vec<Sink>,
}

impl Write for Destinations {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for buffer in &self.buffers {
            buffer.append(buf);
        }
        for sink in &self.sinks {
            sink.write_chunk(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Every chunk written here reaches each destination exactly once, in order,
/// followed by one liveness signal.
pub(crate) struct OutputFanout {
    stream: Stream,
    tap: OutputTap<Destinations>,
}

impl OutputFanout {
    /// `captures` is `None` when collection is disabled: the buffers are
    /// then left out of the fan-out entirely.
    pub(crate) fn new(
        stream: Stream,
        spec: &CommandSpec,
        captures: Option<&Captures>,
        liveness: LivenessSender,
    ) -> Self {
        let buffers = match captures {
            Some(captures) => vec![captures.stream(stream).clone(), captures.combined.clone()],
            None => Vec::new(),
        };
        let sinks = match stream {
            Stream::Stdout => spec.stdout_sinks.clone(),
            Stream::Stderr => spec.stderr_sinks.clone(),
        };
        Self { stream, tap: OutputTap::new(Destinations { buffers, sinks }, liveness) }
    }

    pub(crate) fn stream(&self) -> Stream {
        self.stream
    }

    pub(crate) fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.tap.write_all(chunk)
    }
}

impl fmt::Debug for OutputFanout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputFanout").field("stream", &self.stream).finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "fanout_tests.rs"]
mod tests;
