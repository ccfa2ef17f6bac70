// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Immutable command specification.
//!
//! A [`CommandSpec`] is a plain value: every setter consumes it and returns
//! the modified copy. Build a base template once, then `clone()` it for
//! each variation; invocations never write back into a spec.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::input::InputSource;
use crate::retry::{timeout_retry_filter, RetryFilter};
use crate::sink::Sink;

/// What to run and under which timeout/retry/output policy.
#[derive(Clone)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory; `None` inherits the parent's.
    pub cwd: Option<PathBuf>,
    /// Per-attempt timeout. Zero means unbounded.
    pub attempt_timeout: Duration,
    /// Timeout across all attempts. Zero means unbounded.
    pub total_timeout: Duration,
    /// Push the attempt deadline back whenever the process writes output.
    pub extend_on_output: bool,
    /// Number of retries; up to `retries + 1` attempts are made.
    pub retries: u32,
    pub retry_filter: Arc<dyn RetryFilter>,
    pub stdin: Option<InputSource>,
    pub stdout_sinks: Vec<Sink>,
    pub stderr_sinks: Vec<Sink>,
    /// Capture output in memory. Disable for long-running, chatty
    /// processes and attach sinks instead.
    pub collect_output: bool,
    /// Log the command line and retries.
    pub verbose: bool,
}

impl Default for CommandSpec {
    fn default() -> Self {
        Self {
            program: String::new(),
            args: Vec::new(),
            cwd: None,
            attempt_timeout: Duration::ZERO,
            total_timeout: Duration::ZERO,
            extend_on_output: false,
            retries: 0,
            retry_filter: Arc::new(timeout_retry_filter),
            stdin: None,
            stdout_sinks: Vec::new(),
            stderr_sinks: Vec::new(),
            collect_output: true,
            verbose: false,
        }
    }
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), ..Self::default() }
    }

    /// Build from a full argv: the first element is the program.
    pub fn from_argv<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let program = argv.next().unwrap_or_default();
        Self { program, args: argv.collect(), ..Self::default() }
    }

    crate::setters! {
        into {
            program: String,
        }
        set {
            attempt_timeout: Duration,
            total_timeout: Duration,
            extend_on_output: bool,
            retries: u32,
            collect_output: bool,
            verbose: bool,
        }
        option {
            cwd: PathBuf,
            stdin: InputSource,
        }
    }

    /// Replace the argument list.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Append to the argument list.
    #[must_use]
    pub fn extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn retry_filter(mut self, filter: impl RetryFilter + 'static) -> Self {
        self.retry_filter = Arc::new(filter);
        self
    }

    #[must_use]
    pub fn extra_stdout(mut self, sink: impl Into<Sink>) -> Self {
        self.stdout_sinks.push(sink.into());
        self
    }

    #[must_use]
    pub fn extra_stderr(mut self, sink: impl Into<Sink>) -> Self {
        self.stderr_sinks.push(sink.into());
        self
    }

    /// Also write the child's stdout to our own stdout.
    #[must_use]
    pub fn forward_stdout(self) -> Self {
        self.extra_stdout(Sink::stdout())
    }

    #[must_use]
    pub fn forward_stderr(self) -> Self {
        self.extra_stderr(Sink::stderr())
    }

    /// Forward both streams to the parent's stdout/stderr.
    #[must_use]
    pub fn forward_output(self) -> Self {
        self.forward_stdout().forward_stderr()
    }

    /// Total number of attempts this spec permits.
    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    /// Shell-like rendering of the command line, for logs.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSpec")
            .field("program", &self.program)
            .field("args", &self.args)
            .field("cwd", &self.cwd)
            .field("attempt_timeout", &self.attempt_timeout)
            .field("total_timeout", &self.total_timeout)
            .field("extend_on_output", &self.extend_on_output)
            .field("retries", &self.retries)
            .field("stdin", &self.stdin)
            .field("stdout_sinks", &self.stdout_sinks)
            .field("stderr_sinks", &self.stderr_sinks)
            .field("collect_output", &self.collect_output)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "spec_tests.rs"]
mod tests;
