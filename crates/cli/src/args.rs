// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line arguments and their mapping onto a [`CommandSpec`].

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use cmder_core::{always_retry, never_retry, timeout_retry_filter, CommandSpec, InputSource};

use crate::duration::parse_duration;
use crate::env;

/// Run a command with per-attempt and total timeouts and retries.
#[derive(Debug, Parser)]
#[command(name = "cmder", version, about)]
pub struct Cli {
    /// Kill an attempt after this long (e.g. 500ms, 30s, 5m); 0 disables
    #[arg(long, value_name = "DUR", value_parser = parse_duration)]
    pub attempt_timeout: Option<Duration>,

    /// Give up on the whole run after this long; 0 disables
    #[arg(long, value_name = "DUR", value_parser = parse_duration)]
    pub total_timeout: Option<Duration>,

    /// Push the attempt deadline back whenever the command prints
    #[arg(long)]
    pub extend_on_output: bool,

    /// Retry a failed attempt up to N times
    #[arg(long, value_name = "N")]
    pub retries: Option<u32>,

    /// Which failures are retried
    #[arg(long, value_enum, default_value_t = RetryOn::Timeout)]
    pub retry_on: RetryOn,

    /// Working directory for the command
    #[arg(short = 'C', long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Pass our stdin through to the command
    #[arg(long)]
    pub stdin: bool,

    /// Do not forward the command's output to the terminal
    #[arg(short, long)]
    pub quiet: bool,

    /// Do not keep the command's output in memory
    #[arg(long)]
    pub no_collect: bool,

    /// Print the outcome as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Log the command line and retries
    #[arg(short, long)]
    pub verbose: bool,

    /// Program to run, followed by its arguments
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "PROGRAM"
    )]
    pub command: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RetryOn {
    /// Only attempts that hit a deadline
    #[default]
    Timeout,
    /// Every failure except a failure to start
    Any,
    Never,
}

impl Cli {
    /// Build the spec, falling back to `CMDER_*` defaults for unset flags.
    pub fn to_spec(&self) -> CommandSpec {
        let mut spec = CommandSpec::from_argv(self.command.iter().cloned())
            .attempt_timeout(self.attempt_timeout.or_else(env::attempt_timeout).unwrap_or_default())
            .total_timeout(self.total_timeout.or_else(env::total_timeout).unwrap_or_default())
            .extend_on_output(self.extend_on_output)
            .retries(self.retries.or_else(env::retries).unwrap_or(0))
            .collect_output(!self.no_collect)
            .verbose(self.verbose);

        spec = match self.retry_on {
            RetryOn::Timeout => spec.retry_filter(timeout_retry_filter),
            RetryOn::Any => spec.retry_filter(always_retry),
            RetryOn::Never => spec.retry_filter(never_retry),
        };
        if let Some(cwd) = &self.cwd {
            spec = spec.cwd(cwd.clone());
        }
        if self.stdin {
            spec = spec.stdin(InputSource::Inherit);
        }
        // JSON mode owns stdout, so live output goes to stderr only.
        if self.json && !self.quiet {
            spec = spec.extra_stdout(cmder_core::Sink::stderr()).forward_stderr();
        } else if !self.quiet {
            spec = spec.forward_output();
        }
        spec
    }
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
