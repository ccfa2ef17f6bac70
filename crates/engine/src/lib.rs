// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cmder-engine: runs a [`CommandSpec`] as an OS process with per-attempt
//! and total timeouts, deadline extension on output, retries and output
//! fan-out.

mod aggregate;
mod attempt;
mod fanout;
mod process;
mod retry;
mod run;
mod tap;

pub use run::{run, run_with_cancel};

pub use cmder_core::{
    always_retry, never_retry, timeout_retry_filter, CaptureBuffer, CommandSpec, ErrorKind,
    InputSource, Outcome, RetryFilter, RunError, Sink, EXIT_CODE_UNKNOWN,
};
pub use tokio_util::sync::CancellationToken;
