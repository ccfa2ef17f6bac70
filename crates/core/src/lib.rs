// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cmder-core: command specification, outcome and error types shared by
//! the execution engine and the CLI.

pub mod macros;

pub mod error;
pub mod input;
pub mod outcome;
pub mod retry;
pub mod sink;
pub mod spec;

pub use error::{ErrorKind, RunError};
pub use input::InputSource;
pub use outcome::{Outcome, EXIT_CODE_UNKNOWN};
pub use retry::{always_retry, never_retry, timeout_retry_filter, RetryFilter};
pub use sink::{CaptureBuffer, Sink};
pub use spec::CommandSpec;
