// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.
//!
//! Each value is a default: an explicit flag always wins.

use std::time::Duration;

/// Tracing filter directives (`CMDER_LOG`), e.g. `cmder_engine=debug`.
pub fn log_filter() -> Option<String> {
    std::env::var("CMDER_LOG").ok().filter(|s| !s.is_empty())
}

/// Default per-attempt timeout
pub fn attempt_timeout() -> Option<Duration> {
    millis("CMDER_ATTEMPT_TIMEOUT_MS")
}

/// Default total timeout
pub fn total_timeout() -> Option<Duration> {
    millis("CMDER_TOTAL_TIMEOUT_MS")
}

pub fn retries() -> Option<u32> {
    std::env::var("CMDER_RETRIES").ok().and_then(|s| s.parse::<u32>().ok())
}

fn millis(var: &str) -> Option<Duration> {
    std::env::var(var).ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_millis)
}
