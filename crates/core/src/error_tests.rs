// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn start_failure() -> RunError {
    RunError::StartFailure {
        program: "nope".to_string(),
        source: std::io::Error::from(std::io::ErrorKind::NotFound),
    }
}

fn attempt_timeout() -> RunError {
    RunError::AttemptTimeout { program: "sleep".to_string(), timeout: Duration::from_secs(1) }
}

fn total_timeout() -> RunError {
    RunError::TotalTimeout { program: "sleep".to_string(), timeout: Duration::from_secs(4) }
}

fn canceled() -> RunError {
    RunError::Canceled { program: "sleep".to_string() }
}

fn exhausted() -> RunError {
    RunError::RetriesExhausted {
        program: "sleep".to_string(),
        attempts: 5,
        last: Box::new(attempt_timeout()),
    }
}

#[yare::parameterized(
    start     = { start_failure(),   ErrorKind::StartFailure,     false },
    attempt   = { attempt_timeout(), ErrorKind::DeadlineExceeded, true },
    total     = { total_timeout(),   ErrorKind::DeadlineExceeded, true },
    exhausted = { super::exhausted(),ErrorKind::RetriesExhausted, true },
    canceled  = { super::canceled(), ErrorKind::Canceled,         false },
)]
fn kind_and_deadline_class(error: RunError, kind: ErrorKind, deadline: bool) {
    assert_eq!(error.kind(), kind);
    assert_eq!(error.is_deadline_exceeded(), deadline);
}

#[cfg(unix)]
#[test]
fn exit_failure_is_not_deadline_class() {
    use std::os::unix::process::ExitStatusExt;

    let error =
        RunError::ExitFailure { program: "false".to_string(), status: ExitStatus::from_raw(1 << 8) };
    assert_eq!(error.kind(), ErrorKind::ProcessExitFailure);
    assert!(!error.is_deadline_exceeded());
    assert_eq!(error.to_string(), "`false` failed: exit status: 1");
}

#[test]
fn last_attempt_unwraps_exhaustion() {
    let error = exhausted();
    assert_eq!(error.last_attempt().kind(), ErrorKind::DeadlineExceeded);
    assert!(matches!(error.last_attempt(), RunError::AttemptTimeout { .. }));
}

#[test]
fn messages_name_the_program() {
    assert_eq!(start_failure().program(), "nope");
    assert!(start_failure().to_string().starts_with("failed to start `nope`"));
    assert_eq!(
        total_timeout().to_string(),
        "`sleep` timed out: total timeout of 4s exceeded"
    );
    assert!(exhausted().to_string().starts_with("`sleep` gave up after 5 attempts"));
}

#[test]
fn error_kind_serializes_snake_case() {
    let json = serde_json::to_string(&ErrorKind::RetriesExhausted).unwrap();
    assert_eq!(json, "\"retries_exhausted\"");
    assert_eq!(ErrorKind::DeadlineExceeded.to_string(), "deadline_exceeded");
}
