// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exit codes, timeouts and retries

use crate::prelude::*;

#[test]
fn child_exit_code_is_propagated() {
    cli().args(&["--retries", "3", "--", "sh", "-c", "exit 7"]).exits(7).stderr_has("failed");
}

#[test]
fn missing_program_exits_one() {
    cli().args(&["--", "cmder-no-such-program"]).exits(1).stderr_has("failed to start");
}

#[test]
fn attempt_timeout_exhausts_retries() {
    cli()
        .args(&["--attempt-timeout", "100ms", "--retries", "2", "-v", "--", "sleep", "10"])
        .exits(1)
        .stderr_has("retrying sleep, attempt 3/3")
        .stderr_has("gave up after 3 attempts");
}

#[test]
fn total_timeout_stops_the_run() {
    cli()
        .args(&["--attempt-timeout", "5s", "--total-timeout", "200ms", "--", "sleep", "10"])
        .exits(1)
        .stderr_has("total timeout");
}

#[test]
fn defaults_come_from_the_environment() {
    cli()
        .env("CMDER_ATTEMPT_TIMEOUT_MS", "100")
        .env("CMDER_RETRIES", "1")
        .args(&["--", "sleep", "10"])
        .exits(1)
        .stderr_has("gave up after 2 attempts");
}

#[test]
fn retry_on_any_retries_exit_failures() {
    cli()
        .args(&["--retry-on", "any", "--retries", "1", "-v", "--", "sh", "-c", "exit 4"])
        .exits(4)
        .stderr_has("attempt 2/2");
}

#[test]
fn extend_on_output_keeps_a_chatty_command_alive() {
    cli()
        .args(&[
            "--attempt-timeout",
            "400ms",
            "--extend-on-output",
            "--quiet",
            "--",
            "sh",
            "-c",
            "for i in 1 2 3 4 5 6; do echo tick; sleep 0.1; done",
        ])
        .passes();
}

#[test]
fn huge_attempt_timeout_is_accepted() {
    cli()
        .args(&["--attempt-timeout", "5000000000000000h", "--", "echo", "ok"])
        .passes()
        .stdout_eq("ok\n");
}
