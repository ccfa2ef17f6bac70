// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `--json` outcome reports

use crate::prelude::*;

#[test]
fn success_report() {
    let run = cli().args(&["--json", "--", "echo", "hello"]).passes();
    let json = run.stdout_json();

    assert_eq!(json["success"], true);
    assert_eq!(json["attempts"], 1);
    assert_eq!(json["exit_code"], 0);
    assert_eq!(json["stdout"], "hello\n");
    assert_eq!(json["command"], "echo hello");
}

#[test]
fn child_output_goes_to_stderr_in_json_mode() {
    cli().args(&["--json", "--", "echo", "hello"]).passes().stderr_has("hello");
}

#[test]
fn combined_output_is_interleaved() {
    let run = cli()
        .args(&[
            "--json",
            "--quiet",
            "--",
            "sh",
            "-c",
            "echo out1; sleep 0.1; echo err1 >&2; sleep 0.1; echo out2",
        ])
        .passes();
    let json = run.stdout_json();

    assert_eq!(json["combined"], "out1\nerr1\nout2\n");
    assert_eq!(json["stderr"], "err1\n");
}

#[test]
fn timeout_report() {
    let run = cli()
        .args(&["--json", "--attempt-timeout", "100ms", "--retries", "1", "--", "sleep", "10"])
        .exits(1);
    let json = run.stdout_json();

    assert_eq!(json["success"], false);
    assert_eq!(json["attempts"], 2);
    assert_eq!(json["exit_code"], -1);
    assert_eq!(json["error_kind"], "retries_exhausted");
}

#[test]
fn no_collect_leaves_captures_empty() {
    let run = cli().args(&["--json", "--no-collect", "--", "echo", "hello"]).passes();
    assert_eq!(run.stdout_json()["stdout"], "");
}
