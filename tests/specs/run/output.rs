// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output forwarding, working directory and stdin

use crate::prelude::*;

#[test]
fn forwards_child_output() {
    cli().args(&["--", "echo", "hello"]).passes().stdout_eq("hello\n");
}

#[test]
fn forwards_child_stderr() {
    cli().args(&["--", "sh", "-c", "echo oops >&2"]).passes().stderr_has("oops");
}

#[test]
fn quiet_suppresses_output() {
    cli().args(&["--quiet", "--", "echo", "hello"]).passes().stdout_eq("");
}

#[test]
fn runs_in_requested_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("marker.txt"), "x").unwrap();
    let path = dir.path().to_str().unwrap();

    cli().args(&["-C", path, "--", "ls"]).passes().stdout_has("marker.txt");
}

#[test]
fn missing_directory_is_reported() {
    cli()
        .args(&["-C", "/nonexistent/cmder-dir", "--", "true"])
        .exits(2)
        .stderr_has("does not exist");
}

#[test]
fn stdin_is_passed_through_on_request() {
    cli().args(&["--stdin", "--", "cat"]).stdin("piped in").passes().stdout_eq("piped in");
}

#[test]
fn stdin_is_closed_by_default() {
    cli().args(&["--", "cat"]).stdin("ignored").passes().stdout_eq("");
}
