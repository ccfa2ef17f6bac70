// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help and usage specs

use crate::prelude::*;

#[test]
fn help_shows_usage_and_flags() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("--attempt-timeout")
        .stdout_has("--total-timeout")
        .stdout_has("--retry-on");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn missing_command_is_a_usage_error() {
    cli().args(&["--retries", "2"]).exits(2).stderr_has("Usage:");
}

#[test]
fn bad_duration_is_a_usage_error() {
    cli()
        .args(&["--attempt-timeout", "later", "--", "true"])
        .exits(2)
        .stderr_has("invalid number in duration");
}
