// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Helpers for driving the `cmder` binary.

pub use tempfile::TempDir;

/// A `cmder` invocation under construction.
pub struct CliBuilder {
    cmd: assert_cmd::Command,
}

pub fn cli() -> CliBuilder {
    let mut cmd = assert_cmd::Command::cargo_bin("cmder").unwrap();
    for var in ["CMDER_LOG", "CMDER_ATTEMPT_TIMEOUT_MS", "CMDER_TOTAL_TIMEOUT_MS", "CMDER_RETRIES"] {
        cmd.env_remove(var);
    }
    CliBuilder { cmd }
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn stdin(mut self, input: &str) -> Self {
        self.cmd.write_stdin(input);
        self
    }

    /// Run and require exit code 0.
    pub fn passes(mut self) -> RunAssert {
        let run = RunAssert { output: self.cmd.output().unwrap() };
        assert!(run.output.status.success(), "expected success\n{}", run.describe());
        run
    }

    /// Run and require a specific exit code.
    pub fn exits(mut self, code: i32) -> RunAssert {
        let run = RunAssert { output: self.cmd.output().unwrap() };
        assert_eq!(run.output.status.code(), Some(code), "{}", run.describe());
        run
    }
}

pub struct RunAssert {
    output: std::process::Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout().contains(needle), "stdout missing {needle:?}\n{}", self.describe());
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr().contains(needle), "stderr missing {needle:?}\n{}", self.describe());
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.output.stdout).unwrap()
    }

    fn describe(&self) -> String {
        format!(
            "status: {:?}\n--- stdout ---\n{}\n--- stderr ---\n{}",
            self.output.status,
            self.stdout(),
            self.stderr()
        )
    }
}
