// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Standard input sources for a spawned command.

use std::path::PathBuf;
use std::sync::Arc;

/// Where a command's stdin comes from.
///
/// Every variant can be replayed, so each retry attempt sees the same input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Fixed bytes written to the child's stdin, then closed.
    Bytes(Arc<[u8]>),
    /// A file opened fresh for every attempt.
    File(PathBuf),
    /// The parent process's own stdin.
    Inherit,
}

impl InputSource {
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        InputSource::Bytes(Arc::from(data.into()))
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        InputSource::File(path.into())
    }
}

impl From<&str> for InputSource {
    fn from(s: &str) -> Self {
        InputSource::bytes(s)
    }
}

impl From<String> for InputSource {
    fn from(s: String) -> Self {
        InputSource::bytes(s)
    }
}

impl From<Vec<u8>> for InputSource {
    fn from(data: Vec<u8>) -> Self {
        InputSource::bytes(data)
    }
}
