// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawning one process bound to a cancellation token.
//!
//! Cancellation kills the child (its whole process group on unix) and
//! then reaps it; stdout/stderr are pumped through an [`OutputFanout`]
//! each until EOF.

use std::io;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::Duration;

use cmder_core::{CommandSpec, InputSource};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdin, Command};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::attempt::AttemptContext;
use crate::fanout::{Captures, OutputFanout, Stream};

/// Read size for output pumps.
const PUMP_CHUNK: usize = 8 * 1024;

/// How long output pumps may keep draining after the scope is canceled.
/// Covers grandchildren that escaped the kill and still hold a pipe open.
pub(crate) const DRAIN_GRACE: Duration = Duration::from_millis(250);

/// Why a process run did not produce a usable exit status.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ProcessFailure {
    #[error("spawn failed: {0}")]
    Spawn(#[source] io::Error),

    #[error("wait failed: {0}")]
    Wait(#[source] io::Error),

    #[error("output destination failed: {0}")]
    Output(#[source] io::Error),

    /// The scope was canceled and the process was killed.
    #[error("killed after cancellation")]
    Canceled { status: Option<ExitStatus> },
}

/// Run `spec` once under `ctx`, writing output into `captures` (if any)
/// and the spec's sinks.
///
/// Returns the exit status when the process ran to completion, whether or
/// not that status is a success.
pub(crate) async fn run_process(
    spec: &CommandSpec,
    ctx: &AttemptContext,
    captures: Option<&Captures>,
) -> Result<ExitStatus, ProcessFailure> {
    let mut command = build_command(spec)?;
    let mut child = command.spawn().map_err(ProcessFailure::Spawn)?;
    let pid = child.id();
    tracing::debug!(program = %spec.program, pid, attempt = ctx.index + 1, "spawned");

    let mut pumps = JoinSet::new();
    if let Some(stdout) = child.stdout.take() {
        let fanout = OutputFanout::new(Stream::Stdout, spec, captures, ctx.liveness.clone());
        pumps.spawn(pump(stdout, fanout));
    }
    if let Some(stderr) = child.stderr.take() {
        let fanout = OutputFanout::new(Stream::Stderr, spec, captures, ctx.liveness.clone());
        pumps.spawn(pump(stderr, fanout));
    }
    if let (Some(InputSource::Bytes(data)), Some(stdin)) = (&spec.stdin, child.stdin.take()) {
        pumps.spawn(feed_stdin(stdin, Arc::clone(data)));
    }

    let exited = tokio::select! {
        status = child.wait() => Some(status),
        _ = ctx.token.cancelled() => None,
    };
    let (status, canceled) = match exited {
        Some(status) => (status.map_err(ProcessFailure::Wait)?, false),
        None => {
            tracing::debug!(program = %spec.program, pid, "killing canceled process");
            kill_tree(&mut child, pid);
            (child.wait().await.map_err(ProcessFailure::Wait)?, true)
        }
    };

    let drained = drain(pumps, pid, &ctx.token).await;

    if canceled && !status.success() {
        return Err(ProcessFailure::Canceled { status: Some(status) });
    }
    if status.success() {
        drained?;
    }
    Ok(status)
}

fn build_command(spec: &CommandSpec) -> Result<Command, ProcessFailure> {
    let mut command = Command::new(&spec.program);
    command.args(&spec.args);
    if let Some(cwd) = &spec.cwd {
        command.current_dir(cwd);
    }

    let stdin = match &spec.stdin {
        None => Stdio::null(),
        Some(InputSource::Inherit) => Stdio::inherit(),
        Some(InputSource::Bytes(_)) => Stdio::piped(),
        Some(InputSource::File(path)) => {
            Stdio::from(std::fs::File::open(path).map_err(ProcessFailure::Spawn)?)
        }
    };
    command.stdin(stdin);
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());
    command.kill_on_drop(true);

    // Own process group, so a kill reaches grandchildren too.
    #[cfg(unix)]
    command.process_group(0);

    Ok(command)
}

async fn pump<R>(mut reader: R, mut fanout: OutputFanout) -> Result<(), ProcessFailure>
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; PUMP_CHUNK];
    loop {
        let n = reader.read(&mut buf).await.map_err(ProcessFailure::Wait)?;
        if n == 0 {
            return Ok(());
        }
        if let Err(e) = fanout.write_chunk(&buf[..n]) {
            tracing::warn!(stream = %fanout.stream(), error = %e, "output destination failed");
            return Err(ProcessFailure::Output(e));
        }
    }
}

async fn feed_stdin(mut stdin: ChildStdin, data: Arc<[u8]>) -> Result<(), ProcessFailure> {
    // A child that exits without reading its input closes the pipe early.
    if let Err(e) = stdin.write_all(&data).await {
        tracing::debug!(error = %e, "stdin not fully consumed");
    }
    Ok(())
}

/// Join all pumps. If the scope is canceled meanwhile, kill the group and
/// give the pumps [`DRAIN_GRACE`] before abandoning them.
async fn drain(
    mut pumps: JoinSet<Result<(), ProcessFailure>>,
    pid: Option<u32>,
    token: &CancellationToken,
) -> Result<(), ProcessFailure> {
    let collect = async move {
        let mut first = Ok(());
        while let Some(joined) = pumps.join_next().await {
            let result = joined.unwrap_or_else(|e| Err(ProcessFailure::Wait(io::Error::other(e))));
            if first.is_ok() {
                first = result;
            }
        }
        first
    };
    let grace = async {
        token.cancelled().await;
        kill_group(pid);
        tokio::time::sleep(DRAIN_GRACE).await;
    };

    tokio::select! {
        result = collect => result,
        _ = grace => {
            tracing::debug!(pid, "abandoning output pumps after grace period");
            Ok(())
        }
    }
}

fn kill_tree(child: &mut Child, pid: Option<u32>) {
    if kill_group(pid) {
        return;
    }
    if let Err(e) = child.start_kill() {
        tracing::debug!(pid, error = %e, "kill failed");
    }
}

#[cfg(unix)]
fn kill_group(pid: Option<u32>) -> bool {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let Some(pid) = pid.and_then(|pid| i32::try_from(pid).ok()) else {
        return false;
    };
    match killpg(Pid::from_raw(pid), Signal::SIGKILL) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(pid, error = %e, "killpg failed");
            false
        }
    }
}

#[cfg(not(unix))]
fn kill_group(_pid: Option<u32>) -> bool {
    false
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
