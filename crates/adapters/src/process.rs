// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess helpers shared by the adapters

use crate::tee::{LogTee, Source};
use std::io;
use std::process::{ExitStatus, Stdio};
use tokio::io::AsyncRead;
use tokio::process::Command;

/// Run `cmd` with stdout and stderr both streamed into `log`.
///
/// Returns once the process has exited and both streams hit EOF.
pub(crate) async fn run_teed(mut cmd: Command, log: &LogTee) -> io::Result<ExitStatus> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd.spawn()?;
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let (out, err) = tokio::join!(
        drain(log, Source::Stdout, stdout),
        drain(log, Source::Stderr, stderr)
    );
    out?;
    err?;

    child.wait().await
}

async fn drain<R: AsyncRead + Unpin>(
    log: &LogTee,
    source: Source,
    stream: Option<R>,
) -> io::Result<u64> {
    match stream {
        Some(stream) => log.copy_from_source(source, stream).await,
        None => Ok(0),
    }
}

/// Describe an exit status for error messages
pub(crate) fn describe(status: &ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}
