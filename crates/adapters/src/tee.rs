// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log tee: copy a byte stream to a log file and the live console
//!
//! Writers hand chunks to a bounded channel; a single copier task decodes
//! them and writes to the file (and stderr, unless quiet) until the channel
//! closes. The producer only blocks when the channel is full, never on disk.
//! Each [`Source`] has its own decoder, so a character split across two
//! chunks of one stream survives chunks of the other stream arriving between.

use std::io;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Size of a single read from a producer stream
pub const CHUNK_SIZE: usize = 8 * 1024;

/// Chunks buffered between producer and copier
const CHANNEL_CAPACITY: usize = 64;

/// Incremental UTF-8 decoder that replaces invalid sequences.
///
/// A multi-byte character split across two chunks is carried over to the
/// next `push` instead of being replaced.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    /// Decode as much of the buffered input as possible
    pub fn push(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);

        let mut out = String::new();
        let mut input = &self.pending[..];
        loop {
            match std::str::from_utf8(input) {
                Ok(text) => {
                    out.push_str(text);
                    input = &[];
                    break;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&input[..valid]));
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            input = &input[valid + len..];
                        }
                        // incomplete sequence at the end: wait for more bytes
                        None => {
                            input = &input[valid..];
                            break;
                        }
                    }
                }
            }
        }

        let rest = input.to_vec();
        self.pending = rest;
        out
    }

    /// Flush whatever is left, replacing a truncated trailing sequence
    pub fn finish(&mut self) -> String {
        let out = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        out
    }
}

/// Stream a chunk came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Stdout,
    Stderr,
}

impl Source {
    fn index(self) -> usize {
        match self {
            Source::Stdout => 0,
            Source::Stderr => 1,
        }
    }
}

/// Writable sink that tees into a log file and the console
pub struct LogTee {
    tx: mpsc::Sender<(Source, Vec<u8>)>,
    copier: JoinHandle<io::Result<()>>,
    path: Option<PathBuf>,
}

impl LogTee {
    /// Open `path` for writing and start the copier.
    ///
    /// The file is created synchronously so a bad path fails here, before any
    /// producer is started. Must be called within a tokio runtime.
    pub fn create(path: &Path, echo: bool) -> io::Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self::start(
            Some(tokio::fs::File::from_std(file)),
            echo,
            Some(path.to_path_buf()),
        ))
    }

    /// Console-only tee, for progress output that is not kept on disk
    pub fn console(echo: bool) -> Self {
        Self::start(None, echo, None)
    }

    fn start(file: Option<tokio::fs::File>, echo: bool, path: Option<PathBuf>) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let copier = tokio::spawn(copy_until_closed(rx, file, echo));
        Self { tx, copier, path }
    }

    /// Destination file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Queue a chunk for the copier
    pub async fn write(&self, bytes: &[u8]) -> io::Result<()> {
        self.write_from(Source::Stdout, bytes).await
    }

    /// Queue a chunk read from `source`
    pub async fn write_from(&self, source: Source, bytes: &[u8]) -> io::Result<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        self.tx
            .send((source, bytes.to_vec()))
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "log copier has stopped"))
    }

    pub async fn write_str(&self, text: &str) -> io::Result<()> {
        self.write(text.as_bytes()).await
    }

    /// Drain `reader` into the tee in bounded reads until EOF.
    ///
    /// Returns the number of bytes copied.
    pub async fn copy_from<R: AsyncRead + Unpin>(&self, reader: R) -> io::Result<u64> {
        self.copy_from_source(Source::Stdout, reader).await
    }

    /// Like [`LogTee::copy_from`], decoding `reader` separately from other sources
    pub async fn copy_from_source<R: AsyncRead + Unpin>(
        &self,
        source: Source,
        mut reader: R,
    ) -> io::Result<u64> {
        let mut buf = vec![0u8; CHUNK_SIZE];
        let mut total = 0u64;
        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                return Ok(total);
            }
            self.write_from(source, &buf[..n]).await?;
            total += n as u64;
        }
    }

    /// Close the sink and wait until everything written is on disk.
    ///
    /// Call this on every exit path; dropping a tee without finishing it
    /// leaves the copier to drain in the background.
    pub async fn finish(self) -> io::Result<()> {
        let LogTee { tx, copier, .. } = self;
        drop(tx);
        copier.await.map_err(io::Error::other)?
    }
}

async fn copy_until_closed(
    mut rx: mpsc::Receiver<(Source, Vec<u8>)>,
    mut file: Option<tokio::fs::File>,
    echo: bool,
) -> io::Result<()> {
    let mut decoders = [Utf8Decoder::default(), Utf8Decoder::default()];
    let mut console = tokio::io::stderr();

    while let Some((source, chunk)) = rx.recv().await {
        let text = decoders[source.index()].push(&chunk);
        emit(&text, file.as_mut(), &mut console, echo).await?;
    }
    for decoder in &mut decoders {
        let tail = decoder.finish();
        emit(&tail, file.as_mut(), &mut console, echo).await?;
    }

    if let Some(file) = file.as_mut() {
        file.flush().await?;
        file.sync_all().await?;
    }
    Ok(())
}

async fn emit(
    text: &str,
    file: Option<&mut tokio::fs::File>,
    console: &mut tokio::io::Stderr,
    echo: bool,
) -> io::Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    // Console output is best-effort; the file is what must be complete
    if echo {
        let _ = console.write_all(text.as_bytes()).await;
    }
    if let Some(file) = file {
        file.write_all(text.as_bytes()).await?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tee_tests.rs"]
mod tests;
