//! Destinations for finished lines.
//!
//! A sink receives one complete line per `log` call, without a trailing newline.
//! Errors it returns surface from `log` as [`LogError::SinkWrite`](super::LogError)
//! and are never retried. Any `Fn(&str) -> io::Result<()>` closure is a sink.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

pub trait Sink: Send + Sync {
    fn write_line(&self, line: &str) -> io::Result<()>;
}

impl<F> Sink for F
where
    F: Fn(&str) -> io::Result<()> + Send + Sync,
{
    fn write_line(&self, line: &str) -> io::Result<()> {
        self(line)
    }
}

/// Writes each line to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", line)
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> io::Error {
    io::Error::new(io::ErrorKind::Other, "sink mutex poisoned")
}

/// Newline-terminated lines into any `Write`, flushed after every line.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        WriterSink {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(poisoned)
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self.writer.lock().map_err(poisoned)?;
        writeln!(writer, "{}", line)?;
        writer.flush()
    }
}

pub type FileSink = WriterSink<File>;

impl WriterSink<File> {
    /// Open `path` for appending, creating it if needed.
    pub fn append(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(WriterSink::new(file))
    }
}

/// Keeps lines in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<String>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.lines.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn lines(&self) -> Vec<String> {
        self.guard().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.guard().last().cloned()
    }

    pub fn clear(&self) {
        self.guard().clear();
    }
}

impl Sink for MemorySink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        self.guard().push(line.to_string());
        Ok(())
    }
}
