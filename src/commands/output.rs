//! Transport-agnostic output sinks.
//!
//! Built-in handlers and the session loop write through an [`OutputSink`] so the
//! same handlers work against a terminal, an in-memory buffer, or a worker's
//! response channel.

use std::io::{self, Write};
use std::sync::Mutex;

/// Destination for lines produced by handlers and the prompt loop.
pub trait OutputSink: Send + Sync {
    /// Writes one complete line.
    fn write_line(&self, line: &str) -> io::Result<()>;

    /// Writes the prompt shown before reading input.
    ///
    /// Sinks without a notion of an open line record it as a regular line.
    fn write_prompt(&self, prompt: &str) -> io::Result<()> {
        self.write_line(prompt)
    }
}

/// Writes to the process's standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{line}")
    }

    fn write_prompt(&self, prompt: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        write!(out, "{prompt}")?;
        out.flush()
    }
}

/// Captures lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl OutputSink for MemorySink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(line.to_string());
        Ok(())
    }
}
