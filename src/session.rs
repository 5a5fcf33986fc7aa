//! Direct read-eval loop.
//!
//! Reads lines from any `BufRead`, hands each to the [`Dispatcher`], and reports
//! unknown commands without stopping. The loop ends at end of input or once the
//! stop token is cancelled (normally by the `quit` handler).

use std::io::BufRead;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::commands::{Dispatcher, OutputSink};
use crate::error::{PromptError, Result};

/// Counters collected over one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Lines read from input.
    pub lines_read: usize,
    /// Lines processed without error, including lines handled by the
    /// fallback and blank lines skipped by the empty-input policy.
    pub dispatched: usize,
    /// Lines rejected with `CommandNotFound`.
    pub not_found: usize,
}

/// A prompt session bound to a dispatcher and an output sink.
pub struct Session<'a> {
    dispatcher: &'a Dispatcher,
    sink: Arc<dyn OutputSink>,
    stop: CancellationToken,
    prompt: Option<String>,
}

impl<'a> Session<'a> {
    /// Creates a session that writes `prompt` before every read.
    pub fn new(
        dispatcher: &'a Dispatcher,
        sink: Arc<dyn OutputSink>,
        stop: CancellationToken,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            dispatcher,
            sink,
            stop,
            prompt: Some(prompt.into()),
        }
    }

    /// Disables the prompt, e.g. when reading a script.
    pub fn without_prompt(mut self) -> Self {
        self.prompt = None;
        self
    }

    /// Runs the loop until end of input or until the stop token is cancelled.
    ///
    /// Unknown commands are written to the sink and the loop continues. Any
    /// other error ends the session and is returned to the caller.
    pub fn run<R: BufRead>(&self, mut input: R) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();
        let mut line = String::new();

        while !self.stop.is_cancelled() {
            if let Some(prompt) = &self.prompt {
                self.sink.write_prompt(prompt)?;
            }

            line.clear();
            if input.read_line(&mut line)? == 0 {
                debug!("End of input");
                break;
            }
            summary.lines_read += 1;

            let text = line.trim_end_matches(['\n', '\r']);
            match self.dispatcher.process(text) {
                Ok(()) => summary.dispatched += 1,
                Err(e @ PromptError::CommandNotFound { .. }) => {
                    summary.not_found += 1;
                    self.sink.write_line(&e.to_string())?;
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            lines = summary.lines_read,
            dispatched = summary.dispatched,
            not_found = summary.not_found,
            "Session finished"
        );
        Ok(summary)
    }
}
