//! Queue-driven prompt worker.
//!
//! Runs the dispatcher inside its own task and talks to the input side through
//! channels: raw lines go in on a bounded command channel, handler output and
//! per-request outcomes come back on an unbounded response channel. The
//! dispatch core is unaware of this boundary.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::commands::{Dispatcher, OutputSink};
use crate::error::{PromptError, Result};
use crate::session::SessionSummary;

/// Capacity of the inbound command channel.
pub const COMMAND_CHANNEL_CAPACITY: usize = 32;

/// Unique identifier for a submitted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

impl RequestId {
    /// Generates a new unique request ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the inner u64 value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Commands sent from the input side to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    /// Process one raw input line.
    Input { id: RequestId, line: String },
    /// Stop the worker.
    Shutdown,
}

/// How a request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A handler (or the fallback) ran successfully.
    Dispatched,
    /// No handler matched; carries the user-facing message.
    NotFound(String),
    /// The handler failed; carries its error message.
    Failed(String),
}

/// Responses sent from the worker to the input side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerResponse {
    /// A line written by a handler while processing request `id`.
    Output { id: RequestId, line: String },
    /// Request `id` finished. `stopped` is set when it ended the session.
    Completed {
        id: RequestId,
        outcome: DispatchOutcome,
        stopped: bool,
    },
    /// The worker has exited.
    Stopped,
}

/// Output sink that forwards handler output onto the response channel,
/// tagged with the request currently being processed.
#[derive(Debug)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<WorkerResponse>,
    current: AtomicU64,
}

impl ChannelSink {
    /// Creates a sink and the receiving end of its response channel.
    pub fn channel() -> (Arc<Self>, mpsc::UnboundedReceiver<WorkerResponse>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let sink = Arc::new(Self {
            tx,
            current: AtomicU64::new(0),
        });
        (sink, rx)
    }

    fn begin(&self, id: RequestId) {
        self.current.store(id.as_u64(), Ordering::Relaxed);
    }

    fn current(&self) -> RequestId {
        RequestId(self.current.load(Ordering::Relaxed))
    }

    fn respond(&self, response: WorkerResponse) {
        if self.tx.send(response).is_err() {
            debug!("Response receiver dropped");
        }
    }
}

impl OutputSink for ChannelSink {
    fn write_line(&self, line: &str) -> std::io::Result<()> {
        self.tx
            .send(WorkerResponse::Output {
                id: self.current(),
                line: line.to_string(),
            })
            .map_err(|_| std::io::Error::new(std::io::ErrorKind::BrokenPipe, "response channel closed"))
    }
}

/// Task that owns the dispatcher and processes submitted lines in order.
pub struct PromptWorker {
    dispatcher: Dispatcher,
    receiver: mpsc::Receiver<WorkerCommand>,
    sink: Arc<ChannelSink>,
    stop: CancellationToken,
}

impl PromptWorker {
    /// Creates a worker and returns a handle for communication.
    ///
    /// The worker does nothing until [`PromptWorker::run`] is polled, typically
    /// via `tokio::spawn(worker.run())`.
    pub fn spawn(
        dispatcher: Dispatcher,
        sink: Arc<ChannelSink>,
        stop: CancellationToken,
    ) -> (WorkerHandle, Self) {
        let (sender, receiver) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);

        let worker = Self {
            dispatcher,
            receiver,
            sink,
            stop,
        };

        (WorkerHandle { sender }, worker)
    }

    /// Runs the worker loop until shutdown, a closed command channel, or a
    /// cancelled stop token.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                biased;

                _ = self.stop.cancelled() => break,

                cmd = self.receiver.recv() => match cmd {
                    Some(WorkerCommand::Input { id, line }) => self.handle_input(id, &line),
                    Some(WorkerCommand::Shutdown) | None => break,
                },
            }
        }

        info!("Prompt worker stopped");
        self.sink.respond(WorkerResponse::Stopped);
    }

    fn handle_input(&self, id: RequestId, line: &str) {
        debug!(request = %id, "Processing input");
        self.sink.begin(id);

        let outcome = match self.dispatcher.process(line) {
            Ok(()) => DispatchOutcome::Dispatched,
            Err(e @ PromptError::CommandNotFound { .. }) => DispatchOutcome::NotFound(e.to_string()),
            Err(e) => {
                warn!(request = %id, "Request failed: {e}");
                DispatchOutcome::Failed(e.to_string())
            }
        };

        self.sink.respond(WorkerResponse::Completed {
            id,
            outcome,
            stopped: self.stop.is_cancelled(),
        });
    }
}

/// Handle for communicating with the worker.
#[derive(Clone, Debug)]
pub struct WorkerHandle {
    sender: mpsc::Sender<WorkerCommand>,
}

impl WorkerHandle {
    /// Submits a raw line for processing and returns its request ID.
    pub async fn submit(&self, line: impl Into<String>) -> Result<RequestId> {
        let id = RequestId::new();
        self.sender
            .send(WorkerCommand::Input {
                id,
                line: line.into(),
            })
            .await
            .map_err(|_| PromptError::internal("Prompt worker closed"))?;
        Ok(id)
    }

    /// Signals the worker to stop.
    pub async fn shutdown(&self) -> Result<()> {
        self.sender
            .send(WorkerCommand::Shutdown)
            .await
            .map_err(|_| PromptError::internal("Prompt worker already closed"))
    }
}

/// Drives the input side of a queue session.
///
/// Reads lines from `input`, submits each to the worker, and writes the
/// worker's responses to `out` until the request completes. Ends when a request
/// stops the session, when the worker stops, or at end of input (which shuts
/// the worker down). A handler failure ends the session with an error.
pub async fn run_queue_session<R>(
    handle: &WorkerHandle,
    responses: &mut mpsc::UnboundedReceiver<WorkerResponse>,
    input: R,
    out: &dyn OutputSink,
    prompt: Option<&str>,
) -> Result<SessionSummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut summary = SessionSummary::default();
    let mut lines = input.lines();

    loop {
        if let Some(prompt) = prompt {
            out.write_prompt(prompt)?;
        }

        let Some(line) = lines.next_line().await? else {
            debug!("End of input, shutting down worker");
            // The worker may already be gone; nothing left to wait for then.
            if handle.shutdown().await.is_ok() {
                drain_until_stopped(responses, out).await?;
            }
            return Ok(summary);
        };
        summary.lines_read += 1;

        let id = handle.submit(line).await?;

        loop {
            match responses.recv().await {
                Some(WorkerResponse::Output { line, .. }) => out.write_line(&line)?,
                Some(WorkerResponse::Completed {
                    id: done,
                    outcome,
                    stopped,
                }) if done == id => {
                    match outcome {
                        DispatchOutcome::Dispatched => summary.dispatched += 1,
                        DispatchOutcome::NotFound(message) => {
                            summary.not_found += 1;
                            out.write_line(&message)?;
                        }
                        DispatchOutcome::Failed(error) => {
                            return Err(PromptError::Handler(anyhow::anyhow!(error)));
                        }
                    }
                    if stopped {
                        return Ok(summary);
                    }
                    break;
                }
                Some(WorkerResponse::Completed { .. }) => {}
                Some(WorkerResponse::Stopped) | None => return Ok(summary),
            }
        }
    }
}

/// Waits until the worker confirms it stopped, forwarding stray output.
async fn drain_until_stopped(
    responses: &mut mpsc::UnboundedReceiver<WorkerResponse>,
    out: &dyn OutputSink,
) -> Result<()> {
    while let Some(response) = responses.recv().await {
        match response {
            WorkerResponse::Output { line, .. } => out.write_line(&line)?,
            WorkerResponse::Stopped => break,
            WorkerResponse::Completed { .. } => {}
        }
    }
    Ok(())
}
