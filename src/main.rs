//! cmd-prompt - example command console.

use std::fs::File;
use std::io::{self, BufReader};
use std::sync::Arc;

use cmd_prompt::cli::{Cli, InputSource, Mode};
use cmd_prompt::commands::{install_builtins, BuiltinOptions, Dispatcher, OutputSink, StdoutSink};
use cmd_prompt::config::Config;
use cmd_prompt::error::{PromptError, Result};
use cmd_prompt::logging;
use cmd_prompt::session::{Session, SessionSummary};
use cmd_prompt::worker::{run_queue_session, ChannelSink, PromptWorker, WorkerResponse};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse_args();

    if let Err(e) = run(&cli) {
        error!("{}: {}", e.category(), e);
        eprintln!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config_path = cli.config_path();
    let mut config = Config::load_from_file(&config_path)?;
    cli.apply_overrides(&mut config);

    if cli.log_stderr {
        logging::init_stderr_logging(&config.logging.level);
    } else {
        logging::init_file_logging(&config.logging.level);
    }
    info!("Loaded config from: {}", config_path.display());

    let prompt = cli.shows_prompt().then(|| config.prompt.text.clone());
    let options = BuiltinOptions {
        unknown_hint: config.prompt.unknown_hint,
    };
    let stop = CancellationToken::new();

    let summary = match cli.mode {
        Mode::Direct => {
            let out: Arc<dyn OutputSink> = Arc::new(StdoutSink);
            let mut dispatcher =
                Dispatcher::new().with_empty_input_policy(config.prompt.empty_input);
            install_builtins(&mut dispatcher, &stop, Arc::clone(&out), options)?;
            run_direct(cli, &dispatcher, out, stop, prompt)?
        }
        Mode::Queue => {
            let (sink, responses) = ChannelSink::channel();
            let mut dispatcher =
                Dispatcher::new().with_empty_input_policy(config.prompt.empty_input);
            install_builtins(&mut dispatcher, &stop, sink.clone(), options)?;

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_queue(cli, dispatcher, sink, responses, stop, prompt))?
        }
    };

    info!(
        lines = summary.lines_read,
        not_found = summary.not_found,
        "Exiting"
    );
    Ok(())
}

/// Runs the read-eval loop on the current thread.
fn run_direct(
    cli: &Cli,
    dispatcher: &Dispatcher,
    out: Arc<dyn OutputSink>,
    stop: CancellationToken,
    prompt: Option<String>,
) -> Result<SessionSummary> {
    let session = match prompt {
        Some(text) => Session::new(dispatcher, out, stop, text),
        None => Session::new(dispatcher, out, stop, "").without_prompt(),
    };

    match cli.input_source() {
        InputSource::Terminal | InputSource::Script(None) => session.run(io::stdin().lock()),
        InputSource::Script(Some(path)) => {
            let file = File::open(&path).map_err(|e| {
                PromptError::io(format!("Cannot open script {}: {e}", path.display()))
            })?;
            session.run(BufReader::new(file))
        }
    }
}

/// Runs the dispatcher in a worker task and feeds it lines from stdin or a script.
async fn run_queue(
    cli: &Cli,
    dispatcher: Dispatcher,
    sink: Arc<ChannelSink>,
    mut responses: mpsc::UnboundedReceiver<WorkerResponse>,
    stop: CancellationToken,
    prompt: Option<String>,
) -> Result<SessionSummary> {
    let (handle, worker) = PromptWorker::spawn(dispatcher, sink, stop);
    let worker_task = tokio::spawn(worker.run());
    let out = StdoutSink;

    let summary = match cli.input_source() {
        InputSource::Terminal | InputSource::Script(None) => {
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            run_queue_session(&handle, &mut responses, input, &out, prompt.as_deref()).await
        }
        InputSource::Script(Some(path)) => {
            let file = tokio::fs::File::open(&path).await.map_err(|e| {
                PromptError::io(format!("Cannot open script {}: {e}", path.display()))
            })?;
            let input = tokio::io::BufReader::new(file);
            run_queue_session(&handle, &mut responses, input, &out, prompt.as_deref()).await
        }
    };

    // The worker is already gone after quit or end of input; this only matters on error.
    let _ = handle.shutdown().await;
    worker_task
        .await
        .map_err(|e| PromptError::internal(format!("Prompt worker panicked: {e}")))?;

    summary
}
