//! Built-in commands wired up by the prompt front ends (quit, echo, help).

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::dispatcher::Dispatcher;
use super::handler::{shared, Handler, HandlerResult};
use super::output::OutputSink;
use crate::error::Result;

/// Names bound to the quit handler.
pub const QUIT_NAMES: &[&str] = &["quit", "q"];

/// Name of the echo command.
pub const ECHO: &str = "echo";

/// Name of the help command.
pub const HELP: &str = "help";

/// Returns a handler that cancels `stop`. Arguments are ignored.
pub fn quit(stop: CancellationToken) -> impl Handler + 'static {
    move |_: &[String]| -> HandlerResult {
        stop.cancel();
        Ok(())
    }
}

/// Returns a handler that writes its arguments, space-separated, as one line.
pub fn echo(sink: Arc<dyn OutputSink>) -> impl Handler + 'static {
    move |args: &[String]| -> HandlerResult {
        sink.write_line(&args.join(" "))?;
        Ok(())
    }
}

/// Returns a handler that lists `names`.
pub fn help(names: Vec<String>, sink: Arc<dyn OutputSink>) -> impl Handler + 'static {
    move |_: &[String]| -> HandlerResult {
        sink.write_line("Available commands:")?;
        for name in &names {
            sink.write_line(&format!("  {name}"))?;
        }
        Ok(())
    }
}

/// Returns a fallback handler that points the user at `help`.
///
/// Expects the unresolved command name as its first argument.
pub fn unknown_command(sink: Arc<dyn OutputSink>) -> impl Handler + 'static {
    move |args: &[String]| -> HandlerResult {
        let name = args.first().map(String::as_str).unwrap_or_default();
        sink.write_line(&format!(
            "Unknown command \"{name}\". Type \"{HELP}\" for available commands."
        ))?;
        Ok(())
    }
}

/// Options for [`install_builtins`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuiltinOptions {
    /// Install [`unknown_command`] as the fallback handler.
    pub unknown_hint: bool,
}

/// Registers quit/q, echo and help on `dispatcher`.
///
/// `help` is registered last and lists the names bound at that point,
/// including itself. Fails if any of the names is already taken.
pub fn install_builtins(
    dispatcher: &mut Dispatcher,
    stop: &CancellationToken,
    sink: Arc<dyn OutputSink>,
    options: BuiltinOptions,
) -> Result<()> {
    let quit_handler = shared(quit(stop.clone()));
    for name in QUIT_NAMES {
        dispatcher.register_shared(name, Arc::clone(&quit_handler))?;
    }

    dispatcher.register(ECHO, echo(Arc::clone(&sink)))?;

    let mut names: Vec<String> = dispatcher
        .registry()
        .names()
        .into_iter()
        .map(str::to_string)
        .collect();
    names.push(HELP.to_string());
    names.sort_unstable();
    dispatcher.register(HELP, help(names, Arc::clone(&sink)))?;

    if options.unknown_hint {
        dispatcher.register_default(unknown_command(sink));
    }

    Ok(())
}
