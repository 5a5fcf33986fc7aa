//! Command registration and dispatch for cmd-prompt.
//!
//! This module is the prompt's core: a registry of named handlers plus an
//! optional fallback, and a dispatcher that tokenizes input lines and fires the
//! matching handler. It has no knowledge of where input comes from.

pub mod builtins;
pub mod dispatcher;
pub mod handler;
pub mod output;
pub mod registry;
pub mod tokenizer;

pub use builtins::{install_builtins, BuiltinOptions};
pub use dispatcher::Dispatcher;
pub use handler::{shared, Handler, HandlerResult, SharedHandler};
pub use output::{MemorySink, OutputSink, StdoutSink};
pub use registry::{CommandRegistry, Resolution};
pub use tokenizer::{tokenize, EmptyInputPolicy};
