//! Input dispatch for the prompt.
//!
//! Turns a raw input line into a handler invocation: tokenize, resolve the first
//! token against the registry, and call the handler with the remaining tokens.

use tracing::{debug, warn};

use super::handler::{Handler, SharedHandler};
use super::registry::{CommandRegistry, Resolution};
use super::tokenizer::{tokenize, EmptyInputPolicy};
use crate::error::{PromptError, Result};

/// Resolves input lines against a [`CommandRegistry`] and fires handlers.
#[derive(Debug, Default)]
pub struct Dispatcher {
    registry: CommandRegistry,
    empty_input: EmptyInputPolicy,
}

impl Dispatcher {
    /// Creates a dispatcher with an empty registry and the default empty-input policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dispatcher around an existing registry.
    pub fn with_registry(registry: CommandRegistry) -> Self {
        Self {
            registry,
            empty_input: EmptyInputPolicy::default(),
        }
    }

    /// Sets how blank input lines are treated.
    pub fn with_empty_input_policy(mut self, policy: EmptyInputPolicy) -> Self {
        self.empty_input = policy;
        self
    }

    /// Returns the configured empty-input policy.
    pub fn empty_input_policy(&self) -> EmptyInputPolicy {
        self.empty_input
    }

    /// Returns the underlying registry.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Binds `handler` to `name`. See [`CommandRegistry::register`].
    pub fn register<H: Handler + 'static>(&mut self, name: &str, handler: H) -> Result<()> {
        self.registry.register(name, handler)
    }

    /// Binds a shared handler to `name`. See [`CommandRegistry::register_shared`].
    pub fn register_shared(&mut self, name: &str, handler: SharedHandler) -> Result<()> {
        self.registry.register_shared(name, handler)
    }

    /// Sets or replaces the fallback handler.
    pub fn register_default<H: Handler + 'static>(&mut self, handler: H) {
        self.registry.register_default(handler);
    }

    /// Splits an input line into tokens using this dispatcher's empty-input policy.
    pub fn tokenize(&self, input: &str) -> Vec<String> {
        tokenize(input, self.empty_input)
    }

    /// Processes one line of input.
    ///
    /// The first token is the command name and the rest are its arguments. A
    /// line that tokenizes to nothing is a no-op.
    pub fn process(&self, input: &str) -> Result<()> {
        let tokens = self.tokenize(input);
        match tokens.split_first() {
            Some((name, args)) => self.fire(name, args),
            None => {
                debug!("Ignoring blank input");
                Ok(())
            }
        }
    }

    /// Fires the command `name` with `args`.
    ///
    /// A bound handler receives `args` unchanged. Otherwise the fallback, if
    /// any, receives `name` followed by `args`. Handler failures are returned
    /// as [`PromptError::Handler`] without further wrapping.
    pub fn fire(&self, name: &str, args: &[String]) -> Result<()> {
        let outcome = match self.registry.resolve(name)? {
            Resolution::Command(handler) => {
                debug!(command = name, args = ?args, "Dispatching command");
                handler.call(args)
            }
            Resolution::Fallback(handler) => {
                debug!(command = name, args = ?args, "Dispatching to default handler");
                let mut forwarded = Vec::with_capacity(args.len() + 1);
                forwarded.push(name.to_string());
                forwarded.extend_from_slice(args);
                handler.call(&forwarded)
            }
        };

        outcome.map_err(|e| {
            warn!(command = name, "Handler failed: {e:#}");
            PromptError::Handler(e)
        })
    }
}
