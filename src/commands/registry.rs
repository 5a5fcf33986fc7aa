//! Command registry: stores name-to-handler bindings and the fallback handler.
//!
//! Names are matched exactly and case-sensitively. A name can be bound only
//! once; the fallback can be replaced at any time.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::handler::{shared, Handler, SharedHandler};
use crate::error::{PromptError, Result};

/// Outcome of resolving a command name.
#[derive(Clone)]
pub enum Resolution {
    /// The name is bound to this handler.
    Command(SharedHandler),
    /// The name is unbound; the fallback handler takes over.
    Fallback(SharedHandler),
}

impl Resolution {
    /// Returns the resolved handler regardless of how it was found.
    pub fn handler(&self) -> &SharedHandler {
        match self {
            Self::Command(handler) | Self::Fallback(handler) => handler,
        }
    }

    /// Returns true if resolution went to the fallback handler.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

impl std::fmt::Debug for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Command(_) => f.write_str("Resolution::Command"),
            Self::Fallback(_) => f.write_str("Resolution::Fallback"),
        }
    }
}

/// Registry of command handlers keyed by name, plus an optional fallback.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, SharedHandler>,
    default: Option<SharedHandler>,
}

impl CommandRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `handler` to `name`.
    ///
    /// Fails with [`PromptError::DuplicateCommand`] if `name` is already bound;
    /// the existing binding is left untouched.
    pub fn register<H: Handler + 'static>(&mut self, name: &str, handler: H) -> Result<()> {
        self.register_shared(name, shared(handler))
    }

    /// Binds an already shared handler to `name`, e.g. to alias one handler
    /// under several names.
    pub fn register_shared(&mut self, name: &str, handler: SharedHandler) -> Result<()> {
        if self.commands.contains_key(name) {
            return Err(PromptError::duplicate(name));
        }
        debug!(command = name, "Registered command");
        self.commands.insert(name.to_string(), handler);
        Ok(())
    }

    /// Sets the fallback handler, replacing any previous one.
    pub fn register_default<H: Handler + 'static>(&mut self, handler: H) {
        self.register_default_shared(shared(handler));
    }

    /// Sets an already shared fallback handler, replacing any previous one.
    pub fn register_default_shared(&mut self, handler: SharedHandler) {
        if self.default.is_some() {
            debug!("Replacing default handler");
        }
        self.default = Some(handler);
    }

    /// Resolves `name` to its handler, or to the fallback if one is set.
    pub fn resolve(&self, name: &str) -> Result<Resolution> {
        if let Some(handler) = self.commands.get(name) {
            return Ok(Resolution::Command(Arc::clone(handler)));
        }
        match &self.default {
            Some(fallback) => Ok(Resolution::Fallback(Arc::clone(fallback))),
            None => Err(PromptError::not_found(name)),
        }
    }

    /// Returns true if `name` has a direct binding.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Returns true if a fallback handler is set.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Returns all bound names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of bound names (the fallback is not counted).
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if no names are bound.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.names())
            .field("has_default", &self.has_default())
            .finish()
    }
}
