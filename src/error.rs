//! Error types for cmd-prompt.
//!
//! Defines the error enum shared by the dispatch core and the surrounding
//! prompt glue.

use thiserror::Error;

/// Main error type for prompt operations.
#[derive(Error, Debug)]
pub enum PromptError {
    /// A command name was registered twice.
    #[error("Command \"{name}\" is already registered!")]
    DuplicateCommand { name: String },

    /// No handler and no fallback could resolve the command name.
    #[error("Command \"{name}\" is not registered!")]
    CommandNotFound { name: String },

    /// A handler body failed. Display and source are the handler's own.
    #[error(transparent)]
    Handler(#[from] anyhow::Error),

    /// Configuration errors (unreadable file, invalid TOML, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal or script I/O errors.
    #[error("I/O error: {0}")]
    Io(String),

    /// Internal application errors (closed channels, unexpected states, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PromptError {
    /// Creates a duplicate-command error for the given name.
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateCommand { name: name.into() }
    }

    /// Creates a command-not-found error for the given name.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::CommandNotFound { name: name.into() }
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an I/O error with the given message.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::DuplicateCommand { .. } => "Registration Error",
            Self::CommandNotFound { .. } => "Unknown Command",
            Self::Handler(_) => "Handler Error",
            Self::Config(_) => "Configuration Error",
            Self::Io(_) => "I/O Error",
            Self::Internal(_) => "Internal Error",
        }
    }

    /// Returns true if an input loop should report this error and keep reading.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::CommandNotFound { .. })
    }
}

impl From<std::io::Error> for PromptError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias using PromptError.
pub type Result<T> = std::result::Result<T, PromptError>;
