//! Command-line argument parsing for cmd-prompt.

use crate::commands::EmptyInputPolicy;
use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// Where the dispatcher runs relative to the input loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Read and dispatch on the same thread.
    #[default]
    Direct,
    /// Dispatch inside a worker task fed through channels.
    Queue,
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "queue" => Ok(Self::Queue),
            _ => Err(format!("Invalid mode: {s}. Expected: direct or queue")),
        }
    }
}

/// Where input lines come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Interactive terminal on stdin.
    Terminal,
    /// A script file, or stdin when the path is `-`.
    Script(Option<PathBuf>),
}

/// Example command console.
#[derive(Parser, Debug)]
#[command(name = "cmdprompt")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Dispatch mode: direct or queue
    #[arg(long, value_name = "MODE", default_value = "direct")]
    pub mode: Mode,

    /// Read commands from a file instead of the terminal (use "-" for stdin)
    #[arg(long, value_name = "PATH")]
    pub script: Option<String>,

    /// Prompt text (overrides the config file)
    #[arg(long, value_name = "TEXT")]
    pub prompt: Option<String>,

    /// Do not print a prompt before each line
    #[arg(long)]
    pub no_prompt: bool,

    /// Treat blank lines as no-ops instead of dispatching the empty command
    #[arg(long)]
    pub ignore_empty: bool,

    /// Answer unknown commands with a hint instead of an error
    #[arg(long)]
    pub unknown_hint: bool,

    /// Config file path
    #[arg(long, value_name = "PATH", env = "CMD_PROMPT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log to stderr instead of the log file
    #[arg(long)]
    pub log_stderr: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path (from CLI, environment, or default).
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Returns where input lines come from.
    pub fn input_source(&self) -> InputSource {
        match self.script.as_deref() {
            None => InputSource::Terminal,
            Some("-") => InputSource::Script(None),
            Some(path) => InputSource::Script(Some(PathBuf::from(path))),
        }
    }

    /// Applies CLI overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(prompt) = &self.prompt {
            config.prompt.text = prompt.clone();
        }
        if self.ignore_empty {
            config.prompt.empty_input = EmptyInputPolicy::Ignore;
        }
        if self.unknown_hint {
            config.prompt.unknown_hint = true;
        }
    }

    /// Returns true if a prompt should be written before each read.
    ///
    /// Scripts run without a prompt.
    pub fn shows_prompt(&self) -> bool {
        !self.no_prompt && self.input_source() == InputSource::Terminal
    }
}
