//! cmd-prompt - an interactive command prompt built around a name-to-handler
//! dispatch core.
//!
//! The [`commands`] module holds the core (registry, tokenizer, dispatcher).
//! [`session`] and [`worker`] are the two front ends that feed it input lines.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod worker;
