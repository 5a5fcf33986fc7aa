//! Tokenizer for prompt input.
//!
//! Splits an input line on runs of whitespace. There is no quoting or escaping:
//! every token is passed to handlers exactly as typed.

use serde::{Deserialize, Serialize};

/// How a blank (empty or whitespace-only) input line is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyInputPolicy {
    /// Dispatch the empty string as a command name, reaching the fallback or
    /// failing with `CommandNotFound`.
    #[default]
    Dispatch,
    /// Do nothing.
    Ignore,
}

impl std::str::FromStr for EmptyInputPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dispatch" => Ok(Self::Dispatch),
            "ignore" => Ok(Self::Ignore),
            _ => Err(format!(
                "Invalid empty input policy: {s}. Expected: dispatch or ignore"
            )),
        }
    }
}

/// Splits `input` into whitespace-delimited tokens.
///
/// A blank line yields `[""]` under [`EmptyInputPolicy::Dispatch`] and no
/// tokens under [`EmptyInputPolicy::Ignore`].
pub fn tokenize(input: &str, policy: EmptyInputPolicy) -> Vec<String> {
    let tokens: Vec<String> = input.split_whitespace().map(str::to_string).collect();

    if tokens.is_empty() && policy == EmptyInputPolicy::Dispatch {
        return vec![String::new()];
    }

    tokens
}
