//! Interactive prompting.
//!
//! The init flow only talks to a [`Prompter`], so it can run against a real
//! terminal ([`TerminalPrompter`]) or a scripted sequence of answers in tests.

use std::io;

use console::Term;
use dialoguer::{Confirm, Input, Password, theme::ColorfulTheme};
use thiserror::Error;

use crate::output;

#[derive(Debug, Error)]
pub enum PromptError {
    /// Interrupted or end of input.
    #[error("prompt cancelled")]
    Cancelled,

    #[error("cannot prompt: not a terminal")]
    NotATerminal,

    #[error("terminal I/O error: {0}")]
    Io(#[source] io::Error),
}

impl From<io::Error> for PromptError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof => Self::Cancelled,
            io::ErrorKind::NotConnected => Self::NotATerminal,
            _ => Self::Io(err),
        }
    }
}

impl From<dialoguer::Error> for PromptError {
    fn from(err: dialoguer::Error) -> Self {
        match err {
            dialoguer::Error::IO(e) => e.into(),
        }
    }
}

pub type Validator = fn(&str) -> Result<(), String>;

/// A single-line question, with an optional default and validator.
pub struct InputPrompt<'a> {
    pub prompt: &'a str,
    pub default: Option<&'a str>,
    validator: Option<Validator>,
}

impl<'a> InputPrompt<'a> {
    pub fn new(prompt: &'a str) -> Self {
        Self {
            prompt,
            default: None,
            validator: None,
        }
    }

    pub fn with_default(mut self, default: &'a str) -> Self {
        self.default = Some(default);
        self
    }

    pub fn validate_with(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Run the validator, if any. The error is the inline re-prompt message.
    pub fn check(&self, value: &str) -> Result<(), String> {
        match self.validator {
            Some(validate) => validate(value),
            None => Ok(()),
        }
    }
}

/// Everything the init flow needs from a terminal.
///
/// Implementations re-ask `input` questions until the validator passes;
/// a validation failure is never returned as an error.
pub trait Prompter {
    fn input(&self, request: &InputPrompt<'_>) -> Result<String, PromptError>;

    /// Obscured input.
    fn password(&self, prompt: &str) -> Result<String, PromptError>;

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, PromptError>;

    fn println(&self, message: &str);

    fn warn(&self, message: &str);
}

pub struct TerminalPrompter {
    term: Term,
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&self, request: &InputPrompt<'_>) -> Result<String, PromptError> {
        let mut input = Input::<String>::with_theme(&self.theme).with_prompt(request.prompt);
        if let Some(default) = request.default {
            input = input.default(default.to_string());
        }

        let value = input
            .validate_with(|value: &String| request.check(value.trim()))
            .interact_text_on(&self.term)?;

        Ok(value.trim().to_string())
    }

    fn password(&self, prompt: &str) -> Result<String, PromptError> {
        Ok(Password::with_theme(&self.theme)
            .with_prompt(prompt)
            .interact_on(&self.term)?)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, PromptError> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_on(&self.term)?)
    }

    fn println(&self, message: &str) {
        println!("{message}");
    }

    fn warn(&self, message: &str) {
        output::warn(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_prompt_without_validator_accepts_anything() {
        let prompt = InputPrompt::new("Anything");
        assert!(prompt.check("").is_ok());
        assert!(prompt.default.is_none());
    }

    #[test]
    fn test_input_prompt_runs_validator() {
        let validate = |s: &str| {
            if s == "ok" {
                Ok(())
            } else {
                Err("nope".to_string())
            }
        };
        let prompt = InputPrompt::new("Value")
            .with_default("ok")
            .validate_with(validate);

        assert_eq!(prompt.default, Some("ok"));
        assert!(prompt.check("ok").is_ok());
        assert_eq!(prompt.check("ko").unwrap_err(), "nope");
    }

    #[test]
    fn test_io_error_classification() {
        let eof = io::Error::new(io::ErrorKind::UnexpectedEof, "eof");
        assert!(matches!(PromptError::from(eof), PromptError::Cancelled));

        let interrupted = io::Error::new(io::ErrorKind::Interrupted, "ctrl-c");
        assert!(matches!(
            PromptError::from(interrupted),
            PromptError::Cancelled
        ));

        let not_tty = io::Error::new(io::ErrorKind::NotConnected, "not a terminal");
        assert!(matches!(
            PromptError::from(not_tty),
            PromptError::NotATerminal
        ));

        let other = io::Error::other("boom");
        assert!(matches!(PromptError::from(other), PromptError::Io(_)));
    }
}
