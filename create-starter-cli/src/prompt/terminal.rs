//! Terminal prompter backed by `dialoguer`

use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use std::io;
use tracing::debug;

use super::{Prompter, TextPrompt};
use crate::error::{Result, ScaffoldError};

/// Prompts on stderr with the colorful theme
pub struct TerminalPrompter {
    theme: ColorfulTheme,
    term: Term,
}

impl TerminalPrompter {
    /// Create a prompter for the current terminal
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            term: Term::stderr(),
        }
    }

    /// Map Ctrl-C to `None` and keep other failures as errors
    fn interrupted<T>(&self, result: std::result::Result<Option<T>, dialoguer::Error>) -> Result<Option<T>> {
        match result {
            Ok(value) => {
                if value.is_none() {
                    self.restore_cursor();
                }
                Ok(value)
            }
            Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::Interrupted => {
                self.restore_cursor();
                Ok(None)
            }
            Err(e) => Err(ScaffoldError::Prompt(e)),
        }
    }

    fn restore_cursor(&self) {
        // dialoguer hides the cursor while a selection is open
        if let Err(e) = self.term.show_cursor() {
            debug!(error = %e, "failed to restore cursor");
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, prompt: TextPrompt<'_>) -> Result<Option<String>> {
        let mut input = Input::<String>::with_theme(&self.theme).with_prompt(prompt.message);
        if let Some(default) = prompt.default {
            input = input.default(default.to_string());
        }
        if let Some(initial) = prompt.initial {
            input = input.with_initial_text(initial);
        }
        if let Some(validate) = prompt.validate {
            input = input.validate_with(move |value: &String| validate(value));
        }
        let answer = input.interact_text_on(&self.term).map(Some);
        self.interrupted(answer)
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<Option<bool>> {
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(default)
            .interact_on_opt(&self.term);
        self.interrupted(answer)
    }

    fn select(&mut self, message: &str, items: &[String], default: usize) -> Result<Option<usize>> {
        let answer = Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(items)
            .default(default)
            .interact_on_opt(&self.term);
        self.interrupted(answer)
    }
}
