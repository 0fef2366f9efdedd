//! Scripted prompter for tests
//!
//! Replays a queue of answers and records every question it was asked.

use std::collections::VecDeque;

use super::{Prompter, TextPrompt};
use crate::error::Result;

/// A canned answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedAnswer {
    /// Line submitted to a text prompt (empty means "use the default")
    Text(String),
    /// Answer to a confirmation
    Confirm(bool),
    /// Index picked in a selection
    Select(usize),
    /// Esc / Ctrl-C
    Interrupt,
}

/// A question the prompter was asked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskedPrompt {
    /// Question text
    pub message: String,
    /// Choices offered by a selection
    pub items: Vec<String>,
    /// Initial text of a text prompt
    pub initial: Option<String>,
}

/// Prompter answering from a fixed script
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<ScriptedAnswer>,
    asked: Vec<AskedPrompt>,
    rejections: Vec<String>,
}

impl ScriptedPrompter {
    /// Create a prompter that replays `answers` in order
    #[must_use]
    pub fn new(answers: Vec<ScriptedAnswer>) -> Self {
        Self {
            answers: answers.into(),
            ..Self::default()
        }
    }

    /// Questions asked so far, in order
    #[must_use]
    pub fn asked(&self) -> &[AskedPrompt] {
        &self.asked
    }

    /// Validator messages produced by rejected text answers
    #[must_use]
    pub fn rejections(&self) -> &[String] {
        &self.rejections
    }

    /// Whether every scripted answer was consumed
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.answers.is_empty()
    }

    fn record(&mut self, message: &str, items: &[String], initial: Option<&str>) {
        self.asked.push(AskedPrompt {
            message: message.to_string(),
            items: items.to_vec(),
            initial: initial.map(ToString::to_string),
        });
    }

    fn next(&mut self, message: &str) -> ScriptedAnswer {
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer left for prompt: {message}"))
    }
}

impl Prompter for ScriptedPrompter {
    /// # Panics
    ///
    /// Panics when the script runs out or holds a non-text answer.
    fn input(&mut self, prompt: TextPrompt<'_>) -> Result<Option<String>> {
        self.record(prompt.message, &[], prompt.initial);
        loop {
            let value = match self.next(prompt.message) {
                ScriptedAnswer::Interrupt => return Ok(None),
                ScriptedAnswer::Text(text) if text.is_empty() => prompt
                    .default
                    .or(prompt.initial)
                    .unwrap_or_default()
                    .to_string(),
                ScriptedAnswer::Text(text) => text,
                other => panic!("expected text answer for {:?}, got {other:?}", prompt.message),
            };
            match prompt.validate.map_or(Ok(()), |validate| validate(&value)) {
                Ok(()) => return Ok(Some(value)),
                Err(message) => self.rejections.push(message.to_string()),
            }
        }
    }

    fn confirm(&mut self, message: &str, _default: bool) -> Result<Option<bool>> {
        self.record(message, &[], None);
        match self.next(message) {
            ScriptedAnswer::Confirm(answer) => Ok(Some(answer)),
            ScriptedAnswer::Interrupt => Ok(None),
            other => panic!("expected confirm answer for {message:?}, got {other:?}"),
        }
    }

    fn select(&mut self, message: &str, items: &[String], _default: usize) -> Result<Option<usize>> {
        self.record(message, items, None);
        match self.next(message) {
            ScriptedAnswer::Select(index) => Ok(Some(index)),
            ScriptedAnswer::Interrupt => Ok(None),
            other => panic!("expected select answer for {message:?}, got {other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_uses_default() {
        let mut prompter = ScriptedPrompter::new(vec![ScriptedAnswer::Text(String::new())]);
        let value = prompter
            .input(TextPrompt::new("Project name").with_default("vite-project"))
            .unwrap();
        assert_eq!(value.as_deref(), Some("vite-project"));
    }

    #[test]
    fn test_interrupt_returns_none() {
        let mut prompter = ScriptedPrompter::new(vec![ScriptedAnswer::Interrupt]);
        assert_eq!(prompter.confirm("Continue?", false).unwrap(), None);
        assert!(prompter.is_exhausted());
    }

    #[test]
    fn test_records_select_items() {
        let mut prompter = ScriptedPrompter::new(vec![ScriptedAnswer::Select(1)]);
        let items = vec!["a".to_string(), "b".to_string()];
        assert_eq!(prompter.select("Pick", &items, 0).unwrap(), Some(1));
        assert_eq!(prompter.asked()[0].items, items);
    }

    #[test]
    #[should_panic(expected = "no scripted answer left")]
    fn test_exhausted_script_panics() {
        let mut prompter = ScriptedPrompter::default();
        let _ = prompter.confirm("Continue?", false);
    }
}
