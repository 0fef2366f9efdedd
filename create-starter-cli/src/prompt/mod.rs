//! Interactive prompt flow
//!
//! The flow asks up to six questions in a fixed order. Each step carries an
//! activation predicate over the answers collected so far; inactive steps
//! are skipped and leave their field unset.
//!
//! Terminal access goes through the [`Prompter`] trait:
//! - [`TerminalPrompter`] talks to the user via `dialoguer`
//! - [`ScriptedPrompter`] replays canned answers in tests

pub mod flow;
pub mod scripted;
pub mod terminal;

pub use flow::{FlowOutcome, PartialConfig, PromptFlow, ResolvedConfig, Step};
pub use scripted::{AskedPrompt, ScriptedAnswer, ScriptedPrompter};
pub use terminal::TerminalPrompter;

use crate::error::Result;

/// Validates free-text input, returning the message to show on rejection
pub type Validator = fn(&str) -> std::result::Result<(), &'static str>;

/// A free-text question
#[derive(Debug, Clone, Copy)]
pub struct TextPrompt<'p> {
    /// Question shown to the user
    pub message: &'p str,
    /// Value used when the user submits an empty line
    pub default: Option<&'p str>,
    /// Editable text placed in the input before the user types
    pub initial: Option<&'p str>,
    /// Re-ask while this rejects the input
    pub validate: Option<Validator>,
}

impl<'p> TextPrompt<'p> {
    /// Question without default, initial text or validation
    #[must_use]
    pub const fn new(message: &'p str) -> Self {
        Self {
            message,
            default: None,
            initial: None,
            validate: None,
        }
    }

    /// Set the empty-input default
    #[must_use]
    pub const fn with_default(mut self, default: &'p str) -> Self {
        self.default = Some(default);
        self
    }

    /// Set the initial editable text
    #[must_use]
    pub const fn with_initial(mut self, initial: &'p str) -> Self {
        self.initial = Some(initial);
        self
    }

    /// Set the validator
    #[must_use]
    pub const fn with_validator(mut self, validate: Validator) -> Self {
        self.validate = Some(validate);
        self
    }
}

/// Asks the user questions
///
/// Every method returns `Ok(None)` when the user interrupts the prompt
/// (Esc, Ctrl-C). Errors are reserved for terminal failures. Validation
/// never surfaces here: [`Prompter::input`] keeps asking until the
/// validator accepts.
pub trait Prompter {
    /// Ask for free text
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read or written.
    fn input(&mut self, prompt: TextPrompt<'_>) -> Result<Option<String>>;

    /// Ask a yes/no question
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read or written.
    fn confirm(&mut self, message: &str, default: bool) -> Result<Option<bool>>;

    /// Ask the user to pick one of `items`, returning its index
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read or written.
    fn select(&mut self, message: &str, items: &[String], default: usize) -> Result<Option<usize>>;
}
