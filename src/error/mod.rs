//! Error module for Mauka Phrase.
//!
//! Each component owns a `thiserror` enum; [`MaukaError`] folds them together
//! for callers that drive several components at once.

use std::fmt::{Display, Formatter};
use thiserror::Error;

pub use crate::data_structures::kauai_phrase_trie::PhraseTrieError;
pub use crate::tokenizer::TokenizerError;

pub mod config;

pub use self::config::ConfigError;

/// Result type alias used throughout Mauka Phrase.
pub type MaukaResult<T> = Result<T, MaukaError>;

/// Core error enum for Mauka Phrase.
#[derive(Error, Debug)]
pub enum MaukaError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors raised by the phrase trie or automaton.
    #[error("Phrase trie error: {0}")]
    PhraseTrie(#[from] PhraseTrieError),

    /// Errors raised while tokenizing text.
    #[error("Tokenizer error: {0}")]
    Tokenizer(#[from] TokenizerError),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/Deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}

/// An error together with the component it came from.
#[derive(Debug)]
pub struct ErrorContext {
    /// The original error that occurred.
    pub error: MaukaError,

    /// The component where the error occurred.
    pub component: String,

    /// Additional context information to help with debugging.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Creates a new error context with the given error and component.
    ///
    /// # Arguments
    ///
    /// * `error` - The error that occurred
    /// * `component` - The component where the error occurred
    pub fn new<S: Into<String>>(error: impl Into<MaukaError>, component: S) -> Self {
        Self {
            error: error.into(),
            component: component.into(),
            details: None,
        }
    }

    /// Adds detail information to the error context.
    pub fn with_details<S: Into<String>>(mut self, details: S) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Emits this error as a `tracing` event.
    pub fn report(&self) {
        tracing::error!(
            error = %self.error,
            component = %self.component,
            details = self.details.as_deref().unwrap_or("None"),
            "Error reported"
        );
    }
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error in {}: {}", self.component, self.error)?;
        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }
        Ok(())
    }
}
