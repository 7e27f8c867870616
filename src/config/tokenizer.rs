//! Tokenizer configuration module.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Which tokenizer splits phrases and texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerKind {
    /// Split on Unicode whitespace
    Whitespace,

    /// Unicode word boundaries, punctuation as separate tokens
    #[default]
    UnicodeWord,

    /// Every match of a regular expression
    Regex,
}

/// Tokenizer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Tokenizer kind
    pub kind: TokenizerKind,

    /// Pattern for the regex tokenizer (None for the default pattern)
    pub pattern: Option<String>,
}

impl Validate for TokenizerConfig {
    fn validate(&self) -> ConfigResult<()> {
        let Some(pattern) = self.pattern.as_deref() else {
            return Ok(());
        };

        if self.kind != TokenizerKind::Regex {
            return Err(ConfigError::ValidationError(format!(
                "pattern is only used by the regex tokenizer, got kind {:?}",
                self.kind
            )));
        }

        regex::Regex::new(pattern)
            .map(|_| ())
            .map_err(|e| ConfigError::ValueOutOfRange {
                key: "tokenizer.pattern".to_string(),
                message: e.to_string(),
            })
    }
}
