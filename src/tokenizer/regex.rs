// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Regex-based tokenizer implementation.

use std::sync::Arc;

use ::regex::Regex;
use once_cell::sync::Lazy;

use super::{Token, Tokenizer, TokenizerError, TokenizerResult};

/// Words, or single non-space symbols.
const DEFAULT_PATTERN: &str = r"\w+|[^\w\s]";

static DEFAULT_REGEX: Lazy<Arc<Regex>> = Lazy::new(|| {
    Arc::new(Regex::new(DEFAULT_PATTERN).expect("default tokenizer pattern is valid"))
});

/// A tokenizer emitting every match of a regular expression as a token.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    /// The regex pattern used to extract tokens
    pattern: Arc<Regex>,
}

impl RegexTokenizer {
    /// Create a new regex tokenizer with the default pattern `\w+|[^\w\s]`.
    pub fn new() -> Self {
        Self {
            pattern: Arc::clone(&DEFAULT_REGEX),
        }
    }

    /// Create a new regex tokenizer with a custom pattern.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizerError::InvalidPattern`] if the pattern does not compile.
    pub fn with_pattern(pattern: &str) -> TokenizerResult<Self> {
        let regex = Regex::new(pattern).map_err(|e| TokenizerError::InvalidPattern(e.to_string()))?;
        Ok(Self {
            pattern: Arc::new(regex),
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for RegexTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> TokenizerResult<Vec<Token>> {
        Ok(self
            .pattern
            .find_iter(text)
            .filter(|found| !found.as_str().is_empty())
            .map(|found| Token::new(found.as_str(), found.start(), found.end()))
            .collect())
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}
