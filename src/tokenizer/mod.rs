// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Tokenizers producing tokens with source offsets.
//!
//! The phrase automaton only consumes this contract: an ordered sequence of
//! [`Token`]s, each with its text and `[start_offset, end_offset)` in the
//! source string. Offsets are byte offsets on char boundaries, so
//! `&text[token.start_offset..token.end_offset]` is always valid.
//! [`CharOffsets`] turns them into the character offsets reported to users.
//!
//! # Available Tokenizers
//!
//! - [`WhitespaceTokenizer`] - Splits on Unicode whitespace
//! - [`UnicodeWordTokenizer`] - Unicode word boundaries, punctuation kept as tokens
//! - [`RegexTokenizer`] - Custom regex-based tokenization

mod error;
mod offsets;
mod regex;
mod unicode_word;
mod whitespace;

use serde::{Deserialize, Serialize};

use crate::config::tokenizer::{TokenizerConfig, TokenizerKind};

pub use self::error::{TokenizerError, TokenizerResult};
pub use self::offsets::CharOffsets;
pub use self::regex::RegexTokenizer;
pub use self::unicode_word::UnicodeWordTokenizer;
pub use self::whitespace::WhitespaceTokenizer;

/// A token and its location in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// The token text
    pub text: String,

    /// Byte offset where the token starts in the source text
    pub start_offset: usize,

    /// Byte offset where the token ends in the source text
    pub end_offset: usize,
}

impl Token {
    /// Creates a new token.
    pub fn new(text: impl Into<String>, start_offset: usize, end_offset: usize) -> Self {
        Self {
            text: text.into(),
            start_offset,
            end_offset,
        }
    }

    /// Creates a token for the slice `text[start..end]`.
    pub(crate) fn from_slice(text: &str, start: usize, end: usize) -> Self {
        Self::new(&text[start..end], start, end)
    }
}

/// Trait for tokenizers that split text into tokens.
///
/// Tokenizers are shared between threads by the phrase loader and the shared
/// searcher, hence the `Send + Sync` bound.
#[cfg_attr(test, mockall::automock)]
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text.
    ///
    /// # Arguments
    ///
    /// * `text` - The input text to tokenize
    ///
    /// # Returns
    ///
    /// The tokens in source order, or an error if tokenization fails.
    fn tokenize(&self, text: &str) -> TokenizerResult<Vec<Token>>;

    /// Name of this tokenizer, for logs.
    fn name(&self) -> &'static str;
}

/// Checks that tokens satisfy the tokenizer contract for `text`.
///
/// Every token must satisfy `start <= end <= text.len()`, sit on char
/// boundaries, and start no earlier than the previous token.
pub fn validate_tokens(text: &str, tokens: &[Token]) -> TokenizerResult<()> {
    let mut previous_start = 0;
    for (index, token) in tokens.iter().enumerate() {
        if token.start_offset > token.end_offset || token.end_offset > text.len() {
            return Err(TokenizerError::InvalidOffsets {
                index,
                start: token.start_offset,
                end: token.end_offset,
                len: text.len(),
            });
        }
        if !text.is_char_boundary(token.start_offset) || !text.is_char_boundary(token.end_offset) {
            return Err(TokenizerError::NotCharBoundary { index });
        }
        if token.start_offset < previous_start {
            return Err(TokenizerError::OutOfOrder { index });
        }
        previous_start = token.start_offset;
    }
    Ok(())
}

/// Builds the tokenizer described by the configuration.
pub fn build_tokenizer(config: &TokenizerConfig) -> TokenizerResult<Box<dyn Tokenizer>> {
    let tokenizer: Box<dyn Tokenizer> = match config.kind {
        TokenizerKind::Whitespace => Box::new(WhitespaceTokenizer::new()),
        TokenizerKind::UnicodeWord => Box::new(UnicodeWordTokenizer::new()),
        TokenizerKind::Regex => match config.pattern.as_deref() {
            Some(pattern) => Box::new(RegexTokenizer::with_pattern(pattern)?),
            None => Box::new(RegexTokenizer::new()),
        },
    };
    tracing::debug!(tokenizer = tokenizer.name(), "Tokenizer ready");
    Ok(tokenizer)
}
