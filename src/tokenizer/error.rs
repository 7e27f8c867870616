// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for tokenizers.

/// Errors that can occur while tokenizing text.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum TokenizerError {
    /// The configured pattern is not a valid regular expression
    #[error("Invalid tokenizer pattern: {0}")]
    InvalidPattern(String),

    /// A token has offsets outside the source text or reversed
    #[error("Token {index} has invalid offsets {start}..{end} for text of length {len}")]
    InvalidOffsets {
        /// Position of the token in the stream
        index: usize,
        /// Start offset of the token
        start: usize,
        /// End offset of the token
        end: usize,
        /// Length of the source text
        len: usize,
    },

    /// A token offset splits a multi-byte character
    #[error("Token {index} does not fall on character boundaries")]
    NotCharBoundary {
        /// Position of the token in the stream
        index: usize,
    },

    /// A token starts before its predecessor
    #[error("Token {index} starts before the previous token")]
    OutOfOrder {
        /// Position of the token in the stream
        index: usize,
    },

    /// Tokenization worker failed
    #[error("Tokenizer worker failed: {0}")]
    Worker(String),
}

/// Result type for tokenizer operations
pub type TokenizerResult<T> = std::result::Result<T, TokenizerError>;
