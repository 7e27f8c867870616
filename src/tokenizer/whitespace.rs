// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Whitespace tokenizer implementation.

use super::{Token, Tokenizer, TokenizerResult};

/// A tokenizer that splits text on Unicode whitespace.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> TokenizerResult<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut start = None;

        for (offset, ch) in text.char_indices() {
            match (ch.is_whitespace(), start) {
                (true, Some(begin)) => {
                    tokens.push(Token::from_slice(text, begin, offset));
                    start = None;
                }
                (false, None) => start = Some(offset),
                _ => {}
            }
        }
        if let Some(begin) = start {
            tokens.push(Token::from_slice(text, begin, text.len()));
        }

        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}
