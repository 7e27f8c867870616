// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Unicode word boundary tokenizer.

use unicode_segmentation::UnicodeSegmentation;

use super::{Token, Tokenizer, TokenizerResult};

/// A tokenizer splitting on Unicode word boundaries (UAX #29).
///
/// Whitespace segments are dropped; punctuation is kept as separate tokens, so
/// `"Anti-Money Laundering Laws,"` becomes `Anti`, `-`, `Money`, `Laundering`,
/// `Laws`, `,`.
#[derive(Clone, Debug, Default)]
pub struct UnicodeWordTokenizer;

impl UnicodeWordTokenizer {
    /// Create a new Unicode word tokenizer.
    pub fn new() -> Self {
        UnicodeWordTokenizer
    }
}

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> TokenizerResult<Vec<Token>> {
        Ok(text
            .split_word_bound_indices()
            .filter(|(_, segment)| !segment.chars().all(char::is_whitespace))
            .map(|(start, segment)| Token::new(segment, start, start + segment.len()))
            .collect())
    }

    fn name(&self) -> &'static str {
        "unicode_word"
    }
}
