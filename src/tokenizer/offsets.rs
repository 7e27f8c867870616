// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Byte to character offset conversion.
//!
//! Tokens carry byte offsets so that `&text[start..end]` is always the token.
//! Reported spans count characters instead; [`CharOffsets`] converts between
//! the two for one text.

/// Character positions of one text, indexed by byte offset.
#[derive(Debug, Clone, Default)]
pub struct CharOffsets {
    /// Byte offset of every char; `None` for ASCII text, where both units agree
    starts: Option<Vec<usize>>,
}

impl CharOffsets {
    /// Indexes the char boundaries of `text`.
    pub fn new(text: &str) -> Self {
        let starts = (!text.is_ascii()).then(|| text.char_indices().map(|(i, _)| i).collect());
        Self { starts }
    }

    /// Character offset of the char boundary at byte offset `byte`.
    ///
    /// `byte` equal to the text length maps to the number of chars.
    pub fn char_offset(&self, byte: usize) -> usize {
        match &self.starts {
            None => byte,
            Some(starts) => starts.partition_point(|&start| start < byte),
        }
    }

    /// Character span of the byte span `[start, end)`.
    pub fn char_span(&self, start: usize, end: usize) -> (usize, usize) {
        (self.char_offset(start), self.char_offset(end))
    }
}
